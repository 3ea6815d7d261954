// src/application/notices.rs
//
// Console notices
//
// Turns domain events into one-line messages for the front end.
// The sink decides where the lines go.

use std::sync::Arc;

use crate::events::{
    ArchiveEntryFailed, ArchiveEntryWritten, DomainEvent, EventBus, MatchRunCompleted,
    RecordResolved, RecordUnmatched, RecordUpdateFailed, RecordUpdated,
};

pub type NoticeSink = Arc<dyn Fn(String) + Send + Sync>;

fn short_id(event: &impl DomainEvent) -> String {
    event.event_id().simple().to_string()[..8].to_string()
}

/// Kept and failed archive entries. Written entries are covered by the
/// progress callback; quiet jobs emit none of these.
pub fn subscribe_extraction_notices(bus: &EventBus, sink: NoticeSink) {
    let on_kept = Arc::clone(&sink);
    bus.subscribe::<ArchiveEntryWritten, _>(move |event| {
        if !event.written {
            on_kept(format!(
                "[{}/{}] Kept existing {}",
                event.done, event.total, event.path
            ));
        }
    });

    bus.subscribe::<ArchiveEntryFailed, _>(move |event| {
        sink(format!(
            "[{}/{}] Failed {}: {}",
            event.done, event.total, event.entry_name, event.reason
        ));
    });
}

/// Update failures always; per-record resolution lines when `verbose`.
///
/// Resolution ids are derived from the payload, so two dry runs over the
/// same folder print identical lines.
pub fn subscribe_match_notices(bus: &EventBus, verbose: bool, sink: NoticeSink) {
    let on_failed = Arc::clone(&sink);
    bus.subscribe::<RecordUpdateFailed, _>(move |event| {
        on_failed(format!(
            "Could not update '{}': {}",
            event.record_name, event.reason
        ));
    });

    if !verbose {
        return;
    }

    let on_resolved = Arc::clone(&sink);
    bus.subscribe::<RecordResolved, _>(move |event| {
        on_resolved(format!(
            "[{}] {} → {} via {}",
            short_id(event),
            event.record_name,
            event.path,
            event.tier
        ));
    });

    let on_unmatched = Arc::clone(&sink);
    bus.subscribe::<RecordUnmatched, _>(move |event| {
        on_unmatched(format!(
            "[{}] {}: tried {} keys",
            short_id(event),
            event.record_name,
            event.candidates.len()
        ));
    });

    let on_updated = Arc::clone(&sink);
    bus.subscribe::<RecordUpdated, _>(move |event| match event.imported_as {
        Some(copy) => on_updated(format!(
            "Imported '{}' as {} → {}",
            event.record_name, copy, event.image_path
        )),
        None => on_updated(format!("Updated '{}' → {}", event.record_name, event.image_path)),
    });

    bus.subscribe::<MatchRunCompleted, _>(move |event| {
        sink(format!(
            "[{}] {} run over '{}' finished",
            short_id(event),
            event.mode,
            event.folder
        ));
    });
}
