use super::entity::Record;
use crate::domain::{DomainError, DomainResult};

/// Validates all Record invariants
pub fn validate_record(record: &Record) -> DomainResult<()> {
    validate_name(&record.name)?;
    validate_import_link(record)?;
    Ok(())
}

/// Name cannot be blank; it is the primary matching key
fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Record name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Imported copies live in the primary store and never point at themselves
fn validate_import_link(record: &Record) -> DomainResult<()> {
    if let Some(source) = record.source_id {
        if source == record.id {
            return Err(DomainError::InvariantViolation(
                "Record cannot be imported from itself".to_string(),
            ));
        }
        if record.collection_id.is_some() {
            return Err(DomainError::InvariantViolation(format!(
                "Imported record {} must not belong to a collection",
                record.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::ImageSlot;
    use uuid::Uuid;

    #[test]
    fn test_valid_record() {
        let record = Record::new(Some(Uuid::new_v4()), "Goblin".into(), ImageSlot::Empty);
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        let record = Record::new(None, "   ".into(), ImageSlot::Empty);
        let result = validate_record(&record);

        if let Err(DomainError::InvariantViolation(msg)) = result {
            assert!(msg.contains("cannot be empty"));
        } else {
            panic!("Expected InvariantViolation error");
        }
    }

    #[test]
    fn test_imported_copy_inside_collection_fails() {
        let original = Record::new(Some(Uuid::new_v4()), "Witch".into(), ImageSlot::Empty);
        let mut copy = original.imported_copy();
        copy.collection_id = original.collection_id;
        assert!(validate_record(&copy).is_err());
    }
}
