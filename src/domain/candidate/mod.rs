pub mod entity;

pub use entity::{CandidateIndex, CandidatePath, ExtensionFilter, DEFAULT_EXTENSIONS};
