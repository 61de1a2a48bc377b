//! Transforms over the converted HTML tree.

pub mod cri;
pub mod sections;

pub use cri::{JoinReport, QUESTION_TAG, attach_questions};
pub use sections::{ChunkSummary, SECTION_CLASS, summarize, wrap_sections};
