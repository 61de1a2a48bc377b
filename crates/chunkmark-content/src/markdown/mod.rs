//! Markdown source handling: parsing, heading attributes, frontmatter.

pub mod ast;
pub mod attributes;
pub mod frontmatter;
pub mod parser;

pub use ast::{Align, MdKind, MdNode};
pub use attributes::{HeadingAttributes, apply_heading_attributes, extract_heading_attributes};
pub use frontmatter::{
    CriTable, FrontmatterPolicy, FrontmatterResult, QuestionAnswer, extract_frontmatter,
    read_cri_table,
};
pub use parser::{ParseOptions, parse};
