//! CRI frontmatter reading.
//!
//! A document may open with a YAML block carrying question/answer pairs keyed
//! by section slug:
//!
//! ```markdown
//! ---
//! cri:
//!   - slug: intro
//!     question: What is X?
//!     answer: X is Y.
//! ---
//!
//! ## Intro {#intro}
//! ```
//!
//! The reader splits the block from the body before parsing, so the Markdown
//! parser never sees it.
//!
//! # Usage
//!
//! ```rust
//! use chunkmark_content::markdown::frontmatter::extract_frontmatter;
//!
//! let content = "---\ncri:\n  - slug: intro\n    question: Q\n    answer: A\n---\n## Intro";
//! let result = extract_frontmatter(content);
//! assert!(result.has_frontmatter());
//! assert_eq!(result.body(), "## Intro");
//!
//! let table = result.cri_table().unwrap().unwrap();
//! assert_eq!(table.get("intro").unwrap().answer, "A");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

use chunkmark_core::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

static FRONTMATTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
        .expect("valid frontmatter regex")
});

/// How a frontmatter block that cannot be read is handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontmatterPolicy {
    /// Log a warning and continue without a table.
    #[default]
    Lenient,
    /// Fail the document.
    Strict,
}

/// One question/answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
}

#[derive(Debug, Deserialize)]
struct CriEntry {
    #[serde(deserialize_with = "scalar_text")]
    slug: String,
    #[serde(deserialize_with = "scalar_text")]
    question: String,
    #[serde(deserialize_with = "scalar_text")]
    answer: String,
}

/// Accept any YAML scalar as text, so `answer: 1984` reads as `"1984"`.
fn scalar_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error as _;

    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Err(D::Error::custom("expected a value, found null")),
        Value::Tagged(tagged) => match tagged.value {
            Value::String(s) => Ok(s),
            _ => Err(D::Error::custom("expected a plain scalar")),
        },
        Value::Sequence(_) | Value::Mapping(_) => Err(D::Error::custom("expected a plain scalar")),
    }
}

#[derive(Debug, Deserialize)]
struct Frontmatter {
    #[serde(default)]
    cri: Vec<CriEntry>,
}

/// Slug to question/answer lookup built from one document's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriTable(HashMap<String, QuestionAnswer>);

impl CriTable {
    /// Look up the pair for a slug.
    pub fn get(&self, slug: &str) -> Option<&QuestionAnswer> {
        self.0.get(slug)
    }

    /// Number of slugs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All slugs, sorted.
    pub fn slugs(&self) -> Vec<&str> {
        let mut slugs: Vec<&str> = self.0.keys().map(String::as_str).collect();
        slugs.sort_unstable();
        slugs
    }
}

impl<S: Into<String>> FromIterator<(S, QuestionAnswer)> for CriTable {
    fn from_iter<I: IntoIterator<Item = (S, QuestionAnswer)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Result of splitting frontmatter from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontmatterResult<'a> {
    block: Option<&'a str>,
    body: &'a str,
}

impl<'a> FrontmatterResult<'a> {
    /// Whether the document opened with a delimited block.
    pub fn has_frontmatter(&self) -> bool {
        self.block.is_some()
    }

    /// The raw YAML between the delimiters, if present.
    pub fn block(&self) -> Option<&'a str> {
        self.block
    }

    /// Everything after the closing delimiter, or the whole input when there
    /// is no block.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Build the CRI table from the block.
    ///
    /// Returns `Ok(None)` when there is no block. A block with no `cri` key,
    /// or an empty block, gives an empty table. Numbers and booleans are read
    /// as their text. Unparseable YAML, and entries whose `slug`, `question`
    /// or `answer` is missing or not a scalar, are
    /// [`Error::MalformedFrontmatter`]. When a slug repeats, the last entry
    /// wins.
    pub fn cri_table(&self) -> Result<Option<CriTable>> {
        let Some(block) = self.block else {
            return Ok(None);
        };

        let value: Value = serde_yaml::from_str(block)
            .map_err(|e| Error::malformed_frontmatter(format!("invalid YAML: {e}")))?;
        if value.is_null() {
            return Ok(Some(CriTable::default()));
        }

        let frontmatter: Frontmatter = serde_yaml::from_value(value)
            .map_err(|e| Error::malformed_frontmatter(format!("invalid cri entries: {e}")))?;

        let table = frontmatter
            .cri
            .into_iter()
            .map(|entry| {
                (
                    entry.slug,
                    QuestionAnswer {
                        question: entry.question,
                        answer: entry.answer,
                    },
                )
            })
            .collect();
        Ok(Some(table))
    }
}

/// Split a leading `---` delimited block from the rest of the document.
pub fn extract_frontmatter(content: &str) -> FrontmatterResult<'_> {
    match FRONTMATTER.captures(content) {
        Some(caps) => {
            let end = caps.get(0).map_or(0, |m| m.end());
            FrontmatterResult {
                block: Some(caps.get(1).map_or("", |m| m.as_str())),
                body: &content[end..],
            }
        }
        None => FrontmatterResult {
            block: None,
            body: content,
        },
    }
}

/// Read the CRI table under a policy.
///
/// Lenient reading logs a warning and yields no table when the block is
/// malformed; strict reading returns the error.
pub fn read_cri_table(
    result: &FrontmatterResult<'_>,
    policy: FrontmatterPolicy,
) -> Result<Option<CriTable>> {
    match result.cri_table() {
        Ok(table) => Ok(table),
        Err(e) => match policy {
            FrontmatterPolicy::Strict => Err(e),
            FrontmatterPolicy::Lenient => {
                log::warn!("Ignoring frontmatter: {e}");
                Ok(None)
            }
        },
    }
}
