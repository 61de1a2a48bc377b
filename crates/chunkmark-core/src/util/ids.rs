//! Identifier and slug utilities.
//!
//! Headings become section keys, so their identifiers need to be stable and
//! URL-safe. These helpers normalize free text into slugs and keep slugs
//! unique within one document.

use std::collections::HashMap;

/// Generate a GitHub-style slug from heading text.
///
/// Letters and digits are lowercased and kept, whitespace, `-` and `_`
/// become hyphens, everything else is dropped. Consecutive, leading, and
/// trailing hyphens are removed.
///
/// # Examples
///
/// ```
/// use chunkmark_core::util::ids::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("What is X?"), "what-is-x");
/// assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
/// ```
pub fn slugify(text: &str) -> String {
    text.chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c.to_lowercase().collect::<String>())
            } else if c.is_whitespace() || c == '-' || c == '_' {
                Some("-".to_string())
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Hands out slugs that are unique within one document.
///
/// The first occurrence of a slug is returned as-is; repeats get `-1`,
/// `-2`, ... appended.
#[derive(Debug, Default, Clone)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    /// Create an empty slugger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve an identifier that already exists in the document, so that
    /// generated slugs never collide with it.
    pub fn reserve(&mut self, id: &str) {
        self.seen.entry(id.to_string()).or_insert(0);
    }

    /// Slugify `text` and make the result unique.
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut candidate = base.clone();
        if self.seen.contains_key(&candidate) {
            let mut n = self.seen.get(&base).copied().unwrap_or(0);
            loop {
                n += 1;
                candidate = format!("{base}-{n}");
                if !self.seen.contains_key(&candidate) {
                    break;
                }
            }
            self.seen.insert(base, n);
        }
        self.seen.insert(candidate.clone(), 0);
        candidate
    }
}
