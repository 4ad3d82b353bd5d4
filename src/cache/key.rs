//! Cache key derivation.
//!
//! Keys are composed from the operation tag and the exact request strings.
//! No hashing and no normalization: "Python" and "python " are different keys.

use std::fmt;

/// Separator between key components.
pub const KEY_SEPARATOR: char = '_';

/// The cached operation a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheOperation {
    /// Raw search-provider results
    Search,
    /// Curated resource sets produced by the completion provider
    Resources,
    /// Generated study plans
    Plan,
}

impl CacheOperation {
    /// Tag used as the key prefix.
    pub fn tag(&self) -> &'static str {
        match self {
            CacheOperation::Search => "tavily",
            CacheOperation::Resources => "resources",
            CacheOperation::Plan => "plan",
        }
    }
}

impl fmt::Display for CacheOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Derives the cache key for an operation and its parameters.
pub fn derive_key(operation: CacheOperation, subject: &str, exam_date: Option<&str>) -> String {
    match exam_date {
        Some(date) => format!(
            "{}{sep}{}{sep}{}",
            operation.tag(),
            subject,
            date,
            sep = KEY_SEPARATOR
        ),
        None => format!("{}{}{}", operation.tag(), KEY_SEPARATOR, subject),
    }
}
