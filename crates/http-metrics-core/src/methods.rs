//! HTTP method normalisation.

use std::collections::HashSet;

/// Label used for any method outside the known set.
pub const UNKNOWN_METHOD: &str = "_OTHER";

const STANDARD_METHODS: [&str; 9] = [
    "CONNECT", "DELETE", "GET", "HEAD", "OPTIONS", "PATCH", "POST", "PUT", "TRACE",
];

/// Immutable set of methods that are reported as-is.
///
/// Everything else collapses into [`UNKNOWN_METHOD`] so the method attribute
/// stays low-cardinality.
#[derive(Debug, Clone)]
pub struct KnownMethods {
    methods: HashSet<String>,
}

impl KnownMethods {
    /// The eight RFC 9110 methods plus PATCH.
    pub fn standard() -> Self {
        Self::from_iter(STANDARD_METHODS)
    }

    /// Uppercases `method`; unknown methods resolve to `_OTHER`.
    pub fn resolve(&self, method: &str) -> String {
        let upper = method.to_ascii_uppercase();
        if self.methods.contains(&upper) {
            upper
        } else {
            UNKNOWN_METHOD.to_string()
        }
    }
}

impl Default for KnownMethods {
    fn default() -> Self {
        Self::standard()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KnownMethods {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            methods: iter
                .into_iter()
                .map(|m| m.as_ref().to_ascii_uppercase())
                .collect(),
        }
    }
}
