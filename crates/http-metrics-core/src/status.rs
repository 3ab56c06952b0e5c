//! Status code to `error.type` label lookup.

use std::collections::HashMap;

/// Static mapping from HTTP status code to a canonical error label.
#[derive(Debug, Clone)]
pub struct StatusErrorTable {
    labels: HashMap<u16, &'static str>,
}

impl StatusErrorTable {
    pub fn standard() -> Self {
        let labels = HashMap::from([
            (400, "BadRequest"),
            (401, "Unauthorized"),
            (403, "Forbidden"),
            (404, "NotFound"),
            (408, "Timeout"),
            (429, "RateLimitExceeded"),
            (500, "InternalServerError"),
            (502, "BadGateway"),
            (503, "ServiceUnavailable"),
            (504, "GatewayTimeout"),
        ]);
        Self { labels }
    }

    /// Builds a table from explicit entries.
    pub fn from_entries(entries: impl IntoIterator<Item = (u16, &'static str)>) -> Self {
        Self {
            labels: entries.into_iter().collect(),
        }
    }

    pub fn label(&self, status_code: u16) -> Option<&'static str> {
        self.labels.get(&status_code).copied()
    }

    /// Label for a finished request.
    ///
    /// An error's type name wins; the table only labels requests that ended
    /// without one. `None` means no label at all, never an empty string.
    pub fn resolve_error_type<'a>(
        &self,
        status_code: u16,
        error: Option<&'a str>,
    ) -> Option<&'a str> {
        error.or_else(|| self.label(status_code))
    }
}

impl Default for StatusErrorTable {
    fn default() -> Self {
        Self::standard()
    }
}
