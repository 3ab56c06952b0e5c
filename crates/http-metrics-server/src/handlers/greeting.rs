//! Greeting endpoints, the demo workload being measured.

use axum::extract::{Path, Query, rejection::QueryRejection};
use serde::Deserialize;
use tracing::debug;

use crate::error::AppError;

/// Paging parameters accepted by the greeting endpoint.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paging {
    pub page_size: i16,
    pub page_index: i16,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_index: 1,
        }
    }
}

/// `GET /greeting/{name}`
pub async fn greeting(
    Path(name): Path<String>,
    paging: Result<Query<Paging>, QueryRejection>,
) -> Result<String, AppError> {
    let Query(paging) = paging.map_err(|e| AppError::BadRequest(e.body_text()))?;

    debug!(
        name = %name,
        page_size = paging.page_size,
        page_index = paging.page_index,
        "Greeting requested"
    );

    Ok(greet(&name))
}

/// `GET /greeting`
pub async fn greeting_world() -> String {
    greet("")
}

fn greet(name: &str) -> String {
    if name.trim().is_empty() {
        "Hello, World!".to_string()
    } else {
        format!("Hello, {}!", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greet() {
        assert_eq!(greet("Ana"), "Hello, Ana!");
        assert_eq!(greet(" "), "Hello, World!");
    }

    #[test]
    fn test_paging_defaults() {
        let paging = Paging::default();

        assert_eq!(paging.page_size, 10);
        assert_eq!(paging.page_index, 1);
    }
}
