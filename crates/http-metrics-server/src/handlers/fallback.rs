use axum::http::Uri;

use crate::error::AppError;

/// 404 for anything no route matched.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        path: uri.path().to_string(),
    }
}
