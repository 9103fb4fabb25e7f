//! Error types for the trial server

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Error taxonomy of the trial core.
///
/// Lifecycle rejections (`TrialAlreadyUsed`, `AlreadySubscribed`,
/// `NoTrialFound`) are normally surfaced to callers as an
/// `Outcome { success: false, .. }` built from the error's display text,
/// not raised. `DownloadLimit` is the one hard-stop condition: a denial
/// the caller must be able to tell apart from a generic failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] sea_orm::DbErr),

  #[error("User not found.")]
  UserNotFound,

  #[error("You have already used your free trial. Please upgrade to continue.")]
  TrialAlreadyUsed,

  #[error("You already have an active subscription.")]
  AlreadySubscribed,

  #[error("No trial found. Please start a free trial first.")]
  NoTrialFound,

  #[error(
    "Daily download limit reached ({limit} per day). Upgrade for unlimited downloads."
  )]
  DownloadLimit { limit: u64 },
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Error::UserNotFound | Error::NoTrialFound => StatusCode::NOT_FOUND,
      Error::TrialAlreadyUsed | Error::AlreadySubscribed => {
        StatusCode::CONFLICT
      }
      Error::DownloadLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
    };

    // Store failures are not echoed back to callers.
    let message = match &self {
      Error::Database(_) => "Database error".to_string(),
      other => other.to_string(),
    };

    let body = json::json!({
      "success": false,
      "message": message
    });

    (status, Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
