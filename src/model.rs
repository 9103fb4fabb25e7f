use serde::{Deserialize, Serialize};

use crate::nudge::Nudge;

/// Structured result of a lifecycle mutation. Callers branch on `success`
/// rather than catch; only store failures surface as raised errors.
#[derive(Debug, Serialize)]
pub struct Outcome {
  pub success: bool,
  pub message: String,
}

impl Outcome {
  pub fn ok(message: impl Into<String>) -> Self {
    Self { success: true, message: message.into() }
  }

  pub fn invalid(message: impl ToString) -> Self {
    Self { success: false, message: message.to_string() }
  }
}

#[derive(Debug, Deserialize)]
pub struct StartTrialReq {
  pub user_id: String,
  pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertReq {
  pub user_id: String,
  pub plan_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DownloadReq {
  pub user_id: String,
  pub resource: String,
}

/// Contact channel confirmed by a verification flow.
#[derive(Copy, Clone, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifyChannel {
  Email,
  Phone,
}

#[derive(Debug, Deserialize)]
pub struct VerifyReq {
  pub user_id: String,
  pub channel: VerifyChannel,
}

#[derive(Debug, Deserialize)]
pub struct HeartbeatReq {
  pub user_id: String,
  pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct NudgeReply {
  pub nudge_type: Nudge,
  pub message: Option<String>,
}
