use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};

use crate::model::*;
use crate::prelude::*;
use crate::state::AppState;
use crate::sv::trial::TrialStatus;
use crate::sv::guardrails::GuardrailReport;

pub async fn health() -> &'static str {
  "OK"
}

pub async fn start_trial(
  State(app): State<Arc<AppState>>,
  Json(req): Json<StartTrialReq>,
) -> Result<Json<Outcome>> {
  let outcome =
    app.sv().trial.start(&req.user_id, req.email.as_deref()).await?;
  Ok(Json(outcome))
}

pub async fn trial_status(
  State(app): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Result<Json<TrialStatus>> {
  let status = app.sv().trial.status(&user_id).await?;
  Ok(Json(status))
}

pub async fn trial_nudge(
  State(app): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Result<Json<NudgeReply>> {
  let status = app.sv().trial.status(&user_id).await?;
  let message = status.nudge_type.message(status.days_remaining);

  Ok(Json(NudgeReply { nudge_type: status.nudge_type, message }))
}

pub async fn convert_to_paid(
  State(app): State<Arc<AppState>>,
  Json(req): Json<ConvertReq>,
) -> Result<Json<Outcome>> {
  let outcome =
    app.sv().trial.convert_to_paid(&req.user_id, &req.plan_id).await?;
  Ok(Json(outcome))
}

pub async fn guardrails(
  State(app): State<Arc<AppState>>,
  Path(user_id): Path<String>,
) -> Json<GuardrailReport> {
  Json(app.sv().guardrails.check(&user_id).await)
}

pub async fn record_download(
  State(app): State<Arc<AppState>>,
  Json(req): Json<DownloadReq>,
) -> Result<Json<Outcome>> {
  app.sv().guardrails.record_download(&req.user_id, &req.resource).await?;

  let report = app.sv().guardrails.check(&req.user_id).await;
  let remaining = report
    .max_downloads_per_day
    .saturating_sub(report.current_downloads);

  Ok(Json(Outcome::ok(format!(
    "Download recorded. {remaining} downloads remaining today."
  ))))
}

pub async fn verify_contact(
  State(app): State<Arc<AppState>>,
  Json(req): Json<VerifyReq>,
) -> Result<Json<Outcome>> {
  let sv = app.sv();
  match req.channel {
    VerifyChannel::Email => {
      sv.profile.set_email_verified(&req.user_id, true).await?
    }
    VerifyChannel::Phone => {
      sv.profile.set_phone_verified(&req.user_id, true).await?
    }
  }

  Ok(Json(Outcome::ok("Verification recorded.")))
}

pub async fn heartbeat(
  State(app): State<Arc<AppState>>,
  Json(req): Json<HeartbeatReq>,
) -> Result<Json<Outcome>> {
  app.sv().guardrails.touch_session(&req.user_id, &req.session_id).await?;
  Ok(Json(Outcome::ok("Session refreshed.")))
}
