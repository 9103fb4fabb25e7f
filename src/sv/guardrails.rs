//! Guardrail enforcement - daily download cap and concurrent-device count.
//!
//! Guardrails are advisory cost bounds, not a security boundary. Reads
//! degrade gracefully to zero counts when the store is unavailable; the
//! check-then-insert gap in `record_download` is deliberately unguarded,
//! so concurrent requests can overshoot the cap by a small bounded amount.

use serde::Serialize;

use crate::{
  entity::{SubscriptionTier, download, profile, session},
  prelude::*,
  state::Config,
  sv::trial::TrialStatus,
};

/// Static limits merged with live usage counts.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GuardrailReport {
  pub max_downloads_per_day: u64,
  pub max_concurrent_devices: u64,
  pub requires_email_verification: bool,
  pub requires_phone_verification: bool,
  pub current_downloads: u64,
  pub current_devices: u64,
}

pub struct Guardrails<'a> {
  db: &'a DatabaseConnection,
  config: &'a Config,
}

impl<'a> Guardrails<'a> {
  pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
    Self { db, config }
  }

  /// Static limits plus live counts for the current UTC day and activity
  /// window. Never fails: when counts cannot be retrieved the report
  /// carries zeros, favoring availability over accuracy.
  pub async fn check(&self, user_id: &str) -> GuardrailReport {
    let (downloads, devices) = match self.live_counts(user_id).await {
      Ok(counts) => counts,
      Err(err) => {
        warn!("guardrail counts unavailable for {user_id}: {err}");
        (0, 0)
      }
    };

    GuardrailReport {
      max_downloads_per_day: self.config.max_downloads_per_day,
      max_concurrent_devices: self.config.max_concurrent_devices,
      requires_email_verification: self.config.require_email_verification,
      requires_phone_verification: self.config.require_phone_verification,
      current_downloads: downloads,
      current_devices: devices,
    }
  }

  async fn live_counts(&self, user_id: &str) -> Result<(u64, u64)> {
    let now = Utc::now().naive_utc();
    let day_start = now.date().and_time(NaiveTime::MIN);
    let day_end = day_start + TimeDelta::days(1);

    let downloads = download::Entity::find()
      .filter(download::Column::UserId.eq(user_id))
      .filter(download::Column::CreatedAt.gte(day_start))
      .filter(download::Column::CreatedAt.lt(day_end))
      .count(self.db)
      .await?;

    let cutoff =
      now - TimeDelta::minutes(self.config.session_window_minutes);
    let devices = session::Entity::find()
      .filter(session::Column::UserId.eq(user_id))
      .filter(session::Column::LastActivity.gte(cutoff))
      .count(self.db)
      .await?;

    Ok((downloads, devices))
  }

  /// Authorize a single download. Premium accounts and active trials are
  /// not capped; everyone else is held to the daily limit. The limit
  /// denial is the one hard-stop error in the core, carrying the
  /// configured cap for the upgrade call-to-action.
  pub async fn authorize_download(&self, user_id: &str) -> Result<()> {
    if let Some(profile) =
      profile::Entity::find_by_id(user_id).one(self.db).await?
    {
      let now = Utc::now().naive_utc();
      let bypass = profile.subscription_tier == SubscriptionTier::Premium
        || TrialStatus::derive(&profile, now).is_active;
      if bypass {
        return Ok(());
      }
    }

    let report = self.check(user_id).await;
    if report.current_downloads >= report.max_downloads_per_day {
      return Err(Error::DownloadLimit {
        limit: report.max_downloads_per_day,
      });
    }

    Ok(())
  }

  /// Re-check the guardrail, then append one log row. Insert failures
  /// surface to the caller, unlike the read-side degradation in `check`.
  pub async fn record_download(
    &self,
    user_id: &str,
    resource: &str,
  ) -> Result<()> {
    self.authorize_download(user_id).await?;

    download::ActiveModel {
      user_id: Set(user_id.to_string()),
      resource: Set(resource.to_string()),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    }
    .insert(self.db)
    .await?;

    Ok(())
  }

  /// Heartbeat: mark a device session as active right now.
  pub async fn touch_session(
    &self,
    user_id: &str,
    session_id: &str,
  ) -> Result<()> {
    let now = Utc::now().naive_utc();

    let existing = session::Entity::find_by_id((
      user_id.to_string(),
      session_id.to_string(),
    ))
    .one(self.db)
    .await?;

    match existing {
      Some(session) => {
        session::ActiveModel { last_activity: Set(now), ..session.into() }
          .update(self.db)
          .await?;
      }
      None => {
        session::ActiveModel {
          user_id: Set(user_id.to_string()),
          session_id: Set(session_id.to_string()),
          last_activity: Set(now),
        }
        .insert(self.db)
        .await?;
      }
    }

    Ok(())
  }

  /// Drop sessions that fell out of the activity window.
  pub async fn prune_sessions(&self) -> Result<u64> {
    let cutoff = Utc::now().naive_utc()
      - TimeDelta::minutes(self.config.session_window_minutes);

    let res = session::Entity::delete_many()
      .filter(session::Column::LastActivity.lt(cutoff))
      .exec(self.db)
      .await?;

    Ok(res.rows_affected)
  }
}
