use migration::{Migrator, MigratorTrait};

use crate::{prelude::*, sv};

/// Static trial and guardrail limits. Process-wide, not per-user.
#[derive(Debug, Clone)]
pub struct Config {
  /// Trial duration in days. Fixed, not configurable per call.
  pub trial_days: i64,
  pub max_downloads_per_day: u64,
  pub max_concurrent_devices: u64,
  pub require_email_verification: bool,
  pub require_phone_verification: bool,
  /// A session counts as active while its last activity is within this
  /// many minutes of the query instant.
  pub session_window_minutes: i64,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      trial_days: 45,
      max_downloads_per_day: 10,
      max_concurrent_devices: 2,
      require_email_verification: true,
      // Optional for trust
      require_phone_verification: false,
      session_window_minutes: 30,
    }
  }
}

pub struct Services<'a> {
  pub profile: sv::Profile<'a>,
  pub trial: sv::Trial<'a>,
  pub guardrails: sv::Guardrails<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn new(db_url: &str) -> Self {
    Self::with_config(db_url, Config::default()).await
  }

  pub async fn with_config(db_url: &str, config: Config) -> Self {
    info!("Connecting to database...");
    let db =
      Database::connect(db_url).await.expect("Failed to connect to database");

    info!("Running migrations...");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self { db, config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      profile: sv::Profile::new(&self.db),
      trial: sv::Trial::new(&self.db, &self.config),
      guardrails: sv::Guardrails::new(&self.db, &self.config),
    }
  }
}
