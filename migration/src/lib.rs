//! Database migrations using SeaORM

pub use sea_orm_migration::prelude::*;

mod m20250810_000001_create_profiles;
mod m20250810_000002_create_download_logs;
mod m20250810_000003_create_active_sessions;
mod m20250810_000004_create_trial_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20250810_000001_create_profiles::Migration),
      Box::new(m20250810_000002_create_download_logs::Migration),
      Box::new(m20250810_000003_create_active_sessions::Migration),
      Box::new(m20250810_000004_create_trial_events::Migration),
    ]
  }
}
