use sea_orm_migration::prelude::*;

use super::m20250810_000001_create_profiles::Profiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ActiveSessions::Table)
          .if_not_exists()
          .col(ColumnDef::new(ActiveSessions::UserId).string().not_null())
          .col(ColumnDef::new(ActiveSessions::SessionId).string().not_null())
          .col(
            ColumnDef::new(ActiveSessions::LastActivity)
              .date_time()
              .not_null(),
          )
          .primary_key(
            Index::create()
              .col(ActiveSessions::UserId)
              .col(ActiveSessions::SessionId),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_active_sessions_profile")
              .from(ActiveSessions::Table, ActiveSessions::UserId)
              .to(Profiles::Table, Profiles::UserId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // The pruner deletes by activity cutoff across all users.
    manager
      .create_index(
        Index::create()
          .name("idx_active_sessions_activity")
          .table(ActiveSessions::Table)
          .col(ActiveSessions::LastActivity)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(ActiveSessions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum ActiveSessions {
  Table,
  UserId,
  SessionId,
  LastActivity,
}
