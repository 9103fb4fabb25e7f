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
          .table(DownloadLogs::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(DownloadLogs::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(DownloadLogs::UserId).string().not_null())
          .col(ColumnDef::new(DownloadLogs::Resource).string().not_null())
          .col(ColumnDef::new(DownloadLogs::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_download_logs_profile")
              .from(DownloadLogs::Table, DownloadLogs::UserId)
              .to(Profiles::Table, Profiles::UserId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    // Daily-count queries filter by user and day window.
    manager
      .create_index(
        Index::create()
          .name("idx_download_logs_user_created")
          .table(DownloadLogs::Table)
          .col(DownloadLogs::UserId)
          .col(DownloadLogs::CreatedAt)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(DownloadLogs::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum DownloadLogs {
  Table,
  Id,
  UserId,
  Resource,
  CreatedAt,
}
