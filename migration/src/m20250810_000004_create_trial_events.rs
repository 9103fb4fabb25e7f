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
          .table(TrialEvents::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(TrialEvents::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(TrialEvents::UserId).string().not_null())
          .col(ColumnDef::new(TrialEvents::Event).string().not_null())
          .col(ColumnDef::new(TrialEvents::Meta).json().null())
          .col(ColumnDef::new(TrialEvents::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_trial_events_profile")
              .from(TrialEvents::Table, TrialEvents::UserId)
              .to(Profiles::Table, Profiles::UserId)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_trial_events_user")
          .table(TrialEvents::Table)
          .col(TrialEvents::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(TrialEvents::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum TrialEvents {
  Table,
  Id,
  UserId,
  Event,
  Meta,
  CreatedAt,
}
