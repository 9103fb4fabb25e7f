use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Profiles::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Profiles::UserId).string().not_null().primary_key(),
          )
          .col(ColumnDef::new(Profiles::Email).string().null())
          .col(
            ColumnDef::new(Profiles::SubscriptionTier)
              .string()
              .not_null()
              .default("free"),
          )
          .col(ColumnDef::new(Profiles::TrialStartedAt).date_time().null())
          .col(ColumnDef::new(Profiles::TrialEndsAt).date_time().null())
          .col(
            ColumnDef::new(Profiles::SubscriptionStartedAt).date_time().null(),
          )
          .col(ColumnDef::new(Profiles::PlanId).string().null())
          .col(
            ColumnDef::new(Profiles::EmailVerified)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(Profiles::PhoneVerified)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Profiles::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Profiles::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Profiles {
  Table,
  UserId,
  Email,
  SubscriptionTier,
  TrialStartedAt,
  TrialEndsAt,
  SubscriptionStartedAt,
  PlanId,
  EmailVerified,
  PhoneVerified,
  CreatedAt,
}
