use sea_orm_migration::prelude::*;

use super::m20260301_000002_create_ad_table::Ad;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_ad_status_expires_at")
                    .table(Ad::Table)
                    .col(Ad::Status)
                    .col(Ad::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ad_client_id")
                    .table(Ad::Table)
                    .col(Ad::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ad_user_id")
                    .table(Ad::Table)
                    .col(Ad::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in ["idx_ad_user_id", "idx_ad_client_id", "idx_ad_status_expires_at"] {
            manager
                .drop_index(Index::drop().name(name).table(Ad::Table).to_owned())
                .await?;
        }
        Ok(())
    }
}
