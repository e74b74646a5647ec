use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ad::Table)
                    .if_not_exists()
                    .col(pk_auto(Ad::Id))
                    .col(big_integer(Ad::UserId))
                    .col(string_len(Ad::ClientId, 64).default(""))
                    .col(string_len(Ad::Username, 64))
                    .col(string_len(Ad::Title, 128))
                    .col(text(Ad::Description))
                    .col(string_len(Ad::Category, 32))
                    .col(string_len(Ad::Mode, 32).default(""))
                    .col(string_len(Ad::Tag, 64).default(""))
                    .col(string_len_null(Ad::PhotoPath, 256))
                    .col(string_len_null(Ad::PhotoId, 256))
                    .col(boolean(Ad::IsPremium).default(false))
                    .col(string_len(Ad::Status, 16).default("active"))
                    .col(timestamp_with_time_zone(Ad::ExpiresAt))
                    .col(
                        timestamp_with_time_zone(Ad::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Ad::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ad::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ad {
    Table,
    Id,
    UserId,
    ClientId,
    Username,
    Title,
    Description,
    Category,
    Mode,
    Tag,
    PhotoPath,
    PhotoId,
    IsPremium,
    Status,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
