use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServerListing::Table)
                    .if_not_exists()
                    .col(pk_auto(ServerListing::Id))
                    .col(string_uniq(ServerListing::GuildId))
                    .col(string(ServerListing::GuildName))
                    .col(string_null(ServerListing::CategoryId))
                    .col(string_null(ServerListing::NetworkChannelId))
                    .col(string_null(ServerListing::LeaderboardChannelId))
                    .col(string_null(ServerListing::InviteLink))
                    .col(
                        timestamp(ServerListing::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServerListing::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ServerListing {
    Table,
    Id,
    GuildId,
    GuildName,
    CategoryId,
    NetworkChannelId,
    LeaderboardChannelId,
    InviteLink,
    UpdatedAt,
}
