use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SosRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(SosRecord::Id))
                    .col(string(SosRecord::DiscordId))
                    .col(string(SosRecord::UserNickname))
                    .col(string_null(SosRecord::Enemy))
                    .col(string_null(SosRecord::Difficulty))
                    .col(string_null(SosRecord::Mission))
                    .col(string_null(SosRecord::Voice))
                    .col(string_null(SosRecord::Notes))
                    .col(
                        timestamp(SosRecord::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Index for per-user history lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_sos_record_discord_id")
                    .table(SosRecord::Table)
                    .col(SosRecord::DiscordId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_sos_record_discord_id")
                    .table(SosRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(SosRecord::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SosRecord {
    Table,
    Id,
    DiscordId,
    UserNickname,
    Enemy,
    Difficulty,
    Mission,
    Voice,
    Notes,
    CreatedAt,
}
