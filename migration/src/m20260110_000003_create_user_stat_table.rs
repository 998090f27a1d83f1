use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserStat::Table)
                    .if_not_exists()
                    .col(pk_auto(UserStat::Id))
                    .col(string(UserStat::PlayerName))
                    .col(string_null(UserStat::GuildId))
                    .col(integer(UserStat::Kills))
                    .col(integer(UserStat::Deaths))
                    .col(integer(UserStat::ShotsFired))
                    .col(integer(UserStat::ShotsHit))
                    .col(
                        timestamp(UserStat::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Leaderboard aggregation groups by player name
        manager
            .create_index(
                Index::create()
                    .name("idx_user_stat_player_name")
                    .table(UserStat::Table)
                    .col(UserStat::PlayerName)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_stat_player_name")
                    .table(UserStat::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UserStat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserStat {
    Table,
    Id,
    PlayerName,
    GuildId,
    Kills,
    Deaths,
    ShotsFired,
    ShotsHit,
    CreatedAt,
}
