use super::*;
use crate::data::user_stat::{NewUserStat, UserStatRepository};

/// Tests inserting one mission result.
///
/// Expected: Ok with all fields persisted
#[tokio::test]
async fn creates_stat_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserStat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserStatRepository::new(db);
    let stat = repo
        .create(NewUserStat {
            player_name: "HostPilot".to_string(),
            guild_id: Some(123456789),
            kills: 250,
            deaths: 3,
            shots_fired: 1200,
            shots_hit: 800,
        })
        .await?;

    assert_eq!(stat.player_name, "HostPilot");
    assert_eq!(stat.guild_id, Some("123456789".to_string()));
    assert_eq!(stat.kills, 250);
    assert_eq!(stat.shots_hit, 800);

    Ok(())
}

/// Tests that one player can submit multiple mission results.
///
/// Expected: Ok with one row per mission
#[tokio::test]
async fn player_accumulates_missions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserStat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for kills in [100, 200] {
        factory::user_stat::UserStatFactory::new(db)
            .player_name("HostPilot")
            .kills(kills)
            .build()
            .await?;
    }

    let count = entity::prelude::UserStat::find()
        .filter(entity::user_stat::Column::PlayerName.eq("HostPilot"))
        .count(db)
        .await?;
    assert_eq!(count, 2);

    Ok(())
}

/// Tests retrieving every submitted result for aggregation.
///
/// Expected: Ok with all rows returned
#[tokio::test]
async fn get_all_returns_every_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::UserStat)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for _ in 0..4 {
        factory::user_stat::create_user_stat(db).await?;
    }

    let repo = UserStatRepository::new(db);
    let stats = repo.get_all().await?;

    assert_eq!(stats.len(), 4);

    Ok(())
}
