//! Append-only audit log of launched SOS requests.
//!
//! Written fire-and-forget at SOS creation; never read on the hot path.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sos_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub discord_id: String,
    pub user_nickname: String,
    pub enemy: Option<String>,
    pub difficulty: Option<String>,
    pub mission: Option<String>,
    pub voice: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
