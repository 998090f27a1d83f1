pub use super::server_listing::Entity as ServerListing;
pub use super::sos_record::Entity as SosRecord;
pub use super::user_stat::Entity as UserStat;
