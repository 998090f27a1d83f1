//! Database repositories over the SeaORM entities.
//!
//! Repositories borrow the connection and return `DbErr` directly; callers
//! convert into `AppError` at the service boundary.

pub mod server_listing;
pub mod sos_record;
pub mod user_stat;

pub use server_listing::ServerListingRepository;
pub use sos_record::SosRecordRepository;
pub use user_stat::UserStatRepository;

#[cfg(test)]
mod test;
