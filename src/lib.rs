//! Alliance SOS network bot.
//!
//! A Discord bot that links a federation of alliance servers together:
//! it provisions each server's network channels, relays SOS help requests
//! across every member server, tracks the ephemeral voice channels those
//! requests reserve, and periodically republishes a leaderboard computed
//! from submitted mission statistics.
//!
//! # Architecture
//!
//! The crate follows a layered architecture with clear separation of concerns:
//!
//! - **Bot** (`bot/`) - Serenity event handlers and client wiring
//! - **SOS** (`sos/`) - Request lifecycle, registry, naming and rendering
//! - **Gateway** (`gateway/`) - Chat-platform seam; a trait over the Discord
//!   operations the SOS subsystem needs, with a serenity-backed implementation
//! - **Service Layer** (`service/`) - Business logic orchestration between
//!   event handlers and the data layer
//! - **Data Layer** (`data/`) - Database repositories over SeaORM entities
//! - **Scheduler** (`scheduler/`) - Cron jobs for the leaderboard republish
//!   and stale-resource sweeps
//! - **Error Layer** (`error/`) - Application error types
//!
//! Supporting modules provide application infrastructure:
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **Startup** (`startup`) - Database connection and migration

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod gateway;
pub mod scheduler;
pub mod service;
pub mod sos;
pub mod startup;
