//! Grepolis player-statistics service: a JWT-authenticated API over an
//! hourly-refreshed snapshot of world data.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod metrics;
pub mod stats;
