pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod routes;

pub use config::Config;
pub use database::{MemberRepository, RosterRepository};
pub use error::AppError;
