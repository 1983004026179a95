//! Camp signups: REST backend for campers, activities, and the signups linking them.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError, ValidationError};
pub use migration::apply_migrations;
pub use routes::{app, camp_routes, common_routes};
pub use service::{CampRepository, SqliteRepository};
pub use state::AppState;
pub use store::connect;
