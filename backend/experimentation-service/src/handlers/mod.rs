pub mod auth;
pub mod config;
pub mod health;
pub mod index;
pub mod models;

pub use auth::*;
pub use config::*;
pub use health::*;
pub use index::*;
pub use models::*;
