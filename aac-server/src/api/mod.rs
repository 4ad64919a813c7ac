//! HTTP API handlers

pub mod aac;
pub mod error;
pub mod health;
pub mod speak;

pub use aac::{get_board, get_categories, get_symbols};
pub use error::ApiError;
pub use health::health_routes;
pub use speak::post_speak;
