//! HTTP request handlers.

pub mod auth_handler;
pub mod comment_handler;
pub mod location_handler;
pub mod news_handler;
pub mod request_handler;
pub mod stats_handler;
pub mod user_handler;

pub use auth_handler::{auth_routes, session_routes};
pub use comment_handler::{comment_routes, moderation_routes};
pub use location_handler::{location_admin_routes, location_routes};
pub use news_handler::{news_admin_routes, news_routes};
pub use request_handler::{request_inbox_routes, request_response_routes, request_routes};
pub use stats_handler::stats_routes;
pub use user_handler::user_routes;
