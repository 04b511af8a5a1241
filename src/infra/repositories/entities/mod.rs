//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod comment;
pub mod municipality;
pub mod news;
pub mod request;
pub mod state;
pub mod user;
