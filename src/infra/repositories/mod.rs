//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

mod base;
mod comment_repository;
pub(crate) mod entities;
mod location_repository;
mod news_repository;
mod request_repository;
mod user_repository;

pub use base::{DeleteRepository, ReadRepository};
pub use comment_repository::{CommentRepository, CommentStore};
pub use location_repository::{LocationRepository, LocationStore};
pub use news_repository::{NewsRepository, NewsStore};
pub use request_repository::{RequestRepository, RequestStore};
pub use user_repository::{UserRepository, UserStore};

#[cfg(test)]
pub use comment_repository::MockCommentRepository;
#[cfg(test)]
pub use location_repository::MockLocationRepository;
#[cfg(test)]
pub use news_repository::MockNewsRepository;
#[cfg(test)]
pub use request_repository::MockRequestRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
