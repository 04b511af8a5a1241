//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

mod auth_service;
mod comment_service;
pub mod container;
mod location_service;
mod news_service;
mod request_service;
mod stats_service;
mod user_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use comment_service::{CommentManager, CommentService};
pub use location_service::{LocationManager, LocationService, PopulateSummary};
pub use news_service::{NewsManager, NewsService};
pub use request_service::{RequestManager, RequestService};
pub use stats_service::{StatsManager, StatsService};
pub use user_service::{UserManager, UserService};

// Parallel execution utilities
pub use container::parallel;
