//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod comment;
pub mod location;
pub mod news;
pub mod password;
pub mod request;
pub mod stats;
pub mod user;
pub mod values;

pub use comment::{Comment, CreateComment};
pub use location::{GeoState, LocationFilter, Municipality};
pub use news::{CreateNews, News, UpdateNews};
pub use password::Password;
pub use request::{CitizenRequest, CreateCitizenRequest, RequestStatus, RequestType};
pub use stats::Stats;
pub use user::{CreateUser, NewUser, UpdateUser, User, UserChanges, UserResponse, UserType};
pub use values::{
    blank_to_none, normalize_state_code, parse_id, IMAGE_URL, STATE_CODE, STATE_CODE_OR_EMPTY,
};
