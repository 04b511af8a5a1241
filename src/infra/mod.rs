//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - The IBGE geographic API client
//! - Caching (Redis)
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod ibge;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, CacheStore, ReferenceCache};
pub use db::{Database, Migrator};
pub use ibge::{GeoDirectory, IbgeClient};
pub use repositories::{
    CommentRepository, CommentStore, LocationRepository, LocationStore, NewsRepository, NewsStore,
    RequestRepository, RequestStore, UserRepository, UserStore,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};
