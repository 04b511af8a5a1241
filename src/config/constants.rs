//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Authentication & Security
// =============================================================================

/// Default JWT token expiration in hours
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 24;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

/// JWT token type identifier
pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// =============================================================================
// User Types
// =============================================================================

pub const USER_TYPE_ADMIN: &str = "admin";
pub const USER_TYPE_POLITICIAN: &str = "politician";
pub const USER_TYPE_VISITOR: &str = "visitor";

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Prefix under which the JSON API is mounted
pub const API_PREFIX: &str = "/api";

// =============================================================================
// Content
// =============================================================================

/// Maximum number of featured news returned for the home page
pub const FEATURED_NEWS_LIMIT: u64 = 6;

/// Concurrent upserts while populating municipalities
pub const POPULATE_CONCURRENCY: usize = 8;

// =============================================================================
// Geographic data (IBGE)
// =============================================================================

/// IBGE "localidades" API base URL
pub const DEFAULT_IBGE_API_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// User agent sent to the IBGE API
pub const IBGE_USER_AGENT: &str = "Lei Em Maos/1.0";

/// Default IBGE request timeout in seconds
pub const DEFAULT_IBGE_TIMEOUT_SECONDS: u64 = 10;

// =============================================================================
// Cache (Redis)
// =============================================================================

/// Default TTL for cached geographic data (24 hours)
pub const DEFAULT_GEO_CACHE_TTL_SECONDS: u64 = 86_400;

/// Cache key for the state list
pub const CACHE_KEY_STATES: &str = "geo:states";

/// Cache key prefix for per-state municipality lists
pub const CACHE_PREFIX_MUNICIPALITIES: &str = "geo:municipalities:";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 8;

/// Minimum name length requirement
pub const MIN_NAME_LENGTH: u64 = 2;

pub const MIN_NEWS_TITLE_LENGTH: u64 = 10;
pub const MIN_NEWS_SUMMARY_LENGTH: u64 = 20;
pub const MIN_NEWS_CONTENT_LENGTH: u64 = 50;
pub const MIN_COMMENT_LENGTH: u64 = 10;
pub const MIN_REQUEST_MESSAGE_LENGTH: u64 = 50;
