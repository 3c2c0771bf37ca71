//! Pure helpers used by the model backend adapter

pub mod cleanup;
pub mod rate_limit;

pub use cleanup::clean_response;
pub use rate_limit::RateLimitDetector;
