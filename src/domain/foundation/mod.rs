//! Foundation module - Shared domain primitives.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::UserId;
