pub mod auth;
pub mod report;
pub mod user;

// Re-export all models for easy importing
pub use auth::*;
pub use report::*;
pub use user::*;
