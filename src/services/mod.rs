pub mod auth;

pub use auth::{AuthService, Claims, decode_claims};
