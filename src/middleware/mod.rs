pub mod auth;
pub mod logger;
pub mod recover;

pub use auth::{jwt_auth, AuthUser};
pub use logger::request_logger;
pub use recover::handle_panic;
