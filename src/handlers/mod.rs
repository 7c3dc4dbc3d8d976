pub mod healthz;
pub mod token;
pub mod user;
