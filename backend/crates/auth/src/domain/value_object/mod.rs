//! Value Object Module

pub mod email;
pub mod refresh_token;
pub mod user_name;

pub use kernel::id::UserId;
