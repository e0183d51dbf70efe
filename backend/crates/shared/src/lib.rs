//! Shared Kernel
//!
//! Vocabulary shared by every feature crate of the news backend:
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Typed integer identifiers ([`id::Id`])
//!
//! Feature crates (`auth`, `news`) define their own error enums and convert
//! into `AppError` at the HTTP boundary.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
