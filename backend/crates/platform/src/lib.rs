//! Platform Crate - Technical Infrastructure
//!
//! Technical building blocks with no business meaning of their own:
//! - Cryptographic utilities (OS randomness, SHA-256, HMAC-SHA256)
//! - Password policy and the deterministic password hasher
//! - Cookie building and parsing

pub mod cookie;
pub mod crypto;
pub mod password;
