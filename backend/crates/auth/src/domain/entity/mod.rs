//! Entity Module

pub mod refresh_session;
pub mod user;
