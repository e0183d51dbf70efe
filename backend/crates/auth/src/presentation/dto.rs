//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Sign Up
// ============================================================================

/// Sign up request
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    pub const fn success() -> Self {
        Self { status: "success" }
    }
}

// ============================================================================
// Sign In / Refresh
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Access token body returned by sign-in and refresh; the refresh token
/// travels in a cookie only
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
