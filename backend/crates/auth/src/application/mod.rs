//! Application Layer
//!
//! Use cases and application services.

pub mod access_token;
pub mod config;
pub mod issue_tokens;
pub mod refresh_tokens;
pub mod service;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use access_token::{AccessClaims, AccessTokenCodec};
pub use config::AuthConfig;
pub use issue_tokens::{TokenIssuer, TokenPair};
pub use refresh_tokens::RefreshTokensUseCase;
pub use service::AuthService;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
