//! Cookie Handling
//!
//! `Set-Cookie` construction and `Cookie` header parsing for the
//! refresh-token cookie.

use axum::http::{HeaderMap, HeaderValue, header};
use axum::http::header::InvalidHeaderValue;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie attributes
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age_secs: Option<i64>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "refresh-token".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/auth".to_string(),
            max_age_secs: None,
        }
    }
}

impl CookieConfig {
    /// Build the `Set-Cookie` value carrying `value`
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut cookie = format!("{}={}", self.name, value);

        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        cookie.push_str(&format!("; Path={}", self.path));

        if let Some(max_age) = self.max_age_secs {
            cookie.push_str(&format!("; Max-Age={}", max_age));
        }

        cookie
    }

    /// Build the `Set-Cookie` value that makes the browser drop the cookie
    pub fn build_delete_cookie(&self) -> String {
        let mut cookie = format!("{}=", self.name);
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie.push_str(&format!(
            "; SameSite={}; Path={}; Max-Age=0",
            self.same_site.as_str(),
            self.path
        ));
        cookie
    }

    pub fn set_cookie_header(&self, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value))
    }

    pub fn delete_cookie_header(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie())
    }
}

/// Extract a cookie value from the request headers
///
/// Every `Cookie` header is searched; empty values count as absent.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name && !value.is_empty()).then(|| value.to_string())
        })
}
