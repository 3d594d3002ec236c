use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::config;
use crate::database::models::Session;
use crate::database::{DatabaseManager, SessionRepository};
use crate::error::ApiError;
use crate::types::Role;

pub const SESSION_COOKIE: &str = "medshare_session";

/// Request-scoped identity resolved from the session cookie. Injected as an
/// extension by the guard and read by handlers instead of ambient state.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub profile_image: Option<String>,
}

impl TryFrom<Session> for CurrentUser {
    type Error = ApiError;

    fn try_from(session: Session) -> Result<Self, Self::Error> {
        let role = Role::parse(&session.role).ok_or_else(|| {
            tracing::error!("Session {} carries unknown role '{}'", session.token, session.role);
            ApiError::unauthorized("Please log in")
        })?;

        Ok(Self {
            id: session.account_id,
            username: session.username,
            email: session.email,
            role,
            profile_image: session.profile_image,
        })
    }
}

/// Session guard for donor-only routes
pub async fn require_donor(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(Role::Donor, headers, request, next).await
}

/// Session guard for receiver-only routes
pub async fn require_receiver(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(Role::Receiver, headers, request, next).await
}

/// Session guard for admin-only routes
pub async fn require_admin(
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(Role::Admin, headers, request, next).await
}

/// Session guard for routes open to any authenticated role
pub async fn require_session(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = resolve_session(&headers).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// The one reusable guard: no session -> 401, wrong role -> 403,
/// match -> proceed with CurrentUser available as an extension.
async fn require_role(
    required: Role,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = resolve_session(&headers).await?;

    if user.role != required {
        return Err(ApiError::forbidden(format!(
            "This action requires a {} account",
            required
        )));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Resolve the session cookie against the session table
async fn resolve_session(headers: &HeaderMap) -> Result<CurrentUser, ApiError> {
    let token =
        session_token_from_headers(headers).ok_or_else(|| ApiError::unauthorized("Please log in"))?;

    let pool = DatabaseManager::pool().await?;
    let session = SessionRepository::new(pool)
        .find_valid(&token)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Please log in"))?;

    CurrentUser::try_from(session)
}

/// Extract the session token from the Cookie header
pub fn session_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for cookie in cookie_header.split(';') {
        if let Some((name, value)) = cookie.trim().split_once('=') {
            if name == SESSION_COOKIE && !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Build the Set-Cookie value issued at login
pub fn build_session_cookie(token: &str) -> String {
    let security = &config::config().security;
    let max_age_secs = security.session_ttl_hours * 3600;
    let mut cookie = format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the Set-Cookie value that clears the session at logout
pub fn clear_session_cookie() -> String {
    let mut cookie = format!(
        "{}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0",
        SESSION_COOKIE
    );
    if config::config().security.secure_cookies {
        cookie.push_str("; Secure");
    }
    cookie
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn token_extracted_from_cookie_header() {
        let headers = headers_with_cookie("medshare_session=abc123");
        assert_eq!(session_token_from_headers(&headers), Some("abc123".into()));
    }

    #[test]
    fn token_found_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; medshare_session=tok; lang=en");
        assert_eq!(session_token_from_headers(&headers), Some("tok".into()));
    }

    #[test]
    fn missing_or_empty_cookie_yields_none() {
        assert_eq!(session_token_from_headers(&HeaderMap::new()), None);
        let headers = headers_with_cookie("medshare_session=");
        assert_eq!(session_token_from_headers(&headers), None);
        let headers = headers_with_cookie("other=value");
        assert_eq!(session_token_from_headers(&headers), None);
    }

    #[test]
    fn session_cookie_is_http_only() {
        let cookie = build_session_cookie("tok");
        assert!(cookie.starts_with("medshare_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_session_cookie();
        assert!(cookie.contains("Max-Age=0"));
        assert!(cookie.starts_with("medshare_session=;"));
    }
}
