//! Session cookie construction.
//!
//! Both token classes travel in HttpOnly cookies. In production the
//! cookies are Secure with SameSite=None so a browser frontend on a
//! different origin can send them; in development they are SameSite=Strict.

use tf_auth::TokenScope;

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie carrying a full session token
pub const SESSION_COOKIE: &str = "token";

/// Cookie carrying a provisional token (OTP pending)
pub const PROVISIONAL_COOKIE: &str = "tempToken";

/// Cookie name for a token of the given scope.
pub fn cookie_name(scope: TokenScope) -> &'static str {
    match scope {
        TokenScope::Full => SESSION_COOKIE,
        TokenScope::Provisional => PROVISIONAL_COOKIE,
    }
}

/// Build a session cookie whose Max-Age matches the token lifetime.
pub fn session_cookie(scope: TokenScope, token: String, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(cookie_name(scope), token);
    apply_attributes(&mut cookie, secure);
    cookie.set_max_age(Duration::seconds(scope.lifetime().num_seconds()));
    cookie
}

/// Build an immediately-expiring cookie that clears `name`.
pub fn removal_cookie(name: &'static str, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    apply_attributes(&mut cookie, secure);
    cookie.set_max_age(Duration::ZERO);
    cookie
}

fn apply_attributes(cookie: &mut Cookie<'static>, secure: bool) {
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie.set_secure(secure);
    cookie.set_same_site(if secure {
        SameSite::None
    } else {
        SameSite::Strict
    });
}
