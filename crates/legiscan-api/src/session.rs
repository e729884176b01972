//! Session cookie handling.
//!
//! The cookie carries a random v4 UUID. Unknown or expired identifiers are
//! accepted and lazily get a fresh empty history in the store.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use legiscan_core::types::SessionId;

/// Session carried by the request, if the cookie holds a well-formed id.
pub fn session_from_jar(jar: &CookieJar, cookie_name: &str) -> Option<SessionId> {
    let cookie = jar.get(cookie_name)?;
    match cookie.value().parse() {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring malformed session cookie");
            None
        }
    }
}

/// Cookie that binds the client to `id` for the browser session.
pub fn session_cookie(cookie_name: &str, id: SessionId) -> Cookie<'static> {
    Cookie::build((cookie_name.to_string(), id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
