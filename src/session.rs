//! Cookie plumbing: the session cookie carrying the signed token, and a
//! one-time flash cookie consumed on the next rendered page.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// One-time user-facing notification. Stored in the cookie as a short
/// code so the value never needs encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    InvalidCredentials,
    DuplicateUser,
    Registered,
}

impl Flash {
    pub fn code(self) -> &'static str {
        match self {
            Flash::InvalidCredentials => "invalid-credentials",
            Flash::DuplicateUser => "duplicate-user",
            Flash::Registered => "registered",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "invalid-credentials" => Some(Flash::InvalidCredentials),
            "duplicate-user" => Some(Flash::DuplicateUser),
            "registered" => Some(Flash::Registered),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::InvalidCredentials => "Invalid credentials",
            Flash::DuplicateUser => "Username already exists",
            Flash::Registered => "User registered! Please log in.",
        }
    }
}

pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// Clearing is unconditional so logout stays idempotent.
pub fn clear_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}

pub fn set_flash(jar: CookieJar, flash: Flash) -> CookieJar {
    jar.add(Cookie::build((FLASH_COOKIE, flash.code())).path("/").build())
}

/// Read and clear the flash cookie in one step.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    match jar.get(FLASH_COOKIE).and_then(|c| Flash::from_code(c.value())) {
        Some(flash) => (
            jar.remove(Cookie::build(FLASH_COOKIE).path("/").build()),
            Some(flash),
        ),
        None => (jar, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("token".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_flash_codes_round_trip() {
        for flash in [Flash::InvalidCredentials, Flash::DuplicateUser, Flash::Registered] {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("garbage"), None);
    }

    #[test]
    fn test_take_flash_clears_cookie() {
        let jar = set_flash(CookieJar::new(), Flash::Registered);
        let (jar, flash) = take_flash(jar);
        assert_eq!(flash, Some(Flash::Registered));
        // The removal cookie is what ends up in the response; the value
        // itself is gone from the jar.
        assert!(jar
            .get(FLASH_COOKIE)
            .map_or(true, |c| c.value().is_empty()));
    }

    #[test]
    fn test_take_flash_empty_jar() {
        let (_, flash) = take_flash(CookieJar::new());
        assert_eq!(flash, None);
    }
}
