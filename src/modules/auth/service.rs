use actix_web::cookie::{time, Cookie, SameSite};

use crate::api::error;
use crate::middlewares::SESSION_COOKIE;
use crate::utils::{hash_password, verify_password, SessionClaims};
use crate::ENV;

/// Single-administrator session issuer. The admin password is hashed once at
/// startup; plaintext is never kept around.
#[derive(Clone)]
pub struct AuthService {
    username: String,
    password_hash: String,
    secret: String,
    ttl: u64,
    secure_cookies: bool,
}

impl AuthService {
    pub fn from_env() -> Result<Self, error::SystemError> {
        Ok(AuthService {
            username: ENV.admin_username.clone(),
            password_hash: hash_password(&ENV.admin_password)?,
            secret: ENV.session_secret.clone(),
            ttl: ENV.session_ttl,
            secure_cookies: ENV.is_production,
        })
    }

    pub fn login(&self, username: &str, password: &str) -> Result<String, error::SystemError> {
        let valid_username = username == self.username;
        let valid_password = verify_password(&self.password_hash, password)?;

        if !(valid_username && valid_password) {
            return Err(error::SystemError::unauthorized("Invalid username or password"));
        }

        SessionClaims::new(&self.username, self.ttl).encode(self.secret.as_ref())
    }

    pub fn session_status(&self, token: Option<&str>) -> (bool, Option<String>) {
        match token.and_then(|t| SessionClaims::decode(t, self.secret.as_ref()).ok()) {
            Some(claims) => (true, Some(claims.sub)),
            None => (false, None),
        }
    }

    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure_cookies)
            .max_age(time::Duration::seconds(self.ttl as i64))
            .finish()
    }

    pub fn clear_cookie(&self) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(self.secure_cookies)
            .max_age(time::Duration::seconds(0))
            .expires(time::OffsetDateTime::UNIX_EPOCH)
            .finish()
    }
}
