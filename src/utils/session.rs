use std::future::{ready, Ready};
use std::time::Duration;

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::http::header::Header;
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use actix_web_httpauth::headers::authorization::{Authorization, Bearer};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use moka::sync::Cache;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub exp: usize,
    pub jti: String,
}

/// Issues and checks signed session tokens, and remembers the ones revoked at logout.
pub struct SessionManager {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
    cookie_secure: bool,
    revoked: Cache<String, ()>,
}

impl SessionManager {
    pub fn new(secret: &str, ttl_hours: i64, cookie_secure: bool) -> Self {
        let ttl = chrono::Duration::hours(ttl_hours);
        // Entries only need to outlive the token they block.
        let revoked = Cache::builder()
            .max_capacity(100_000)
            .time_to_live(ttl.to_std().unwrap_or(Duration::from_secs(3600)))
            .build();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            cookie_secure,
            revoked,
        }
    }

    pub fn issue(&self, user_id: Uuid, name: &str) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.to_string(),
            exp: (Utc::now() + self.ttl).timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        encode(&JwtHeader::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AppError::Unauthenticated("Invalid session".to_string()))?;

        if self.revoked.contains_key(&claims.jti) {
            return Err(AppError::Unauthenticated("Session has ended".to_string()));
        }
        Ok(claims)
    }

    pub fn revoke(&self, claims: &Claims) {
        self.revoked.insert(claims.jti.clone(), ());
    }

    pub fn cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, token)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .max_age(time::Duration::seconds(self.ttl.num_seconds()))
            .finish()
    }

    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(SESSION_COOKIE, "")
            .path("/")
            .http_only(true)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Token from the session cookie, or from an `Authorization: Bearer` header.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        return Some(cookie.value().to_string());
    }
    Authorization::<Bearer>::parse(req)
        .ok()
        .map(|auth| auth.into_scheme().token().to_string())
}

/// The authenticated caller. Fails with `Unauthenticated` when extracted without a valid session.
#[derive(Debug)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub name: String,
    pub claims: Claims,
}

impl SessionUser {
    fn from_request_sync(req: &HttpRequest) -> Result<Self, AppError> {
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::Internal("Application state missing".to_string()))?;

        let token = session_token(req)
            .ok_or_else(|| AppError::Unauthenticated("Login required".to_string()))?;
        let claims = state.sessions.verify(&token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthenticated("Invalid session".to_string()))?;

        Ok(SessionUser {
            user_id,
            name: claims.name.clone(),
            claims,
        })
    }
}

impl FromRequest for SessionUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(SessionUser::from_request_sync(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let sessions = SessionManager::new("test-secret", 1, false);
        let user_id = Uuid::now_v7();
        let token = sessions.issue(user_id, "Ada").unwrap();

        let claims = sessions.verify(&token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.name, "Ada");
    }

    #[test]
    fn revoked_token_is_rejected() {
        let sessions = SessionManager::new("test-secret", 1, false);
        let token = sessions.issue(Uuid::now_v7(), "Ada").unwrap();
        let claims = sessions.verify(&token).unwrap();

        sessions.revoke(&claims);
        assert!(matches!(sessions.verify(&token), Err(AppError::Unauthenticated(_))));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let ours = SessionManager::new("ours", 1, false);
        let theirs = SessionManager::new("theirs", 1, false);
        let token = theirs.issue(Uuid::now_v7(), "Eve").unwrap();
        assert!(ours.verify(&token).is_err());
    }

    #[test]
    fn session_cookie_is_http_only() {
        let sessions = SessionManager::new("test-secret", 2, true);
        let cookie = sessions.cookie("abc".to_string());
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(2)));
    }
}
