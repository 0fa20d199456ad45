//! Authentication service implementation
//!
//! This service handles password hashing, credential checks, account
//! signup, and issuing and verifying bearer tokens.

use std::sync::Arc;

use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, info, warn};

use crate::config::validation::parse_algorithm;
use crate::config::AuthConfig;
use crate::database::UserRepository;
use crate::models::{Claims, TokenResponse, User, UserCreate};
use crate::utils::errors::{ApiError, Result};
use crate::utils::helpers::{validate_password, validate_username};
use crate::utils::logging::log_user_action;

struct TokenKeys {
    algorithm: Algorithm,
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Authentication service for credentials and access tokens
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    config: AuthConfig,
    keys: Arc<TokenKeys>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(users: UserRepository, config: AuthConfig) -> Result<Self> {
        let algorithm = parse_algorithm(&config.algorithm)?;
        let keys = TokenKeys {
            algorithm,
            encoding: EncodingKey::from_secret(config.secret_key.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret_key.as_bytes()),
        };

        Ok(Self {
            users,
            config,
            keys: Arc::new(keys),
        })
    }

    /// Lifetime of newly issued access tokens
    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.config.access_token_expire_minutes)
    }

    /// Hash a password with bcrypt on the blocking pool
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.config.bcrypt_cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check a password against a stored bcrypt hash
    pub async fn verify_password(&self, password: &str, hashed_password: &str) -> Result<bool> {
        let password = password.to_owned();
        let hashed_password = hashed_password.to_owned();
        let valid = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed_password)).await??;
        Ok(valid)
    }

    /// Look up a user and check the password. `None` when either is wrong.
    pub async fn authenticate_user(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.users.find_by_username(username).await? else {
            debug!(username = username, "Login attempt for unknown user");
            return Ok(None);
        };

        if !self.verify_password(password, &user.hashed_password).await? {
            warn!(username = username, "Login attempt with wrong password");
            return Ok(None);
        }

        Ok(Some(user))
    }

    /// Register a new account
    pub async fn signup(&self, request: UserCreate) -> Result<User> {
        let username = validate_username(&request.username)?;
        validate_password(&request.password)?;

        if self.users.exists(&username).await? {
            return Err(ApiError::UsernameTaken);
        }

        let hashed = self.hash_password(&request.password).await?;
        let user = self.users.create(&username, &hashed).await?;
        log_user_action(&user.username, "signup", None);

        Ok(user)
    }

    /// Create the configured admin account when it is missing
    pub async fn seed_admin(&self) -> Result<Option<User>> {
        let (Some(username), Some(password)) =
            (self.config.admin_username.as_deref(), self.config.admin_password.as_deref())
        else {
            return Ok(None);
        };

        if self.users.exists(username).await? {
            debug!(username = username, "Admin account already present");
            return Ok(None);
        }

        let hashed = self.hash_password(password).await?;
        let user = self.users.create(username, &hashed).await?;
        info!(username = username, "Admin account created");

        Ok(Some(user))
    }

    /// Sign a token for `subject` that expires after `expires_delta`
    pub fn create_access_token(&self, subject: &str, expires_delta: Duration) -> Result<String> {
        let claims = Claims {
            sub: Some(subject.to_string()),
            exp: (Utc::now() + expires_delta).timestamp(),
        };

        Ok(encode(&Header::new(self.keys.algorithm), &claims, &self.keys.encoding)?)
    }

    /// Build the token response returned by the login endpoint
    pub fn issue_token(&self, user: &User) -> Result<TokenResponse> {
        let access_token = self.create_access_token(&user.username, self.token_ttl())?;
        log_user_action(&user.username, "login", None);

        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in_minutes: self.config.access_token_expire_minutes,
        })
    }

    /// Verify a token and return its subject
    pub fn decode_subject(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(self.keys.algorithm);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.keys.decoding, &validation)?;
        data.claims.sub.ok_or(ApiError::MissingSubject)
    }

    /// Best-effort subject for request logs; never fails
    pub fn peek_subject(&self, headers: &HeaderMap) -> Option<String> {
        bearer_token(headers).and_then(|token| self.decode_subject(token).ok())
    }
}

/// Extract the credentials of an `Authorization: Bearer` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
