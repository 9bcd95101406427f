// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization.
//!
//! Credentials are HS256-signed bearer tokens carrying the account id and
//! role. There is no revocation list: a token stays valid until `exp`, so a
//! role change only takes effect once previously issued tokens expire.

use bookwise_domain::{Role, User, validate_login, validate_registration};
use bookwise_persistence::{Persistence, PersistenceError, UserData};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::error::{
    ApiError, AuthError, translate_domain_error, translate_persistence_error,
    translate_token_error,
};
use crate::request_response::{
    LoginRequest, LoginResponse, RegisterRequest, TokenValidationResponse,
};

/// An authenticated caller, as proven by a verified token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The account the token was issued to.
    pub user_id: i64,
    /// The role embedded in the token at issue time.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }
}

impl From<&Claims> for AuthenticatedActor {
    fn from(claims: &Claims) -> Self {
        Self::new(claims.user_id, claims.role)
    }
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub role: Role,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Why a bearer token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("No token provided")]
    Missing,
    #[error("Malformed token: {0}")]
    Malformed(String),
    #[error("Token has expired")]
    Expired,
    #[error("Token signature is invalid")]
    InvalidSignature,
    #[error("Failed to sign token: {0}")]
    Encoding(String),
}

/// A freshly signed token and the claims inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Issues and verifies HS256 bearer tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Token lifetime used when none is configured.
    pub const DEFAULT_TTL: Duration = Duration::hours(1);

    /// Creates a token service signing with `secret`.
    #[must_use]
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Returns the lifetime of issued tokens.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for `actor` valid from now.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if the expiry cannot be computed or
    /// signing fails.
    pub fn issue(&self, actor: AuthenticatedActor) -> Result<IssuedToken, TokenError> {
        self.issue_at(actor, OffsetDateTime::now_utc())
    }

    /// Issues a token for `actor` as if signed at `issued_at`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Encoding` if the lifetime is not positive, the
    /// expiry falls outside the representable date range, or signing fails.
    pub fn issue_at(
        &self,
        actor: AuthenticatedActor,
        issued_at: OffsetDateTime,
    ) -> Result<IssuedToken, TokenError> {
        if !self.ttl.is_positive() {
            return Err(TokenError::Encoding(String::from(
                "Token lifetime must be positive",
            )));
        }

        let expires_at: OffsetDateTime = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| TokenError::Encoding(String::from("Token expiry is out of range")))?;

        let claims: Claims = Claims {
            user_id: actor.user_id,
            role: actor.role,
            iat: issued_at.unix_timestamp(),
            exp: expires_at.unix_timestamp(),
        };

        let token: String = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` once `exp` has passed,
    /// `TokenError::InvalidSignature` if it was signed with another secret,
    /// and `TokenError::Malformed` for anything else that fails to decode.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation: Validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

/// Whether record writes need an admin credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Anyone may write.
    #[default]
    Open,
    /// Writes need a bearer token with the admin role.
    AdminOnly,
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if a caller may create, change, or delete records.
    ///
    /// Under `WritePolicy::Open` everyone may. Under
    /// `WritePolicy::AdminOnly` the caller must present an admin token.
    ///
    /// # Arguments
    ///
    /// * `policy` - The configured write policy
    /// * `actor` - The authenticated caller, if a token was presented
    /// * `action` - The action being attempted, for error reporting
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if a token is required but
    /// absent, or `AuthError::Unauthorized` if the caller is not an admin.
    pub fn authorize_manage_records(
        policy: WritePolicy,
        actor: Option<&AuthenticatedActor>,
        action: &str,
    ) -> Result<(), AuthError> {
        match (policy, actor) {
            (WritePolicy::Open, _) => Ok(()),
            (WritePolicy::AdminOnly, None) => Err(AuthError::AuthenticationFailed {
                reason: String::from("Access denied. No token provided."),
            }),
            (WritePolicy::AdminOnly, Some(actor)) => match actor.role {
                Role::Admin => Ok(()),
                Role::User => Err(AuthError::Unauthorized {
                    action: String::from(action),
                    required_role: String::from("admin"),
                }),
            },
        }
    }
}

/// Account registration, login and token inspection.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` for a bad payload,
    /// `ApiError::Conflict` if the username is taken, or
    /// `ApiError::StoreUnavailable` if the store fails.
    pub fn register(
        persistence: &mut Persistence,
        request: &RegisterRequest,
    ) -> Result<User, ApiError> {
        let new_user = validate_registration(
            request.username.as_ref(),
            request.password.as_ref(),
            request.role.as_ref(),
        )
        .map_err(translate_domain_error)?;

        if persistence
            .get_user_by_username(&new_user.username)
            .map_err(translate_persistence_error)?
            .is_some()
        {
            return Err(ApiError::Conflict {
                message: String::from("Username already exists"),
            });
        }

        let user: User = persistence
            .create_user(&new_user)
            .map_err(translate_persistence_error)?;

        info!(user_id = user.user_id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token.
    ///
    /// Unknown usernames and wrong passwords fail identically.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` if a field is blank,
    /// `ApiError::AuthenticationFailed` if the credentials do not match, or
    /// `ApiError::StoreUnavailable` if the store or signing fails.
    pub fn login(
        persistence: &mut Persistence,
        tokens: &TokenService,
        request: &LoginRequest,
    ) -> Result<LoginResponse, ApiError> {
        validate_login(request.username.as_ref(), request.password.as_ref())
            .map_err(translate_domain_error)?;

        let username: &str = request.username.as_deref().unwrap_or_default();
        let password: &str = request.password.as_deref().unwrap_or_default();

        let account: UserData = persistence
            .get_user_by_username(username)
            .map_err(translate_persistence_error)?
            .ok_or_else(Self::invalid_credentials)?;

        let matches: bool = Persistence::verify_password(password, &account.password_hash)
            .map_err(|e: PersistenceError| {
                warn!(user_id = account.user_id, error = %e, "Stored password hash is unreadable");
                Self::invalid_credentials()
            })?;

        if !matches {
            info!(user_id = account.user_id, "Login rejected");
            return Err(Self::invalid_credentials());
        }

        let actor: AuthenticatedActor = AuthenticatedActor::new(account.user_id, account.role);
        let issued: IssuedToken = tokens.issue(actor).map_err(translate_token_error)?;

        info!(user_id = account.user_id, "Login succeeded");
        Ok(LoginResponse::new(issued, account.into_user()))
    }

    /// Verifies a presented token and describes its holder.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if no token was presented,
    /// or `ApiError::InvalidToken` if it does not verify.
    pub fn validate_token(
        tokens: &TokenService,
        token: Option<&str>,
    ) -> Result<TokenValidationResponse, ApiError> {
        let token: &str = token.ok_or_else(|| translate_token_error(TokenError::Missing))?;
        let claims: Claims = tokens.verify(token).map_err(translate_token_error)?;

        Ok(TokenValidationResponse {
            valid: true,
            user: claims,
        })
    }

    fn invalid_credentials() -> ApiError {
        ApiError::AuthenticationFailed {
            reason: String::from("Invalid credentials"),
        }
    }
}
