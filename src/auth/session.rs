//! Session management - credential lifecycle and request stamping
//!
//! The [`Session`] is the single source of truth for "is the user
//! authenticated" and for keeping outbound requests correctly credentialed.
//! It composes the `Authorization` value from the stored credential at call
//! time and stamps it onto each request builder; there is no ambient header
//! state to go stale.

use std::fmt;
use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use crate::api::{self, ApiError};
use crate::config::ClientConfig;

use super::credential::{Credential, DEFAULT_TOKEN_TYPE};
use super::store::{CredentialStore, KeyringStore, StoreError};

/// Login request body for `POST /api/login`
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Phone number the account is registered under
    pub phone_number: String,
    /// Account password
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("phone_number", &self.phone_number)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Registration request body for `POST /api/register`
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    /// Phone number to register under
    pub phone_number: String,
    /// Display name
    pub user_name: String,
    /// Contact email
    pub email: String,
    /// Account password
    pub password: String,
    /// Optional profile cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Optional profile biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("phone_number", &self.phone_number)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Successful login payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// The issued bearer token
    pub token: String,
    /// Token-type label, usually `"Bearer"`
    #[serde(default)]
    pub token_type: Option<String>,
}

impl LoginData {
    /// Converts the payload into a storable credential
    pub fn into_credential(self) -> Credential {
        Credential::new(self.token, self.token_type.unwrap_or_default())
    }
}

/// Successful registration payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    /// Server-assigned account id
    pub user_id: i64,
    /// Phone number the account was registered under
    pub phone_number: String,
    /// Display name
    pub user_name: String,
    /// Contact email
    pub email: String,
}

/// Body of a successful `GET /api/validate-token` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidationData {
    valid: bool,
    #[serde(default)]
    #[allow(dead_code)]
    user_id: Option<i64>,
}

/// Client-observed authentication state
///
/// The server stays authoritative; `Cached` only means a credential is
/// stored locally, not that it is currently valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No credential is stored
    Anonymous,
    /// A credential is stored, verified or not
    Cached,
}

/// Session manager for the microblog backend
///
/// Owns the credential store and the HTTP client. `login`/`register` only
/// forward to the backend; persisting a returned credential is an explicit
/// follow-up via [`Session::remember`].
///
/// # Example
///
/// ```no_run
/// use microblog_client::auth::{LoginRequest, Session};
/// use microblog_client::config::ClientConfig;
///
/// # async fn example() -> Result<(), microblog_client::api::ApiError> {
/// let session = Session::new(&ClientConfig::default());
/// let data = session
///     .login(&LoginRequest {
///         phone_number: "0912345678".into(),
///         password: "hunter2".into(),
///     })
///     .await?;
/// session.remember(&data.into_credential()).ok();
/// assert!(session.is_logged_in());
/// # Ok(())
/// # }
/// ```
pub struct Session {
    client: Client,
    store: Arc<dyn CredentialStore>,
    base_url: String,
}

impl Session {
    /// Creates a session backed by the OS keychain
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_store(
            config.api_base_url.clone(),
            Arc::new(KeyringStore::with_service(config.credential_service.clone())),
        )
    }

    /// Creates a session with a custom credential store
    ///
    /// Used by tests (in-memory store, mock server base URL) and by callers
    /// that manage credential persistence themselves.
    pub fn with_store(base_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: Client::new(),
            store,
            base_url: base_url.into(),
        }
    }

    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Exchanges credentials for a token at `POST /api/login`
    ///
    /// Does not persist anything. After a successful login the caller must
    /// call [`Session::remember`] with the returned credential, or the
    /// session stays anonymous.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginData, ApiError> {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(request)
            .send()
            .await?;
        api::read_envelope(response).await
    }

    /// Creates an account at `POST /api/register`
    ///
    /// Same non-persisting contract as [`Session::login`].
    pub async fn register(&self, request: &RegistrationRequest) -> Result<RegisteredUser, ApiError> {
        let response = self
            .client
            .post(self.url("/api/register"))
            .json(request)
            .send()
            .await?;
        api::read_envelope(response).await
    }

    /// Persists a credential, making the session authenticated
    pub fn remember(&self, credential: &Credential) -> Result<(), StoreError> {
        self.store.save(credential)
    }

    /// Clears the stored credential
    ///
    /// Idempotent; a redundant logout is a no-op and never errors. Storage
    /// failures are logged and swallowed so callers can always trust the
    /// "logged out" claim afterwards.
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("failed to clear stored credential: {e}");
        }
        tracing::debug!("session credential cleared");
    }

    /// Reads the stored credential, if any
    pub fn credential(&self) -> Option<Credential> {
        match self.store.load() {
            Ok(credential) => credential,
            Err(e) => {
                tracing::warn!("failed to read stored credential: {e}");
                None
            }
        }
    }

    /// The stored token, verbatim; no validation, no network
    pub fn token(&self) -> Option<String> {
        self.credential().map(|c| c.token().to_string())
    }

    /// The stored token-type label, or `"Bearer"` when none is stored
    ///
    /// The default applies even with no stored token, so login state must be
    /// checked through [`Session::token`] or [`Session::is_logged_in`], never
    /// inferred from this.
    pub fn token_type(&self) -> String {
        self.credential()
            .map(|c| c.token_type().to_string())
            .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string())
    }

    /// True iff a non-empty token is stored
    ///
    /// Local and non-authoritative: a cached credential may already have been
    /// rejected by the server.
    pub fn is_logged_in(&self) -> bool {
        self.credential().is_some_and(|c| !c.token().is_empty())
    }

    /// Client-observed authentication state
    pub fn state(&self) -> SessionState {
        if self.is_logged_in() {
            SessionState::Cached
        } else {
            SessionState::Anonymous
        }
    }

    /// Composes the `Authorization` header value from the stored credential
    ///
    /// `Some("<type> <token>")` iff a non-empty token is stored.
    pub fn authorization(&self) -> Option<String> {
        self.credential()
            .filter(|c| !c.token().is_empty())
            .map(|c| c.authorization_value())
    }

    /// Stamps the current credential onto an outbound request
    ///
    /// Reads the store at call time, so an intervening logout is reflected on
    /// the next stamped request. Without a credential the header is simply
    /// absent. Call this immediately before dispatching every authenticated
    /// request; stamping is not atomic across separate in-flight calls.
    pub fn stamp(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.authorization() {
            Some(value) => builder.header(AUTHORIZATION, value),
            None => builder,
        }
    }

    /// Checks the stored credential against `GET /api/validate-token`
    ///
    /// - No stored token: resolves `false` immediately, no network call.
    /// - Server confirms the token: `true`.
    /// - Server rejects the credential (401/403): the stored credential is
    ///   purged via [`Session::logout`] and the check resolves `false`.
    /// - Anything else (network error, 5xx, malformed body): `false`, and the
    ///   credential is kept — a transient failure must not evict a
    ///   possibly-still-valid credential.
    ///
    /// Validation only ever removes state; a check resolving after a logout
    /// can never resurrect the cleared credential.
    pub async fn validate_token(&self) -> bool {
        let Some(authorization) = self.authorization() else {
            tracing::debug!("no stored credential, skipping validation");
            return false;
        };

        let response = match self
            .client
            .get(self.url("/api/validate-token"))
            .header(AUTHORIZATION, authorization)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("token validation unreachable, keeping credential: {e}");
                return false;
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::info!("stored credential rejected by server, logging out");
            self.logout();
            return false;
        }
        if !status.is_success() {
            tracing::warn!("token validation failed with HTTP {status}, keeping credential");
            return false;
        }

        match response.json::<ValidationData>().await {
            Ok(data) => data.valid,
            Err(e) => {
                tracing::warn!("malformed validation response, keeping credential: {e}");
                false
            }
        }
    }

    /// Startup check for a previously stored credential
    ///
    /// If a credential is cached, validates it against the server and surfaces
    /// a negative outcome as a log line only — no error, no interruption.
    /// Login state may be briefly stale until this completes; callers must
    /// tolerate that window.
    pub async fn initialize(&self) {
        if !self.is_logged_in() {
            tracing::debug!("starting session without a stored credential");
            return;
        }
        if !self.validate_token().await {
            tracing::warn!("stored credential could not be confirmed at startup");
        }
    }

    /// Runs the startup check without blocking the caller
    ///
    /// Spawned variant of [`Session::initialize`] for application startup
    /// paths that must not wait on the network. The returned handle can be
    /// awaited when the caller does want to observe completion.
    pub fn initialize_in_background(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let session = Arc::clone(self);
        tokio::spawn(async move { session.initialize().await })
    }
}
