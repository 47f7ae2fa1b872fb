//! Authentication module - session and credential management
//!
//! Owns the credential lifecycle end to end:
//! - Persistent storage behind the [`CredentialStore`] trait (OS keychain by
//!   default, in-memory for tests)
//! - Bearer tokens in zeroized memory with redacted debug output
//! - Per-request `Authorization` stamping and the remote validity check

mod credential;
mod session;
mod store;

pub use credential::{Credential, SecretToken, AUTH_TOKEN_KEY, DEFAULT_TOKEN_TYPE, TOKEN_TYPE_KEY};
pub use session::{
    LoginData, LoginRequest, RegisteredUser, RegistrationRequest, Session, SessionState,
};
pub use store::{CredentialStore, KeyringStore, MemoryStore, StoreError};
