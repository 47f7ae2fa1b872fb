//! Client library for the microblog social posting API
//!
//! Handles the two security-sensitive concerns of the client so that UI code
//! does not have to: session authentication and content sanitization.
//!
//! ## Features
//!
//! - Bearer-credential lifecycle: login/register forwarding, keychain-backed
//!   persistence, per-request `Authorization` stamping, remote validity
//!   checks with automatic purge of server-rejected credentials
//! - Per-field sanitization policies for user-entered form data (rich text,
//!   scheme-restricted URLs, plain text by default)
//! - Typed clients for the posts and comments resources
//! - Secure credential storage (Windows Credential Manager, macOS Keychain,
//!   Linux Secret Service) with zeroized in-memory tokens
//!
//! ## Architecture
//!
//! The crate is organized into layers:
//!
//! - **Auth**: session manager, credential types, storage backends
//! - **Sanitize**: sanitization gateway and field policies
//! - **Api**: thin resource clients stamped through the session
//! - **Config**: persisted client settings
//!
//! ## Getting started
//!
//! ```no_run
//! use std::sync::Arc;
//! use microblog_client::api::PostsApi;
//! use microblog_client::auth::Session;
//! use microblog_client::config::ClientConfig;
//!
//! # async fn example() {
//! let config = ClientConfig::load();
//! let session = Arc::new(Session::new(&config));
//!
//! // Revalidate a credential left over from a previous run
//! session.initialize().await;
//!
//! let posts = PostsApi::new(session.clone());
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod sanitize;

pub use api::ApiError;
pub use auth::{Credential, Session};
pub use config::ClientConfig;
pub use sanitize::{FieldPolicy, FormPolicy, Sanitizer};
