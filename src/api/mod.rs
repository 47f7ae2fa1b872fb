//! API module - typed access to the microblog backend
//!
//! Thin resource clients over a shared transport vocabulary:
//! - `base` defines the error taxonomy and response envelope
//! - `posts` and `comments` construct paths and bodies, stamp authenticated
//!   calls through the session, and sanitize user payloads before submission
//!
//! The wrappers interpret nothing: rejected responses surface unmodified as
//! typed errors for the caller to handle.

mod base;
mod comments;
mod posts;

pub use base::{ApiEnvelope, ApiError};
pub use comments::{Comment, CommentsApi};
pub use posts::{NewPost, Post, PostsApi};

pub(crate) use base::read_envelope;
