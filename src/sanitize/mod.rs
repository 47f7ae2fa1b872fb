//! Content sanitization - XSS mitigation for user-supplied input
//!
//! This module decides *which* sanitization applies to *what* data; the
//! HTML cleaning itself is delegated to the ammonia engine:
//! - Per-field policies for structured form input
//! - Rich-text cleaning that keeps a safe formatting subset
//! - Plain-text stripping for everything untrusted by default
//! - Scheme-restricted URL handling that fails closed

mod gateway;
mod policy;

pub use gateway::Sanitizer;
pub use policy::{FieldPolicy, FormPolicy};
