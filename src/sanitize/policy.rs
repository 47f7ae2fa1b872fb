//! Field classification for form sanitization
//!
//! Maps field identifiers to named sanitization tiers. Callers declare the
//! policy per form shape; fields that were never declared always fall to the
//! strictest tier, so a new field name is safe by default.

use std::collections::HashMap;

use super::gateway::Sanitizer;

/// Sanitization tier applied to a single form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldPolicy {
    /// Keeps a safe subset of HTML formatting (post bodies, biographies)
    RichText,
    /// Generic cleaning plus an http/https scheme allow-list; anything else
    /// becomes the empty string
    RestrictedUrl,
    /// All markup removed; the restrictive default
    #[default]
    PlainText,
}

impl FieldPolicy {
    /// Infers a policy from a field name.
    ///
    /// Ordered substring rules, first match wins:
    /// 1. names containing `content` or `biography` keep rich text
    /// 2. names containing `image` or `url` are treated as URLs
    /// 3. everything else is reduced to plain text
    ///
    /// # Examples
    ///
    /// ```
    /// use microblog_client::sanitize::FieldPolicy;
    ///
    /// assert_eq!(FieldPolicy::infer("content"), FieldPolicy::RichText);
    /// assert_eq!(FieldPolicy::infer("imageUrl"), FieldPolicy::RestrictedUrl);
    /// assert_eq!(FieldPolicy::infer("username"), FieldPolicy::PlainText);
    /// ```
    pub fn infer(field_name: &str) -> Self {
        if field_name.contains("content") || field_name.contains("biography") {
            Self::RichText
        } else if field_name.contains("image") || field_name.contains("url") {
            Self::RestrictedUrl
        } else {
            Self::PlainText
        }
    }

    /// Applies this policy to a raw input value
    pub fn apply(self, input: &str) -> String {
        match self {
            Self::RichText => Sanitizer::clean(input),
            Self::RestrictedUrl => Sanitizer::sanitize_url(input),
            Self::PlainText => Sanitizer::strip_all_html(input),
        }
    }
}

/// Declared field-to-policy mapping for one form shape
///
/// Fields absent from the declaration are sanitized with
/// [`FieldPolicy::PlainText`].
///
/// # Examples
///
/// ```
/// use microblog_client::sanitize::{FieldPolicy, FormPolicy};
///
/// let policy = FormPolicy::new()
///     .with_field("content", FieldPolicy::RichText)
///     .with_field("image", FieldPolicy::RestrictedUrl);
///
/// assert_eq!(policy.policy_for("content"), FieldPolicy::RichText);
/// assert_eq!(policy.policy_for("username"), FieldPolicy::PlainText);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormPolicy {
    fields: HashMap<String, FieldPolicy>,
}

impl FormPolicy {
    /// Creates an empty declaration; every field falls to plain text
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the policy for one field
    pub fn with_field(mut self, name: impl Into<String>, policy: FieldPolicy) -> Self {
        self.fields.insert(name.into(), policy);
        self
    }

    /// Builds a declaration from field names using [`FieldPolicy::infer`]
    ///
    /// Matches the behavior of callers that never declare a shape and rely
    /// on the field-naming convention instead.
    pub fn inferred<'a>(field_names: impl IntoIterator<Item = &'a str>) -> Self {
        let fields = field_names
            .into_iter()
            .map(|name| (name.to_string(), FieldPolicy::infer(name)))
            .collect();
        Self { fields }
    }

    /// Resolves the policy for a field, defaulting to the strictest tier
    pub fn policy_for(&self, field_name: &str) -> FieldPolicy {
        self.fields.get(field_name).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_rich_text_names() {
        assert_eq!(FieldPolicy::infer("content"), FieldPolicy::RichText);
        assert_eq!(FieldPolicy::infer("postcontent"), FieldPolicy::RichText);
        assert_eq!(FieldPolicy::infer("biography"), FieldPolicy::RichText);
    }

    #[test]
    fn test_infer_url_names() {
        assert_eq!(FieldPolicy::infer("image"), FieldPolicy::RestrictedUrl);
        assert_eq!(FieldPolicy::infer("imageUrl"), FieldPolicy::RestrictedUrl);
        assert_eq!(FieldPolicy::infer("avatar_url"), FieldPolicy::RestrictedUrl);
    }

    #[test]
    fn test_infer_is_case_sensitive() {
        // "coverImage" does not contain the lowercase "image" substring,
        // so it lands on the strict default rather than the URL tier
        assert_eq!(FieldPolicy::infer("coverImage"), FieldPolicy::PlainText);
    }

    #[test]
    fn test_infer_first_match_wins() {
        // contains both "content" and "url"; the rich-text rule is checked first
        assert_eq!(FieldPolicy::infer("content_url"), FieldPolicy::RichText);
    }

    #[test]
    fn test_infer_unknown_names_are_plain_text() {
        assert_eq!(FieldPolicy::infer("username"), FieldPolicy::PlainText);
        assert_eq!(FieldPolicy::infer("email"), FieldPolicy::PlainText);
        assert_eq!(FieldPolicy::infer(""), FieldPolicy::PlainText);
    }

    #[test]
    fn test_form_policy_defaults_to_strictest() {
        let policy = FormPolicy::new().with_field("content", FieldPolicy::RichText);
        assert_eq!(policy.policy_for("content"), FieldPolicy::RichText);
        assert_eq!(policy.policy_for("never_declared"), FieldPolicy::PlainText);
    }

    #[test]
    fn test_form_policy_inferred() {
        let policy = FormPolicy::inferred(["content", "imageUrl", "username"]);
        assert_eq!(policy.policy_for("content"), FieldPolicy::RichText);
        assert_eq!(policy.policy_for("imageUrl"), FieldPolicy::RestrictedUrl);
        assert_eq!(policy.policy_for("username"), FieldPolicy::PlainText);
    }

    #[test]
    fn test_apply_dispatch() {
        assert_eq!(FieldPolicy::PlainText.apply("<b>Bob</b>"), "Bob");
        assert_eq!(FieldPolicy::RichText.apply("<b>Bob</b>"), "<b>Bob</b>");
        assert_eq!(FieldPolicy::RestrictedUrl.apply("ftp://x"), "");
    }
}
