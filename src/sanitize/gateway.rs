//! Sanitization primitives over the ammonia HTML engine
//!
//! Cleans user-supplied strings before they re-enter a rendering or storage
//! path. The engine (allowed tags, attribute handling) is ammonia's; this
//! module fixes the three configurations the application actually uses.

use std::collections::HashMap;

use super::policy::FormPolicy;

/// URL schemes allowed through [`Sanitizer::sanitize_url`]
const ALLOWED_URL_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Content sanitizer for untrusted user input
///
/// None of these operations fail: malformed input degrades to the strictest
/// applicable output, and empty input is returned unchanged.
pub struct Sanitizer;

impl Sanitizer {
    /// Cleans HTML content, keeping a safe formatting subset
    ///
    /// Dangerous elements and attributes are removed; basic formatting tags
    /// survive. Use this only for fields meant to carry rich text.
    ///
    /// # Examples
    ///
    /// ```
    /// use microblog_client::sanitize::Sanitizer;
    ///
    /// assert_eq!(Sanitizer::clean("<script>alert(1)</script>Hello"), "Hello");
    /// assert_eq!(Sanitizer::clean("<b>bold</b>"), "<b>bold</b>");
    /// assert_eq!(Sanitizer::clean(""), "");
    /// ```
    pub fn clean(input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        ammonia::clean(input)
    }

    /// Reduces HTML to plain text, removing every tag
    ///
    /// Idempotent: stripping already-stripped text changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use microblog_client::sanitize::Sanitizer;
    ///
    /// assert_eq!(Sanitizer::strip_all_html("<b>Bob</b>"), "Bob");
    /// assert_eq!(Sanitizer::strip_all_html("plain"), "plain");
    /// ```
    pub fn strip_all_html(input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let mut builder = ammonia::Builder::default();
        builder.tags(std::collections::HashSet::new());
        builder.clean(input).to_string()
    }

    /// Sanitizes a URL, allowing only http and https schemes
    ///
    /// The input is cleaned generically first; the result is kept only if it
    /// still starts with an allowed scheme, otherwise the empty string is
    /// returned. Fail-closed: a rewritten or non-conforming URL is discarded,
    /// never returned partially.
    ///
    /// # Examples
    ///
    /// ```
    /// use microblog_client::sanitize::Sanitizer;
    ///
    /// assert_eq!(
    ///     Sanitizer::sanitize_url("https://example.com/x.png"),
    ///     "https://example.com/x.png"
    /// );
    /// assert_eq!(Sanitizer::sanitize_url("javascript:alert(1)"), "");
    /// assert_eq!(Sanitizer::sanitize_url("ftp://x"), "");
    /// ```
    pub fn sanitize_url(input: &str) -> String {
        if input.is_empty() {
            return String::new();
        }
        let cleaned = ammonia::clean(input);
        if ALLOWED_URL_PREFIXES
            .iter()
            .any(|prefix| cleaned.starts_with(prefix))
        {
            cleaned
        } else {
            String::new()
        }
    }

    /// Sanitizes every field of a form payload under the given policy
    ///
    /// Produces a new map with the same key set. Fields the policy never
    /// declared are reduced to plain text.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use microblog_client::sanitize::{FormPolicy, Sanitizer};
    ///
    /// let form = HashMap::from([
    ///     ("username".to_string(), "<b>Bob</b>".to_string()),
    /// ]);
    /// let clean = Sanitizer::sanitize_form(&form, &FormPolicy::new());
    /// assert_eq!(clean["username"], "Bob");
    /// ```
    pub fn sanitize_form(
        form: &HashMap<String, String>,
        policy: &FormPolicy,
    ) -> HashMap<String, String> {
        form.iter()
            .map(|(name, value)| (name.clone(), policy.policy_for(name).apply(value)))
            .collect()
    }

    /// Sanitizes a form payload, inferring the policy from field names
    ///
    /// Convenience for callers without a declared form shape; equivalent to
    /// [`Sanitizer::sanitize_form`] with [`FormPolicy::inferred`].
    pub fn sanitize_form_inferred(form: &HashMap<String, String>) -> HashMap<String, String> {
        let policy = FormPolicy::inferred(form.keys().map(String::as_str));
        Self::sanitize_form(form, &policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::FieldPolicy;

    #[test]
    fn test_clean_removes_script() {
        assert_eq!(Sanitizer::clean("<script>alert(1)</script>Hello"), "Hello");
    }

    #[test]
    fn test_clean_keeps_safe_formatting() {
        assert_eq!(Sanitizer::clean("<b>bold</b> and <i>italic</i>"), "<b>bold</b> and <i>italic</i>");
    }

    #[test]
    fn test_clean_drops_event_handlers() {
        let cleaned = Sanitizer::clean("<b onclick=\"alert(1)\">x</b>");
        assert!(!cleaned.contains("onclick"));
        assert!(cleaned.contains('x'));
    }

    #[test]
    fn test_clean_empty_passthrough() {
        assert_eq!(Sanitizer::clean(""), "");
    }

    #[test]
    fn test_strip_all_html_removes_tags() {
        assert_eq!(Sanitizer::strip_all_html("<b>Bob</b>"), "Bob");
        assert_eq!(Sanitizer::strip_all_html("<div><p>text</p></div>"), "text");
    }

    #[test]
    fn test_strip_all_html_drops_script_content() {
        assert_eq!(Sanitizer::strip_all_html("<script>alert(1)</script>hi"), "hi");
    }

    #[test]
    fn test_strip_all_html_idempotent() {
        for input in ["<b>Bob</b>", "a&b", "plain text", "<script>x</script>y", ""] {
            let once = Sanitizer::strip_all_html(input);
            let twice = Sanitizer::strip_all_html(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_sanitize_url_allows_http_and_https() {
        assert_eq!(
            Sanitizer::sanitize_url("https://example.com/x.png"),
            "https://example.com/x.png"
        );
        assert_eq!(
            Sanitizer::sanitize_url("http://example.com/"),
            "http://example.com/"
        );
    }

    #[test]
    fn test_sanitize_url_rejects_other_schemes() {
        assert_eq!(Sanitizer::sanitize_url("ftp://x"), "");
        assert_eq!(Sanitizer::sanitize_url("javascript:alert(1)"), "");
        assert_eq!(Sanitizer::sanitize_url("data:text/html,<b>x</b>"), "");
        assert_eq!(Sanitizer::sanitize_url("//protocol-relative.example"), "");
    }

    #[test]
    fn test_sanitize_url_empty_passthrough() {
        assert_eq!(Sanitizer::sanitize_url(""), "");
    }

    #[test]
    fn test_sanitize_form_inferred_dispatch() {
        let form = HashMap::from([
            (
                "content".to_string(),
                "<script>alert(1)</script>Hello".to_string(),
            ),
            ("imageUrl".to_string(), "javascript:alert(1)".to_string()),
            ("username".to_string(), "<b>Bob</b>".to_string()),
        ]);

        let clean = Sanitizer::sanitize_form_inferred(&form);

        assert_eq!(clean.len(), form.len());
        assert_eq!(clean["content"], "Hello");
        assert_eq!(clean["imageUrl"], "");
        assert_eq!(clean["username"], "Bob");
    }

    #[test]
    fn test_sanitize_form_declared_policy() {
        let form = HashMap::from([
            ("body".to_string(), "<i>ok</i>".to_string()),
            ("link".to_string(), "https://example.com".to_string()),
        ]);
        let policy = FormPolicy::new()
            .with_field("body", FieldPolicy::RichText)
            .with_field("link", FieldPolicy::RestrictedUrl);

        let clean = Sanitizer::sanitize_form(&form, &policy);

        assert_eq!(clean["body"], "<i>ok</i>");
        assert_eq!(clean["link"], "https://example.com");
    }

    #[test]
    fn test_sanitize_form_undeclared_field_is_stripped() {
        let form = HashMap::from([("nickname".to_string(), "<img src=x>Eve".to_string())]);

        let clean = Sanitizer::sanitize_form(&form, &FormPolicy::new());

        assert_eq!(clean["nickname"], "Eve");
    }
}
