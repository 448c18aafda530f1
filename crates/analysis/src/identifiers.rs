//! Newtype identifiers and validated string values.
//!
//! Provider-assigned identifiers ([`RequestId`], [`ModelUuid`]) are opaque and
//! only required to be non-empty. [`LanguageCode`] and [`SourceUrl`] carry
//! real validation rules because they are accepted from callers.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for opaque String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Identifies one analysis call at the provider.
    ///
    /// Echoed back to callers in result metadata so that a response can be
    /// correlated with the provider's own logs.
    RequestId
}

string_id! {
    /// Identifies the provider model that produced one feature's output.
    ModelUuid
}

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Language tag forwarded to the provider (e.g. `"en"`, `"en-US"`).
///
/// Only the shape is checked here; whether the provider supports the
/// language is the provider's decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Longest tag accepted. Matches the BCP-47 practical upper bound.
    pub const MAX_LEN: usize = 35;

    /// Creates a language code, returning `None` if `value` is empty, too long,
    /// or contains anything other than ASCII alphanumerics and `-`.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let well_formed = !v.is_empty()
            && v.len() <= Self::MAX_LEN
            && !v.starts_with('-')
            && !v.ends_with('-')
            && v.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if well_formed {
            Some(Self(v))
        } else {
            None
        }
    }

    /// Returns the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Source URL
// ---------------------------------------------------------------------------

/// Absolute `http` or `https` URL whose content the provider should fetch
/// and analyse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Creates a source URL, returning `None` unless `value` starts with
    /// `http://` or `https://` and has something after the scheme.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let rest = v
            .strip_prefix("https://")
            .or_else(|| v.strip_prefix("http://"))?;
        if rest.is_empty() || rest.chars().any(char::is_whitespace) {
            return None;
        }
        Some(Self(v))
    }

    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_reject_empty() {
        assert!(RequestId::new("").is_none());
        assert_eq!(RequestId::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn language_code_shape() {
        assert!(LanguageCode::new("en").is_some());
        assert!(LanguageCode::new("en-US").is_some());
        assert!(LanguageCode::new("").is_none());
        assert!(LanguageCode::new("en US").is_none());
        assert!(LanguageCode::new("-en").is_none());
        assert!(LanguageCode::new("x".repeat(36)).is_none());
        assert_eq!(LanguageCode::default().as_str(), "en");
    }

    #[test]
    fn source_url_requires_http_scheme() {
        assert!(SourceUrl::new("https://example.com/article").is_some());
        assert!(SourceUrl::new("http://example.com").is_some());
        assert!(SourceUrl::new("ftp://example.com").is_none());
        assert!(SourceUrl::new("example.com").is_none());
        assert!(SourceUrl::new("https://").is_none());
        assert!(SourceUrl::new("https://exa mple.com").is_none());
    }
}
