//! The provider API key.

/// Opaque API key for the text intelligence provider.
///
/// Loaded once at startup and injected into the provider client. The value is
/// never printed: `Debug` renders a fixed placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderCredential(String);

impl ProviderCredential {
    /// Creates a credential, returning `None` if `value` is empty or blank.
    ///
    /// Surrounding whitespace (a common artefact of `.env` files) is trimmed.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Returns the raw key for use in an authorization header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ProviderCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ProviderCredential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_credential_is_rejected() {
        assert!(ProviderCredential::new("").is_none());
        assert!(ProviderCredential::new("   \n").is_none());
    }

    #[test]
    fn credential_is_trimmed_and_redacted() {
        let cred = ProviderCredential::new("  secret-key\n").unwrap();
        assert_eq!(cred.expose(), "secret-key");
        assert!(!format!("{cred:?}").contains("secret"));
    }
}
