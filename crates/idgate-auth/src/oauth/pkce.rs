//! PKCE challenge shape validation (RFC 7636).
//!
//! The authorization endpoint only checks that the challenge is
//! syntactically valid; verifying the challenge against a code verifier
//! happens at the token endpoint, outside this core.

/// PKCE code challenge methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CodeChallengeMethod {
    /// The challenge is the verifier itself. Default when a challenge is
    /// supplied without a method.
    #[default]
    Plain,
    /// The challenge is `BASE64URL(SHA256(ASCII(code_verifier)))`.
    S256,
}

impl CodeChallengeMethod {
    /// Parses a `code_challenge_method` parameter value.
    ///
    /// Returns `None` for anything other than `plain` or `S256`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "plain" => Some(Self::Plain),
            "S256" => Some(Self::S256),
            _ => None,
        }
    }

    /// Returns the wire value of the method.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::S256 => "S256",
        }
    }
}

impl std::fmt::Display for CodeChallengeMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checks the shape of a `code_challenge` value.
///
/// RFC 7636 §4.2: 43 to 128 characters from the unreserved set
/// `[A-Z] / [a-z] / [0-9] / "-" / "." / "_" / "~"`. The same shape applies
/// to both `plain` and `S256` challenges.
#[must_use]
pub fn is_valid_code_challenge(challenge: &str) -> bool {
    (43..=128).contains(&challenge.len())
        && challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!(CodeChallengeMethod::parse("plain"), Some(CodeChallengeMethod::Plain));
        assert_eq!(CodeChallengeMethod::parse("S256"), Some(CodeChallengeMethod::S256));
        assert_eq!(CodeChallengeMethod::parse("s256"), None);
        assert_eq!(CodeChallengeMethod::parse("invalid"), None);
    }

    #[test]
    fn test_method_default_is_plain() {
        assert_eq!(CodeChallengeMethod::default(), CodeChallengeMethod::Plain);
    }

    #[test]
    fn test_challenge_rfc7636_vector() {
        // S256 challenge from RFC 7636 Appendix B
        assert!(is_valid_code_challenge(
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        ));
    }

    #[test]
    fn test_challenge_length_bounds() {
        assert!(!is_valid_code_challenge(&"a".repeat(42)));
        assert!(is_valid_code_challenge(&"a".repeat(43)));
        assert!(is_valid_code_challenge(&"a".repeat(128)));
        assert!(!is_valid_code_challenge(&"a".repeat(129)));
    }

    #[test]
    fn test_challenge_alphabet() {
        let valid = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJ0123456789-._~"
            .chars()
            .cycle()
            .take(64)
            .collect::<String>();
        assert!(is_valid_code_challenge(&valid));

        assert!(!is_valid_code_challenge(&"a!".repeat(30)));
        assert!(!is_valid_code_challenge(&"a ".repeat(30)));
    }

    #[test]
    fn test_short_challenge_rejected() {
        // "challenge" is well-formed but far too short
        assert!(!is_valid_code_challenge("challenge"));
    }
}
