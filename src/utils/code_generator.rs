//! Short code generation and validation utilities.
//!
//! Generated codes are random alphanumeric strings with no uniqueness
//! guarantee; the registry retries against its own existence check.
//! User-provided custom codes are validated against a configurable
//! [`CustomCodePolicy`].

use crate::domain::error::RegistryError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Default pattern for user-provided custom codes.
pub const DEFAULT_CUSTOM_CODE_PATTERN: &str = "^[A-Za-z0-9_-]{3,20}$";

/// Reserved codes that cannot be used as short links.
///
/// These collide with service routes and could never be redirected.
const RESERVED_CODES: &[&str] = &["api", "health", "static"];

/// Whether `code` collides with a service route.
pub fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Produces random short-code candidates.
///
/// Stateless apart from its length; safe to share across threads.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generates a candidate from `[A-Za-z0-9]`.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let code = CodeGenerator::new(6).generate();
    /// assert_eq!(code.len(), 6);
    /// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    /// ```
    pub fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

/// Rules for user-chosen short codes.
#[derive(Debug, Clone)]
pub struct CustomCodePolicy {
    pattern: Regex,
}

impl CustomCodePolicy {
    /// Compiles a policy from a regular expression.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error for malformed patterns.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Validates a user-provided custom short code.
    ///
    /// # Rules
    ///
    /// - Must match the policy pattern (default: 3-20 of letters, digits, `-`, `_`)
    /// - Cannot be a reserved system code
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidInput`] if any rule is violated.
    pub fn validate(&self, code: &str) -> Result<(), RegistryError> {
        if !self.pattern.is_match(code) {
            return Err(RegistryError::invalid(self.describe_violation(code)));
        }

        if is_reserved(code) {
            return Err(RegistryError::invalid("This code is reserved"));
        }

        Ok(())
    }

    fn describe_violation(&self, code: &str) -> &'static str {
        if self.pattern.as_str() != DEFAULT_CUSTOM_CODE_PATTERN {
            return "Custom code does not match the allowed format";
        }

        if code.len() < 3 || code.len() > 20 {
            "Custom code must be 3-20 characters"
        } else {
            "Custom code can only contain letters, numbers, hyphens, and underscores"
        }
    }
}

impl Default for CustomCodePolicy {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_CUSTOM_CODE_PATTERN).expect("default pattern is valid"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_configured_length() {
        assert_eq!(CodeGenerator::new(6).generate().len(), 6);
        assert_eq!(CodeGenerator::new(12).generate().len(), 12);
    }

    #[test]
    fn test_generate_code_alphanumeric() {
        let generator = CodeGenerator::default();
        for _ in 0..100 {
            assert!(generator.generate().chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_generate_code_is_url_safe_custom_code() {
        // generated codes must also be acceptable as custom codes
        let policy = CustomCodePolicy::default();
        let code = CodeGenerator::default().generate();
        assert!(policy.validate(&code).is_ok());
    }

    #[test]
    fn test_generate_code_mostly_unique() {
        let generator = CodeGenerator::new(10);
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_validate_accepts_bounds() {
        let policy = CustomCodePolicy::default();
        assert!(policy.validate("abc").is_ok());
        assert!(policy.validate("a".repeat(20).as_str()).is_ok());
    }

    #[test]
    fn test_validate_accepts_mixed_charset() {
        let policy = CustomCodePolicy::default();
        assert!(policy.validate("My_Promo-2024").is_ok());
        assert!(policy.validate("___").is_ok());
        assert!(policy.validate("-x-").is_ok());
    }

    #[test]
    fn test_validate_too_short() {
        let err = CustomCodePolicy::default().validate("ab").unwrap_err();
        assert_eq!(
            err,
            RegistryError::invalid("Custom code must be 3-20 characters")
        );
    }

    #[test]
    fn test_validate_too_long() {
        let result = CustomCodePolicy::default().validate(&"a".repeat(21));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_special_characters() {
        let policy = CustomCodePolicy::default();

        for code in ["my code", "my.code", "promo!", "üñí", "a/b/c"] {
            let err = policy.validate(code).unwrap_err();
            assert!(
                err.to_string().contains("letters, numbers"),
                "'{code}' should be rejected for its characters"
            );
        }
    }

    #[test]
    fn test_validate_empty_string() {
        assert!(CustomCodePolicy::default().validate("").is_err());
    }

    #[test]
    fn test_validate_all_reserved_codes() {
        let policy = CustomCodePolicy::default();
        for &reserved in RESERVED_CODES {
            assert!(
                policy.validate(reserved).is_err(),
                "Reserved code '{}' should be invalid",
                reserved
            );
        }
    }

    #[test]
    fn test_is_reserved() {
        assert!(is_reserved("health"));
        assert!(is_reserved("static"));
        assert!(!is_reserved("Health"));
        assert!(!is_reserved("promo"));
    }

    #[test]
    fn test_custom_pattern() {
        let policy = CustomCodePolicy::new("^[a-z]{5}$").unwrap();

        assert!(policy.validate("promo").is_ok());
        assert_eq!(
            policy.validate("Promo").unwrap_err(),
            RegistryError::invalid("Custom code does not match the allowed format")
        );
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        assert!(CustomCodePolicy::new("([a-z]").is_err());
    }
}
