//! Short code generation and shape checks.
//!
//! Codes are drawn uniformly from the 62 ASCII alphanumerics using the
//! thread-local CSPRNG, which keeps collisions rare and the code space hard
//! to enumerate.

use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use std::sync::LazyLock;

/// Shortest code the generator will produce and the resolver will accept.
pub const MIN_CODE_LENGTH: usize = 6;

/// Longest configurable code length.
pub const MAX_CODE_LENGTH: usize = 32;

/// Codes that would shadow a fixed route.
const RESERVED_CODES: &[&str] = &["health", "shorten"];

static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]{6,}$").expect("code pattern is valid"));

/// Random short code generator with a fixed output length.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    ///
    /// `length` is clamped to `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generates a candidate code matching `[a-zA-Z0-9]{length}`.
    ///
    /// The result is not checked against the store; uniqueness comes from the
    /// store's insert-if-absent.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        loop {
            let code: String = (&mut rng)
                .sample_iter(&Alphanumeric)
                .take(self.length)
                .map(char::from)
                .collect();

            if !is_reserved(&code) {
                return code;
            }
        }
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(MIN_CODE_LENGTH)
    }
}

/// Returns true if `code` has the shape of a short code.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

fn is_reserved(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_configured_length() {
        let generator = CodeGenerator::new(8);
        assert_eq!(generator.generate().len(), 8);
    }

    #[test]
    fn test_default_length_is_minimum() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.length(), MIN_CODE_LENGTH);
        assert_eq!(generator.generate().len(), MIN_CODE_LENGTH);
    }

    #[test]
    fn test_length_is_clamped() {
        assert_eq!(CodeGenerator::new(3).length(), MIN_CODE_LENGTH);
        assert_eq!(CodeGenerator::new(500).length(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        let generator = CodeGenerator::default();
        for _ in 0..200 {
            let code = generator.generate();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
            assert!(is_valid_code(&code));
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = CodeGenerator::default();
        let codes: HashSet<String> = (0..1000).map(|_| generator.generate()).collect();

        // 62^6 candidates; a duplicate among 1000 draws is vanishingly unlikely.
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_full_alphabet() {
        let generator = CodeGenerator::new(MAX_CODE_LENGTH);
        let seen: HashSet<char> = (0..200)
            .flat_map(|_| generator.generate().chars().collect::<Vec<_>>())
            .collect();

        assert!(seen.iter().any(|c| c.is_ascii_lowercase()));
        assert!(seen.iter().any(|c| c.is_ascii_uppercase()));
        assert!(seen.iter().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_reserved_codes_are_valid_shapes() {
        for &reserved in RESERVED_CODES {
            assert!(is_valid_code(reserved));
            assert!(is_reserved(reserved));
        }
    }

    #[test]
    fn test_is_valid_code() {
        assert!(is_valid_code("Ab3kX9"));
        assert!(is_valid_code("abcdefghij"));
        assert!(is_valid_code("123456"));

        assert!(!is_valid_code("abc12"));
        assert!(!is_valid_code(""));
        assert!(!is_valid_code("abc-123"));
        assert!(!is_valid_code("abc_123"));
        assert!(!is_valid_code("abc123 "));
        assert!(!is_valid_code("äbc123"));
    }
}
