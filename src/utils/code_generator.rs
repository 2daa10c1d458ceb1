//! Short code generation.
//!
//! Codes are drawn uniformly from a 62-symbol case-sensitive alphanumeric
//! alphabet using the operating system CSPRNG. Codes carry no ordering and
//! reveal nothing about how many mappings exist.

use crate::error::AppError;
use serde_json::json;

/// Code alphabet: digits, uppercase and lowercase ASCII letters.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Default code length. 62^8 ≈ 2.2e14 possible codes.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Allowed range for configured code lengths.
pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 16;

/// Random bytes at or above this value are rejected so that `byte % 62`
/// stays uniform (248 = 4 * 62).
const REJECTION_THRESHOLD: u8 = 248;

/// Source of candidate short codes.
///
/// Implementations are pure generators that never touch storage; uniqueness
/// is enforced by [`crate::domain::repositories::MappingStore::insert_if_absent`].
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a new candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the entropy source fails.
    fn generate(&self) -> Result<String, AppError>;
}

/// Cryptographically secure random code generator.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator for codes of `length` characters.
    ///
    /// The length is clamped to [`MIN_CODE_LENGTH`]..=[`MAX_CODE_LENGTH`].
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let mut code = String::with_capacity(self.length);
        // Two extra bytes per symbol keep refills rare.
        let mut buffer = vec![0u8; self.length * 2];

        while code.len() < self.length {
            getrandom::fill(&mut buffer).map_err(|e| {
                tracing::error!("Entropy source failure: {}", e);
                AppError::internal(
                    "Failed to generate short code",
                    json!({ "reason": "entropy source unavailable" }),
                )
            })?;

            for &byte in buffer.iter().filter(|&&b| b < REJECTION_THRESHOLD) {
                if code.len() == self.length {
                    break;
                }
                code.push(ALPHABET[(byte % 62) as usize] as char);
            }
        }

        Ok(code)
    }
}

/// Returns true if `code` could have been produced by a generator.
pub fn is_well_formed(code: &str) -> bool {
    (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&code.len())
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_configured_length() {
        let generator = RandomCodeGenerator::new(6);
        assert_eq!(generator.generate().unwrap().len(), 6);

        let generator = RandomCodeGenerator::default();
        assert_eq!(generator.generate().unwrap().len(), DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_alphanumeric_only() {
        let generator = RandomCodeGenerator::default();

        for _ in 0..100 {
            let code = generator.generate().unwrap();
            assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = RandomCodeGenerator::default();
        let mut codes = HashSet::new();

        for _ in 0..1000 {
            codes.insert(generator.generate().unwrap());
        }

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_uses_whole_alphabet() {
        let generator = RandomCodeGenerator::new(MAX_CODE_LENGTH);
        let mut seen = HashSet::new();

        for _ in 0..500 {
            seen.extend(generator.generate().unwrap().bytes());
        }

        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn test_length_is_clamped() {
        assert_eq!(RandomCodeGenerator::new(1).length(), MIN_CODE_LENGTH);
        assert_eq!(RandomCodeGenerator::new(100).length(), MAX_CODE_LENGTH);
    }

    #[test]
    fn test_is_well_formed() {
        assert!(is_well_formed("Ab3dE9"));
        assert!(is_well_formed("abcdefgh12345678"));
        assert!(!is_well_formed("abc"));
        assert!(!is_well_formed("abc-def-ghi"));
        assert!(!is_well_formed(""));
    }
}
