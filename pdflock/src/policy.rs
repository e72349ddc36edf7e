//! Per-run transform policy.
//!
//! A [`TransformPolicy`] says whether a run applies or removes protection,
//! which password to use, and how strong the applied encryption is. It is
//! built once per run and shared read-only with every file transform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PdfLockError, Result};

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Apply password-based encryption.
    #[default]
    Protect,
    /// Remove password-based encryption, requiring the current password.
    Unprotect,
}

impl Mode {
    /// Past-tense label substituted into `{mode_label}` placeholders.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Protect => "encrypted",
            Self::Unprotect => "decrypted",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Protect => f.write_str("protect"),
            Self::Unprotect => f.write_str("unprotect"),
        }
    }
}

impl FromStr for Mode {
    type Err = PdfLockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "protect" | "encrypt" => Ok(Self::Protect),
            "unprotect" | "decrypt" => Ok(Self::Unprotect),
            _ => Err(PdfLockError::invalid_config(format!(
                "Invalid mode: {s}. Must be one of: protect, unprotect"
            ))),
        }
    }
}

/// Strength of the encryption applied when protecting.
///
/// Both levels use the standard security handler with RC4; they differ in
/// key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncryptionStrength {
    /// 40-bit key, readable by very old viewers.
    Rc4_40,
    /// 128-bit key.
    #[default]
    Rc4_128,
}

impl EncryptionStrength {
    /// Key length in bits.
    pub fn key_length_bits(&self) -> u32 {
        match self {
            Self::Rc4_40 => 40,
            Self::Rc4_128 => 128,
        }
    }

    /// Name accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rc4_40 => "rc4-40",
            Self::Rc4_128 => "rc4-128",
        }
    }
}

impl FromStr for EncryptionStrength {
    type Err = PdfLockError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rc4-40" | "40" => Ok(Self::Rc4_40),
            "rc4-128" | "128" => Ok(Self::Rc4_128),
            _ => Err(PdfLockError::invalid_config(format!(
                "Invalid encryption strength: {s}. Must be one of: rc4-40, rc4-128"
            ))),
        }
    }
}

/// Encryption request handed to the codec when saving.
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionSpec {
    /// Password granting full access.
    pub owner_password: String,
    /// Password required to open the document.
    pub user_password: String,
    /// Requested strength.
    pub strength: EncryptionStrength,
}

impl fmt::Debug for EncryptionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionSpec")
            .field("owner_password", &"<redacted>")
            .field("user_password", &"<redacted>")
            .field("strength", &self.strength)
            .finish()
    }
}

/// What one run does to every file.
#[derive(Clone, PartialEq, Eq)]
pub struct TransformPolicy {
    /// Protect or unprotect.
    pub mode: Mode,
    /// Password to apply or to unlock with. Must be non-empty.
    pub password: String,
    /// Strength used when protecting. Ignored when unprotecting.
    pub strength: EncryptionStrength,
}

impl TransformPolicy {
    /// Create a policy with the default encryption strength.
    pub fn new(mode: Mode, password: impl Into<String>) -> Self {
        Self {
            mode,
            password: password.into(),
            strength: EncryptionStrength::default(),
        }
    }

    /// Create a protect policy.
    pub fn protect(password: impl Into<String>) -> Self {
        Self::new(Mode::Protect, password)
    }

    /// Create an unprotect policy.
    pub fn unprotect(password: impl Into<String>) -> Self {
        Self::new(Mode::Unprotect, password)
    }

    /// Set the encryption strength.
    pub fn with_strength(mut self, strength: EncryptionStrength) -> Self {
        self.strength = strength;
        self
    }

    /// Check the policy before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns [`PdfLockError::MissingPassword`] if the password is empty.
    pub fn validate(&self) -> Result<()> {
        if self.password.is_empty() {
            return Err(PdfLockError::MissingPassword);
        }
        Ok(())
    }

    /// Password used to open each file, if any.
    pub fn open_password(&self) -> Option<&str> {
        match self.mode {
            Mode::Protect => None,
            Mode::Unprotect => Some(&self.password),
        }
    }

    /// Encryption applied when saving, if any.
    pub fn encryption_spec(&self) -> Option<EncryptionSpec> {
        match self.mode {
            Mode::Protect => Some(EncryptionSpec {
                owner_password: self.password.clone(),
                user_password: self.password.clone(),
                strength: self.strength,
            }),
            Mode::Unprotect => None,
        }
    }
}

impl fmt::Debug for TransformPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformPolicy")
            .field("mode", &self.mode)
            .field("password", &"<redacted>")
            .field("strength", &self.strength)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("protect", Mode::Protect)]
    #[case("ENCRYPT", Mode::Protect)]
    #[case("unprotect", Mode::Unprotect)]
    #[case("decrypt", Mode::Unprotect)]
    fn test_mode_from_str(#[case] input: &str, #[case] expected: Mode) {
        assert_eq!(Mode::from_str(input).unwrap(), expected);
    }

    #[test]
    fn test_mode_from_str_invalid() {
        assert!(Mode::from_str("shred").is_err());
    }

    #[test]
    fn test_mode_label() {
        assert_eq!(Mode::Protect.label(), "encrypted");
        assert_eq!(Mode::Unprotect.label(), "decrypted");
    }

    #[test]
    fn test_strength_from_str() {
        assert_eq!(
            EncryptionStrength::from_str("rc4-40").unwrap(),
            EncryptionStrength::Rc4_40
        );
        assert_eq!(
            EncryptionStrength::from_str("128").unwrap(),
            EncryptionStrength::Rc4_128
        );
        assert!(EncryptionStrength::from_str("aes-512").is_err());
        assert_eq!(EncryptionStrength::default().key_length_bits(), 128);
    }

    #[test]
    fn test_validate_rejects_empty_password() {
        let policy = TransformPolicy::protect("");
        assert!(matches!(
            policy.validate(),
            Err(PdfLockError::MissingPassword)
        ));

        assert!(TransformPolicy::unprotect("secret123").validate().is_ok());
    }

    #[test]
    fn test_protect_policy_requests_encryption() {
        let policy = TransformPolicy::protect("secret123").with_strength(EncryptionStrength::Rc4_40);

        assert_eq!(policy.open_password(), None);

        let spec = policy.encryption_spec().unwrap();
        assert_eq!(spec.owner_password, "secret123");
        assert_eq!(spec.user_password, "secret123");
        assert_eq!(spec.strength, EncryptionStrength::Rc4_40);
    }

    #[test]
    fn test_unprotect_policy_opens_with_password() {
        let policy = TransformPolicy::unprotect("secret123");

        assert_eq!(policy.open_password(), Some("secret123"));
        assert!(policy.encryption_spec().is_none());
    }

    #[test]
    fn test_debug_redacts_password() {
        let policy = TransformPolicy::protect("hunter2");
        let debug = format!("{policy:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("redacted"));

        let spec = policy.encryption_spec().unwrap();
        assert!(!format!("{spec:?}").contains("hunter2"));
    }
}
