use crate::error::GeneratorError;

const ALPHANUMERIC: &[u8; 62] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// The set of characters a generator draws from.
///
/// Only ASCII letters and digits are accepted, so every generated string is a
/// valid [`Alias`](shortcut_core::Alias).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Vec<u8>,
}

impl Alphabet {
    /// The 62-character `[A-Za-z0-9]` alphabet.
    pub fn alphanumeric() -> Self {
        Self {
            chars: ALPHANUMERIC.to_vec(),
        }
    }

    /// Builds a custom alphabet from the characters of `chars`.
    pub fn new(chars: &str) -> Result<Self, GeneratorError> {
        if chars.is_empty() {
            return Err(GeneratorError::EmptyAlphabet);
        }

        let mut seen = Vec::with_capacity(chars.len());
        for c in chars.chars() {
            if !c.is_ascii_alphanumeric() {
                return Err(GeneratorError::InvalidCharacter(c));
            }
            let byte = c as u8;
            if seen.contains(&byte) {
                return Err(GeneratorError::DuplicateCharacter(c));
            }
            seen.push(byte);
        }

        Ok(Self { chars: seen })
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> char {
        self.chars[index] as char
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::alphanumeric()
    }
}
