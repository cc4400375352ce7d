//! Vertex label codec
//!
//! Vertices are presented as letters: with the default alphabet `A..=Z`,
//! index 0 is `A` and index 25 is `Z`. Indices past the alphabet continue in
//! bijective base-`n` (`AA`, `AB`, ...), so every index has exactly one label
//! and every well-formed label decodes back to it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::traits::NodeId;

/// Label alphabet configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Character labelling vertex 0
    pub base: char,
    /// Number of consecutive characters starting at `base`
    pub alphabet_size: u32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            base: 'A',
            alphabet_size: 26,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("invalid label alphabet: {size} characters starting at {base:?}")]
    InvalidAlphabet { base: char, size: u32 },

    #[error("empty vertex label")]
    Empty,

    #[error("character {ch:?} in label {label:?} is outside the label alphabet")]
    UnknownCharacter { label: String, ch: char },

    #[error("label {0:?} is too long to address a vertex")]
    Overflow(String),
}

/// Bidirectional mapping between vertex indices and labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelCodec {
    base: u32,
    size: u32,
}

impl LabelCodec {
    pub fn new(config: LabelConfig) -> Result<Self, LabelError> {
        let base = config.base as u32;
        let size = config.alphabet_size;
        let invalid = LabelError::InvalidAlphabet {
            base: config.base,
            size,
        };

        if size == 0 {
            return Err(invalid);
        }
        let all_valid = (0..size).all(|d| {
            base.checked_add(d)
                .and_then(char::from_u32)
                .is_some_and(|c| !c.is_whitespace())
        });
        if !all_valid {
            return Err(invalid);
        }

        Ok(Self { base, size })
    }

    pub fn config(&self) -> LabelConfig {
        LabelConfig {
            base: self.digit(0),
            alphabet_size: self.size,
        }
    }

    #[inline]
    fn digit(&self, d: u32) -> char {
        // Every digit below `size` was validated in `new`
        char::from_u32(self.base + d).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Label for `node`
    pub fn encode(&self, node: NodeId) -> String {
        let n = u128::from(self.size);
        let mut rest = node.0 as u128 + 1;
        let mut digits = Vec::new();
        while rest > 0 {
            rest -= 1;
            digits.push(self.digit((rest % n) as u32));
            rest /= n;
        }
        digits.iter().rev().collect()
    }

    /// Index for `label`
    pub fn decode(&self, label: &str) -> Result<NodeId, LabelError> {
        if label.is_empty() {
            return Err(LabelError::Empty);
        }
        let n = self.size as usize;
        let mut value: usize = 0;
        for ch in label.chars() {
            let d = (ch as u32)
                .checked_sub(self.base)
                .filter(|d| *d < self.size)
                .ok_or_else(|| LabelError::UnknownCharacter {
                    label: label.to_owned(),
                    ch,
                })?;
            value = value
                .checked_mul(n)
                .and_then(|v| v.checked_add(d as usize + 1))
                .ok_or_else(|| LabelError::Overflow(label.to_owned()))?;
        }
        Ok(NodeId(value - 1))
    }
}

impl Default for LabelCodec {
    fn default() -> Self {
        Self {
            base: 'A' as u32,
            size: 26,
        }
    }
}
