//! Variant selection
//!
//! Every student gets one of a fixed pool of answer variants. The variant is a
//! CRC-32 (IEEE) of the identifier bytes modulo the pool size, so the same
//! identifier always maps to the same variant with no shared state.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Index of an answer variant, always below the selector's pool size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantIndex(u32);

impl VariantIndex {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VariantIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maps identifiers onto `[0, num_variants)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantSelector {
    num_variants: NonZeroU32,
}

impl VariantSelector {
    pub fn new(num_variants: NonZeroU32) -> Self {
        Self { num_variants }
    }

    /// Select the variant for an identifier (e.g. a repository name)
    pub fn select(&self, identifier: impl AsRef<[u8]>) -> VariantIndex {
        let checksum = crc32fast::hash(identifier.as_ref());
        VariantIndex(checksum % self.num_variants.get())
    }

    /// Build an index directly, rejecting values outside the pool
    pub fn index(&self, raw: u32) -> Option<VariantIndex> {
        (raw < self.num_variants.get()).then_some(VariantIndex(raw))
    }
}
