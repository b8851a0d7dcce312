//! Asset identifiers
//!
//! The ledger tracks two kinds of fungible value: the native asset (a single
//! reserved sentinel) and token assets identified by an external asset
//! contract identifier. An `AssetId` is pure data, used as a map key.

use serde::{Deserialize, Serialize};
use std::fmt;

/// External identifier of a token asset
///
/// Opaque, non-empty string (e.g. a contract address or symbol).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Create a new TokenId from a string
    ///
    /// # Panics
    /// Panics if the identifier is empty
    pub fn new(id: impl Into<String>) -> Self {
        let s = id.into();
        assert!(!s.is_empty(), "TokenId must be non-empty");
        Self(s)
    }

    /// Try to create a TokenId, returning None if empty
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let s = id.into();
        if s.is_empty() {
            None
        } else {
            Some(Self(s))
        }
    }

    /// Get the identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Asset classification, for mismatch reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetKind {
    Native,
    Token,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Native => write!(f, "native"),
            AssetKind::Token => write!(f, "token"),
        }
    }
}

/// Identifier of an asset held in the ledger
///
/// Either the reserved native sentinel or an external token identifier.
/// Immutable once chosen by a caller for a given operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// The ledger's built-in value unit
    Native,
    /// A fungible asset identified by an external contract identifier
    Token(TokenId),
}

impl AssetId {
    /// The native-asset sentinel
    pub fn native() -> Self {
        AssetId::Native
    }

    /// A token asset from an external identifier
    ///
    /// # Panics
    /// Panics if the identifier is empty
    pub fn token(id: impl Into<String>) -> Self {
        AssetId::Token(TokenId::new(id))
    }

    /// Classification of this asset
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetId::Native => AssetKind::Native,
            AssetId::Token(_) => AssetKind::Token,
        }
    }

    /// Check for the native sentinel
    pub fn is_native(&self) -> bool {
        matches!(self, AssetId::Native)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Native => write!(f, "native"),
            AssetId::Token(id) => write!(f, "{}", id),
        }
    }
}
