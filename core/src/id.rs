//! Identity types for ontology entities.
//!
//! Identities are assigned by the backing store on insert and are never
//! reused by it. A raw value of `0` means "not yet persisted" and `-1` is the
//! sentinel returned for "not found". Only positive values are valid.
//!
//! Each entity kind has its own newtype so a node id can never be passed
//! where an edge id is expected, and none of them doubles as an index.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Identity of an entity that has not been persisted yet.
            pub const UNSET: Self = Self(0);

            /// Sentinel identity meaning "no such entity".
            pub const INVALID: Self = Self(-1);

            /// Create an identity from a raw value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub fn raw(&self) -> i64 {
                self.0
            }

            /// Returns true if this identity refers to a persisted entity.
            pub fn is_valid(&self) -> bool {
                self.0 > 0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::UNSET
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of an ontology (a graph scoping nodes and edges).
    GraphId,
    "g"
);

define_id!(
    /// Identifier of a node.
    NodeId,
    "n"
);

define_id!(
    /// Identifier of an edge (relationship).
    EdgeId,
    "e"
);

define_id!(
    /// Identifier of a detached attribute row.
    AttributeId,
    "a"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity() {
        assert!(NodeId::new(1).is_valid());
        assert!(!NodeId::UNSET.is_valid());
        assert!(!NodeId::INVALID.is_valid());
        assert!(!EdgeId::new(-7).is_valid());
    }

    #[test]
    fn test_default_is_unset() {
        assert_eq!(NodeId::default(), NodeId::UNSET);
        assert_eq!(GraphId::default().raw(), 0);
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(GraphId::new(3).to_string(), "g3");
        assert_eq!(NodeId::new(42).to_string(), "n42");
        assert_eq!(EdgeId::new(9).to_string(), "e9");
        assert_eq!(AttributeId::new(1).to_string(), "a1");
    }

    #[test]
    fn test_serializes_as_raw_integer() {
        let json = serde_json::to_string(&NodeId::new(5)).unwrap();
        assert_eq!(json, "5");
        let back: EdgeId = serde_json::from_str("12").unwrap();
        assert_eq!(back, EdgeId::new(12));
    }
}
