//! Identifiers for pipeline nodes and zones.
//!
//! Nodes are keyed by the integer ids authored in the definition file. Zones
//! have no key of their own: a zone is identified by its 1-based position in
//! the declared zone sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Integer key of a pipeline node.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::NodeId;
///
/// let id = NodeId::new(7);
/// assert_eq!(id.value(), 7);
/// assert_eq!(id.to_string(), "7");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a node id from its integer key.
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the integer key.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-based position of a zone in the declared zone sequence.
///
/// Zone `1` is the topmost band. A zone id of `0` is never valid; use
/// [`ZoneId::index`] to address zone storage.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::ZoneId;
///
/// let zone = ZoneId::new(1);
/// assert_eq!(zone.index(), Some(0));
/// assert_eq!(ZoneId::new(0).index(), None);
/// assert_eq!(ZoneId::from_index(2), ZoneId::new(3));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct ZoneId(u32);

impl ZoneId {
    /// Creates a zone id from its 1-based position.
    pub fn new(position: u32) -> Self {
        Self(position)
    }

    /// Creates a zone id from a 0-based storage index.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Returns the 1-based position.
    pub fn position(self) -> u32 {
        self.0
    }

    /// Returns the 0-based storage index, or `None` for the invalid zone `0`.
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
