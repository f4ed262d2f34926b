//! Status overlays.
//!
//! A status overlay tags nodes as part of a successful journey, a failed
//! journey or work still in progress. Overlays are independent of layout: the
//! renderer looks them up by name and paints a highlight behind each tagged
//! node.

use std::collections::BTreeSet;

use crate::identifier::NodeId;

/// The kind of highlight painted behind a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    Success,
    Failure,
    InProgress,
}

/// Sets of node ids tagged with a journey outcome.
///
/// A node may appear in several sets; it then receives several highlights,
/// painted in the order success, failure, in progress.
///
/// # Examples
///
/// ```
/// use swimlane_core::identifier::NodeId;
/// use swimlane_core::status::{Highlight, StatusOverlay};
///
/// let overlay = StatusOverlay::new()
///     .with_success([1, 2, 3].map(NodeId::new))
///     .with_failure([3].map(NodeId::new));
///
/// let highlights: Vec<_> = overlay.highlights(NodeId::new(3)).collect();
/// assert_eq!(highlights, vec![Highlight::Success, Highlight::Failure]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusOverlay {
    success: BTreeSet<NodeId>,
    failure: BTreeSet<NodeId>,
    in_progress: BTreeSet<NodeId>,
}

impl StatusOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_success(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.success.extend(ids);
        self
    }

    pub fn with_failure(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.failure.extend(ids);
        self
    }

    pub fn with_in_progress(mut self, ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.in_progress.extend(ids);
        self
    }

    pub fn success(&self) -> &BTreeSet<NodeId> {
        &self.success
    }

    pub fn failure(&self) -> &BTreeSet<NodeId> {
        &self.failure
    }

    pub fn in_progress(&self) -> &BTreeSet<NodeId> {
        &self.in_progress
    }

    /// Highlights for the node, in paint order.
    pub fn highlights(&self, id: NodeId) -> impl Iterator<Item = Highlight> + '_ {
        [
            (&self.success, Highlight::Success),
            (&self.failure, Highlight::Failure),
            (&self.in_progress, Highlight::InProgress),
        ]
        .into_iter()
        .filter(move |(set, _)| set.contains(&id))
        .map(|(_, highlight)| highlight)
    }

    /// Every node id mentioned by the overlay.
    pub fn tagged_nodes(&self) -> BTreeSet<NodeId> {
        self.success
            .iter()
            .chain(&self.failure)
            .chain(&self.in_progress)
            .copied()
            .collect()
    }
}
