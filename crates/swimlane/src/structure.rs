//! Adjacency structure derived from a pipeline definition.
//!
//! The [`Forest`] indexes the declared nodes densely in declaration order and
//! records, for each node, the edges leaving and entering it in input order.
//! Layout stages work on [`NodeIndex`] values and only translate back to
//! [`NodeId`](swimlane_core::identifier::NodeId) when building results.

mod forest;

pub(crate) use forest::{Forest, NodeIndex};

#[cfg(test)]
pub(crate) use forest::tests::pipeline as test_pipeline;
