//! Swimlane Core Types and Definitions
//!
//! This crate provides the foundational types for Swimlane pipeline diagrams.
//! It includes:
//!
//! - **Identifiers**: Integer node keys and 1-based zone positions ([`identifier`] module)
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Stroke definitions shared by the renderers ([`draw`] module)
//! - **Semantic**: The static pipeline model of zones, nodes and edges ([`semantic`] module)
//! - **Style**: The declarative node style-rule table ([`style`] module)
//! - **Status**: Journey overlays highlighting nodes ([`status`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod semantic;
pub mod status;
pub mod style;
