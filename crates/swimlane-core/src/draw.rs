//! Visual definitions shared by the Swimlane renderers.

mod stroke;

pub use stroke::{StrokeDefinition, StrokeJoin};
