//! Jersey rendering engine
//!
//! This module contains the preview pipeline:
//! - Layer projection from a configuration and design entry
//! - Arc geometry for curved front text
//! - SVG serialization
//! - Drag handling for positionable elements

mod drag;
mod projector;
mod svg;
mod text;

pub use drag::{DragState, DragTarget, PlacementController, PreviewRect};
pub use projector::{is_arced, project, Composition, Layer, OverlaySource, TextPath, View};
pub use svg::SvgDocument;
pub use text::{ArcPath, ARC_CHORD_OFFSET, ARC_HALF_SPAN, ARC_RADIUS};
