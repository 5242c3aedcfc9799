//! Drawable components for diagram rendering.
//!
//! All drawable components implement the [`Drawable`] trait, which provides a
//! consistent interface for rendering to SVG and reporting a footprint. Output
//! is collected per z-order layer through [`LayeredOutput`].

mod edge;
mod icon;
mod layer;
mod text;

pub use edge::{EdgeDefinition, EdgeLine, EdgeStyle};
pub use icon::{IconSymbol, IconUse, icon_symbol_id};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use text::{Caption, LabelStack, TextDefinition};

use crate::geometry::{Point, Size};

/// Something that renders itself to an SVG node anchored at a position.
pub trait Drawable: std::fmt::Debug {
    /// Renders the drawable with `position` as its anchor point.
    fn render_to_svg(&self, position: Point) -> SvgNode;

    /// Returns the footprint of the drawable.
    fn size(&self) -> Size;
}
