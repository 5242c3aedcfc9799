//! Canvas sizing and placement of positions on the canvas.

use topovis_core::geometry::{Point, Size};

use crate::layout::{PositionMap, normalize};

const MIN_WIDTH: f32 = 700.0;
const MIN_HEIGHT: f32 = 100.0;
/// Share of each canvas dimension left empty around the nodes.
const PADDING: f32 = 0.25;
/// Vertical position of the title as a share of the canvas height.
const TITLE_HEIGHT: f32 = 0.05;

/// The drawing surface of one diagram, sized from its node count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    size: Size,
}

impl Canvas {
    /// Sizes a canvas for `node_count` nodes.
    ///
    /// ```text
    /// width  = max(42 * n^1.05, 700)
    /// height = max(28 * n, 100)
    /// ```
    pub fn for_node_count(node_count: usize) -> Self {
        let n = node_count as f32;
        Self {
            size: Size::new(
                (42.0 * n.powf(1.05)).max(MIN_WIDTH),
                (28.0 * n).max(MIN_HEIGHT),
            ),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    /// Anchor of the title caption: horizontally centered, near the top.
    pub fn title_anchor(&self) -> Point {
        Point::new(self.width() * 0.5, self.height() * TITLE_HEIGHT)
    }

    /// Rescales `positions` into the padded interior of the canvas.
    pub fn place(&self, positions: &PositionMap) -> PositionMap {
        normalize(
            positions,
            self.size.scale(1.0 - PADDING),
            self.size.scale(0.5).to_point(),
        )
    }
}
