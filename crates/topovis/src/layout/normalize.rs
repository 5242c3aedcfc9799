//! Rescaling and re-centering of position maps.

use topovis_core::geometry::{Bounds, Point, Size};

use super::PositionMap;

/// Maps `positions` into the rectangle of size `scale` centered on `offset`.
///
/// Every point is moved so the bounding-box center lands on the origin, each
/// axis is stretched by `scale / range`, and `offset` is added. An axis with
/// zero range keeps a factor of 1, so all of its points collapse onto the
/// offset. An empty map normalizes to an empty map.
///
/// # Examples
///
/// ```
/// # use topovis::layout::{PositionMap, normalize};
/// # use topovis_core::geometry::{Point, Size};
/// let mut positions = PositionMap::new();
/// positions.insert("a".into(), Point::new(0.0, 0.0));
/// positions.insert("b".into(), Point::new(4.0, 2.0));
///
/// let normalized = normalize(&positions, Size::new(1.0, 1.0), Point::new(0.5, 0.5));
/// assert_eq!(normalized["a"], Point::new(0.0, 0.0));
/// assert_eq!(normalized["b"], Point::new(1.0, 1.0));
/// ```
pub fn normalize(positions: &PositionMap, scale: Size, offset: Point) -> PositionMap {
    let Some(bounds) = Bounds::from_points(positions.values().copied()) else {
        return PositionMap::new();
    };

    let center = bounds.center();
    let x_factor = axis_factor(scale.width(), bounds.width());
    let y_factor = axis_factor(scale.height(), bounds.height());

    positions
        .iter()
        .map(|(node, point)| {
            let normalized = point
                .sub_point(center)
                .scale_xy(x_factor, y_factor)
                .add_point(offset);
            (node.clone(), normalized)
        })
        .collect()
}

fn axis_factor(scale: f32, range: f32) -> f32 {
    if range == 0.0 { 1.0 } else { scale / range }
}
