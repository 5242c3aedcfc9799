//! Geometric primitives for layout and rendering.
//!
//! Layout engines produce [`Point`]s in an abstract space; rendering maps
//! them onto the canvas, where the origin is the top-left corner and Y grows
//! downward as in SVG.

/// A position in layout or canvas space.
///
/// # Examples
///
/// ```
/// # use topovis_core::geometry::Point;
/// let anchor = Point::new(10.0, 20.0);
/// let moved = anchor.add_point(Point::new(5.0, -5.0));
/// assert_eq!(moved, Point::new(15.0, 15.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    /// Stretches each axis by its own factor.
    pub fn scale_xy(self, x_factor: f32, y_factor: f32) -> Self {
        Self::new(self.x * x_factor, self.y * y_factor)
    }
}

/// Width and height of a canvas, an icon footprint or a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }

    /// Reinterprets the size as an offset, e.g. half an icon footprint.
    pub fn to_point(self) -> Point {
        Point::new(self.width, self.height)
    }
}

/// The axis-aligned box spanned by a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    /// Computes the smallest box containing every point, or `None` for no points.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topovis_core::geometry::{Bounds, Point};
    /// let bounds = Bounds::from_points([Point::new(1.0, 4.0), Point::new(3.0, -2.0)]).unwrap();
    /// assert_eq!(bounds.width(), 2.0);
    /// assert_eq!(bounds.height(), 6.0);
    /// assert!(Bounds::from_points([]).is_none());
    /// ```
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        points.into_iter().fold(None, |bounds, point| {
            Some(match bounds {
                None => Self {
                    min: point,
                    max: point,
                },
                Some(Self { min, max }) => Self {
                    min: Point::new(min.x.min(point.x), min.y.min(point.y)),
                    max: Point::new(max.x.max(point.x), max.y.max(point.y)),
                },
            })
        })
    }

    pub fn width(self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Returns `true` if `point` lies inside or on the edge of the box.
    pub fn contains(self, point: Point) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.y)
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_bounds_contain_every_point(points in prop::collection::vec(point_strategy(), 1..32)) {
            let bounds = Bounds::from_points(points.iter().copied()).unwrap();
            for point in points {
                prop_assert!(bounds.contains(point));
            }
        }

        #[test]
        fn prop_center_lies_between_extremes(p1 in point_strategy(), p2 in point_strategy()) {
            let center = Bounds::from_points([p1, p2]).unwrap().center();

            prop_assert!(approx_eq!(f32, center.x(), (p1.x() + p2.x()) / 2.0, epsilon = 0.001));
            prop_assert!(approx_eq!(f32, center.y(), (p1.y() + p2.y()) / 2.0, epsilon = 0.001));
        }
    }
}
