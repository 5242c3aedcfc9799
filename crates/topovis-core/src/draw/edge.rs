//! Straight edges between two node centers.

use std::str::FromStr;

use svg::node::element as svg_element;

use crate::{color::Color, draw::SvgNode, geometry::Point};

/// Line pattern of an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl EdgeStyle {
    fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
            Self::Dotted => Some("2,3"),
        }
    }
}

impl FromStr for EdgeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!("unknown edge style `{s}`")),
        }
    }
}

/// Stroke settings shared by every edge of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDefinition {
    color: Color,
    width: f32,
    style: EdgeStyle,
}

impl Default for EdgeDefinition {
    fn default() -> Self {
        Self {
            color: Color::black(),
            width: 1.0,
            style: EdgeStyle::default(),
        }
    }
}

impl EdgeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: EdgeStyle::default(),
        }
    }

    pub fn set_style(&mut self, style: EdgeStyle) {
        self.style = style;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> EdgeStyle {
        self.style
    }
}

/// A straight edge drawn with a shared [`EdgeDefinition`].
#[derive(Debug, Clone)]
pub struct EdgeLine<'a> {
    definition: &'a EdgeDefinition,
}

impl<'a> EdgeLine<'a> {
    pub fn new(definition: &'a EdgeDefinition) -> Self {
        Self { definition }
    }

    /// Renders a `<line>` from `source` to `target`.
    pub fn render(&self, source: Point, target: Point) -> SvgNode {
        let line = svg_element::Line::new()
            .set("class", "edge")
            .set("x1", source.x())
            .set("y1", source.y())
            .set("x2", target.x())
            .set("y2", target.y())
            .set("stroke", self.definition.color)
            .set("stroke-width", self.definition.width);

        match self.definition.style.dasharray() {
            Some(dasharray) => Box::new(line.set("stroke-dasharray", dasharray)),
            None => Box::new(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_line_endpoints() {
        let definition = EdgeDefinition::default();
        let rendered = EdgeLine::new(&definition)
            .render(Point::new(10.0, 20.0), Point::new(30.0, 40.0))
            .to_string();

        assert!(rendered.starts_with("<line"));
        assert!(rendered.contains("x1=\"10\""));
        assert!(rendered.contains("y1=\"20\""));
        assert!(rendered.contains("x2=\"30\""));
        assert!(rendered.contains("y2=\"40\""));
        assert!(!rendered.contains("stroke-dasharray"));
    }

    #[test]
    fn test_edge_style_dashed() {
        let mut definition = EdgeDefinition::new(Color::new("gray").unwrap(), 2.0);
        definition.set_style("dashed".parse().unwrap());

        let rendered = EdgeLine::new(&definition)
            .render(Point::default(), Point::new(1.0, 1.0))
            .to_string();
        assert!(rendered.contains("stroke-dasharray=\"5,5\""));
        assert!(rendered.contains("stroke-width=\"2\""));
    }

    #[test]
    fn test_edge_style_unknown() {
        assert!("wavy".parse::<EdgeStyle>().is_err());
    }
}
