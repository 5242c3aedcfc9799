//! Text rendering for node labels and diagram captions.
//!
//! No font metrics are available at render time, so text extents are
//! estimated from a fixed average glyph width (see [`TextDefinition::estimate_width`]).
//!
//! # Overview
//!
//! - [`TextDefinition`] - Reusable text style configuration
//! - [`LabelStack`] - A multi-line label stacked below an anchor point
//! - [`Caption`] - A single line of text horizontally centered on an anchor point

use svg::{node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{Drawable, SvgNode},
    geometry::{Point, Size},
};

const DEFAULT_FONT_FAMILY: &str = "\"Lucida Console\", Monaco, monospace";
const DEFAULT_FONT_SIZE: f32 = 10.0;
const DEFAULT_GLYPH_WIDTH: f32 = 6.0;

/// Default offset of the first label line below the anchor point.
const DEFAULT_FIRST_LINE_OFFSET: f32 = 40.0;
/// Default vertical distance between two label lines.
const DEFAULT_LINE_SPACING: f32 = 10.0;

/// Text style shared by every label of a diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: f32,
    color: Color,
    glyph_width: f32,
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            color: Color::black(),
            glyph_width: DEFAULT_GLYPH_WIDTH,
        }
    }
}

impl TextDefinition {
    /// Create a new text definition with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Estimates the rendered width of a single line of text.
    ///
    /// # Examples
    ///
    /// ```
    /// # use topovis_core::draw::TextDefinition;
    /// let definition = TextDefinition::new();
    /// assert_eq!(definition.estimate_width("gw-01"), 30.0);
    /// ```
    pub fn estimate_width(&self, text: &str) -> f32 {
        self.glyph_width * text.chars().count() as f32
    }

    fn text_element(&self) -> svg_element::Text {
        svg_element::Text::new("")
            .set("font-family", self.font_family.as_str())
            .set("font-size", self.font_size)
            .set("fill", self.color)
    }
}

/// A multi-line label drawn below its anchor point.
///
/// Empty lines are skipped. The first line sits `first_line_offset` below the
/// anchor and each further line `line_spacing` lower; every line is centered
/// horizontally on the anchor using the estimated line width.
#[derive(Debug, Clone)]
pub struct LabelStack<'a> {
    definition: &'a TextDefinition,
    lines: Vec<&'a str>,
    first_line_offset: f32,
    line_spacing: f32,
}

impl<'a> LabelStack<'a> {
    pub fn new(definition: &'a TextDefinition, label: &'a str) -> Self {
        Self {
            definition,
            lines: label.lines().filter(|line| !line.is_empty()).collect(),
            first_line_offset: DEFAULT_FIRST_LINE_OFFSET,
            line_spacing: DEFAULT_LINE_SPACING,
        }
    }

    /// Returns the non-empty lines of the label, in order.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Returns the anchor-relative baseline position of every line.
    pub fn line_positions(&self, position: Point) -> Vec<Point> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                Point::new(
                    position.x() - 0.5 * self.definition.estimate_width(line),
                    position.y() + self.first_line_offset + i as f32 * self.line_spacing,
                )
            })
            .collect()
    }
}

impl Drawable for LabelStack<'_> {
    fn render_to_svg(&self, position: Point) -> SvgNode {
        let mut text = self.definition.text_element().set("class", "label");

        for (line, line_position) in self.lines.iter().zip(self.line_positions(position)) {
            let tspan = svg_element::TSpan::new("")
                .set("x", line_position.x())
                .set("y", line_position.y())
                .add(SvgText::new(*line));
            text = text.add(tspan);
        }

        Box::new(text)
    }

    fn size(&self) -> Size {
        let width = self
            .lines
            .iter()
            .map(|line| self.definition.estimate_width(line))
            .fold(0.0, f32::max);
        Size::new(width, self.lines.len() as f32 * self.line_spacing)
    }
}

/// A single line of text, horizontally centered on its anchor point.
#[derive(Debug, Clone)]
pub struct Caption<'a> {
    definition: &'a TextDefinition,
    content: &'a str,
}

impl<'a> Caption<'a> {
    pub fn new(definition: &'a TextDefinition, content: &'a str) -> Self {
        Self {
            definition,
            content,
        }
    }
}

impl Drawable for Caption<'_> {
    fn render_to_svg(&self, position: Point) -> SvgNode {
        let x = position.x() - 0.5 * self.definition.estimate_width(self.content);
        let text = self
            .definition
            .text_element()
            .set("class", "caption")
            .set("x", x)
            .set("y", position.y())
            .add(SvgText::new(self.content));

        Box::new(text)
    }

    fn size(&self) -> Size {
        Size::new(
            self.definition.estimate_width(self.content),
            self.definition.font_size(),
        )
    }
}
