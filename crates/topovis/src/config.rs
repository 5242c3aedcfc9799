//! Configuration types for topovis diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, styled, decorated with icons and classified. All types
//! implement [`serde::Deserialize`] for flexible loading from external sources;
//! every field is optional and falls back to its default.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Layout engine selection and connectivity policy.
//! - [`StyleConfig`] - Colors, edge strokes and fonts.
//! - [`IconConfig`] - Icon asset location, default icon and icon geometry.
//! - [`ClassifyConfig`] - Host name patterns used by the classifier.
//!
//! # Example
//!
//! ```
//! # use topovis::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.icons().default_icon(), "osa_hub.svg");
//! ```

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

use topovis_core::{color::Color, draw::EdgeStyle};

use crate::layout::LayoutEngine;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Icon configuration section.
    #[serde(default)]
    icons: IconConfig,

    /// Classifier configuration section.
    #[serde(default)]
    classify: ClassifyConfig,
}

impl AppConfig {
    pub fn new(
        layout: LayoutConfig,
        style: StyleConfig,
        icons: IconConfig,
        classify: ClassifyConfig,
    ) -> Self {
        Self {
            layout,
            style,
            icons,
            classify,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the layout configuration for modification.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn icons(&self) -> &IconConfig {
        &self.icons
    }

    pub fn classify(&self) -> &ClassifyConfig {
        &self.classify
    }

    /// Checks the values serde cannot: colors, icon geometry and patterns.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        self.style.background_color()?;
        self.style.edge_color()?;
        self.style.text_color()?;
        self.style.edge_style()?;

        if let Some(size) = self.style.font_size.filter(|&size| size <= 0.0) {
            return Err(format!("font size must be positive, got {size}"));
        }
        if let Some(width) = self.style.edge_width.filter(|&width| width <= 0.0) {
            return Err(format!("edge width must be positive, got {width}"));
        }
        if self.icons.scale <= 0.0 {
            return Err(format!("icon scale must be positive, got {}", self.icons.scale));
        }
        if self.icons.footprint <= 0.0 {
            return Err(format!(
                "icon footprint must be positive, got {}",
                self.icons.footprint
            ));
        }

        self.classify.compile()?;
        Ok(())
    }
}

/// Layout engine selection and connectivity policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// [`LayoutEngine`] used for every diagram.
    engine: LayoutEngine,

    /// Fail on nodes unreachable from the root instead of leaving them out.
    require_connected: bool,

    /// Retry with the layered engine when the block engine cannot place a node.
    fallback_to_layered: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            engine: LayoutEngine::default(),
            require_connected: false,
            fallback_to_layered: true,
        }
    }
}

impl LayoutConfig {
    pub fn new(engine: LayoutEngine, require_connected: bool, fallback_to_layered: bool) -> Self {
        Self {
            engine,
            require_connected,
            fallback_to_layered,
        }
    }

    pub fn engine(&self) -> LayoutEngine {
        self.engine
    }

    pub fn set_engine(&mut self, engine: LayoutEngine) {
        self.engine = engine;
    }

    pub fn require_connected(&self) -> bool {
        self.require_connected
    }

    pub fn fallback_to_layered(&self) -> bool {
        self.fallback_to_layered
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background_color: Option<String>,

    #[serde(default)]
    edge_color: Option<String>,

    #[serde(default)]
    edge_width: Option<f32>,

    /// One of `solid`, `dashed` or `dotted`.
    #[serde(default)]
    edge_style: Option<String>,

    #[serde(default)]
    text_color: Option<String>,

    #[serde(default)]
    font_family: Option<String>,

    #[serde(default)]
    font_size: Option<f32>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.background_color.as_deref(), "background")
    }

    /// Returns the parsed edge [`Color`], or `None` if no color is configured.
    pub fn edge_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.edge_color.as_deref(), "edge")
    }

    pub fn edge_width(&self) -> Option<f32> {
        self.edge_width
    }

    /// Returns the parsed [`EdgeStyle`], or `None` if no style is configured.
    ///
    /// # Errors
    ///
    /// Returns an error naming the unknown style.
    pub fn edge_style(&self) -> Result<Option<EdgeStyle>, String> {
        self.edge_style
            .as_deref()
            .map(str::parse::<EdgeStyle>)
            .transpose()
            .map_err(|err| format!("Invalid edge style in config: {err}"))
    }

    /// Returns the parsed label and title [`Color`], or `None` if no color is configured.
    pub fn text_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.text_color.as_deref(), "text")
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    pub fn font_size(&self) -> Option<f32> {
        self.font_size
    }
}

fn parse_color(color: Option<&str>, role: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {role} color in config: {err}"))
}

const DEFAULT_ICON_ROOT: &str = "icons";
const DEFAULT_ICON: &str = "osa_hub.svg";
const DEFAULT_ICON_SCALE: f32 = 0.5;
const DEFAULT_ICON_FOOTPRINT: f32 = 128.0;

/// Icon asset location and geometry.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IconConfig {
    /// Directory icon references are resolved against.
    root: PathBuf,

    /// Icon used for nodes without one.
    default_icon: String,

    /// Scale applied to the asset inside its footprint.
    scale: f32,

    /// Side of the square area an icon occupies on the canvas.
    footprint: f32,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ICON_ROOT),
            default_icon: DEFAULT_ICON.to_string(),
            scale: DEFAULT_ICON_SCALE,
            footprint: DEFAULT_ICON_FOOTPRINT,
        }
    }
}

impl IconConfig {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_icon(&self) -> &str {
        &self.default_icon
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn footprint(&self) -> f32 {
        self.footprint
    }
}

const DEFAULT_FIREWALL_PATTERN: &str = r"(?i)(^|[.\-])(fw|firewall|asa)\d*([.\-]|$)";
const DEFAULT_VLAN_PATTERN: &str = r"(?i)(^|[.\-])(vlan|vl)\d*([.\-]|$)";
const DEFAULT_SWITCH_PATTERN: &str = r"(?i)(^|[.\-])(sw|switch|vss)\d*([.\-]|$)";

/// Host name patterns, checked in the order firewall, vlan, switch.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifyConfig {
    firewall: String,
    vlan: String,
    switch: String,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            firewall: DEFAULT_FIREWALL_PATTERN.to_string(),
            vlan: DEFAULT_VLAN_PATTERN.to_string(),
            switch: DEFAULT_SWITCH_PATTERN.to_string(),
        }
    }
}

impl ClassifyConfig {
    pub fn new(
        firewall: impl Into<String>,
        vlan: impl Into<String>,
        switch: impl Into<String>,
    ) -> Self {
        Self {
            firewall: firewall.into(),
            vlan: vlan.into(),
            switch: switch.into(),
        }
    }

    /// Compiles the firewall, vlan and switch patterns, in that order.
    ///
    /// # Errors
    ///
    /// Returns a message naming the pattern that failed to compile.
    pub fn compile(&self) -> Result<[Regex; 3], String> {
        let compile = |name: &str, pattern: &str| {
            Regex::new(pattern).map_err(|err| format!("Invalid {name} pattern in config: {err}"))
        };

        Ok([
            compile("firewall", &self.firewall)?,
            compile("vlan", &self.vlan)?,
            compile("switch", &self.switch)?,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.layout().engine(), LayoutEngine::Layered);
        assert!(!config.layout().require_connected());
        assert!(config.layout().fallback_to_layered());
        assert_eq!(config.icons().root(), Path::new("icons"));
        assert_eq!(config.icons().scale(), 0.5);
        assert_eq!(config.icons().footprint(), 128.0);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            engine = "block"
            require_connected = true
            fallback_to_layered = false

            [style]
            background_color = "#f0f0f0"
            edge_color = "gray"
            font_size = 12.0

            [icons]
            root = "/usr/share/topovis/icons"
            default_icon = "generic.svg"

            [classify]
            firewall = "^fw-"
            "##,
        )
        .unwrap();

        assert_eq!(config.layout().engine(), LayoutEngine::Block);
        assert!(config.layout().require_connected());
        assert!(!config.layout().fallback_to_layered());
        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().font_size(), Some(12.0));
        assert_eq!(config.icons().default_icon(), "generic.svg");
        // Unset fields keep their defaults
        assert_eq!(config.icons().scale(), 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_layout_section_keeps_fallback() {
        let config: AppConfig = toml::from_str("[layout]\nengine = \"block\"\n").unwrap();
        assert!(config.layout().fallback_to_layered());
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[layout]\nengine = \"circular\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_color() {
        let config: AppConfig = toml::from_str("[style]\nedge_color = \"not-a-color\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("edge"));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let config: AppConfig = toml::from_str("[classify]\nvlan = \"(unclosed\"\n").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.contains("vlan"));
    }

    #[test]
    fn test_validate_rejects_non_positive_scale() {
        let config: AppConfig = toml::from_str("[icons]\nscale = 0.0\n").unwrap();
        assert!(config.validate().is_err());
    }
}
