//! Configuration types for pipeline layout and rendering.
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Viewport size and the proportional [`LayoutRatios`].
//! - [`StyleConfig`] - Background color and legend toggle.
//!
//! All types implement [`serde::Deserialize`]; missing fields fall back to
//! their defaults.
//!
//! # Example
//!
//! ```
//! # use swimlane::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().viewport().width(), 1200.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use swimlane_core::{color::Color, geometry::Size};

use crate::layout::LayoutRatios;

const DEFAULT_WIDTH: f32 = 1200.0;
const DEFAULT_HEIGHT: f32 = 800.0;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its layout and style sections.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Viewport and proportional spacing configuration.
///
/// Every distance used by the layout is a ratio of the viewport, so the
/// viewport here only sets the default drawing size.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    #[serde(default = "default_width")]
    width: f32,

    #[serde(default = "default_height")]
    height: f32,

    #[serde(default)]
    ratios: LayoutRatios,
}

fn default_width() -> f32 {
    DEFAULT_WIDTH
}

fn default_height() -> f32 {
    DEFAULT_HEIGHT
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ratios: LayoutRatios::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `viewport` - Default drawing area.
    /// * `ratios` - Proportional spacing applied to the viewport.
    pub fn new(viewport: Size, ratios: LayoutRatios) -> Self {
        Self {
            width: viewport.width(),
            height: viewport.height(),
            ratios,
        }
    }

    /// Returns the configured viewport.
    pub fn viewport(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Returns the layout ratios.
    pub fn ratios(&self) -> &LayoutRatios {
        &self.ratios
    }
}

/// Visual styling configuration for rendered pipelines.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Background color as a CSS color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Whether to draw the legend block.
    #[serde(default = "default_legend")]
    legend: bool,
}

fn default_legend() -> bool {
    true
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            legend: default_legend(),
        }
    }
}

impl StyleConfig {
    /// Creates a new [`StyleConfig`].
    pub fn new(background_color: Option<String>, legend: bool) -> Self {
        Self {
            background_color,
            legend,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns whether the legend is drawn.
    pub fn legend(&self) -> bool {
        self.legend
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_approx_eq!(f32, config.layout().viewport().width(), 1200.0);
        assert_approx_eq!(f32, config.layout().viewport().height(), 800.0);
        assert_approx_eq!(f32, config.layout().ratios().box_width(), 0.1);
        assert!(config.style().legend());
        assert_eq!(config.style().background_color(), Ok(None));
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
[layout]
width = 1600

[layout.ratios]
level_spacing = 0.1

[style]
background_color = "white"
legend = false
"#,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().viewport().width(), 1600.0);
        assert_approx_eq!(f32, config.layout().viewport().height(), 800.0);
        assert_approx_eq!(f32, config.layout().ratios().level_spacing(), 0.1);
        assert_approx_eq!(f32, config.layout().ratios().box_height(), 0.05);
        assert!(!config.style().legend());
        assert!(config.style().background_color().unwrap().is_some());
    }

    #[test]
    fn test_invalid_background_color() {
        let style = StyleConfig::new(Some("not-a-color".to_string()), true);
        let err = style.background_color().unwrap_err();
        assert!(err.starts_with("Invalid background color in config"));
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        assert!(toml::from_str::<AppConfig>("[render]\nscale = 2").is_err());
    }
}
