//! Marker style configuration
//!
//! A [`HighlightStyle`] is supplied once when a `Highlighter` is constructed
//! and is immutable afterwards. Values mirror the CSS properties applied to
//! marker elements.

use serde::{Deserialize, Serialize};

/// Visual style applied to highlight markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightStyle {
    /// Background color (CSS color value)
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
    /// Text color
    #[serde(rename = "textColor")]
    pub text_color: String,
    /// Font weight
    #[serde(rename = "fontWeight")]
    pub font_weight: String,
    /// Font style
    #[serde(rename = "fontStyle")]
    pub font_style: String,
    /// Extra class name set on marker elements (empty = none)
    #[serde(rename = "customClassName")]
    pub custom_class_name: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            background_color: "yellow".to_string(),
            text_color: "inherit".to_string(),
            font_weight: "inherit".to_string(),
            font_style: "inherit".to_string(),
            custom_class_name: String::new(),
        }
    }
}

impl HighlightStyle {
    /// Set the background color
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Set the text color
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = color.into();
        self
    }

    /// Set the font weight
    pub fn with_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = weight.into();
        self
    }

    /// Set the font style
    pub fn with_font_style(mut self, style: impl Into<String>) -> Self {
        self.font_style = style.into();
        self
    }

    /// Set the custom class name
    pub fn with_custom_class_name(mut self, class: impl Into<String>) -> Self {
        self.custom_class_name = class.into();
        self
    }

    /// Render the style as an inline CSS declaration block
    pub fn to_inline_css(&self) -> String {
        format!(
            "background-color: {}; color: {}; font-weight: {}; font-style: {};",
            self.background_color, self.text_color, self.font_weight, self.font_style
        )
    }
}
