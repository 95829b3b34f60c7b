//! Configuration for screenplay layout.
//!
//! Distances are stored in inches and converted with [`PageSettings::points`]
//! where they are used. Defaults describe the standard US-letter screenplay
//! page.

use serde::{Deserialize, Serialize};

/// PDF points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Page geometry and typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Page width (inches)
    pub page_width: f32,
    /// Page height (inches)
    pub page_height: f32,
    /// Left margin (inches)
    pub left_margin: f32,
    /// Right margin (inches)
    pub right_margin: f32,
    /// Top margin (inches)
    pub top_margin: f32,
    /// Bottom margin (inches)
    pub bottom_margin: f32,
    /// Character cue indent from the left margin (inches)
    pub character_indent: f32,
    /// Character cue width (inches)
    pub character_width: f32,
    /// Parenthetical indent from the left margin (inches)
    pub parenthetical_indent: f32,
    /// Parenthetical width (inches)
    pub parenthetical_width: f32,
    /// Dialog indent from the left margin (inches)
    pub dialog_indent: f32,
    /// Dialog width (inches)
    pub dialog_width: f32,
    /// Distance of the page number line above the top margin (inches)
    pub page_number_distance_from_top: f32,
    /// Distance of the title below the top margin (inches)
    pub title_distance_from_top: f32,
    /// Gap between the address block and the bottom margin (inches)
    pub address_distance_from_bottom: f32,
    /// Font size (points)
    pub font_size: f32,
    /// Advance of one character (points)
    pub effective_char_width: f32,
    /// Height of one line (points)
    pub effective_char_height: f32,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            page_width: 8.5,
            page_height: 11.0,
            left_margin: 1.5,
            right_margin: 1.0,
            top_margin: 1.0,
            bottom_margin: 1.0,
            character_indent: 2.2,
            character_width: 1.9,
            parenthetical_indent: 1.6,
            parenthetical_width: 1.9,
            dialog_indent: 1.0,
            dialog_width: 3.5,
            page_number_distance_from_top: 0.5,
            title_distance_from_top: 2.5,
            address_distance_from_bottom: 1.0,
            font_size: 12.0,
            effective_char_width: 7.21,
            effective_char_height: 12.0,
        }
    }
}

impl PageSettings {
    /// Convert inches to points.
    pub fn points(inches: f32) -> f32 {
        inches * POINTS_PER_INCH
    }

    /// Width between the side margins (inches).
    pub fn writable_width(&self) -> f32 {
        self.page_width - self.left_margin - self.right_margin
    }

    /// Set the page size (inches).
    pub fn with_page_size(mut self, width: f32, height: f32) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Set all four margins (inches).
    pub fn with_margins(mut self, left: f32, right: f32, top: f32, bottom: f32) -> Self {
        self.left_margin = left;
        self.right_margin = right;
        self.top_margin = top;
        self.bottom_margin = bottom;
        self
    }

    /// Set the font size and the per-character metrics derived from it.
    pub fn with_font_metrics(mut self, font_size: f32, char_width: f32, char_height: f32) -> Self {
        self.font_size = font_size;
        self.effective_char_width = char_width;
        self.effective_char_height = char_height;
        self
    }
}

/// Layout configuration: page settings plus display flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenplayConfig {
    /// Page geometry and typography
    pub page: PageSettings,
    /// Render boneyard (commented-out) material
    pub show_boneyard: bool,
    /// Render note blocks
    pub show_notes: bool,
    /// Render section headings
    pub show_sections: bool,
}

impl ScreenplayConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the page settings.
    pub fn with_page(mut self, page: PageSettings) -> Self {
        self.page = page;
        self
    }

    /// Render boneyard material.
    pub fn with_boneyard(mut self, enable: bool) -> Self {
        self.show_boneyard = enable;
        self
    }

    /// Render note blocks.
    pub fn with_notes(mut self, enable: bool) -> Self {
        self.show_notes = enable;
        self
    }

    /// Render section headings.
    pub fn with_sections(mut self, enable: bool) -> Self {
        self.show_sections = enable;
        self
    }
}
