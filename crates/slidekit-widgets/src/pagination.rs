#![forbid(unsafe_code)]

//! Textual pagination indicator.
//!
//! Formats the carousel position as dots (`"○●○○"`), a compact counter
//! (`"2/4"`), or a spelled-out `"Slide 2 of 4"`, fitting the result into a
//! display-column budget. Dots fall back to the compact form when they would
//! not fit.

use unicode_width::UnicodeWidthStr;

/// Display mode for the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    /// Render as "Slide X of Y".
    Slide,
    /// Render as "X/Y".
    Compact,
    /// Render one symbol per slide.
    Dots,
}

/// Pagination indicator for a carousel position.
#[derive(Debug, Clone)]
pub struct PaginationIndicator<'a> {
    active_index: usize,
    slide_count: usize,
    mode: IndicatorMode,
    active_symbol: &'a str,
    inactive_symbol: &'a str,
}

impl Default for PaginationIndicator<'_> {
    fn default() -> Self {
        Self {
            active_index: 0,
            slide_count: 0,
            mode: IndicatorMode::Dots,
            active_symbol: "●",
            inactive_symbol: "○",
        }
    }
}

impl<'a> PaginationIndicator<'a> {
    /// Indicator for the zero-based `active_index` out of `slide_count`.
    #[must_use]
    pub fn new(active_index: usize, slide_count: usize) -> Self {
        Self {
            active_index,
            slide_count,
            ..Self::default()
        }
    }

    /// Set the display mode.
    #[must_use]
    pub fn mode(mut self, mode: IndicatorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the symbols used in dot mode.
    #[must_use]
    pub fn dots_symbols(mut self, active: &'a str, inactive: &'a str) -> Self {
        self.active_symbol = active;
        self.inactive_symbol = inactive;
        self
    }

    /// One-based position and total, with the position clamped into range.
    fn normalized(&self) -> (usize, usize) {
        let total = self.slide_count;
        if total == 0 {
            return (0, 0);
        }
        (self.active_index.min(total - 1) + 1, total)
    }

    fn format_compact(&self) -> String {
        let (current, total) = self.normalized();
        format!("{current}/{total}")
    }

    fn format_slide(&self) -> String {
        let (current, total) = self.normalized();
        format!("Slide {current} of {total}")
    }

    fn format_dots(&self, max_width: usize) -> Option<String> {
        let (current, total) = self.normalized();
        if total == 0 {
            return None;
        }

        let symbol_width = UnicodeWidthStr::width(self.active_symbol)
            .max(UnicodeWidthStr::width(self.inactive_symbol));
        if symbol_width == 0 || total > max_width / symbol_width {
            return None;
        }

        let out: String = (1..=total)
            .map(|idx| {
                if idx == current {
                    self.active_symbol
                } else {
                    self.inactive_symbol
                }
            })
            .collect();

        (UnicodeWidthStr::width(out.as_str()) <= max_width).then_some(out)
    }

    /// Format for a budget of `max_width` display columns.
    ///
    /// Returns an empty string for a zero budget.
    #[must_use]
    pub fn format_for_width(&self, max_width: usize) -> String {
        if max_width == 0 {
            return String::new();
        }

        match self.mode {
            IndicatorMode::Slide => self.format_slide(),
            IndicatorMode::Compact => self.format_compact(),
            IndicatorMode::Dots => self
                .format_dots(max_width)
                .unwrap_or_else(|| self.format_compact()),
        }
    }
}
