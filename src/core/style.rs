//! Text styling capability used for the level tag

use colored::{Color, Colorize};

/// Renders a string with a visual attribute
pub trait Stylize: Send + Sync {
    fn stylize(&self, text: &str, color: Color) -> String;
}

/// ANSI colors through the `colored` crate.
///
/// `colored` honors `NO_COLOR`/`CLICOLOR_FORCE` and its global override, so
/// terminal detection stays out of the formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColoredStyle;

impl Stylize for ColoredStyle {
    fn stylize(&self, text: &str, color: Color) -> String {
        text.color(color).to_string()
    }
}

/// Leaves text untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyle;

impl Stylize for PlainStyle {
    fn stylize(&self, text: &str, _color: Color) -> String {
        text.to_string()
    }
}
