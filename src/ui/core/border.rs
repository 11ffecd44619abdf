use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderStyle {
    #[default]
    Light,
    Heavy,
    Double,
    Curved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub vertical: char,
    pub horizontal: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderGlyphs {
    const fn from_chars([tl, tr, v, h, bl, br]: [char; 6]) -> Self {
        Self {
            top_left: tl,
            top_right: tr,
            vertical: v,
            horizontal: h,
            bottom_left: bl,
            bottom_right: br,
        }
    }
}

impl BorderStyle {
    pub const ALL: [BorderStyle; 4] = [
        BorderStyle::Light,
        BorderStyle::Heavy,
        BorderStyle::Double,
        BorderStyle::Curved,
    ];

    pub const fn glyphs(self) -> BorderGlyphs {
        match self {
            BorderStyle::Light => BorderGlyphs::from_chars(['┌', '┐', '│', '─', '└', '┘']),
            BorderStyle::Heavy => BorderGlyphs::from_chars(['┏', '┓', '┃', '━', '┗', '┛']),
            BorderStyle::Double => BorderGlyphs::from_chars(['╔', '╗', '║', '═', '╚', '╝']),
            BorderStyle::Curved => BorderGlyphs::from_chars(['╭', '╮', '│', '─', '╰', '╯']),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            BorderStyle::Light => "light",
            BorderStyle::Heavy => "heavy",
            BorderStyle::Double => "double",
            BorderStyle::Curved => "curved",
        }
    }
}

impl FromStr for BorderStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BorderStyle::ALL
            .into_iter()
            .find(|style| style.name() == s)
            .ok_or_else(|| Error::UnknownBorderStyle(s.to_string()))
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/border.rs"]
mod tests;
