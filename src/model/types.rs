//! Core type definitions for the application

use std::fmt;

use thiserror::Error;

/// A trimmed, non-empty username used to address the remote aggregation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("enter a MyAnimeList username")]
    Blank,
}

impl Identifier {
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdentifierError::Blank);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One wallpaper: a preview plus the full-resolution link
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemEntry {
    pub thumbnail_url: String,
    pub full_url: String,
}

/// A named series with its wallpapers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupEntry {
    pub display_title: String,
    pub cover_url: Option<String>,
    pub items: Vec<ItemEntry>,
}

/// Sorted, filtered, render-ready groups. Built fresh per successful request.
pub type RenderModel = Vec<GroupEntry>;

/// Error taxonomy surfaced to the message region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NetworkFailure,
    UserNotFound,
    Throttled,
    Upstream,
    MalformedResponse,
}

impl ErrorKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::NetworkFailure => "NETWORK",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::Throttled => "THROTTLED",
            Self::Upstream => "UPSTREAM",
            Self::MalformedResponse => "MALFORMED_RESPONSE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Which region currently has keyboard focus
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Results,
    Message,
}

/// Text of the identifier field and the selection inside the results grid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputLine {
    pub text: String,
    pub selected: usize,
}

impl InputLine {
    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn select_up(&mut self, step: usize) {
        self.selected = self.selected.saturating_sub(step);
    }

    pub fn select_down(&mut self, step: usize, visible_items: usize) {
        let last = visible_items.saturating_sub(1);
        self.selected = (self.selected + step).min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let id = Identifier::parse("  kirito \t").unwrap();
        assert_eq!(id.as_str(), "kirito");
    }

    #[test]
    fn parse_rejects_blank_input() {
        assert_eq!(Identifier::parse(""), Err(IdentifierError::Blank));
        assert_eq!(Identifier::parse(" \t\n "), Err(IdentifierError::Blank));
    }

    #[test]
    fn selection_stays_inside_visible_items() {
        let mut line = InputLine::default();
        line.select_down(10, 3);
        assert_eq!(line.selected, 2);
        line.select_up(1);
        assert_eq!(line.selected, 1);
        line.select_up(5);
        assert_eq!(line.selected, 0);
        line.select_down(1, 0);
        assert_eq!(line.selected, 0);
    }
}
