//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `surface`: Visible surface composed from the model on every frame
//! - `utils`: Shared utility functions (truncation, scrollable lists)
//! - `layout`: Top bar with the username field and the status line
//! - `content`: Main content area (progress, messages, wallpaper groups)

mod surface;
mod utils;
mod layout;
mod content;

pub use surface::Surface;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, surface: &Surface) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Username input
                Constraint::Min(0),    // Main content
                Constraint::Length(3), // Status line
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], &surface.input);
        content::render_main_content(frame, chunks[1], surface);
        layout::render_status_line(frame, chunks[2], &surface.status);
    }
}
