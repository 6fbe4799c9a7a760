//! Model module - Application state and data types
//!
//! This module contains the data structures, pure pipeline stages and state
//! management for the application. It is organized into submodules by
//! responsibility:
//!
//! - `types`: Core type definitions (identifier, groups, error kinds, focus)
//! - `classifier`: Raw transport outcome → classified result
//! - `transform`: Classified groups → ordered render model
//! - `ui_state`: The visible mode and its transition function
//! - `images`: Failed thumbnail/cover loads for the current submission
//! - `wallpaper_client`: Wallpaper service client
//! - `app_model`: Main application model with state management methods

mod types;
mod classifier;
mod transform;
mod ui_state;
mod images;
mod wallpaper_client;
mod app_model;

// Re-export all public types for convenient access
pub use types::{ErrorKind, Focus, GroupEntry, Identifier, InputLine, ItemEntry, RenderModel};

pub use classifier::{classify, ClassifiedResult, RawOutcome};

pub use transform::transform;

pub use ui_state::{Transition, UiState, NO_RELEVANT_ITEMS};

pub use images::ImageFailures;

pub use wallpaper_client::{ClientError, HttpWallpaperSource, WallpaperSource};

pub use app_model::AppModel;
