//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and drives the request pipeline between the model and the wallpaper
//! service. It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `request`: Submission, classification and image loading

mod input;
mod request;

use std::sync::Arc;

use crate::config::Config;
use crate::model::{AppModel, WallpaperSource};

/// Knobs the controller takes from the configuration
#[derive(Clone, Copy, Debug)]
pub struct ControllerOptions {
    pub check_images: bool,
    pub image_concurrency: usize,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            check_images: true,
            image_concurrency: 6,
        }
    }
}

impl From<&Config> for ControllerOptions {
    fn from(config: &Config) -> Self {
        Self {
            check_images: !config.no_image_check,
            image_concurrency: config.image_concurrency(),
        }
    }
}

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<AppModel>,
    pub(crate) source: Arc<dyn WallpaperSource>,
    options: ControllerOptions,
}

impl AppController {
    pub fn new(
        model: Arc<AppModel>,
        source: Arc<dyn WallpaperSource>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            model,
            source,
            options,
        }
    }
}
