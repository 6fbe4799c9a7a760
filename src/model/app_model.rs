//! Main application model with state management

use std::sync::Arc;
use tokio::sync::Mutex;

use super::images::ImageFailures;
use super::types::{Focus, InputLine};
use super::ui_state::{UiState, UiStateMachine};

/// Main application model containing all state
pub struct AppModel {
    pub ui: Arc<Mutex<UiStateMachine>>,
    pub input: Arc<Mutex<InputLine>>,
    pub focus: Arc<Mutex<Focus>>,
    pub images: Arc<Mutex<ImageFailures>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new() -> Self {
        Self {
            ui: Arc::new(Mutex::new(UiStateMachine::new())),
            input: Arc::new(Mutex::new(InputLine::default())),
            focus: Arc::new(Mutex::new(Focus::Input)),
            images: Arc::new(Mutex::new(ImageFailures::new())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    pub async fn get_ui_state(&self) -> UiState {
        self.ui.lock().await.state().clone()
    }

    pub async fn input_enabled(&self) -> bool {
        self.ui.lock().await.input_enabled()
    }

    pub async fn get_focus(&self) -> Focus {
        *self.focus.lock().await
    }

    pub async fn set_focus(&self, focus: Focus) {
        *self.focus.lock().await = focus;
    }

    pub async fn get_input(&self) -> InputLine {
        self.input.lock().await.clone()
    }

    pub async fn set_input_text(&self, text: String) {
        let mut input = self.input.lock().await;
        input.text = text;
    }

    pub async fn get_images(&self) -> ImageFailures {
        self.images.lock().await.clone()
    }

    /// Returns false for reports from an older submission
    pub async fn mark_image_failed(&self, generation: u64, url: &str) -> bool {
        self.images.lock().await.mark_failed(generation, url)
    }
}

impl Default for AppModel {
    fn default() -> Self {
        Self::new()
    }
}
