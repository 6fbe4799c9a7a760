//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{Focus, UiState};
use super::AppController;

const PAGE_STEP: usize = 10;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        // Ctrl-C / Ctrl-Q quit from anywhere
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.model.set_should_quit(true).await;
            return Ok(());
        }

        match self.model.get_focus().await {
            Focus::Message => self.handle_message_key(key).await,
            Focus::Results => self.handle_results_key(key).await,
            Focus::Input => self.handle_input_key(key).await,
        }

        Ok(())
    }

    async fn handle_message_key(&self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                self.model.set_focus(Focus::Input).await;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.model.set_should_quit(true).await;
            }
            _ => {}
        }
    }

    async fn handle_results_key(&self, key: KeyEvent) {
        let visible = self.visible_item_count().await;
        let mut input = self.model.input.lock().await;

        match key.code {
            KeyCode::Up => input.select_up(1),
            KeyCode::Down => input.select_down(1, visible),
            KeyCode::PageUp => input.select_up(PAGE_STEP),
            KeyCode::PageDown => input.select_down(PAGE_STEP, visible),
            KeyCode::Home => input.selected = 0,
            KeyCode::End => input.selected = visible.saturating_sub(1),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc => {
                drop(input);
                self.model.set_focus(Focus::Input).await;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                drop(input);
                self.model.set_should_quit(true).await;
            }
            _ => {}
        }
    }

    async fn handle_input_key(&self, key: KeyEvent) {
        // Input controls are disabled while a request is in flight
        if !self.model.input_enabled().await {
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let text = self.model.get_input().await.text;
                // The request task runs on its own; the UI loop keeps drawing
                let _ = self.submit(&text).await;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                if matches!(self.model.get_ui_state().await, UiState::ShowingResults(_)) {
                    self.model.set_focus(Focus::Results).await;
                }
            }
            KeyCode::Esc => {
                self.model.input.lock().await.clear();
            }
            KeyCode::Backspace => {
                self.model.input.lock().await.backspace();
            }
            KeyCode::Char(c) => {
                self.model.input.lock().await.push(c);
            }
            _ => {}
        }
    }

    async fn visible_item_count(&self) -> usize {
        let state = self.model.get_ui_state().await;
        match state {
            UiState::ShowingResults(model) => {
                self.model.images.lock().await.visible_item_count(&model)
            }
            _ => 0,
        }
    }
}
