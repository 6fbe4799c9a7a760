//! Visible surface composed from the current state
//!
//! The surface is rebuilt from scratch on every frame, so painting never
//! depends on what was drawn before.

use crate::model::{Focus, ImageFailures, InputLine, UiState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    pub text: String,
    pub enabled: bool,
    pub focused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemView {
    /// Position among all visible items, used for selection
    pub index: usize,
    pub thumbnail_url: String,
    pub full_url: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupView {
    pub title: String,
    pub cover: Option<String>,
    pub items: Vec<ItemView>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    pub input: InputView,
    pub loading: bool,
    pub error: Option<String>,
    pub info: Option<String>,
    pub results: Vec<GroupView>,
    pub message_focused: bool,
    pub results_focused: bool,
    pub selected: Option<usize>,
    pub status: String,
}

impl Surface {
    pub fn compose(state: &UiState, images: &ImageFailures, input: &InputLine, focus: Focus) -> Self {
        let mut surface = Surface {
            input: InputView {
                text: input.text.clone(),
                enabled: !matches!(state, UiState::Loading),
                focused: focus == Focus::Input,
            },
            loading: false,
            error: None,
            info: None,
            results: Vec::new(),
            message_focused: false,
            results_focused: false,
            selected: None,
            status: String::new(),
        };

        match state {
            UiState::Idle => {}
            UiState::Loading => surface.loading = true,
            UiState::ShowingError(message) => {
                surface.error = Some(message.clone());
                surface.message_focused = focus == Focus::Message;
            }
            UiState::ShowingInfo(message) => {
                surface.info = Some(message.clone());
                surface.message_focused = focus == Focus::Message;
            }
            UiState::ShowingResults(model) => {
                let mut index = 0;
                for group in model {
                    let cover = group
                        .cover_url
                        .as_ref()
                        .filter(|url| !images.is_failed(url))
                        .cloned();
                    let items = images
                        .visible_items(group)
                        .map(|item| {
                            let view = ItemView {
                                index,
                                thumbnail_url: item.thumbnail_url.clone(),
                                full_url: item.full_url.clone(),
                            };
                            index += 1;
                            view
                        })
                        .collect();
                    surface.results.push(GroupView {
                        title: group.display_title.clone(),
                        cover,
                        items,
                    });
                }
                surface.results_focused = focus == Focus::Results;
                if index > 0 {
                    surface.selected = Some(input.selected.min(index - 1));
                }
            }
        }

        surface.status = surface.status_line(focus);
        surface
    }

    pub fn item_count(&self) -> usize {
        self.results.iter().map(|group| group.items.len()).sum()
    }

    pub fn selected_item(&self) -> Option<&ItemView> {
        let selected = self.selected?;
        self.results
            .iter()
            .flat_map(|group| group.items.iter())
            .find(|item| item.index == selected)
    }

    fn status_line(&self, focus: Focus) -> String {
        if self.loading {
            return "Fetching wallpapers... | Ctrl-C quit".to_string();
        }
        match focus {
            Focus::Message => "Enter/Esc dismiss | q quit".to_string(),
            Focus::Results => match self.selected_item() {
                Some(item) => format!("{} | ↑/↓ select | Tab back | q quit", item.full_url),
                None => "Tab back | q quit".to_string(),
            },
            Focus::Input if !self.results.is_empty() => {
                "Enter search | Tab browse results | Ctrl-C quit".to_string()
            }
            Focus::Input => "Enter search | Esc clear | Ctrl-C quit".to_string(),
        }
    }
}
