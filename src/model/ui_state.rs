//! The visible mode of the page, owned by a single transition function

use thiserror::Error;

use super::types::{ErrorKind, RenderModel};

pub const NO_RELEVANT_ITEMS: &str = "no relevant items";

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Loading,
    ShowingError(String),
    ShowingInfo(String),
    ShowingResults(RenderModel),
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::ShowingError(_) => "showing_error",
            Self::ShowingInfo(_) => "showing_info",
            Self::ShowingResults(_) => "showing_results",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Submit,
    /// Validation failure; never reaches the network
    Rejected(String),
    Succeeded(RenderModel),
    Empty,
    Info(String),
    Failed(ErrorKind, String),
}

impl Transition {
    fn name(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Rejected(_) => "rejected",
            Self::Succeeded(_) => "succeeded",
            Self::Empty => "empty",
            Self::Info(_) => "info",
            Self::Failed(..) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("transition `{transition}` is not allowed from `{from}`")]
    Invalid {
        from: &'static str,
        transition: &'static str,
    },
}

#[derive(Clone, Debug, Default)]
pub struct UiStateMachine {
    state: UiState,
}

impl UiStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, UiState::Loading)
    }

    /// Input controls are enabled in every state except `Loading`
    pub fn input_enabled(&self) -> bool {
        !self.is_loading()
    }

    pub fn apply(&mut self, transition: Transition) -> Result<(), TransitionError> {
        let loading = self.is_loading();

        let next = match (loading, transition) {
            (false, Transition::Submit) => UiState::Loading,
            (false, Transition::Rejected(message)) => UiState::ShowingError(message),
            (true, Transition::Succeeded(model)) if model.is_empty() => {
                UiState::ShowingInfo(NO_RELEVANT_ITEMS.to_string())
            }
            (true, Transition::Succeeded(model)) => UiState::ShowingResults(model),
            (true, Transition::Empty) => UiState::ShowingInfo(NO_RELEVANT_ITEMS.to_string()),
            (true, Transition::Info(message)) => UiState::ShowingInfo(message),
            (true, Transition::Failed(kind, message)) => {
                tracing::debug!(kind = %kind, "Request ended in error");
                UiState::ShowingError(message)
            }
            (_, transition) => {
                return Err(TransitionError::Invalid {
                    from: self.state.name(),
                    transition: transition.name(),
                });
            }
        };

        tracing::debug!(from = self.state.name(), to = next.name(), "UI state transition");
        self.state = next;
        Ok(())
    }
}
