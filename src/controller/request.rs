//! Submission: validate, go single-flight, fetch, classify, transform, show

use std::collections::HashSet;

use futures::StreamExt;
use tokio::task::JoinHandle;

use crate::model::{
    classify, transform, ClassifiedResult, ErrorKind, Focus, Identifier, RenderModel, Transition,
};
use super::AppController;

impl AppController {
    /// Submit the identifier field. Returns the request task, or `None` when
    /// nothing was sent (blank input, or a request is already in flight).
    pub async fn submit(&self, raw: &str) -> Option<JoinHandle<()>> {
        let mut ui = self.model.ui.lock().await;

        if !ui.input_enabled() {
            tracing::debug!("Submit ignored while a request is in flight");
            return None;
        }

        let identifier = match Identifier::parse(raw) {
            Ok(identifier) => identifier,
            Err(e) => {
                tracing::info!(kind = %ErrorKind::Validation, error = %e, "Rejected blank identifier");
                if let Err(e) = ui.apply(Transition::Rejected(e.to_string())) {
                    tracing::error!(error = %e, "Could not show validation error");
                }
                self.model.set_focus(Focus::Message).await;
                return None;
            }
        };

        if let Err(e) = ui.apply(Transition::Submit) {
            tracing::error!(error = %e, "Could not enter loading state");
            return None;
        }

        let generation = self.model.images.lock().await.advance();
        self.model.set_focus(Focus::Input).await;
        self.model.input.lock().await.selected = 0;
        drop(ui);

        tracing::info!(identifier = %identifier, generation, "Submitting wallpaper request");

        let controller = self.clone();
        Some(tokio::spawn(async move {
            controller.run_request(identifier, generation).await;
        }))
    }

    async fn run_request(&self, identifier: Identifier, generation: u64) {
        let outcome = self.source.fetch_wallpapers(&identifier).await;

        let transition = match classify(&identifier, outcome) {
            ClassifiedResult::Success(groups) => {
                let model = transform(groups);
                tracing::info!(identifier = %identifier, groups = model.len(), "Wallpapers received");
                Transition::Succeeded(model)
            }
            ClassifiedResult::Empty => Transition::Empty,
            ClassifiedResult::Info(message) => Transition::Info(message),
            ClassifiedResult::Error(kind, message) => {
                tracing::warn!(identifier = %identifier, kind = %kind, message = %message, "Wallpaper request failed");
                Transition::Failed(kind, message)
            }
        };

        // Error outcomes keep focus on the message so the user notices it
        let focus = match &transition {
            Transition::Failed(..) => Focus::Message,
            _ => Focus::Input,
        };
        let loaded = match &transition {
            Transition::Succeeded(model) => model.clone(),
            _ => RenderModel::new(),
        };

        {
            let mut ui = self.model.ui.lock().await;
            if let Err(e) = ui.apply(transition) {
                tracing::error!(error = %e, "Could not leave loading state");
                return;
            }
            self.model.set_focus(focus).await;
        }

        if self.options.check_images && !loaded.is_empty() {
            self.load_images(&loaded, generation).await;
        }
    }

    /// Load every cover and thumbnail; failures only hide that one element
    async fn load_images(&self, model: &RenderModel, generation: u64) {
        let mut urls: Vec<&str> = Vec::new();
        for group in model {
            if let Some(cover) = group.cover_url.as_deref() {
                urls.push(cover);
            }
            urls.extend(group.items.iter().map(|item| item.thumbnail_url.as_str()));
        }
        let mut seen = HashSet::new();
        urls.retain(|url| seen.insert(*url));

        tracing::debug!(count = urls.len(), generation, "Loading images");

        futures::stream::iter(urls)
            .for_each_concurrent(self.options.image_concurrency, |url| async move {
                if self.model.images.lock().await.generation() != generation {
                    return;
                }
                if let Err(e) = self.source.load_image(url).await {
                    tracing::warn!(url, error = %e, "Image failed to load");
                    self.model.mark_image_failed(generation, url).await;
                }
            })
            .await;

        let failed = self.model.images.lock().await.failed_count();
        tracing::debug!(failed, generation, "Image loading finished");
    }
}
