//! Failed sub-resource loads, scoped to one submission

use std::collections::HashSet;

use super::types::{GroupEntry, ItemEntry, RenderModel};

#[derive(Clone, Debug, Default)]
pub struct ImageFailures {
    generation: u64,
    failed: HashSet<String>,
}

impl ImageFailures {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new submission: forget old failures and return the new generation
    pub fn advance(&mut self) -> u64 {
        self.generation += 1;
        self.failed.clear();
        self.generation
    }

    /// Returns false when the report belongs to an older submission
    pub fn mark_failed(&mut self, generation: u64, url: &str) -> bool {
        if generation != self.generation {
            return false;
        }
        self.failed.insert(url.to_string())
    }

    pub fn is_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    /// Items of one group whose thumbnail has not failed
    pub fn visible_items<'a>(&'a self, group: &'a GroupEntry) -> impl Iterator<Item = &'a ItemEntry> {
        group
            .items
            .iter()
            .filter(|item| !self.is_failed(&item.thumbnail_url))
    }

    pub fn visible_item_count(&self, model: &RenderModel) -> usize {
        model.iter().map(|group| self.visible_items(group).count()).sum()
    }
}
