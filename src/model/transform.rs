//! Turns a validated group mapping into the ordered render model

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};

use super::types::{GroupEntry, RenderModel};

/// Drop empty groups and sort by title. Equal titles keep wire order.
pub fn transform(groups: Vec<(String, GroupEntry)>) -> RenderModel {
    let mut model: RenderModel = groups
        .into_iter()
        .map(|(_, group)| group)
        .filter(|group| !group.items.is_empty())
        .collect();

    let collator = title_collator();
    // `sort_by` is stable
    model.sort_by(|a, b| compare_with(collator.as_ref(), &a.display_title, &b.display_title));
    model
}

/// Root-locale collation at tertiary strength: accents and case only break
/// ties between otherwise equal titles, and lowercase sorts first.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    compare_with(title_collator().as_ref(), a, b)
}

fn title_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            tracing::error!(error = %e, "Root collation data unavailable, sorting by lowercase title");
            None
        }
    }
}

fn compare_with(collator: Option<&Collator>, a: &str, b: &str) -> Ordering {
    match collator {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}
