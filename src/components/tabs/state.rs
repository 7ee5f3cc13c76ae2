use std::collections::HashSet;

use gpui::{Pixels, SharedString, px};
use serde::Serialize;
use thiserror::Error;

use crate::components::tabs::ContentRenderStrategy;

/// What keyboard navigation needs to know about a tab.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TabStop {
    pub id: SharedString,
    pub disabled: bool,
    pub href: Option<SharedString>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyboardActivationMode {
    /// Moving focus with the arrow keys also selects the focused tab.
    #[default]
    Automatic,
    /// Arrow keys only move focus; enter, space or a click selects.
    Manual,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum TabSelectError {
    #[error("no tab with id \"{0}\"")]
    UnknownTab(SharedString),
    #[error("tab \"{0}\" is disabled")]
    DisabledTab(SharedString),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    Previous,
    Next,
    First,
    Last,
}

pub(crate) fn index_of(stops: &[TabStop], id: &SharedString) -> Option<usize> {
    stops.iter().position(|stop| &stop.id == id)
}

pub(crate) fn first_enabled(stops: &[TabStop]) -> Option<usize> {
    stops.iter().position(|stop| !stop.disabled)
}

pub(crate) fn last_enabled(stops: &[TabStop]) -> Option<usize> {
    stops.iter().rposition(|stop| !stop.disabled)
}

/// The active tab for this render.
///
/// A controlled id wins even when it names a disabled or missing tab. An
/// uncontrolled selection is kept while its tab exists; otherwise the first
/// enabled tab is used.
pub(crate) fn resolve_active(
    stops: &[TabStop],
    controlled: Option<&SharedString>,
    retained: Option<&SharedString>,
) -> Option<SharedString> {
    if let Some(controlled) = controlled {
        return Some(controlled.clone());
    }

    retained
        .filter(|retained| index_of(stops, retained).is_some())
        .cloned()
        .or_else(|| first_enabled(stops).map(|index| stops[index].id.clone()))
}

/// Moves from `from` to the next enabled tab in `step`'s direction, wrapping
/// at both ends. With a single enabled tab, wrapping lands back on it.
pub(crate) fn step(stops: &[TabStop], from: Option<usize>, step: Step) -> Option<usize> {
    let len = stops.len();
    let enabled = |index: &usize| !stops[*index].disabled;

    match (step, from) {
        (Step::First, _) | (Step::Next, None) => first_enabled(stops),
        (Step::Last, _) | (Step::Previous, None) => last_enabled(stops),
        (Step::Next, Some(from)) => (1..=len).map(|offset| (from + offset) % len).find(enabled),
        (Step::Previous, Some(from)) => (1..=len)
            .map(|offset| (from + len - offset) % len)
            .find(enabled),
    }
}

/// Checks that `id` can be selected by the user.
pub(crate) fn validate_selection(
    stops: &[TabStop],
    id: &SharedString,
) -> Result<usize, TabSelectError> {
    let index = index_of(stops, id).ok_or_else(|| TabSelectError::UnknownTab(id.clone()))?;

    if stops[index].disabled {
        return Err(TabSelectError::DisabledTab(id.clone()));
    }

    Ok(index)
}

pub(crate) fn duplicate_ids(stops: &[TabStop]) -> Vec<SharedString> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for stop in stops {
        if !seen.insert(&stop.id) && !duplicates.contains(&stop.id) {
            duplicates.push(stop.id.clone());
        }
    }

    duplicates
}

/// Whether a tab's content is built this frame.
pub(crate) fn content_is_rendered(
    strategy: ContentRenderStrategy,
    is_active: bool,
    was_mounted: bool,
) -> bool {
    match strategy {
        ContentRenderStrategy::Active => is_active,
        ContentRenderStrategy::Eager => true,
        ContentRenderStrategy::Lazy => is_active || was_mounted,
    }
}

/// Records the active tab as mounted and forgets tabs that were removed.
/// Returns whether the set changed.
pub(crate) fn update_mounted(
    mounted: &mut HashSet<SharedString>,
    stops: &[TabStop],
    active: Option<&SharedString>,
) -> bool {
    let before = mounted.len();
    mounted.retain(|id| index_of(stops, id).is_some());
    let pruned = mounted.len() != before;

    let inserted = match active {
        Some(active) if index_of(stops, active).is_some() => mounted.insert(active.clone()),
        _ => false,
    };

    pruned || inserted
}

/// Scroll offsets grow negative as a strip scrolls towards its end.
pub(crate) fn scrolled_offset(current: Pixels, delta: Pixels, max: Pixels) -> Pixels {
    let next = current + delta;

    if next > px(0.) {
        px(0.)
    } else if next < -max {
        -max
    } else {
        next
    }
}

/// Which scroll buttons a tab strip needs, and which of them can still move it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScrollOverflow {
    pub overflowing: bool,
    pub at_start: bool,
    pub at_end: bool,
}

impl ScrollOverflow {
    pub fn new(offset: Pixels, max: Pixels) -> Self {
        Self {
            overflowing: max > px(0.),
            at_start: offset >= px(0.),
            at_end: offset <= -max,
        }
    }
}
