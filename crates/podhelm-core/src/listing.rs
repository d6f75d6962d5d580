//! Filtering and stats pairing for the container listing.
//!
//! Produces the visible/actionable set the dispatcher may act upon.
//! Containers arrive as a snapshot slice in the order the daemon returned
//! them; selection preserves that order and never mutates its inputs.

use std::collections::HashMap;

use podhelm_common::types::{Container, ContainerId, ContainerStats};

/// One visible listing row: a container and its latest stats, if any.
///
/// Missing stats are valid (not yet collected) and render blank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingRow<'a> {
    /// The container record.
    pub container: &'a Container,
    /// Latest statistics snapshot for the container, if collected.
    pub stats: Option<&'a ContainerStats>,
}

/// Why the listing is empty, as a function of the active filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// No containers exist and no filter is active.
    NoContainers,
    /// The running-only filter is active and nothing is running.
    NoneRunning,
    /// The text filter matched neither a name nor an image.
    NoMatch,
}

impl EmptyReason {
    /// User-facing caption for the empty listing.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            Self::NoContainers => "No containers",
            Self::NoneRunning => "No running containers",
            Self::NoMatch => "No containers that match the current filter",
        }
    }
}

/// Selects the visible rows from a snapshot.
///
/// The running filter applies first (`status == "running"`), then the text
/// filter as a case-insensitive substring match against the container name
/// OR its image reference. Input order is preserved; no sorting happens
/// here.
#[must_use]
pub fn select<'a>(
    containers: &'a [Container],
    stats: &'a HashMap<ContainerId, ContainerStats>,
    only_running: bool,
    text_filter: &str,
) -> Vec<ListingRow<'a>> {
    let needle = text_filter.to_lowercase();
    containers
        .iter()
        .filter(|c| !only_running || c.is_running())
        .filter(|c| {
            needle.is_empty()
                || c.names.to_lowercase().contains(&needle)
                || c.image.to_lowercase().contains(&needle)
        })
        .map(|container| ListingRow {
            container,
            stats: stats.get(&container.id),
        })
        .collect()
}

/// Picks the empty-listing caption from the active filters.
///
/// The text filter takes precedence over the running filter when both are
/// active; with no filter active the listing is simply empty.
#[must_use]
pub fn empty_reason(only_running: bool, text_filter: &str) -> EmptyReason {
    if !text_filter.is_empty() {
        EmptyReason::NoMatch
    } else if only_running {
        EmptyReason::NoneRunning
    } else {
        EmptyReason::NoContainers
    }
}
