//! Resource merging
//!
//! Folds a freshly fetched resource list into the one already on screen.
//! Rows keep their position across refreshes:
//! - a resource present in both lists is replaced at its existing index
//! - a resource only in the incoming list is appended, in incoming order
//! - a resource only in the previous list is handled by [`MergePolicy`]

use gantt_model::{Resource, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What happens to resources missing from the incoming fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Keep them unchanged
    #[default]
    Retain,
    /// Keep the row but drop all of its allocations
    RetainCleared,
    /// Remove them
    Prune,
}

/// Counters describing one merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Previous resources replaced by an incoming one
    pub replaced: usize,
    /// Incoming resources appended
    pub appended: usize,
    /// Previous-only resources kept unchanged
    pub retained: usize,
    /// Previous-only resources kept with their allocations removed
    pub cleared: usize,
    /// Previous-only resources removed
    pub pruned: usize,
}

/// Merge `incoming` into `previous`, returning the new list
#[must_use]
pub fn merge(previous: &[Resource], incoming: Vec<Resource>, policy: MergePolicy) -> Vec<Resource> {
    let mut merged = previous.to_vec();
    merge_into(&mut merged, incoming, policy);
    merged
}

/// Merge `incoming` into `resources` in place
///
/// If `resources` holds the same id more than once, only the first
/// occurrence is a match target. Repeated ids in `incoming` resolve to the
/// last occurrence, placed where the first one landed.
pub fn merge_into(
    resources: &mut Vec<Resource>,
    incoming: Vec<Resource>,
    policy: MergePolicy,
) -> MergeStats {
    let mut stats = MergeStats::default();

    let mut index: HashMap<ResourceId, usize> = HashMap::with_capacity(resources.len());
    for (position, resource) in resources.iter().enumerate() {
        index.entry(resource.id.clone()).or_insert(position);
    }
    let previous_len = resources.len();
    let mut matched = vec![false; previous_len];

    for resource in incoming {
        match index.get(&resource.id).copied() {
            Some(position) if position < previous_len => {
                if !matched[position] {
                    matched[position] = true;
                    stats.replaced += 1;
                }
                resources[position] = resource;
            }
            Some(position) => resources[position] = resource,
            None => {
                index.insert(resource.id.clone(), resources.len());
                resources.push(resource);
                stats.appended += 1;
            }
        }
    }

    match policy {
        MergePolicy::Retain => {
            stats.retained = matched.iter().filter(|m| !**m).count();
        }
        MergePolicy::RetainCleared => {
            for (resource, _) in resources
                .iter_mut()
                .zip(&matched)
                .filter(|(_, matched)| !**matched)
            {
                resource.allocations_by_project.clear();
                stats.cleared += 1;
            }
        }
        MergePolicy::Prune => {
            let mut position = 0;
            resources.retain(|_| {
                let keep = position >= previous_len || matched[position];
                position += 1;
                keep
            });
            stats.pruned = matched.iter().filter(|m| !**m).count();
        }
    }

    stats
}
