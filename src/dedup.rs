//! Duplicate detection by marker patterns.
//!
//! Grouping is the first half of a two-phase protocol: [`group_duplicates`]
//! annotates every grouped channel with a priority, and consumers (the
//! merge/remove duplicate rules, the sort tiebreak) read
//! [`Channel::priority`] afterwards. Reading priorities before a grouping
//! call sees the values left by the previous one.

use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::debug;

use crate::types::{Channel, Pattern, Selector};

/// Channels sharing one base name, best (highest priority) first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    base_name: String,
    members: Vec<usize>,
}

impl DuplicateGroup {
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Indices into the slice passed to [`group_duplicates`], best first.
    #[must_use]
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    /// Index of the preferred channel.
    #[must_use]
    pub fn best(&self) -> usize {
        self.members[0]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Strip every pattern match from `value` (patterns applied in order, each
/// on the previous result), then collapse whitespace runs and trim.
#[must_use]
pub fn base_name(value: &str, patterns: &[Pattern]) -> String {
    if value.is_empty() {
        return String::new();
    }
    let stripped = patterns
        .iter()
        .fold(value.to_owned(), |acc, p| p.strip(&acc));
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Rank table for one grouping call. The first pattern ranks highest
/// (`patterns.len()`), the last ranks 1. The empty-source pattern's rank is
/// what a channel without any other marker gets; 0 if there is none.
struct Ranks<'p> {
    patterns: &'p [Pattern],
    empty_rank: u32,
}

impl<'p> Ranks<'p> {
    fn new(patterns: &'p [Pattern]) -> Self {
        let empty_rank = patterns
            .iter()
            .position(Pattern::is_empty_source)
            .map_or(0, |i| rank_at(patterns.len(), i));
        Self {
            patterns,
            empty_rank,
        }
    }

    fn priority(&self, value: &str) -> u32 {
        self.patterns
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty_source() && p.is_match(value))
            .map(|(i, _)| rank_at(self.patterns.len(), i))
            .max()
            .unwrap_or(self.empty_rank)
    }
}

#[allow(clippy::cast_possible_truncation)]
fn rank_at(len: usize, index: usize) -> u32 {
    (len - index) as u32
}

/// Partition `channels` into duplicate groups keyed by base name.
///
/// Channels that are removed or have no value for `selector` are left out.
/// A bucket becomes a group when it has more than one member and at least
/// one member's value differs from the base name, i.e. some pattern
/// actually stripped something. Groups come back in order of their first
/// member.
///
/// When `patterns` is non-empty every grouped channel's priority is set and
/// group members are ordered by it, descending and stable.
pub fn group_duplicates(
    channels: &mut [Channel],
    selector: &Selector,
    patterns: &[Pattern],
) -> Vec<DuplicateGroup> {
    let mut base_by_value: HashMap<String, String> = HashMap::new();
    let mut bucket_index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(DuplicateGroup, bool)> = Vec::new();

    for (idx, channel) in channels.iter().enumerate() {
        if channel.is_removed() {
            continue;
        }
        let Some(value) = selector.get(channel) else {
            continue;
        };
        let base = base_by_value
            .entry(value.to_owned())
            .or_insert_with(|| base_name(value, patterns));
        let stripped = value != base.as_str();

        let slot = match bucket_index.get(base.as_str()) {
            Some(&slot) => slot,
            None => {
                bucket_index.insert(base.clone(), buckets.len());
                buckets.push((
                    DuplicateGroup {
                        base_name: base.clone(),
                        members: Vec::new(),
                    },
                    false,
                ));
                buckets.len() - 1
            }
        };
        let (group, any_stripped) = &mut buckets[slot];
        group.members.push(idx);
        *any_stripped |= stripped;
    }

    let mut groups: Vec<DuplicateGroup> = buckets
        .into_iter()
        .filter(|(group, any_stripped)| group.len() > 1 && *any_stripped)
        .map(|(group, _)| group)
        .collect();

    if !patterns.is_empty() {
        let ranks = Ranks::new(patterns);
        for group in &mut groups {
            for &idx in &group.members {
                let priority = selector
                    .get(&channels[idx])
                    .map_or(ranks.empty_rank, |v| ranks.priority(v));
                channels[idx].set_priority(priority);
            }
            group
                .members
                .sort_by_key(|&idx| Reverse(channels[idx].priority()));
        }
    }

    debug!(
        selector = %selector,
        patterns = patterns.len(),
        groups = groups.len(),
        "grouped duplicates"
    );
    groups
}
