//! Explicit-order, grouped and natural sorting of channels.

use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use crate::types::{Channel, Pattern, SortSpec};

/// Position of `value` in an explicit ordering.
///
/// Returns the index of the first non-empty pattern that matches. Failing
/// that, the index of the first `""` pattern (the default bucket). Failing
/// that, `patterns.len()`, which sorts after everything else. An empty list
/// ranks every value 0.
#[must_use]
pub fn order_rank(patterns: &[Pattern], value: &str) -> usize {
    patterns
        .iter()
        .position(|p| !p.is_empty_source() && p.is_match(value))
        .or_else(|| patterns.iter().position(Pattern::is_empty_source))
        .unwrap_or(patterns.len())
}

/// Digit-aware string ordering: `"Channel 2" < "Channel 10"`.
///
/// Runs of ASCII digits compare by numeric value (leading zeros ignored). A
/// digit sorts before a non-digit. Other characters compare by code point,
/// and a proper prefix sorts first.
#[must_use]
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a = a.chars().peekable();
    let mut b = b.chars().peekable();
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match (x.is_ascii_digit(), y.is_ascii_digit()) {
                (true, true) => {
                    let ord = cmp_digit_runs(&digit_run(&mut a), &digit_run(&mut b));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                (false, false) => {
                    if x != y {
                        return x.cmp(&y);
                    }
                    a.next();
                    b.next();
                }
            },
        }
    }
}

#[must_use]
pub fn natural_less(a: &str, b: &str) -> bool {
    natural_cmp(a, b) == Ordering::Less
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

/// Numeric comparison of two digit strings of any length.
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

struct Keyed {
    rank: usize,
    value: String,
    channel: Channel,
}

fn keyed(channel: Channel, spec: &SortSpec) -> Keyed {
    let value = spec.selector.get(&channel).unwrap_or_default().to_owned();
    Keyed {
        rank: order_rank(&spec.order, &value),
        value,
        channel,
    }
}

fn cmp_keyed(a: &Keyed, b: &Keyed) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| natural_cmp(&a.value, &b.value))
        .then_with(|| Reverse(a.channel.priority()).cmp(&Reverse(b.channel.priority())))
}

/// Sort a snapshot of channels per `spec`. Stable.
///
/// Without `group_by`: by order rank of the selected value, then natural
/// comparison of the value, then channel priority (descending).
///
/// With `group_by`: channels are partitioned by the group selector's value
/// (missing counts as `""`), groups are ordered by group order rank then
/// natural comparison of the key, members are ordered as above, and the
/// groups are concatenated.
#[must_use]
pub fn sort_channels(channels: Vec<Channel>, spec: &SortSpec) -> Vec<Channel> {
    let Some(group_by) = &spec.group_by else {
        let mut items: Vec<Keyed> = channels.into_iter().map(|c| keyed(c, spec)).collect();
        items.sort_by(cmp_keyed);
        return items.into_iter().map(|k| k.channel).collect();
    };

    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<Keyed>)> = Vec::new();
    for channel in channels {
        let key = group_by.selector.get(&channel).unwrap_or_default().to_owned();
        let slot = *slots.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(keyed(channel, spec));
    }

    groups.sort_by(|(a, _), (b, _)| {
        order_rank(&group_by.order, a)
            .cmp(&order_rank(&group_by.order, b))
            .then_with(|| natural_cmp(a, b))
    });

    groups
        .into_iter()
        .flat_map(|(_, mut members)| {
            members.sort_by(cmp_keyed);
            members.into_iter().map(|k| k.channel)
        })
        .collect()
}
