use crate::types::{Channel, Children, Condition};

/// Evaluate `condition` against one channel for the requesting client.
///
/// Field checks (pattern match, client names, playlist names) are ANDed,
/// unset checks pass. The result is then ANDed with the children: all of
/// them for [`Children::All`], at least one for a non-empty
/// [`Children::Any`]. `invert` applies last.
///
/// Pure over the channel's current state, so an earlier rule's edits are
/// visible to a later rule's condition.
#[must_use]
pub fn matches(channel: &Channel, client: &str, condition: &Condition) -> bool {
    let fields = fields_match(channel, client, condition);
    let combined = match &condition.children {
        Children::All(list) => fields && list.iter().all(|c| matches(channel, client, c)),
        Children::Any(list) if !list.is_empty() => {
            fields && list.iter().any(|c| matches(channel, client, c))
        }
        Children::Any(_) | Children::None => fields,
    };
    combined != condition.invert
}

fn fields_match(channel: &Channel, client: &str, condition: &Condition) -> bool {
    if let Some(field) = &condition.field {
        let Some(value) = field.selector.get(channel) else {
            return false;
        };
        if !field.patterns.iter().any(|p| p.is_match(value)) {
            return false;
        }
    }
    if !condition.clients.is_empty() && !condition.clients.iter().any(|c| c == client) {
        return false;
    }
    if !condition.playlists.is_empty() {
        let playlist = channel.playlist().name();
        if !condition.playlists.iter().any(|p| p == playlist) {
            return false;
        }
    }
    true
}
