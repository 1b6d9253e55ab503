use tracing::debug;

use crate::dedup::{group_duplicates, DuplicateGroup};
use crate::evaluate::matches;
use crate::sort::sort_channels;
use crate::template::TemplateContext;
use crate::types::{
    CancelToken, Channel, ChannelAction, ChannelRule, ChannelStore, DedupSpec, FinalValue,
    PlaylistRule, PlaylistRuleKind, ProcessReport,
};

/// Apply channel rules rule-major: each rule visits every channel before the
/// next rule starts, so later conditions see earlier edits. Removed channels
/// are skipped.
pub(crate) fn apply_channel_rules(
    rules: &[ChannelRule],
    store: &mut ChannelStore,
    client: &str,
    report: &mut ProcessReport,
) {
    for (index, rule) in rules.iter().enumerate() {
        let mut hits = 0_usize;
        for channel in store.channels_mut() {
            if channel.is_removed() {
                continue;
            }
            if let Some(condition) = &rule.condition {
                if !matches(channel, client, condition) {
                    continue;
                }
            }
            hits += 1;
            apply_action(&rule.action, channel, report);
        }
        report.channel_rules_applied += 1;
        debug!(index, rule = %rule, hits, "applied channel rule");
    }
}

fn apply_action(action: &ChannelAction, channel: &mut Channel, report: &mut ProcessReport) {
    match action {
        ChannelAction::SetField { selector, template } => {
            let rendered = template.render(&TemplateContext::for_channel(channel));
            match rendered {
                Ok(value) => {
                    selector.set(channel, value);
                    report.fields_set += 1;
                }
                Err(err) => {
                    debug!(channel = %channel, %selector, error = %err, "set_field skipped");
                }
            }
        }
        ChannelAction::RemoveField { selector } => selector.remove(channel),
        ChannelAction::RemoveChannel => {
            channel.remove();
            report.removed += 1;
        }
        ChannelAction::MarkHidden => {
            if !channel.is_hidden() {
                channel.hide();
                report.hidden += 1;
            }
        }
    }
}

/// Apply playlist rules in order, skipping those whose client condition does
/// not match. `cancel` is checked before each rule.
pub(crate) fn apply_playlist_rules(
    rules: &[PlaylistRule],
    store: &mut ChannelStore,
    client: &str,
    cancel: Option<&CancelToken>,
    report: &mut ProcessReport,
) {
    for (index, rule) in rules.iter().enumerate() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            report.cancelled = true;
            debug!(index, "cancelled before playlist rule");
            return;
        }
        if !rule.applies_to(client) {
            debug!(index, rule = %rule, client, "playlist rule not for this client");
            continue;
        }
        match &rule.kind {
            PlaylistRuleKind::MergeDuplicates(spec) => merge_duplicates(spec, store, report),
            PlaylistRuleKind::RemoveDuplicates(spec) => remove_duplicates(spec, store, report),
            PlaylistRuleKind::Sort(spec) => {
                let sorted = sort_channels(store.take(), spec);
                store.replace(sorted);
            }
        }
        report.playlist_rules_applied += 1;
        debug!(index, rule = %rule, "applied playlist rule");
    }
}

fn merge_duplicates(spec: &DedupSpec, store: &mut ChannelStore, report: &mut ProcessReport) {
    let channels = store.channels_mut();
    let groups = group_duplicates(channels, &spec.selector, &spec.patterns);
    for group in &groups {
        let id = channels[group.best()].id().to_owned();
        for &idx in group.members() {
            channels[idx].set_id(&id);
        }
        if let Some(final_value) = &spec.final_value {
            if let Some(value) = render_final_value(final_value, channels, group) {
                for &idx in group.members() {
                    final_value.selector.set(&mut channels[idx], value.clone());
                    report.fields_set += 1;
                }
            }
        }
    }
    report.groups += groups.len();
}

fn remove_duplicates(spec: &DedupSpec, store: &mut ChannelStore, report: &mut ProcessReport) {
    let channels = store.channels_mut();
    let groups = group_duplicates(channels, &spec.selector, &spec.patterns);
    for group in &groups {
        for &idx in &group.members()[1..] {
            channels[idx].remove();
            report.removed += 1;
        }
        if let Some(final_value) = &spec.final_value {
            if let Some(value) = render_final_value(final_value, channels, group) {
                final_value.selector.set(&mut channels[group.best()], value);
                report.fields_set += 1;
            }
        }
    }
    report.groups += groups.len();
}

/// Render once per group from the best member, with the group's base name.
fn render_final_value(
    final_value: &FinalValue,
    channels: &[Channel],
    group: &DuplicateGroup,
) -> Option<String> {
    let best = &channels[group.best()];
    let ctx = TemplateContext::for_channel(best).with_base_name(group.base_name());
    match final_value.template.render(&ctx) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(
                base_name = group.base_name(),
                selector = %final_value.selector,
                error = %err,
                "final value skipped"
            );
            None
        }
    }
}
