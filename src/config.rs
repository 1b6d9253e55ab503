//! YAML rule documents.
//!
//! Decoding happens in two steps: `serde_yaml` fills loosely typed `Raw*`
//! shapes in which every rule variant and required field is optional, then
//! lowering checks them and builds the typed rule model. Keeping required
//! fields optional at decode time lets errors name the rule they come from.

use serde::Deserialize;
use tracing::warn;

use crate::compile::{channel_rule_location, playlist_rule_location};
use crate::template::Template;
use crate::types::{
    ChannelAction, ChannelRule, Children, ClientCondition, Condition, ConfigError, DedupSpec,
    Engine, FieldMatch, FinalValue, GroupBy, Pattern, PlaylistRule, PlaylistRuleKind, Selector,
    SortSpec, MAX_CONDITION_DEPTH,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    channel_rules: Vec<RawChannelRule>,
    playlist_rules: Vec<RawPlaylistRule>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawChannelRule {
    set_field: Option<RawSetField>,
    remove_field: Option<RawRemoveField>,
    remove_channel: Option<RawConditional>,
    mark_hidden: Option<RawConditional>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSetField {
    selector: Option<String>,
    template: Option<String>,
    condition: Option<RawCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawRemoveField {
    selector: Option<String>,
    condition: Option<RawCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConditional {
    condition: Option<RawCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawCondition {
    selector: Option<String>,
    patterns: Option<Vec<String>>,
    clients: Vec<String>,
    playlists: Vec<String>,
    and: Vec<RawCondition>,
    or: Vec<RawCondition>,
    invert: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawPlaylistRule {
    merge_duplicates: Option<RawDedup>,
    remove_duplicates: Option<RawDedup>,
    sort: Option<RawSort>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawDedup {
    selector: Option<String>,
    patterns: Vec<String>,
    final_value: Option<RawFinalValue>,
    condition: Option<RawCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawFinalValue {
    selector: Option<String>,
    template: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawSort {
    selector: Option<String>,
    order: Vec<String>,
    group_by: Option<RawGroupBy>,
    condition: Option<RawCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawGroupBy {
    selector: Option<String>,
    group_order: Vec<String>,
}

pub(crate) fn from_yaml(input: &str) -> Result<Engine, crate::Error> {
    let raw: RawConfig = serde_yaml::from_str(input)?;
    Ok(lower(raw)?)
}

fn lower(raw: RawConfig) -> Result<Engine, ConfigError> {
    let channel_rules = raw
        .channel_rules
        .into_iter()
        .enumerate()
        .map(|(index, rule)| lower_channel_rule(rule, &channel_rule_location(index)))
        .collect::<Result<Vec<_>, _>>()?;
    let playlist_rules = raw
        .playlist_rules
        .into_iter()
        .enumerate()
        .map(|(index, rule)| lower_playlist_rule(rule, &playlist_rule_location(index)))
        .collect::<Result<Vec<_>, _>>()?;
    crate::compile::compile(channel_rules, playlist_rules)
}

/// Exactly one of `present` may be `Some`.
fn single_variant<T>(rule: &str, present: Vec<(&str, Option<T>)>) -> Result<T, ConfigError> {
    let names: Vec<String> = present
        .iter()
        .filter(|(_, v)| v.is_some())
        .map(|(name, _)| (*name).to_owned())
        .collect();
    if names.len() > 1 {
        return Err(ConfigError::AmbiguousRule {
            rule: rule.to_owned(),
            actions: names,
        });
    }
    present
        .into_iter()
        .find_map(|(_, v)| v)
        .ok_or_else(|| ConfigError::EmptyRule {
            rule: rule.to_owned(),
        })
}

enum ChannelVariant {
    SetField(RawSetField),
    RemoveField(RawRemoveField),
    RemoveChannel(RawConditional),
    MarkHidden(RawConditional),
}

fn lower_channel_rule(raw: RawChannelRule, rule: &str) -> Result<ChannelRule, ConfigError> {
    let variant = single_variant(
        rule,
        vec![
            ("set_field", raw.set_field.map(ChannelVariant::SetField)),
            ("remove_field", raw.remove_field.map(ChannelVariant::RemoveField)),
            ("remove_channel", raw.remove_channel.map(ChannelVariant::RemoveChannel)),
            ("mark_hidden", raw.mark_hidden.map(ChannelVariant::MarkHidden)),
        ],
    )?;
    let (action, condition) = match variant {
        ChannelVariant::SetField(set) => {
            let selector = required_selector(set.selector, rule, "selector")?;
            let template = required_template(set.template, rule, "template")?;
            (ChannelAction::SetField { selector, template }, set.condition)
        }
        ChannelVariant::RemoveField(remove) => {
            let selector = required_selector(remove.selector, rule, "selector")?;
            (ChannelAction::RemoveField { selector }, remove.condition)
        }
        ChannelVariant::RemoveChannel(c) => (ChannelAction::RemoveChannel, c.condition),
        ChannelVariant::MarkHidden(c) => (ChannelAction::MarkHidden, c.condition),
    };
    let condition = condition
        .map(|c| lower_condition(c, rule, 1))
        .transpose()?;
    Ok(ChannelRule { action, condition })
}

enum PlaylistVariant {
    Merge(RawDedup),
    Remove(RawDedup),
    Sort(RawSort),
}

fn lower_playlist_rule(raw: RawPlaylistRule, rule: &str) -> Result<PlaylistRule, ConfigError> {
    let variant = single_variant(
        rule,
        vec![
            ("merge_duplicates", raw.merge_duplicates.map(PlaylistVariant::Merge)),
            ("remove_duplicates", raw.remove_duplicates.map(PlaylistVariant::Remove)),
            ("sort", raw.sort.map(PlaylistVariant::Sort)),
        ],
    )?;
    let (kind, condition) = match variant {
        PlaylistVariant::Merge(mut raw) => {
            let condition = raw.condition.take();
            (PlaylistRuleKind::MergeDuplicates(lower_dedup(raw, rule)?), condition)
        }
        PlaylistVariant::Remove(mut raw) => {
            let condition = raw.condition.take();
            (PlaylistRuleKind::RemoveDuplicates(lower_dedup(raw, rule)?), condition)
        }
        PlaylistVariant::Sort(raw) => {
            let RawSort {
                selector,
                order,
                group_by,
                condition,
            } = raw;
            let spec = SortSpec {
                selector: required_selector(selector, rule, "selector")?,
                order: Pattern::list(&order)?,
                group_by: group_by
                    .map(|g| -> Result<GroupBy, ConfigError> {
                        Ok(GroupBy {
                            selector: required_selector(g.selector, rule, "group_by.selector")?,
                            order: Pattern::list(&g.group_order)?,
                        })
                    })
                    .transpose()?,
            };
            (PlaylistRuleKind::Sort(spec), condition)
        }
    };
    let condition = condition
        .map(|c| lower_client_condition(c, rule))
        .transpose()?;
    Ok(PlaylistRule { kind, condition })
}

fn lower_dedup(raw: RawDedup, rule: &str) -> Result<DedupSpec, ConfigError> {
    let final_value = raw
        .final_value
        .map(|fv| -> Result<FinalValue, ConfigError> {
            Ok(FinalValue {
                selector: required_selector(fv.selector, rule, "final_value.selector")?,
                template: required_template(fv.template, rule, "final_value.template")?,
            })
        })
        .transpose()?;
    Ok(DedupSpec {
        selector: required_selector(raw.selector, rule, "selector")?,
        patterns: Pattern::list(&raw.patterns)?,
        final_value,
    })
}

fn lower_condition(raw: RawCondition, rule: &str, depth: usize) -> Result<Condition, ConfigError> {
    if depth > MAX_CONDITION_DEPTH {
        return Err(ConfigError::ConditionTooDeep {
            rule: rule.to_owned(),
            limit: MAX_CONDITION_DEPTH,
        });
    }
    let field = match (raw.selector, raw.patterns) {
        (None, None) => None,
        (Some(selector), Some(patterns)) if !patterns.is_empty() => Some(FieldMatch {
            selector: selector.parse()?,
            patterns: Pattern::list(&patterns)?,
        }),
        (Some(_), _) => {
            return Err(ConfigError::IncompleteFieldMatch {
                rule: rule.to_owned(),
                present: "selector".to_owned(),
                missing: "patterns".to_owned(),
            })
        }
        (None, Some(_)) => {
            return Err(ConfigError::IncompleteFieldMatch {
                rule: rule.to_owned(),
                present: "patterns".to_owned(),
                missing: "selector".to_owned(),
            })
        }
    };

    let lower_all = |list: Vec<RawCondition>| {
        list.into_iter()
            .map(|c| lower_condition(c, rule, depth + 1))
            .collect::<Result<Vec<_>, _>>()
    };
    let children = match (raw.and.is_empty(), raw.or.is_empty()) {
        (true, true) => Children::None,
        (false, or_empty) => {
            if !or_empty {
                warn!(
                    rule,
                    and = raw.and.len(),
                    or = raw.or.len(),
                    "condition sets both 'and' and 'or'; 'or' is ignored"
                );
            }
            Children::All(lower_all(raw.and)?)
        }
        (true, false) => Children::Any(lower_all(raw.or)?),
    };

    Ok(Condition {
        field,
        clients: raw.clients,
        playlists: raw.playlists,
        children,
        invert: raw.invert,
    })
}

fn lower_client_condition(raw: RawCondition, rule: &str) -> Result<ClientCondition, ConfigError> {
    let disallowed = [
        ("selector", raw.selector.is_some()),
        ("patterns", raw.patterns.is_some()),
        ("playlists", !raw.playlists.is_empty()),
        ("and", !raw.and.is_empty()),
        ("or", !raw.or.is_empty()),
    ];
    if let Some((field, _)) = disallowed.iter().find(|(_, set)| *set) {
        return Err(ConfigError::DisallowedCondition {
            rule: rule.to_owned(),
            field: (*field).to_owned(),
        });
    }
    Ok(ClientCondition {
        clients: raw.clients,
        invert: raw.invert,
    })
}

fn required_selector(
    value: Option<String>,
    rule: &str,
    field: &str,
) -> Result<Selector, ConfigError> {
    value
        .ok_or_else(|| ConfigError::MissingField {
            rule: rule.to_owned(),
            field: field.to_owned(),
        })?
        .parse()
}

fn required_template(
    value: Option<String>,
    rule: &str,
    field: &str,
) -> Result<Template, ConfigError> {
    let source = value.ok_or_else(|| ConfigError::MissingField {
        rule: rule.to_owned(),
        field: field.to_owned(),
    })?;
    Template::parse(&source).map_err(|err| ConfigError::InvalidTemplate {
        rule: rule.to_owned(),
        message: err.message().to_owned(),
    })
}
