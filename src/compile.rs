use crate::types::{
    ChannelRule, Children, Condition, ConfigError, Engine, PlaylistRule, MAX_CONDITION_DEPTH,
};

pub(crate) fn compile(
    channel_rules: Vec<ChannelRule>,
    playlist_rules: Vec<PlaylistRule>,
) -> Result<Engine, ConfigError> {
    for (index, rule) in channel_rules.iter().enumerate() {
        if let Some(condition) = &rule.condition {
            check_condition(condition, &channel_rule_location(index))?;
        }
    }
    Ok(Engine {
        channel_rules,
        playlist_rules,
    })
}

pub(crate) fn channel_rule_location(index: usize) -> String {
    format!("channel_rules[{index}]")
}

pub(crate) fn playlist_rule_location(index: usize) -> String {
    format!("playlist_rules[{index}]")
}

/// Check depth before walking, so a hostile tree is rejected without
/// recursing through all of it.
pub(crate) fn check_condition(condition: &Condition, rule: &str) -> Result<(), ConfigError> {
    if exceeds_depth(condition, MAX_CONDITION_DEPTH) {
        return Err(ConfigError::ConditionTooDeep {
            rule: rule.to_owned(),
            limit: MAX_CONDITION_DEPTH,
        });
    }
    check_field_matches(condition, rule)
}

fn exceeds_depth(condition: &Condition, budget: usize) -> bool {
    if budget == 0 {
        return true;
    }
    match &condition.children {
        Children::None => false,
        Children::All(list) | Children::Any(list) => {
            list.iter().any(|c| exceeds_depth(c, budget - 1))
        }
    }
}

fn check_field_matches(condition: &Condition, rule: &str) -> Result<(), ConfigError> {
    if let Some(field) = &condition.field {
        if field.patterns.is_empty() {
            return Err(ConfigError::IncompleteFieldMatch {
                rule: rule.to_owned(),
                present: "selector".to_owned(),
                missing: "patterns".to_owned(),
            });
        }
    }
    match &condition.children {
        Children::None => Ok(()),
        Children::All(list) | Children::Any(list) => list
            .iter()
            .try_for_each(|c| check_field_matches(c, rule)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChannelAction, Pattern, Selector};

    fn hidden_when(condition: Condition) -> ChannelRule {
        ChannelRule::new(ChannelAction::MarkHidden).when(condition)
    }

    #[test]
    fn locations_name_the_rule() {
        assert_eq!(channel_rule_location(2), "channel_rules[2]");
        assert_eq!(playlist_rule_location(0), "playlist_rules[0]");
    }

    #[test]
    fn depth_budget() {
        let flat = Condition::new();
        assert!(!exceeds_depth(&flat, 1));
        assert!(exceeds_depth(&flat, 0));
        let two = Condition::new().any_of(vec![Condition::new()]);
        assert!(exceeds_depth(&two, 1));
        assert!(!exceeds_depth(&two, 2));
    }

    #[test]
    fn error_names_the_offending_rule() {
        let rules = vec![
            hidden_when(Condition::new()),
            hidden_when(Condition::new().matching(Selector::Name, vec![])),
        ];
        let err = compile(rules, vec![]).unwrap_err();
        assert!(err.to_string().contains("channel_rules[1]"));
    }

    #[test]
    fn valid_rules_compile() {
        let rules = vec![hidden_when(
            Condition::new().matching(Selector::Name, Pattern::list(&["x"]).unwrap()),
        )];
        let engine = compile(rules, vec![]).unwrap();
        assert_eq!(engine.channel_rules().len(), 1);
    }
}
