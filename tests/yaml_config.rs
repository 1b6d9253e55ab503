#![cfg(feature = "yaml")]

use chanrules::{
    Channel, ChannelAction, ChannelStore, Children, ConfigError, Engine, Error, Playlist,
    PlaylistRuleKind, Selector,
};

fn config_err(yaml: &str) -> ConfigError {
    match Engine::from_yaml(yaml) {
        Err(Error::Config(err)) => err,
        Err(other) => panic!("expected a config error, got {other}"),
        Ok(engine) => panic!("expected a config error, got {engine}"),
    }
}

const FULL: &str = r#"
channel_rules:
  - remove_channel:
      condition:
        selector: "attr/group-title"
        patterns: ["(?i)adult"]
        clients: [kids]
  - set_field:
      selector: "attr/group-title"
      template: '{{ .Playlist.Name | upper }} {{ index .Channel.Attrs "group-title" }}'
      condition:
        playlists: [uk]
  - remove_field:
      selector: "tag/EXTGRP"
  - mark_hidden:
      condition:
        or:
          - selector: name
            patterns: ["Test"]
          - selector: name
            patterns: ["Promo"]
playlist_rules:
  - remove_duplicates:
      selector: name
      patterns: ["4K", "HD", ""]
      final_value:
        selector: "attr/tvg-name"
        template: "{{ .Channel.BaseName }}"
      condition:
        clients: [vlc]
        invert: true
  - sort:
      selector: name
      order: []
      group_by:
        selector: "attr/group-title"
        group_order: ["Sports", ""]
"#;

#[test]
fn full_document_compiles() {
    let engine = Engine::from_yaml(FULL).unwrap();
    assert_eq!(engine.channel_rules().len(), 4);
    assert_eq!(engine.playlist_rules().len(), 2);

    assert_eq!(engine.channel_rules()[0].action, ChannelAction::RemoveChannel);
    assert!(matches!(
        &engine.channel_rules()[2].action,
        ChannelAction::RemoveField { selector } if *selector == Selector::tag("EXTGRP")
    ));
    let hidden = engine.channel_rules()[3].condition.as_ref().unwrap();
    assert!(matches!(&hidden.children, Children::Any(list) if list.len() == 2));

    match &engine.playlist_rules()[0].kind {
        PlaylistRuleKind::RemoveDuplicates(spec) => {
            assert_eq!(spec.patterns.len(), 3);
            assert!(spec.patterns[2].is_empty_source());
            assert!(spec.final_value.is_some());
        }
        other => panic!("expected remove_duplicates, got {other:?}"),
    }
    assert!(engine.playlist_rules()[0].applies_to("kodi"));
    assert!(!engine.playlist_rules()[0].applies_to("vlc"));
}

#[test]
fn full_document_processes() {
    let engine = Engine::from_yaml(FULL).unwrap();
    let uk = Playlist::new("uk", false);
    let mut store: ChannelStore = [
        Channel::new("Sky Sports HD", "u", uk.clone()).with_attr("group-title", "Sports"),
        Channel::new("Sky Sports", "u", uk.clone()).with_attr("group-title", "Sports"),
        Channel::new("Late Night", "u", uk.clone()).with_attr("group-title", "Adult"),
        Channel::new("BBC News", "u", uk.clone())
            .with_attr("group-title", "News")
            .with_tag("EXTGRP", "News"),
        Channel::new("Test Card", "u", uk).with_attr("group-title", "News"),
    ]
    .into_iter()
    .collect();

    let report = engine.process(&mut store, "kids");

    let active: Vec<(&str, &str)> = store
        .active()
        .map(|c| (c.name.as_str(), c.attrs["group-title"].as_str()))
        .collect();
    assert_eq!(
        active,
        [
            ("Sky Sports HD", "UK Sports"),
            ("BBC News", "UK News"),
            ("Test Card", "UK News"),
        ]
    );
    let bbc = store.iter().find(|c| c.name == "BBC News").unwrap();
    assert!(bbc.tags.is_empty());
    let test_card = store.iter().find(|c| c.name == "Test Card").unwrap();
    assert!(test_card.is_hidden());
    let sky = store.iter().find(|c| c.name == "Sky Sports HD").unwrap();
    assert_eq!(sky.attrs["tvg-name"], "Sky Sports");

    assert_eq!(report.removed(), 2);
    assert_eq!(report.hidden(), 1);
    assert_eq!(report.playlist_rules_applied(), 2);
}

#[test]
fn empty_document_is_an_empty_engine() {
    let engine = Engine::from_yaml("{}").unwrap();
    assert!(engine.channel_rules().is_empty());
    assert!(engine.playlist_rules().is_empty());
}

#[test]
fn and_wins_over_or() {
    let engine = Engine::from_yaml(
        r#"
channel_rules:
  - mark_hidden:
      condition:
        and:
          - selector: name
            patterns: ["^A"]
        or:
          - selector: name
            patterns: ["^B"]
"#,
    )
    .unwrap();
    let pl = Playlist::new("p", false);
    let mut store: ChannelStore = ["A", "B"]
        .into_iter()
        .map(|n| Channel::new(n, "u", pl.clone()))
        .collect();
    engine.process(&mut store, "c");
    let hidden: Vec<bool> = store.iter().map(Channel::is_hidden).collect();
    assert_eq!(hidden, [true, false]);
}

#[test]
fn rule_without_action() {
    let err = config_err("channel_rules:\n  - {}\n");
    assert!(matches!(err, ConfigError::EmptyRule { ref rule } if rule == "channel_rules[0]"));
}

#[test]
fn rule_with_two_actions() {
    let err = config_err(
        "playlist_rules:\n  - sort: { selector: name }\n    merge_duplicates: { selector: name }\n",
    );
    match err {
        ConfigError::AmbiguousRule { rule, actions } => {
            assert_eq!(rule, "playlist_rules[0]");
            assert_eq!(actions, ["merge_duplicates", "sort"]);
        }
        other => panic!("expected AmbiguousRule, got {other}"),
    }
}

#[test]
fn invalid_selector() {
    let err = config_err("channel_rules:\n  - remove_field: { selector: \"attr/\" }\n");
    assert!(matches!(err, ConfigError::InvalidSelector { ref selector } if selector == "attr/"));
}

#[test]
fn invalid_pattern() {
    let err = config_err("playlist_rules:\n  - sort: { selector: name, order: [\"(\"] }\n");
    assert!(matches!(err, ConfigError::InvalidPattern { ref pattern, .. } if pattern == "("));
}

#[test]
fn invalid_template_names_rule() {
    let err = config_err(
        "channel_rules:\n  - mark_hidden: {}\n  - set_field: { selector: name, template: \"{{ .Channel.Nope }}\" }\n",
    );
    assert!(matches!(err, ConfigError::InvalidTemplate { ref rule, .. } if rule == "channel_rules[1]"));
}

#[test]
fn missing_template() {
    let err = config_err("channel_rules:\n  - set_field: { selector: name }\n");
    assert!(matches!(
        err,
        ConfigError::MissingField { ref field, .. } if field == "template"
    ));
}

#[test]
fn missing_final_value_selector() {
    let err = config_err(
        "playlist_rules:\n  - merge_duplicates: { selector: name, final_value: { template: x } }\n",
    );
    assert!(matches!(
        err,
        ConfigError::MissingField { ref field, .. } if field == "final_value.selector"
    ));
}

#[test]
fn playlist_condition_is_client_only() {
    let err = config_err(
        "playlist_rules:\n  - sort:\n      selector: name\n      condition: { selector: name, patterns: [x] }\n",
    );
    assert!(matches!(
        err,
        ConfigError::DisallowedCondition { ref field, .. } if field == "selector"
    ));
}

#[test]
fn condition_too_deep() {
    let mut cond = String::from("{}");
    for _ in 0..40 {
        cond = format!("{{ and: [{cond}] }}");
    }
    let err = config_err(&format!("channel_rules:\n  - mark_hidden: {{ condition: {cond} }}\n"));
    assert!(matches!(err, ConfigError::ConditionTooDeep { limit: 32, .. }));
}

#[test]
fn unknown_key_is_a_yaml_error() {
    let err = Engine::from_yaml("channel_rules:\n  - mark_hiden: {}\n").unwrap_err();
    assert!(matches!(err, Error::Yaml(_)));
}

#[test]
fn from_file_reports_io_errors() {
    let err = Engine::from_file("/nonexistent/chanrules/rules.yaml").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn from_file_reads_rules() {
    let path = std::env::temp_dir().join(format!("chanrules-{}.yaml", std::process::id()));
    std::fs::write(&path, FULL).unwrap();
    let engine = Engine::from_file(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(engine.unwrap().channel_rules().len(), 4);
}
