use chanrules::{
    group_duplicates, natural_less, sort_channels, Channel, ChannelAction, ChannelRule,
    ChannelStore, Condition, DedupSpec, Engine, FinalValue, Pattern, Playlist, PlaylistRule,
    PlaylistRuleKind, Selector, SortSpec, Template,
};

fn store(names: &[&str]) -> ChannelStore {
    let pl = Playlist::new("main", false);
    names
        .iter()
        .map(|n| Channel::new(*n, "http://example/", pl.clone()))
        .collect()
}

fn names(store: &ChannelStore) -> Vec<&str> {
    store.iter().map(|c| c.name.as_str()).collect()
}

fn by_name(order: &[&str]) -> PlaylistRule {
    PlaylistRule::new(PlaylistRuleKind::Sort(SortSpec {
        selector: Selector::Name,
        order: Pattern::list(order).unwrap(),
        group_by: None,
    }))
}

#[test]
fn empty_store() {
    let engine = Engine::builder()
        .channel_rule(ChannelRule::new(ChannelAction::RemoveChannel))
        .playlist_rule(by_name(&[]))
        .build()
        .unwrap();
    let mut s = ChannelStore::new();
    let report = engine.process(&mut s, "c");
    assert!(s.is_empty());
    assert_eq!(report.removed(), 0);
}

#[test]
fn discovery_example() {
    let pl = Playlist::new("p", false);
    let mut chs = vec![
        Channel::new("Discovery Channel HD", "u", pl.clone()),
        Channel::new("Discovery Channel 4K", "u", pl.clone()),
        Channel::new("National Geographic UHD", "u", pl),
    ];
    // earlier patterns rank higher, so "4K" must come first to win
    let patterns = Pattern::list(&["4K", "HD", "UHD"]).unwrap();
    let groups = group_duplicates(&mut chs, &Selector::Name, &patterns);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].base_name(), "Discovery Channel");
    assert_eq!(chs[groups[0].best()].name, "Discovery Channel 4K");
}

#[test]
fn natural_less_examples() {
    assert!(natural_less("Channel 2", "Channel 10"));
    assert!(!natural_less("5", "5"));
    assert!(natural_less("", "abc"));
}

#[test]
fn explicit_order_with_default_bucket() {
    let mut s = store(&["News", "Sports", "Music", "Movie"]);
    let engine = Engine::builder()
        .playlist_rule(by_name(&["Sports.*", "Music.*", ""]))
        .build()
        .unwrap();
    engine.process(&mut s, "c");
    assert_eq!(names(&s), ["Sports", "Music", "Movie", "News"]);
}

#[test]
fn explicit_order_without_default_bucket_puts_unmatched_last() {
    let mut s = store(&["Zulu", "News 2", "Alpha", "News 10"]);
    let engine = Engine::builder()
        .playlist_rule(by_name(&["^News"]))
        .build()
        .unwrap();
    engine.process(&mut s, "c");
    assert_eq!(names(&s), ["News 2", "News 10", "Alpha", "Zulu"]);
}

#[test]
fn remove_duplicates_fixture() {
    let mut s = store(&[
        "Channel A HD",
        "Channel A 4K",
        "Channel B",
        "Channel B",
        "Channel C orig",
        "Channel C",
    ]);
    let patterns = Pattern::list(&[
        "4K", "UHD", "HD 50", "HD 50 orig", "FHD", "HD", "HD orig", "orig", "",
    ])
    .unwrap();
    let engine = Engine::builder()
        .playlist_rule(PlaylistRule::new(PlaylistRuleKind::RemoveDuplicates(DedupSpec {
            selector: Selector::Name,
            patterns,
            final_value: None,
        })))
        .build()
        .unwrap();
    engine.process(&mut s, "c");
    let kept: Vec<&str> = s.active().map(|c| c.name.as_str()).collect();
    assert_eq!(kept, ["Channel A 4K", "Channel B", "Channel B", "Channel C orig"]);
}

#[test]
fn remove_then_sort_keeps_removed_in_store() {
    let mut s = store(&["B HD", "B", "A"]);
    let engine = Engine::builder()
        .playlist_rule(PlaylistRule::new(PlaylistRuleKind::RemoveDuplicates(DedupSpec {
            selector: Selector::Name,
            patterns: Pattern::list(&["HD"]).unwrap(),
            final_value: Some(FinalValue {
                selector: Selector::Name,
                template: Template::parse("{{ .Channel.BaseName }}").unwrap(),
            }),
        })))
        .playlist_rule(by_name(&[]))
        .build()
        .unwrap();
    engine.process(&mut s, "c");
    assert_eq!(s.len(), 3);
    let active: Vec<&str> = s.active().map(|c| c.name.as_str()).collect();
    assert_eq!(active, ["A", "B"]);
}

#[test]
fn ids_survive_renames() {
    let mut s = store(&["Old Name"]);
    let id = s.get(0).unwrap().id().to_owned();
    let engine = Engine::builder()
        .channel_rule(ChannelRule::new(ChannelAction::SetField {
            selector: Selector::Name,
            template: Template::parse("New Name").unwrap(),
        }))
        .build()
        .unwrap();
    engine.process(&mut s, "c");
    assert_eq!(s.get(0).unwrap().name, "New Name");
    assert_eq!(s.get(0).unwrap().id(), id);
}

#[test]
fn ids_prefer_tvg_id() {
    let pl = Playlist::new("p", false);
    let s: ChannelStore = [
        Channel::new("A", "u", pl.clone()).with_attr("tvg-id", "same"),
        Channel::new("B", "u", pl.clone()).with_attr("tvg-id", "same"),
        Channel::new("A", "u", pl),
    ]
    .into_iter()
    .collect();
    assert_eq!(s.get(0).unwrap().id(), s.get(1).unwrap().id());
    assert_ne!(s.get(0).unwrap().id(), s.get(2).unwrap().id());
}

#[test]
fn condition_on_missing_attr_never_matches() {
    let mut s = store(&["A"]);
    let engine = Engine::builder()
        .channel_rule(ChannelRule::new(ChannelAction::MarkHidden).when(
            Condition::new().matching(Selector::attr("group-title"), Pattern::list(&[""]).unwrap()),
        ))
        .build()
        .unwrap();
    engine.process(&mut s, "c");
    assert!(!s.get(0).unwrap().is_hidden());
}

#[test]
fn unicode_names_sort_by_code_point() {
    let pl = Playlist::new("p", false);
    let chs = ["Écran 2", "Ecran 10", "Ecran 9"]
        .into_iter()
        .map(|n| Channel::new(n, "u", pl.clone()))
        .collect();
    let sorted = sort_channels(
        chs,
        &SortSpec {
            selector: Selector::Name,
            order: vec![],
            group_by: None,
        },
    );
    let names: Vec<&str> = sorted.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Ecran 9", "Ecran 10", "Écran 2"]);
}

#[test]
fn non_ascii_digits_are_plain_characters() {
    // Arabic-Indic digits compare as text, so "10" sorts before "2"
    assert!(natural_less("x١٠", "x٢"));
    assert!(natural_less("x9", "x٠"));
}
