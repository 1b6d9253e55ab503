use std::sync::Arc;
use std::thread;

use chanrules::{
    Channel, ChannelAction, ChannelRule, ChannelStore, ClientCondition, Condition, DedupSpec,
    Engine, Pattern, Playlist, PlaylistRule, PlaylistRuleKind, Selector, SortSpec,
};

fn fresh_store() -> ChannelStore {
    let pl = Playlist::new("main", true);
    ["Sports 10", "News HD", "Sports 2", "News", "Adult"]
        .into_iter()
        .map(|n| Channel::new(n, "http://example/", pl.clone()))
        .collect()
}

#[test]
fn process_across_threads() {
    let engine = Arc::new(
        Engine::builder()
            .channel_rule(
                ChannelRule::new(ChannelAction::RemoveChannel).when(
                    Condition::new()
                        .matching(Selector::Name, Pattern::list(&["Adult"]).unwrap())
                        .clients(["kids"]),
                ),
            )
            .playlist_rule(
                PlaylistRule::new(PlaylistRuleKind::RemoveDuplicates(DedupSpec {
                    selector: Selector::Name,
                    patterns: Pattern::list(&["HD", ""]).unwrap(),
                    final_value: None,
                }))
                .when(ClientCondition::new(["vlc"]).inverted()),
            )
            .playlist_rule(PlaylistRule::new(PlaylistRuleKind::Sort(SortSpec {
                selector: Selector::Name,
                order: Pattern::list(&["^Sports", ""]).unwrap(),
                group_by: None,
            })))
            .build()
            .unwrap(),
    );

    let handles: Vec<_> = ["kids", "kodi", "vlc"]
        .into_iter()
        .map(|client| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut store = fresh_store();
                engine.process(&mut store, client);
                store
                    .active()
                    .map(|c| c.name.clone())
                    .collect::<Vec<String>>()
            })
        })
        .collect();

    let results: Vec<Vec<String>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(results[0], ["Sports 2", "Sports 10", "News HD"]);
    assert_eq!(results[1], ["Sports 2", "Sports 10", "Adult", "News HD"]);
    assert_eq!(results[2], ["Sports 2", "Sports 10", "Adult", "News", "News HD"]);
}

#[test]
fn engine_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Engine>();
    assert_send_sync::<ChannelStore>();
}
