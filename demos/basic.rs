use chanrules::{
    Channel, ChannelAction, ChannelRule, ChannelStore, Condition, EngineBuilder, Pattern,
    Playlist, PlaylistRule, PlaylistRuleKind, Selector, SortSpec,
};

fn main() {
    // Hide test cards, then order the rest naturally by name
    let engine = EngineBuilder::new()
        .channel_rule(
            ChannelRule::new(ChannelAction::MarkHidden).when(
                Condition::new().matching(
                    Selector::Name,
                    Pattern::list(&["(?i)test"]).expect("invalid pattern"),
                ),
            ),
        )
        .playlist_rule(PlaylistRule::new(PlaylistRuleKind::Sort(SortSpec {
            selector: Selector::Name,
            order: vec![],
            group_by: None,
        })))
        .build()
        .expect("failed to build engine");

    println!("{engine}");

    let playlist = Playlist::new("main", false);
    let mut store: ChannelStore = ["Channel 10", "Test Card", "Channel 2", "Channel 1"]
        .into_iter()
        .map(|name| Channel::new(name, "http://example/stream", playlist.clone()))
        .collect();

    engine.process(&mut store, "kodi");

    for channel in store.iter() {
        let flag = if channel.is_hidden() { " (hidden)" } else { "" };
        println!("{}{flag}", channel.name);
    }
}
