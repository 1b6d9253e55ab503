use chanrules::{
    Channel, ChannelAction, ChannelRule, ChannelStore, Condition, DedupSpec, EngineBuilder,
    Pattern, Playlist, PlaylistRule, PlaylistRuleKind, Selector, Template,
};

fn main() {
    let engine = EngineBuilder::new()
        .channel_rule(
            ChannelRule::new(ChannelAction::RemoveChannel).when(
                Condition::new()
                    .matching(
                        Selector::attr("group-title"),
                        Pattern::list(&["(?i)adult"]).expect("invalid pattern"),
                    )
                    .clients(["kids"]),
            ),
        )
        .channel_rule(ChannelRule::new(ChannelAction::SetField {
            selector: Selector::attr("group-title"),
            template: Template::parse(r#"{{ index .Channel.Attrs "group-title" | upper }}"#)
                .expect("invalid template"),
        }))
        .playlist_rule(PlaylistRule::new(PlaylistRuleKind::RemoveDuplicates(
            DedupSpec {
                selector: Selector::Name,
                patterns: Pattern::list(&["4K", "HD", ""]).expect("invalid pattern"),
                final_value: None,
            },
        )))
        .build()
        .expect("failed to build engine");

    let playlist = Playlist::new("uk", true);
    let mut store: ChannelStore = [
        ("BBC One HD", "News"),
        ("BBC One", "News"),
        ("Late Night", "Adult"),
        ("Sky Sports 4K", "Sports"),
    ]
    .into_iter()
    .map(|(name, group)| {
        Channel::new(name, "http://example/stream", playlist.clone()).with_attr("group-title", group)
    })
    .collect();

    let report = engine.process(&mut store, "kids");

    println!("{report}");
    println!();
    println!("Removed: {}", report.removed());
    println!("Fields set: {}", report.fields_set());
    println!("Duplicate groups: {}", report.groups());
    println!("Duration: {:?}", report.duration());
}
