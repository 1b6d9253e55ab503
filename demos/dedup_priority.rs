use chanrules::{
    Channel, ChannelStore, DedupSpec, EngineBuilder, Pattern, Playlist, PlaylistRule,
    PlaylistRuleKind, Selector,
};

fn survivors(markers: &[&str]) -> Vec<String> {
    // Earlier markers rank higher: the best-ranked duplicate survives
    let engine = EngineBuilder::new()
        .playlist_rule(PlaylistRule::new(PlaylistRuleKind::RemoveDuplicates(
            DedupSpec {
                selector: Selector::Name,
                patterns: Pattern::list(markers).expect("invalid pattern"),
                final_value: None,
            },
        )))
        .build()
        .expect("failed to build engine");

    let playlist = Playlist::new("main", false);
    let mut store: ChannelStore = ["Discovery HD", "Discovery 4K", "Discovery"]
        .into_iter()
        .map(|name| Channel::new(name, "http://example/stream", playlist.clone()))
        .collect();

    engine.process(&mut store, "kodi");
    store.active().map(|c| c.name.clone()).collect()
}

fn main() {
    // 4K first: the 4K stream wins
    println!("[4K, HD, \"\"] keeps {:?}", survivors(&["4K", "HD", ""]));

    // HD first: the HD stream wins
    println!("[HD, 4K, \"\"] keeps {:?}", survivors(&["HD", "4K", ""]));

    // Empty marker first: the unmarked channel outranks every marked one
    println!("[\"\", 4K, HD] keeps {:?}", survivors(&["", "4K", "HD"]));
}
