use chanrules::{Channel, ChannelStore, Engine, Playlist};

const RULES: &str = r#"
channel_rules:
  - mark_hidden:
      condition:
        selector: name
        patterns: ["(?i)promo"]
  - set_field:
      selector: "attr/tvg-name"
      template: "{{ .Channel.Name | upper }}"
playlist_rules:
  - merge_duplicates:
      selector: name
      patterns: ["FHD", "HD", ""]
  - sort:
      selector: name
      order: []
      group_by:
        selector: "attr/group-title"
        group_order: ["Sports", ""]
      condition:
        clients: [vlc]
        invert: true
"#;

fn main() {
    let engine = Engine::from_yaml(RULES).expect("failed to load rules");
    println!("{engine}");

    let playlist = Playlist::new("uk", false);
    let mut store: ChannelStore = [
        ("BBC News HD", "News"),
        ("Sky Sports 2", "Sports"),
        ("BBC News", "News"),
        ("Sky Sports 10", "Sports"),
        ("Promo Loop", "News"),
    ]
    .into_iter()
    .map(|(name, group)| {
        Channel::new(name, "http://example/stream", playlist.clone()).with_attr("group-title", group)
    })
    .collect();

    let report = engine.process(&mut store, "kodi");
    println!("{report}");

    for channel in store.iter() {
        println!(
            "{:<16} id={} tvg-name={}{}",
            channel.name,
            channel.id(),
            channel.attrs["tvg-name"],
            if channel.is_hidden() { " (hidden)" } else { "" }
        );
    }
}
