use std::sync::Arc;
use std::thread;

use chanrules::{
    Channel, ChannelAction, ChannelRule, ChannelStore, Condition, EngineBuilder, Pattern,
    Playlist, Selector,
};

fn main() {
    let engine = Arc::new(
        EngineBuilder::new()
            .channel_rule(
                ChannelRule::new(ChannelAction::RemoveChannel).when(
                    Condition::new()
                        .matching(
                            Selector::Name,
                            Pattern::list(&["(?i)adult"]).expect("invalid pattern"),
                        )
                        .clients(["kids"]),
                ),
            )
            .build()
            .expect("failed to build engine"),
    );

    let handles: Vec<_> = ["kids", "kodi", "vlc", "tivimate"]
        .into_iter()
        .map(|client| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                // Every run gets its own store; the engine is shared read-only
                let playlist = Playlist::new("main", false);
                let mut store: ChannelStore = ["News", "Adult Movies", "Sports"]
                    .into_iter()
                    .map(|name| Channel::new(name, "http://example/stream", playlist.clone()))
                    .collect();

                let report = engine.process(&mut store, client);
                let kept: Vec<&str> = store.active().map(|c| c.name.as_str()).collect();
                println!("{client}: {kept:?} ({} removed)", report.removed());
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
