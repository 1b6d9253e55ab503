use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The playlist a channel was parsed from.
///
/// Channels hold it behind an `Arc` and only ever read it; the playlist
/// outlives every channel that points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    name: String,
    proxied: bool,
}

impl Playlist {
    #[must_use]
    pub fn new(name: impl Into<String>, proxied: bool) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            proxied,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_proxied(&self) -> bool {
        self.proxied
    }
}

/// A single playlist entry, rewritten in place by the rule processors.
///
/// `name`, `uri`, `attrs` and `tags` come from the playlist parser. The
/// remaining state (identity, flags, priority) is owned by the engine.
#[derive(Debug, Clone)]
pub struct Channel {
    pub name: String,
    pub uri: String,
    pub attrs: HashMap<String, String>,
    pub tags: HashMap<String, String>,
    id: String,
    hidden: bool,
    removed: bool,
    priority: u32,
    playlist: Arc<Playlist>,
}

impl Channel {
    #[must_use]
    pub fn new(name: impl Into<String>, uri: impl Into<String>, playlist: Arc<Playlist>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            attrs: HashMap::new(),
            tags: HashMap::new(),
            id: String::new(),
            hidden: false,
            removed: false,
            priority: 0,
            playlist,
        }
    }

    /// Set an attribute, builder style.
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.insert(key.to_owned(), value.into());
        self
    }

    /// Set a tag, builder style.
    #[must_use]
    pub fn with_tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tags.insert(key.to_owned(), value.into());
        self
    }

    /// Synthetic identifier. Empty until the channel is pushed into a
    /// [`ChannelStore`](super::ChannelStore).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Rank assigned by the last duplicate grouping that included this channel.
    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    #[must_use]
    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub(crate) fn assign_id(&mut self) {
        if self.id.is_empty() {
            self.id = derive_id(self);
        }
    }

    pub(crate) fn set_id(&mut self, id: &str) {
        id.clone_into(&mut self.id);
    }

    pub(crate) fn hide(&mut self) {
        self.hidden = true;
    }

    pub(crate) fn remove(&mut self) {
        self.removed = true;
    }

    pub(crate) fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.playlist.name)?;
        if self.removed {
            write!(f, " (removed)")?;
        } else if self.hidden {
            write!(f, " (hidden)")?;
        }
        Ok(())
    }
}

const ID_HEX_LEN: usize = 16;

/// Hash the first non-empty of `tvg-id`, `tvg-name` and the channel name.
fn derive_id(channel: &Channel) -> String {
    let source = ["tvg-id", "tvg-name"]
        .iter()
        .filter_map(|key| channel.attrs.get(*key))
        .find(|v| !v.is_empty())
        .map_or(channel.name.as_str(), String::as_str);
    let hex = blake3::hash(source.as_bytes()).to_hex();
    hex.as_str()[..ID_HEX_LEN].to_owned()
}
