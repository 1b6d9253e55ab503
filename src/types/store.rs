use super::channel::Channel;

/// Ordered collection of channels for one processing run.
///
/// Insertion order is significant: rule processors walk channels in this
/// order and the sort engine replaces it wholesale. Removal is a flag on the
/// channel; removed channels stay in the store and are skipped by
/// [`active()`](Self::active).
#[derive(Debug, Clone, Default)]
pub struct ChannelStore {
    channels: Vec<Channel>,
}

impl ChannelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a channel, deriving its identifier if it has none yet.
    pub fn push(&mut self, mut channel: Channel) {
        channel.assign_id();
        self.channels.push(channel);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Channel> {
        self.channels.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Channel> {
        self.channels.iter()
    }

    /// Channels not flagged as removed, in store order.
    pub fn active(&self) -> impl Iterator<Item = &Channel> {
        self.channels.iter().filter(|c| !c.is_removed())
    }

    #[must_use]
    pub fn into_channels(self) -> Vec<Channel> {
        self.channels
    }

    pub(crate) fn channels_mut(&mut self) -> &mut [Channel] {
        &mut self.channels
    }

    pub(crate) fn take(&mut self) -> Vec<Channel> {
        std::mem::take(&mut self.channels)
    }

    pub(crate) fn replace(&mut self, channels: Vec<Channel>) {
        self.channels = channels;
    }
}

impl Extend<Channel> for ChannelStore {
    fn extend<I: IntoIterator<Item = Channel>>(&mut self, iter: I) {
        for channel in iter {
            self.push(channel);
        }
    }
}

impl FromIterator<Channel> for ChannelStore {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<'a> IntoIterator for &'a ChannelStore {
    type Item = &'a Channel;
    type IntoIter = std::slice::Iter<'a, Channel>;

    fn into_iter(self) -> Self::IntoIter {
        self.channels.iter()
    }
}
