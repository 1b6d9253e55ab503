use std::fmt;
use std::time::Instant;

use tracing::debug;

use super::cancel::CancelToken;
use super::error::ConfigError;
use super::report::ProcessReport;
use super::rule::{ChannelRule, PlaylistRule};
use super::store::ChannelStore;

/// Builder for constructing an [`Engine`].
///
/// Rules run in the order they are added: all channel rules first, then all
/// playlist rules.
///
/// # Example
///
/// ```
/// use chanrules::{
///     ChannelAction, ChannelRule, ChannelStore, Channel, Condition, EngineBuilder, Pattern,
///     Playlist, PlaylistRule, PlaylistRuleKind, Selector, SortSpec,
/// };
///
/// let engine = EngineBuilder::new()
///     .channel_rule(
///         ChannelRule::new(ChannelAction::MarkHidden).when(
///             Condition::new().matching(Selector::Name, Pattern::list(&["(?i)test"]).unwrap()),
///         ),
///     )
///     .playlist_rule(PlaylistRule::new(PlaylistRuleKind::Sort(SortSpec {
///         selector: Selector::Name,
///         order: vec![],
///         group_by: None,
///     })))
///     .build()
///     .unwrap();
///
/// let playlist = Playlist::new("main", false);
/// let mut store: ChannelStore = ["Ch 10", "Ch 2", "Test"]
///     .into_iter()
///     .map(|n| Channel::new(n, "http://example/", playlist.clone()))
///     .collect();
///
/// let report = engine.process(&mut store, "kodi");
/// let names: Vec<&str> = store.iter().map(|c| c.name.as_str()).collect();
/// assert_eq!(names, ["Ch 2", "Ch 10", "Test"]);
/// assert_eq!(report.hidden(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    channel_rules: Vec<ChannelRule>,
    playlist_rules: Vec<PlaylistRule>,
}

impl EngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn channel_rule(mut self, rule: ChannelRule) -> Self {
        self.channel_rules.push(rule);
        self
    }

    #[must_use]
    pub fn playlist_rule(mut self, rule: PlaylistRule) -> Self {
        self.playlist_rules.push(rule);
        self
    }

    /// Validate the rules and freeze them into an `Engine`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a condition is nested deeper than
    /// [`MAX_CONDITION_DEPTH`](crate::MAX_CONDITION_DEPTH) or matches a field
    /// against an empty pattern list.
    pub fn build(self) -> Result<Engine, ConfigError> {
        crate::compile::compile(self.channel_rules, self.playlist_rules)
    }
}

/// A validated, immutable rule set. Thread-safe and designed to live behind
/// `Arc`; each run mutates only the store it is given.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) channel_rules: Vec<ChannelRule>,
    pub(crate) playlist_rules: Vec<PlaylistRule>,
}

impl Engine {
    #[must_use]
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    #[must_use]
    pub fn channel_rules(&self) -> &[ChannelRule] {
        &self.channel_rules
    }

    #[must_use]
    pub fn playlist_rules(&self) -> &[PlaylistRule] {
        &self.playlist_rules
    }

    /// Rewrite `store` for `client`: channel rules, then playlist rules.
    ///
    /// Dedup rules set [`Channel::priority`](crate::Channel::priority) on the
    /// channels they group; a later sort rule reads it as a tiebreak. Place
    /// sort rules after the dedup rules whose preference they should follow.
    pub fn process(&self, store: &mut ChannelStore, client: &str) -> ProcessReport {
        self.run(store, client, None)
    }

    /// Like [`process()`](Self::process), checking `cancel` before each
    /// playlist rule. Rules applied before cancellation stay applied.
    pub fn process_with_cancel(
        &self,
        store: &mut ChannelStore,
        client: &str,
        cancel: &CancelToken,
    ) -> ProcessReport {
        self.run(store, client, Some(cancel))
    }

    fn run(
        &self,
        store: &mut ChannelStore,
        client: &str,
        cancel: Option<&CancelToken>,
    ) -> ProcessReport {
        let start = Instant::now();
        let mut report = ProcessReport::new(client);
        crate::process::apply_channel_rules(&self.channel_rules, store, client, &mut report);
        crate::process::apply_playlist_rules(
            &self.playlist_rules,
            store,
            client,
            cancel,
            &mut report,
        );
        report.duration = start.elapsed();
        debug!(
            client,
            channels = store.len(),
            removed = report.removed,
            hidden = report.hidden,
            cancelled = report.cancelled,
            duration = ?report.duration,
            "processed channels"
        );
        report
    }

    /// Decode a YAML rule document and compile it into an `Engine`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) on decode or validation failure.
    #[cfg(feature = "yaml")]
    pub fn from_yaml(input: &str) -> Result<Self, crate::Error> {
        crate::config::from_yaml(input)
    }

    /// Read a YAML rule file and compile it into an `Engine`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) on I/O, decode or validation failure.
    #[cfg(feature = "yaml")]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, crate::Error> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml(&input)
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Engine({} channel rules, {} playlist rules)",
            self.channel_rules.len(),
            self.playlist_rules.len()
        )
    }
}
