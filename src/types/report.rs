use std::fmt;
use std::time::Duration;

/// Summary of one [`Engine::process()`](super::engine::Engine::process) run.
///
/// Counts are of state changes made by this run: a channel that was already
/// hidden and matches a `mark_hidden` rule again is not counted twice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessReport {
    pub(crate) client: String,
    pub(crate) channel_rules_applied: usize,
    pub(crate) playlist_rules_applied: usize,
    pub(crate) removed: usize,
    pub(crate) hidden: usize,
    pub(crate) fields_set: usize,
    pub(crate) groups: usize,
    pub(crate) cancelled: bool,
    pub(crate) duration: Duration,
}

impl ProcessReport {
    pub(crate) fn new(client: &str) -> Self {
        Self {
            client: client.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Channel rules run. Every configured channel rule runs, so this equals
    /// the engine's channel rule count.
    #[must_use]
    pub fn channel_rules_applied(&self) -> usize {
        self.channel_rules_applied
    }

    /// Playlist rules whose client condition matched and that ran before any
    /// cancellation.
    #[must_use]
    pub fn playlist_rules_applied(&self) -> usize {
        self.playlist_rules_applied
    }

    #[must_use]
    pub fn removed(&self) -> usize {
        self.removed
    }

    #[must_use]
    pub fn hidden(&self) -> usize {
        self.hidden
    }

    /// Successful `set_field` and final-value writes.
    #[must_use]
    pub fn fields_set(&self) -> usize {
        self.fields_set
    }

    /// Duplicate groups handled by merge/remove rules.
    #[must_use]
    pub fn groups(&self) -> usize {
        self.groups
    }

    #[must_use]
    pub fn cancelled(&self) -> bool {
        self.cancelled
    }

    /// Wall-clock duration of the run.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for ProcessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "client: {}, rules: {}+{}, removed: {}, hidden: {}, fields set: {}, groups: {}",
            self.client,
            self.channel_rules_applied,
            self.playlist_rules_applied,
            self.removed,
            self.hidden,
            self.fields_set,
            self.groups,
        )?;
        if self.cancelled {
            write!(f, ", cancelled")?;
        }
        write!(f, ", duration: {:?}", self.duration)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_display() {
        let report = ProcessReport {
            channel_rules_applied: 3,
            playlist_rules_applied: 1,
            removed: 2,
            hidden: 1,
            fields_set: 4,
            groups: 1,
            duration: Duration::from_nanos(500),
            ..ProcessReport::new("kodi")
        };
        let s = report.to_string();
        assert!(s.starts_with("client: kodi, rules: 3+1, removed: 2, hidden: 1"));
        assert!(s.contains("fields set: 4, groups: 1"));
        assert!(!s.contains("cancelled"));
        assert!(s.ends_with("duration: 500ns"));
    }

    #[test]
    fn report_display_cancelled() {
        let report = ProcessReport {
            cancelled: true,
            ..ProcessReport::new("vlc")
        };
        assert!(report.to_string().contains(", cancelled, "));
    }

    #[test]
    fn new_report_is_empty() {
        let report = ProcessReport::new("c");
        assert_eq!(report.client(), "c");
        assert_eq!(report.removed(), 0);
        assert!(!report.cancelled());
    }
}
