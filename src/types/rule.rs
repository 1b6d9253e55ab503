use std::fmt;

use crate::template::Template;

use super::condition::{ClientCondition, Condition};
use super::pattern::Pattern;
use super::selector::Selector;

/// What a channel rule does to each channel its condition matches.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelAction {
    /// Render `template` against the channel and write the result to
    /// `selector`. A render failure leaves the channel untouched.
    SetField { selector: Selector, template: Template },
    /// Delete an attribute or tag. A no-op for [`Selector::Name`].
    RemoveField { selector: Selector },
    /// Soft-delete the channel.
    RemoveChannel,
    MarkHidden,
}

impl ChannelAction {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetField { .. } => "set_field",
            Self::RemoveField { .. } => "remove_field",
            Self::RemoveChannel => "remove_channel",
            Self::MarkHidden => "mark_hidden",
        }
    }
}

/// A per-channel rule, optionally gated by a [`Condition`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelRule {
    pub action: ChannelAction,
    pub condition: Option<Condition>,
}

impl ChannelRule {
    #[must_use]
    pub fn new(action: ChannelAction) -> Self {
        Self {
            action,
            condition: None,
        }
    }

    #[must_use]
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

impl fmt::Display for ChannelRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            ChannelAction::SetField { selector, template } => {
                write!(f, "set_field {selector} = \"{template}\"")?;
            }
            ChannelAction::RemoveField { selector } => write!(f, "remove_field {selector}")?,
            other => f.write_str(other.kind())?,
        }
        if self.condition.is_some() {
            f.write_str(" (conditional)")?;
        }
        Ok(())
    }
}

/// Template written to a field of a duplicate group after merging or
/// removal. Rendered with `.Channel.BaseName` available.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalValue {
    pub selector: Selector,
    pub template: Template,
}

/// How duplicates are found: the field to read and the marker patterns that
/// are stripped to get the base name. Pattern order is preference order.
#[derive(Debug, Clone, PartialEq)]
pub struct DedupSpec {
    pub selector: Selector,
    pub patterns: Vec<Pattern>,
    pub final_value: Option<FinalValue>,
}

/// Secondary partitioning for [`SortSpec`].
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBy {
    pub selector: Selector,
    pub order: Vec<Pattern>,
}

/// Sort key and explicit ordering. An empty `order` leaves everything to
/// natural comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct SortSpec {
    pub selector: Selector,
    pub order: Vec<Pattern>,
    pub group_by: Option<GroupBy>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaylistRuleKind {
    /// Give every member of a duplicate group the best member's id.
    MergeDuplicates(DedupSpec),
    /// Keep only the best member of each duplicate group.
    RemoveDuplicates(DedupSpec),
    Sort(SortSpec),
}

impl PlaylistRuleKind {
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MergeDuplicates(_) => "merge_duplicates",
            Self::RemoveDuplicates(_) => "remove_duplicates",
            Self::Sort(_) => "sort",
        }
    }
}

/// A store-wide rule. Only the requesting client can gate it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistRule {
    pub kind: PlaylistRuleKind,
    pub condition: Option<ClientCondition>,
}

impl PlaylistRule {
    #[must_use]
    pub fn new(kind: PlaylistRuleKind) -> Self {
        Self {
            kind,
            condition: None,
        }
    }

    #[must_use]
    pub fn when(mut self, condition: ClientCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Whether this rule runs for `client`. Unconditional rules always do.
    #[must_use]
    pub fn applies_to(&self, client: &str) -> bool {
        self.condition.as_ref().map_or(true, |c| c.matches(client))
    }
}

impl fmt::Display for PlaylistRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PlaylistRuleKind::MergeDuplicates(spec) | PlaylistRuleKind::RemoveDuplicates(spec) => {
                write!(
                    f,
                    "{} by {} ({} patterns)",
                    self.kind.kind(),
                    spec.selector,
                    spec.patterns.len()
                )?;
            }
            PlaylistRuleKind::Sort(spec) => {
                write!(f, "sort by {}", spec.selector)?;
                if let Some(group_by) = &spec.group_by {
                    write!(f, " grouped by {}", group_by.selector)?;
                }
            }
        }
        if let Some(cond) = &self.condition {
            let neg = if cond.invert { "not " } else { "" };
            write!(f, " for {neg}[{}]", cond.clients.join(", "))?;
        }
        Ok(())
    }
}
