use super::pattern::Pattern;
use super::selector::Selector;

/// Maximum nesting of `and`/`or` sub-conditions accepted at build time.
pub const MAX_CONDITION_DEPTH: usize = 32;

/// Field check of a condition: the selected value must match at least one
/// of `patterns`.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub selector: Selector,
    pub patterns: Vec<Pattern>,
}

/// Sub-conditions combined with the field checks of their parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Children {
    #[default]
    None,
    /// Every child must match.
    All(Vec<Condition>),
    /// At least one child must match.
    Any(Vec<Condition>),
}

/// Boolean condition gating a channel rule.
///
/// A condition with no field match, no client or playlist names and no
/// children matches every channel (before `invert` is applied). Empty name
/// lists count as unset.
///
/// ```
/// use chanrules::{Condition, Pattern, Selector};
///
/// let sports_for_kodi = Condition::new()
///     .matching(Selector::attr("group-title"), vec![Pattern::new("(?i)sport").unwrap()])
///     .clients(["kodi"]);
/// assert_eq!(sports_for_kodi.depth(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    pub field: Option<FieldMatch>,
    pub clients: Vec<String>,
    pub playlists: Vec<String>,
    pub children: Children,
    pub invert: bool,
}

impl Condition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn matching(mut self, selector: Selector, patterns: Vec<Pattern>) -> Self {
        self.field = Some(FieldMatch { selector, patterns });
        self
    }

    #[must_use]
    pub fn clients<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clients = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn playlists<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.playlists = names.into_iter().map(Into::into).collect();
        self
    }

    /// Require every child to match. Replaces any previously set children.
    #[must_use]
    pub fn all_of(mut self, children: Vec<Condition>) -> Self {
        self.children = Children::All(children);
        self
    }

    /// Require at least one child to match. Replaces any previously set children.
    #[must_use]
    pub fn any_of(mut self, children: Vec<Condition>) -> Self {
        self.children = Children::Any(children);
        self
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    /// Nesting depth; a condition without children has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        let deepest = match &self.children {
            Children::None => 0,
            Children::All(list) | Children::Any(list) => {
                list.iter().map(Condition::depth).max().unwrap_or(0)
            }
        };
        deepest + 1
    }
}

/// Condition on a playlist rule. Only the client name can be tested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientCondition {
    pub clients: Vec<String>,
    pub invert: bool,
}

impl ClientCondition {
    #[must_use]
    pub fn new<I, S>(clients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            clients: clients.into_iter().map(Into::into).collect(),
            invert: false,
        }
    }

    #[must_use]
    pub fn inverted(mut self) -> Self {
        self.invert = !self.invert;
        self
    }

    #[must_use]
    pub fn matches(&self, client: &str) -> bool {
        let listed = self.clients.is_empty() || self.clients.iter().any(|c| c == client);
        listed != self.invert
    }
}
