mod cancel;
mod channel;
mod condition;
mod engine;
mod error;
mod pattern;
mod report;
mod rule;
mod selector;
mod store;

pub use cancel::CancelToken;
pub use channel::{Channel, Playlist};
pub use condition::{Children, ClientCondition, Condition, FieldMatch, MAX_CONDITION_DEPTH};
pub use engine::{Engine, EngineBuilder};
pub use error::ConfigError;
pub use pattern::Pattern;
pub use report::ProcessReport;
pub use rule::{
    ChannelAction, ChannelRule, DedupSpec, FinalValue, GroupBy, PlaylistRule, PlaylistRuleKind,
    SortSpec,
};
pub use selector::Selector;
pub use store::ChannelStore;
