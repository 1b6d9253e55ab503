mod compile;
#[cfg(feature = "yaml")]
mod config;
mod dedup;
mod error;
mod evaluate;
mod process;
mod sort;
pub mod template;
mod types;

pub use dedup::{base_name, group_duplicates, DuplicateGroup};
pub use error::Error;
pub use evaluate::matches;
pub use sort::{natural_cmp, natural_less, order_rank, sort_channels};
pub use template::{RenderError, Template, TemplateContext, TemplateError};
pub use types::{
    CancelToken, Channel, ChannelAction, ChannelRule, ChannelStore, Children, ClientCondition,
    Condition, ConfigError, DedupSpec, Engine, EngineBuilder, FieldMatch, FinalValue, GroupBy,
    MAX_CONDITION_DEPTH, Pattern, Playlist, PlaylistRule, PlaylistRuleKind, ProcessReport,
    Selector, SortSpec,
};
