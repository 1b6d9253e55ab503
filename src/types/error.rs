use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid selector '{selector}': expected 'name', 'attr/<key>' or 'tag/<key>'")]
    InvalidSelector { selector: String },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid template in {rule}: {message}")]
    InvalidTemplate { rule: String, message: String },

    #[error("{rule} defines no action; exactly one is required")]
    EmptyRule { rule: String },

    #[error("{rule} defines several actions ({}); exactly one is required", actions.join(", "))]
    AmbiguousRule { rule: String, actions: Vec<String> },

    #[error("{rule} is missing required field '{field}'")]
    MissingField { rule: String, field: String },

    #[error("condition in {rule} sets {present} without {missing}")]
    IncompleteFieldMatch {
        rule: String,
        present: String,
        missing: String,
    },

    #[error("condition in {rule} uses '{field}'; only 'clients' and 'invert' are allowed on playlist rules")]
    DisallowedCondition { rule: String, field: String },

    #[error("condition in {rule} is nested deeper than {limit} levels")]
    ConditionTooDeep { rule: String, limit: usize },
}
