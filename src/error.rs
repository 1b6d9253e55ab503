use thiserror::Error;

use crate::template::TemplateError;
use crate::ConfigError;

/// Unified error type covering configuration, templates and I/O.
///
/// Returned by convenience constructors like
/// [`Engine::from_yaml()`](crate::Engine::from_yaml) and
/// [`Engine::from_file()`](crate::Engine::from_file).
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[cfg(feature = "yaml")]
    #[error("invalid rule document: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
