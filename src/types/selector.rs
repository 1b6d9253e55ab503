use std::fmt;
use std::str::FromStr;

use super::channel::Channel;
use super::error::ConfigError;

/// Points at one readable/writable field of a [`Channel`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Name,
    Attr(String),
    Tag(String),
}

impl Selector {
    #[must_use]
    pub fn attr(key: &str) -> Self {
        Selector::Attr(key.to_owned())
    }

    #[must_use]
    pub fn tag(key: &str) -> Self {
        Selector::Tag(key.to_owned())
    }

    /// Read the selected field. `None` when the attribute or tag is absent;
    /// the name is always present.
    #[must_use]
    pub fn get<'a>(&self, channel: &'a Channel) -> Option<&'a str> {
        match self {
            Selector::Name => Some(channel.name.as_str()),
            Selector::Attr(key) => channel.attrs.get(key).map(String::as_str),
            Selector::Tag(key) => channel.tags.get(key).map(String::as_str),
        }
    }

    pub fn set(&self, channel: &mut Channel, value: String) {
        match self {
            Selector::Name => channel.name = value,
            Selector::Attr(key) => {
                channel.attrs.insert(key.clone(), value);
            }
            Selector::Tag(key) => {
                channel.tags.insert(key.clone(), value);
            }
        }
    }

    /// Delete the selected attribute or tag. Removing the name does nothing.
    pub fn remove(&self, channel: &mut Channel) {
        match self {
            Selector::Name => {}
            Selector::Attr(key) => {
                channel.attrs.remove(key);
            }
            Selector::Tag(key) => {
                channel.tags.remove(key);
            }
        }
    }
}

impl FromStr for Selector {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidSelector {
            selector: s.to_owned(),
        };
        if s == "name" {
            return Ok(Selector::Name);
        }
        let (kind, key) = s.split_once('/').ok_or_else(invalid)?;
        if key.is_empty() {
            return Err(invalid());
        }
        match kind {
            "attr" => Ok(Selector::Attr(key.to_owned())),
            "tag" => Ok(Selector::Tag(key.to_owned())),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Name => write!(f, "name"),
            Selector::Attr(key) => write!(f, "attr/{key}"),
            Selector::Tag(key) => write!(f, "tag/{key}"),
        }
    }
}
