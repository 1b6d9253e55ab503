use std::borrow::Cow;
use std::collections::HashMap;

use crate::types::{Channel, Playlist};

use super::error::RenderError;
use super::{Command, FieldPath, Func, Operand};

/// Values a template can see: `{Channel: {Name, BaseName?, Attrs, Tags},
/// Playlist: {Name, IsProxied}}`.
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    name: &'a str,
    base_name: Option<&'a str>,
    attrs: &'a HashMap<String, String>,
    tags: &'a HashMap<String, String>,
    playlist: &'a Playlist,
}

#[derive(Debug, Clone)]
enum Value<'a> {
    Text(Cow<'a, str>),
    Bool(bool),
    Map(&'a HashMap<String, String>),
}

impl<'a> Value<'a> {
    fn into_text(self, func: &'static str) -> Result<Cow<'a, str>, RenderError> {
        match self {
            Value::Text(s) => Ok(s),
            Value::Bool(b) => Ok(Cow::Borrowed(if b { "true" } else { "false" })),
            Value::Map(_) => Err(RenderError::TypeMismatch {
                func,
                expected: "a string",
            }),
        }
    }
}

impl<'a> TemplateContext<'a> {
    #[must_use]
    pub fn for_channel(channel: &'a Channel) -> Self {
        Self {
            name: &channel.name,
            base_name: None,
            attrs: &channel.attrs,
            tags: &channel.tags,
            playlist: channel.playlist(),
        }
    }

    /// Expose `.Channel.BaseName`, set when rendering for a duplicate group.
    #[must_use]
    pub fn with_base_name(mut self, base_name: &'a str) -> Self {
        self.base_name = Some(base_name);
        self
    }

    pub(super) fn run(&self, pipeline: &[Command]) -> Result<Cow<'a, str>, RenderError> {
        let mut acc: Option<Value<'a>> = None;
        for command in pipeline {
            let value = match command {
                Command::Operand(op) => self.operand(op)?,
                Command::Call { func, args } => {
                    let mut values = args
                        .iter()
                        .map(|a| self.operand(a))
                        .collect::<Result<Vec<_>, _>>()?;
                    values.extend(acc.take());
                    call(*func, values)?
                }
            };
            acc = Some(value);
        }
        match acc {
            Some(Value::Map(_)) => Err(RenderError::MapNotPrintable),
            Some(value) => value.into_text("print"),
            None => Ok(Cow::Borrowed("")),
        }
    }

    fn operand(&self, operand: &Operand) -> Result<Value<'a>, RenderError> {
        match operand {
            Operand::Literal(s) => Ok(Value::Text(Cow::Owned(s.clone()))),
            Operand::Field(path) => self.field(path),
        }
    }

    fn field(&self, path: &FieldPath) -> Result<Value<'a>, RenderError> {
        let value = match path {
            FieldPath::ChannelName => Value::Text(Cow::Borrowed(self.name)),
            FieldPath::ChannelBaseName => {
                Value::Text(Cow::Borrowed(self.base_name.ok_or(RenderError::NoBaseName)?))
            }
            FieldPath::ChannelAttrs(key) => lookup(self.attrs, key.as_deref())?,
            FieldPath::ChannelTags(key) => lookup(self.tags, key.as_deref())?,
            FieldPath::PlaylistName => Value::Text(Cow::Borrowed(self.playlist.name())),
            FieldPath::PlaylistIsProxied => Value::Bool(self.playlist.is_proxied()),
        };
        Ok(value)
    }
}

fn lookup<'a>(
    map: &'a HashMap<String, String>,
    key: Option<&str>,
) -> Result<Value<'a>, RenderError> {
    match key {
        None => Ok(Value::Map(map)),
        Some(key) => map
            .get(key)
            .map(|v| Value::Text(Cow::Borrowed(v.as_str())))
            .ok_or_else(|| RenderError::MissingKey {
                key: key.to_owned(),
            }),
    }
}

fn call(func: Func, args: Vec<Value<'_>>) -> Result<Value<'_>, RenderError> {
    let expected = match func {
        Func::Index => 2,
        Func::Upper | Func::Lower | Func::Trim => 1,
    };
    if args.len() != expected {
        return Err(RenderError::Arity {
            func: func.name(),
            expected,
            got: args.len(),
        });
    }
    let mut args = args.into_iter();
    let (Some(first), second) = (args.next(), args.next()) else {
        return Err(RenderError::Arity {
            func: func.name(),
            expected,
            got: 0,
        });
    };
    match func {
        Func::Index => {
            let Value::Map(map) = first else {
                return Err(RenderError::TypeMismatch {
                    func: "index",
                    expected: "a map as first argument",
                });
            };
            let key = second
                .map(|k| k.into_text("index"))
                .transpose()?
                .unwrap_or_default();
            lookup(map, Some(key.as_ref()))
        }
        Func::Upper => Ok(Value::Text(Cow::Owned(
            first.into_text("upper")?.to_uppercase(),
        ))),
        Func::Lower => Ok(Value::Text(Cow::Owned(
            first.into_text("lower")?.to_lowercase(),
        ))),
        Func::Trim => Ok(Value::Text(Cow::Owned(
            first.into_text("trim")?.trim().to_owned(),
        ))),
    }
}
