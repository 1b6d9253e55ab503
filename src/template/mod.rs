//! Field templates for `set_field` rules and duplicate final values.
//!
//! The syntax is a small subset of Go's `text/template`:
//!
//! ```text
//! {{ .Channel.Name }}                      field path
//! {{ index .Channel.Attrs "tvg-id" }}      map lookup
//! {{ .Channel.BaseName | upper }}          pipeline, previous value is the last argument
//! {{ "literal" }}                          string literal
//! ```
//!
//! Available paths are `.Channel.Name`, `.Channel.BaseName`, `.Channel.Attrs`,
//! `.Channel.Attrs.<key>`, `.Channel.Tags`, `.Channel.Tags.<key>`,
//! `.Playlist.Name` and `.Playlist.IsProxied`. Functions are `index`,
//! `upper`, `lower` and `trim`.

mod context;
mod error;
mod grammar;

use std::fmt;
use std::str::FromStr;

pub use context::TemplateContext;
pub use error::{RenderError, TemplateError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Node {
    Text(String),
    Action(Vec<Command>),
}

/// One stage of a pipeline. Only the first stage may be a bare operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Operand(Operand),
    Call { func: Func, args: Vec<Operand> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Field(FieldPath),
    Literal(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FieldPath {
    ChannelName,
    ChannelBaseName,
    ChannelAttrs(Option<String>),
    ChannelTags(Option<String>),
    PlaylistName,
    PlaylistIsProxied,
}

impl FieldPath {
    fn resolve(segments: &[&str]) -> Option<Self> {
        Some(match segments {
            ["Channel", "Name"] => FieldPath::ChannelName,
            ["Channel", "BaseName"] => FieldPath::ChannelBaseName,
            ["Channel", "Attrs"] => FieldPath::ChannelAttrs(None),
            ["Channel", "Attrs", key] => FieldPath::ChannelAttrs(Some((*key).to_owned())),
            ["Channel", "Tags"] => FieldPath::ChannelTags(None),
            ["Channel", "Tags", key] => FieldPath::ChannelTags(Some((*key).to_owned())),
            ["Playlist", "Name"] => FieldPath::PlaylistName,
            ["Playlist", "IsProxied"] => FieldPath::PlaylistIsProxied,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Func {
    Index,
    Upper,
    Lower,
    Trim,
}

impl Func {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "index" => Some(Func::Index),
            "upper" => Some(Func::Upper),
            "lower" => Some(Func::Lower),
            "trim" => Some(Func::Trim),
            _ => None,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Func::Index => "index",
            Func::Upper => "upper",
            Func::Lower => "lower",
            Func::Trim => "trim",
        }
    }
}

/// A parsed template, ready to render any number of times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] on unterminated actions, unknown fields or
    /// functions, or a bare operand after a pipe.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        use winnow::Parser;
        let nodes = grammar::template
            .parse(source)
            .map_err(|e| TemplateError::new(e.to_string()))?;
        Ok(Self {
            source: source.to_owned(),
            nodes,
        })
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render against a context.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if a looked-up value is missing or a function
    /// receives arguments it cannot handle.
    pub fn render(&self, ctx: &TemplateContext<'_>) -> Result<String, RenderError> {
        let mut out = String::with_capacity(self.source.len());
        for node in &self.nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Action(pipeline) => out.push_str(&ctx.run(pipeline)?),
            }
        }
        Ok(out)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
