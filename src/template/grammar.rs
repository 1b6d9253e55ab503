use winnow::combinator::{alt, cut_err, delimited, preceded, repeat};
use winnow::error::{ErrMode, ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{any, take_until, take_while};

use super::{Command, FieldPath, Func, Node, Operand};

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_whitespace())
        .void()
        .parse_next(input)
}

// -- Operands ---------------------------------------------------------------

fn segment<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        .parse_next(input)
}

fn field_path(input: &mut &str) -> ModalResult<FieldPath> {
    let segments: Vec<&str> = repeat(1.., preceded('.', segment)).parse_next(input)?;
    FieldPath::resolve(&segments).ok_or_else(|| ErrMode::from_input(input).cut())
}

fn string_literal(input: &mut &str) -> ModalResult<String> {
    '"'.parse_next(input)?;
    let mut s = String::new();
    loop {
        let ch = cut_err(any).parse_next(input)?;
        match ch {
            '"' => return Ok(s),
            '\\' => {
                let esc = cut_err(any).parse_next(input)?;
                match esc {
                    '"' => s.push('"'),
                    '\\' => s.push('\\'),
                    'n' => s.push('\n'),
                    't' => s.push('\t'),
                    other => {
                        s.push('\\');
                        s.push(other);
                    }
                }
            }
            c => s.push(c),
        }
    }
}

fn operand(input: &mut &str) -> ModalResult<Operand> {
    alt((
        field_path
            .context(StrContext::Expected(StrContextValue::Description(
                "field path",
            )))
            .map(Operand::Field),
        string_literal.map(Operand::Literal),
    ))
    .parse_next(input)
}

// -- Commands & pipelines ---------------------------------------------------

fn func(input: &mut &str) -> ModalResult<Func> {
    take_while(1.., |c: char| c.is_ascii_alphabetic())
        .verify_map(Func::from_name)
        .parse_next(input)
}

fn call(input: &mut &str) -> ModalResult<Command> {
    let func = cut_err(func)
        .context(StrContext::Expected(StrContextValue::Description(
            "index, upper, lower or trim",
        )))
        .parse_next(input)?;
    let args: Vec<Operand> = repeat(0.., preceded(ws, operand)).parse_next(input)?;
    Ok(Command::Call { func, args })
}

fn command(input: &mut &str) -> ModalResult<Command> {
    alt((operand.map(Command::Operand), call)).parse_next(input)
}

fn pipeline(input: &mut &str) -> ModalResult<Vec<Command>> {
    let first = command.parse_next(input)?;
    let rest: Vec<Command> =
        repeat(0.., preceded((ws, '|', ws), cut_err(call))).parse_next(input)?;
    let mut commands = Vec::with_capacity(rest.len() + 1);
    commands.push(first);
    commands.extend(rest);
    Ok(commands)
}

// -- Top level --------------------------------------------------------------

fn action(input: &mut &str) -> ModalResult<Node> {
    "{{".parse_next(input)?;
    let commands = cut_err(delimited(ws, pipeline, (ws, "}}")))
        .context(StrContext::Label("action"))
        .parse_next(input)?;
    Ok(Node::Action(commands))
}

fn text(input: &mut &str) -> ModalResult<Node> {
    alt((
        take_until(1.., "{{"),
        take_while(1.., |_: char| true),
    ))
    .map(|s: &str| Node::Text(s.to_owned()))
    .parse_next(input)
}

pub(crate) fn template(input: &mut &str) -> ModalResult<Vec<Node>> {
    repeat(0.., alt((action, text))).parse_next(input)
}
