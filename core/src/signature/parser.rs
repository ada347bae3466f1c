//! Parser for JDT type signatures
//!
//! This module uses nom to parse signatures like:
//! - `I`, `Z`, `[B`
//! - `Qjava.lang.String;`
//! - `Ljava/util/List<+Ltestpkg/MyData;>;`
//! - `Qtestpkg.Outer<TK;>.Inner;`
//! - `TK;`

use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{anychar, char, one_of};
use nom::combinator::{all_consuming, map, map_opt, opt, value};
use nom::multi::{many0, many1};
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};

use super::{PrimitiveKind, TypeArgument, TypeSignature};
use crate::error::{Error, Result};
use crate::type_name::TypeName;

/// One dotted segment of a class signature, with its optional type arguments
struct ClassSegment<'a> {
    name:      &'a str,
    arguments: Option<Vec<TypeArgument>>,
}

const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/') || !c.is_ascii()
}

fn is_qualified_name_char(c: char) -> bool {
    is_name_char(c) || c == '.'
}

fn primitive(input: &str) -> IResult<&str, TypeSignature> {
    map_opt(anychar, |code| {
        PrimitiveKind::from_code(code).map(TypeSignature::Primitive)
    })
    .parse(input)
}

fn array(input: &str) -> IResult<&str, TypeSignature> {
    map(preceded(char('['), signature), |component| {
        TypeSignature::Array(Box::new(component))
    })
    .parse(input)
}

fn type_variable(input: &str) -> IResult<&str, TypeSignature> {
    map(
        delimited(char('T'), take_while1(is_name_char), char(';')),
        |name: &str| TypeSignature::TypeVariable(name.to_string()),
    )
    .parse(input)
}

fn type_argument(input: &str) -> IResult<&str, TypeArgument> {
    alt((
        value(TypeArgument::Unbounded, char('*')),
        map(preceded(char('+'), signature), TypeArgument::Extends),
        map(preceded(char('-'), signature), TypeArgument::Super),
        map(signature, TypeArgument::Exact),
    ))
    .parse(input)
}

fn type_arguments(input: &str) -> IResult<&str, Vec<TypeArgument>> {
    delimited(char('<'), many1(type_argument), char('>')).parse(input)
}

/// First segment: a possibly dotted name
fn leading_segment(input: &str) -> IResult<&str, ClassSegment<'_>> {
    let (input, name) = take_while1(is_qualified_name_char).parse(input)?;
    let (input, arguments) = opt(type_arguments).parse(input)?;
    Ok((input, ClassSegment { name, arguments }))
}

/// Inner class segment following a parameterized outer type: `.Inner<...>`
fn inner_segment(input: &str) -> IResult<&str, ClassSegment<'_>> {
    let (input, name) = preceded(char('.'), take_while1(is_name_char)).parse(input)?;
    let (input, arguments) = opt(type_arguments).parse(input)?;
    Ok((input, ClassSegment { name, arguments }))
}

fn class_type(input: &str) -> IResult<&str, TypeSignature> {
    let (input, marker) = one_of("LQ").parse(input)?;
    let (input, first) = leading_segment(input)?;
    let (input, rest) = many0(inner_segment).parse(input)?;
    let (input, _) = char(';').parse(input)?;

    let mut raw_name = first.name.to_string();
    let mut arguments = first.arguments;
    for segment in rest {
        raw_name.push('.');
        raw_name.push_str(segment.name);
        arguments = segment.arguments;
    }

    Ok((
        input,
        TypeSignature::Class {
            name:      TypeName::from(normalize_class_name(&raw_name)),
            arguments: arguments.unwrap_or_default(),
            resolved:  marker == 'L',
        },
    ))
}

fn signature(input: &str) -> IResult<&str, TypeSignature> {
    alt((primitive, array, class_type, type_variable)).parse(input)
}

/// Binary names use `/` for packages and `$` for nesting; source form uses dots for both
fn normalize_class_name(raw: &str) -> String {
    raw.replace(['/', '$'], ".")
}

/// Parse a complete JDT signature
pub fn parse_signature(text: &str) -> Result<TypeSignature> {
    match all_consuming(signature).parse(text) {
        Ok((_, parsed)) => Ok(parsed),
        Err(e) => Err(error_stack::Report::new(Error::malformed(
            text,
            format!("{e:?}"),
        ))),
    }
}
