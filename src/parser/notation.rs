//! Parser for the compact atom notation
//!
//! Reads back what `AtomFormatter` writes:
//!
//! ```text
//! swrlb:mod(?X,?Y,"5"^^xsd:integer)
//! swrlb:substringAfter(?X,"",hello@EN)
//! swrlb:contains(?X,"x"@"en_US")
//! <http://example.org/fn#f>(?X,plain)
//! ```
//!
//! Prefixed names are expanded with the parser's prefix map. Whitespace
//! around the parentheses and commas is allowed.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{anychar, char, multispace0},
    combinator::{map, opt, recognize},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded},
};

use crate::atom::{BuiltinArgument, BuiltinAtom};
use crate::error::{ErrorCode, SwrlError, SwrlResult};
use crate::term::{PrefixMap, TypedLiteral, Variable};

/// Notation parser error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Syntax error at position {position}: {message}")]
    Syntax { position: usize, message: String },

    #[error("Undefined prefix: {prefix}")]
    UndefinedPrefix { prefix: String },

    #[error("Unexpected end of input")]
    UnexpectedEof,
}

impl From<ParseError> for SwrlError {
    fn from(err: ParseError) -> Self {
        let code = match err {
            ParseError::UndefinedPrefix { .. } => ErrorCode::UndefinedPrefix,
            _ => ErrorCode::InvalidNotation,
        };
        let mut error = SwrlError::new(code, err.to_string());
        if let ParseError::Syntax { position, .. } = err {
            error = error.with_context("position", position.to_string());
        }
        error
    }
}

// ============================================================================
// Raw syntax
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum RawName<'a> {
    Iri(&'a str),
    Prefixed(&'a str, &'a str),
    Bare(&'a str),
}

#[derive(Debug, Clone, PartialEq)]
enum RawSuffix<'a> {
    Datatype(RawName<'a>),
    Language(String),
}

#[derive(Debug, Clone, PartialEq)]
enum RawArgument<'a> {
    Variable(&'a str),
    Quoted(String, Option<RawSuffix<'a>>),
    Bare(&'a str),
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || c == '.'
}

/// Parse an IRI reference <...>
fn iri_ref(input: &str) -> IResult<&str, &str> {
    delimited(
        char('<'),
        take_while(|c: char| c != '>' && !c.is_whitespace()),
        char('>'),
    )(input)
}

/// Parse a prefixed name (prefix:local)
fn prefixed_name(input: &str) -> IResult<&str, (&str, &str)> {
    let (input, prefix) = take_while(|c: char| c.is_alphanumeric() || c == '_')(input)?;
    let (input, _) = char(':')(input)?;
    let (input, local) = take_while(is_name_char)(input)?;
    Ok((input, (prefix, local)))
}

fn name(input: &str) -> IResult<&str, RawName<'_>> {
    alt((
        map(iri_ref, RawName::Iri),
        map(prefixed_name, |(prefix, local)| RawName::Prefixed(prefix, local)),
    ))(input)
}

fn datatype(input: &str) -> IResult<&str, RawName<'_>> {
    alt((name, map(take_while1(is_name_char), RawName::Bare)))(input)
}

/// Parse a variable ?name
fn variable(input: &str) -> IResult<&str, &str> {
    preceded(char('?'), take_while1(is_name_char))(input)
}

/// Parse a double-quoted string with `\"` and `\\` escapes
fn quoted(input: &str) -> IResult<&str, String> {
    map(
        delimited(
            char('"'),
            recognize(many0(alt((
                take_while1(|c: char| c != '"' && c != '\\'),
                recognize(pair(char('\\'), anychar)),
            )))),
            char('"'),
        ),
        unescape,
    )(input)
}

fn unescape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(escaped @ ('"' | '\\')) => result.push(escaped),
                Some(other) => {
                    result.push('\\');
                    result.push(other);
                }
                None => result.push('\\'),
            }
        } else {
            result.push(c);
        }
    }
    result
}

fn suffix(input: &str) -> IResult<&str, RawSuffix<'_>> {
    alt((
        map(preceded(tag("^^"), datatype), RawSuffix::Datatype),
        map(
            preceded(
                char('@'),
                alt((
                    quoted,
                    map(take_while1(|c: char| c.is_ascii_alphanumeric() || c == '-'), str::to_string),
                )),
            ),
            RawSuffix::Language,
        ),
    ))(input)
}

fn bare(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, ',' | '(' | ')' | '"'))(input)
}

fn argument(input: &str) -> IResult<&str, RawArgument<'_>> {
    alt((
        map(variable, RawArgument::Variable),
        map(pair(quoted, opt(suffix)), |(lexical, suffix)| RawArgument::Quoted(lexical, suffix)),
        map(bare, RawArgument::Bare),
    ))(input)
}

fn atom(input: &str) -> IResult<&str, (RawName<'_>, Vec<RawArgument<'_>>)> {
    let (input, _) = multispace0(input)?;
    let (input, predicate) = name(input)?;
    let (input, _) = multispace0(input)?;
    let (input, arguments) = delimited(
        pair(char('('), multispace0),
        separated_list0(delimited(multispace0, char(','), multispace0), argument),
        pair(multispace0, char(')')),
    )(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, (predicate, arguments)))
}

// ============================================================================
// Parser
// ============================================================================

/// Parses atom notation against a prefix map
#[derive(Debug, Clone, Default)]
pub struct NotationParser {
    prefixes: PrefixMap,
}

impl NotationParser {
    pub fn new(prefixes: PrefixMap) -> Self {
        NotationParser { prefixes }
    }

    /// Parse one atom; the whole input must be consumed
    pub fn parse(&self, input: &str) -> Result<BuiltinAtom, ParseError> {
        if input.trim().is_empty() {
            return Err(ParseError::UnexpectedEof);
        }
        let (rest, (predicate, arguments)) = atom(input).map_err(|e| match e {
            nom::Err::Incomplete(_) => ParseError::UnexpectedEof,
            nom::Err::Error(e) | nom::Err::Failure(e) => ParseError::Syntax {
                position: input.len() - e.input.len(),
                message: format!("unexpected input near {:?}", e.input.chars().take(16).collect::<String>()),
            },
        })?;
        if !rest.is_empty() {
            return Err(ParseError::Syntax {
                position: input.len() - rest.len(),
                message: "trailing input after atom".to_string(),
            });
        }

        let predicate = self.resolve(&predicate)?;
        let arguments = arguments
            .into_iter()
            .map(|arg| self.resolve_argument(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(BuiltinAtom::new(predicate, arguments))
    }

    fn resolve(&self, name: &RawName<'_>) -> Result<String, ParseError> {
        match name {
            RawName::Iri(iri) => Ok(iri.to_string()),
            RawName::Prefixed(prefix, local) => {
                self.prefixes
                    .expand(prefix, local)
                    .ok_or_else(|| ParseError::UndefinedPrefix {
                        prefix: prefix.to_string(),
                    })
            }
            RawName::Bare(word) => Ok(word.to_string()),
        }
    }

    fn resolve_argument(&self, argument: RawArgument<'_>) -> Result<BuiltinArgument, ParseError> {
        let literal = match argument {
            RawArgument::Variable(name) => return Ok(BuiltinArgument::Variable(Variable::new(name))),
            RawArgument::Quoted(lexical, None) => TypedLiteral::plain(lexical),
            RawArgument::Quoted(lexical, Some(RawSuffix::Language(lang))) => {
                TypedLiteral::with_language(lexical, lang)
            }
            RawArgument::Quoted(lexical, Some(RawSuffix::Datatype(dt))) => {
                TypedLiteral::typed(lexical, self.resolve(&dt)?)
            }
            RawArgument::Bare(token) => TypedLiteral::parse(token),
        };
        Ok(BuiltinArgument::Literal(literal))
    }
}

/// Parse atom notation with the default prefixes
pub fn parse_atom(input: &str) -> SwrlResult<BuiltinAtom> {
    Ok(NotationParser::default().parse(input)?)
}
