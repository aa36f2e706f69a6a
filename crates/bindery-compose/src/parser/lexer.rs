//! Tokenization of `.bind` source text using `nom`.
//!
//! Produces a stream of [`Token`]s from raw input for the parser to consume.
//! Whitespace, `//` and `#` line comments are discarded between tokens.

use bindery_common::error::{BinderyError, Result};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace1, not_line_ending, satisfy},
    combinator::{opt, recognize, value},
    multi::many0,
    sequence::preceded,
};

/// A token in the `.bind` language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `bind` keyword.
    Bind,
    /// `install` keyword.
    Install,
    /// `bindInterceptor` keyword.
    BindInterceptor,
    /// A method or matcher name (`to`, `annotatedWith`, `any`, ...).
    Identifier(String),
    /// A single-quoted string literal.
    StringLiteral(String),
    /// An integer literal, optionally negative.
    Integer(i64),
    /// `->` method call arrow.
    Arrow,
    /// `(` opening parenthesis.
    ParenOpen,
    /// `)` closing parenthesis.
    ParenClose,
    /// `[` opening bracket.
    BracketOpen,
    /// `]` closing bracket.
    BracketClose,
    /// `,` comma separator.
    Comma,
    /// `;` optional statement terminator.
    Semicolon,
}

/// Skippable items: whitespace or line comments.
fn skip_trivia(input: &str) -> IResult<&str, ()> {
    let slash_comment = value((), preceded(tag("//"), not_line_ending));
    let hash_comment = value((), preceded(char('#'), not_line_ending));
    let ws = value((), multispace1);
    let (input, _) = many0(alt((ws, slash_comment, hash_comment))).parse(input)?;
    Ok((input, ()))
}

/// Parses a single-quoted string literal.
///
/// Only `\\` and `\'` are escapes; any other backslash is kept, so
/// `'App\UserDb'` reads as `App\UserDb`.
fn string_literal(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('\'')(input)?;
    let mut result = String::new();
    let mut chars = input.char_indices().peekable();
    loop {
        match chars.next() {
            Some((idx, '\'')) => {
                let remaining = &input[idx + 1..];
                return Ok((remaining, Token::StringLiteral(result)));
            }
            Some((_, '\\')) => match chars.peek() {
                Some(&(_, c @ ('\\' | '\''))) => {
                    result.push(c);
                    let _ = chars.next();
                }
                Some(_) => result.push('\\'),
                None => {
                    return Err(nom::Err::Failure(nom::error::Error::new(
                        input,
                        nom::error::ErrorKind::Char,
                    )));
                }
            },
            Some((_, c)) => result.push(c),
            None => {
                return Err(nom::Err::Failure(nom::error::Error::new(
                    input,
                    nom::error::ErrorKind::Char,
                )));
            }
        }
    }
}

/// Parses an integer literal with an optional leading minus.
fn integer_literal(input: &str) -> IResult<&str, Token> {
    let (rest, digits) = recognize((opt(char('-')), digit1)).parse(input)?;
    let val: i64 = digits.parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((rest, Token::Integer(val)))
}

const fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parses an identifier or keyword.
fn identifier_or_keyword(input: &str) -> IResult<&str, Token> {
    let (input, word) = recognize((
        satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
        take_while(is_ident_continue),
    ))
    .parse(input)?;
    let token = match word {
        "bind" => Token::Bind,
        "install" => Token::Install,
        "bindInterceptor" => Token::BindInterceptor,
        _ => Token::Identifier(word.to_owned()),
    };
    Ok((input, token))
}

/// Parses a symbol token.
fn symbol(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::Arrow, tag("->")),
        value(Token::ParenOpen, char('(')),
        value(Token::ParenClose, char(')')),
        value(Token::BracketOpen, char('[')),
        value(Token::BracketClose, char(']')),
        value(Token::Comma, char(',')),
        value(Token::Semicolon, char(';')),
    ))
    .parse(input)
}

/// Parses a single token (after trivia has been skipped).
fn single_token(input: &str) -> IResult<&str, Token> {
    alt((
        string_literal,
        symbol,
        integer_literal,
        identifier_or_keyword,
    ))
    .parse(input)
}

/// Tokenizes a `.bind` source string into a vector of tokens.
///
/// # Errors
///
/// Returns a parse error if the input contains characters that cannot be
/// tokenized or an unterminated string.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut remaining = input;

    loop {
        let (rest, ()) = skip_trivia(remaining).map_err(|e| BinderyError::Parse {
            message: format!("lexer error skipping whitespace: {e}"),
        })?;
        remaining = rest;

        if remaining.is_empty() {
            break;
        }

        let (rest, token) = single_token(remaining).map_err(|e| BinderyError::Parse {
            message: format!(
                "unexpected input at: \"{}\" ({e})",
                remaining.chars().take(20).collect::<String>()
            ),
        })?;
        tokens.push(token);
        remaining = rest;
    }

    tracing::trace!(tokens = tokens.len(), "tokenized definition");
    Ok(tokens)
}
