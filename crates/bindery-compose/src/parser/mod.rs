//! `.bind` file parser built on `nom`.
//!
//! Transforms raw `.bind` text into a validated AST through
//! lexing, parsing, and static analysis phases.

pub mod ast;
pub mod lexer;
pub mod validator;

use bindery_aop::Matcher;
use bindery_common::error::{BinderyError, Result};

use self::ast::{
    BindDecl, DefinitionFile, InstallDecl, InterceptDecl, Statement, TargetDecl, ValueDecl,
};
use self::lexer::Token;

/// Deepest nesting accepted for arrays and `not(...)` matchers.
const MAX_NESTING: usize = 32;

/// Cursor into a token stream for recursive-descent parsing.
struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn expect_identifier(&mut self) -> Result<String> {
        match self.advance() {
            Some(Token::Identifier(s)) => Ok(s.clone()),
            other => Err(parse_err(format!("expected identifier, got {other:?}"))),
        }
    }

    fn expect_token(&mut self, expected: &Token) -> Result<()> {
        match self.advance() {
            Some(tok) if tok == expected => Ok(()),
            other => Err(parse_err(format!("expected {expected:?}, got {other:?}"))),
        }
    }

    fn expect_string(&mut self) -> Result<String> {
        match self.advance() {
            Some(Token::StringLiteral(s)) => Ok(s.clone()),
            other => Err(parse_err(format!("expected string literal, got {other:?}"))),
        }
    }

    /// Parses `( 'string' )`.
    fn string_argument(&mut self) -> Result<String> {
        self.expect_token(&Token::ParenOpen)?;
        let value = self.expect_string()?;
        self.expect_token(&Token::ParenClose)?;
        Ok(value)
    }

    fn skip(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            let _ = self.advance();
            true
        } else {
            false
        }
    }

    const fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}

const fn parse_err(message: String) -> BinderyError {
    BinderyError::Parse { message }
}

/// Parses a `.bind` file from its source text.
///
/// # Errors
///
/// Returns a parse error if the input contains syntax errors or fails
/// validation.
pub fn parse_definition(input: &str) -> Result<DefinitionFile> {
    tracing::debug!("parsing .bind input");
    let tokens = lexer::tokenize(input)?;
    let mut cursor = TokenCursor::new(&tokens);
    let file = parse_file(&mut cursor)?;
    validator::validate(&file)?;
    tracing::debug!(statements = file.statements.len(), "parsed .bind input");
    Ok(file)
}

fn parse_file(cursor: &mut TokenCursor<'_>) -> Result<DefinitionFile> {
    let mut file = DefinitionFile::default();

    while let Some(tok) = cursor.peek() {
        let statement = match tok {
            Token::Install => Statement::Install(parse_install(cursor)?),
            Token::Bind => Statement::Bind(parse_bind(cursor)?),
            Token::BindInterceptor => Statement::Intercept(parse_intercept(cursor)?),
            other => {
                return Err(parse_err(format!(
                    "expected install, bind, or bindInterceptor at top level, got {other:?}"
                )));
            }
        };
        file.statements.push(statement);
        let _ = cursor.skip(&Token::Semicolon);
    }

    Ok(file)
}

fn parse_install(cursor: &mut TokenCursor<'_>) -> Result<InstallDecl> {
    cursor.expect_token(&Token::Install)?;
    let source = cursor.string_argument()?;
    Ok(InstallDecl { source })
}

fn parse_bind(cursor: &mut TokenCursor<'_>) -> Result<BindDecl> {
    cursor.expect_token(&Token::Bind)?;
    let interface = cursor.string_argument()?;
    let mut qualifier = None;

    loop {
        if !cursor.skip(&Token::Arrow) {
            return Err(parse_err(format!(
                "binding of '{interface}' has no to, toProvider, or toInstance call"
            )));
        }
        let method = cursor.expect_identifier()?;
        let target = match method.as_str() {
            "annotatedWith" if qualifier.is_none() => {
                qualifier = Some(cursor.string_argument()?);
                continue;
            }
            "annotatedWith" => {
                return Err(parse_err(format!("binding of '{interface}' is annotated twice")));
            }
            "to" => TargetDecl::Class(cursor.string_argument()?),
            "toProvider" => TargetDecl::Provider(cursor.string_argument()?),
            "toInstance" => {
                cursor.expect_token(&Token::ParenOpen)?;
                let value = parse_value(cursor, 0)?;
                cursor.expect_token(&Token::ParenClose)?;
                TargetDecl::Instance(value)
            }
            _ => {
                return Err(parse_err(format!("unknown binder method: {method}")));
            }
        };
        if cursor.peek() == Some(&Token::Arrow) {
            return Err(parse_err(format!(
                "binding of '{interface}' continues after its target"
            )));
        }
        return Ok(BindDecl {
            interface,
            qualifier,
            target,
        });
    }
}

fn check_depth(depth: usize, what: &str) -> Result<()> {
    if depth >= MAX_NESTING {
        return Err(parse_err(format!("{what} nested deeper than {MAX_NESTING} levels")));
    }
    Ok(())
}

fn parse_value(cursor: &mut TokenCursor<'_>, depth: usize) -> Result<ValueDecl> {
    check_depth(depth, "instance value")?;
    match cursor.advance() {
        Some(Token::StringLiteral(s)) => Ok(ValueDecl::String(s.clone())),
        Some(Token::Integer(n)) => Ok(ValueDecl::Integer(*n)),
        Some(Token::BracketOpen) => {
            let mut items = Vec::new();
            while cursor.peek() != Some(&Token::BracketClose) {
                if cursor.at_end() {
                    return Err(parse_err("unexpected end of input inside array".into()));
                }
                items.push(parse_value(cursor, depth + 1)?);
                if !cursor.skip(&Token::Comma) {
                    break;
                }
            }
            cursor.expect_token(&Token::BracketClose)?;
            Ok(ValueDecl::Array(items))
        }
        Some(Token::Identifier(name)) if name == "object" => {
            cursor.expect_token(&Token::ParenOpen)?;
            let class = cursor.expect_string()?;
            let state = if cursor.skip(&Token::Comma) {
                Some(cursor.expect_string()?)
            } else {
                None
            };
            cursor.expect_token(&Token::ParenClose)?;
            Ok(ValueDecl::Object { class, state })
        }
        other => Err(parse_err(format!("expected instance value, got {other:?}"))),
    }
}

fn parse_intercept(cursor: &mut TokenCursor<'_>) -> Result<InterceptDecl> {
    cursor.expect_token(&Token::BindInterceptor)?;
    cursor.expect_token(&Token::ParenOpen)?;
    let class_matcher = parse_matcher(cursor, 0)?;
    cursor.expect_token(&Token::Comma)?;
    let method_matcher = parse_matcher(cursor, 0)?;
    cursor.expect_token(&Token::Comma)?;

    cursor.expect_token(&Token::BracketOpen)?;
    let mut interceptors = Vec::new();
    while cursor.peek() != Some(&Token::BracketClose) {
        if cursor.at_end() {
            return Err(parse_err("unexpected end of input inside interceptor list".into()));
        }
        interceptors.push(cursor.expect_string()?);
        if !cursor.skip(&Token::Comma) {
            break;
        }
    }
    cursor.expect_token(&Token::BracketClose)?;
    cursor.expect_token(&Token::ParenClose)?;

    Ok(InterceptDecl {
        class_matcher,
        method_matcher,
        interceptors,
    })
}

fn parse_matcher(cursor: &mut TokenCursor<'_>, depth: usize) -> Result<Matcher> {
    check_depth(depth, "matcher")?;
    let name = cursor.expect_identifier()?;
    let matcher = match name.as_str() {
        "any" => {
            cursor.expect_token(&Token::ParenOpen)?;
            cursor.expect_token(&Token::ParenClose)?;
            Matcher::any()
        }
        "annotatedWith" => Matcher::annotated_with(cursor.string_argument()?),
        "named" => Matcher::named(cursor.string_argument()?),
        "startsWith" => Matcher::starts_with(cursor.string_argument()?),
        "subclassOf" => Matcher::subclass_of(cursor.string_argument()?),
        "not" => {
            cursor.expect_token(&Token::ParenOpen)?;
            let inner = parse_matcher(cursor, depth + 1)?;
            cursor.expect_token(&Token::ParenClose)?;
            Matcher::not(inner)
        }
        _ => return Err(parse_err(format!("unknown matcher: {name}"))),
    };
    Ok(matcher)
}
