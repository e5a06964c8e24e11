//! Line-oriented script parser.
//!
//! One statement per line, `#` starts a comment, trailing `;` is optional:
//!
//! ```text
//! fsm Turnstile;
//! state Locked;
//! state Unlocked;
//! initial Locked;
//! event Coin;
//! transition Locked -> Unlocked on Coin;
//! transition Unlocked -> Locked on Push;
//! ```
//!
//! Identifiers are `[A-Za-z_][A-Za-z0-9_]*` and case-sensitive. Statements
//! are applied to the model as they are read; a statement the model rejects
//! becomes a diagnostic and parsing continues.

use crate::error::ParseError;
use fsmgen_core::FsmModel;

/// Outcome of parsing one script.
#[derive(Debug, Default)]
pub struct ParseReport {
    /// Statements the model accepted.
    pub statements_ok: usize,
    /// Rejected statements, in source order.
    pub diagnostics: Vec<ParseError>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// One parsed statement, not yet applied to the model.
#[derive(Debug, PartialEq, Eq)]
enum Statement {
    Name(String),
    State(String),
    Event(String),
    Initial(String),
    Transition {
        from: String,
        to: String,
        event: String,
    },
}

/// Parses `source` and applies every statement to `model`.
///
/// Never fails as a whole: lexical errors and model rejections are collected
/// into the report and parsing resumes on the next line.
pub fn parse_into(model: &mut FsmModel, source: &str) -> ParseReport {
    let mut report = ParseReport::default();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }

        match parse_statement(text, line) {
            Ok(stmt) => match apply(model, &stmt) {
                Ok(()) => report.statements_ok += 1,
                Err(e) => {
                    let diag = ParseError::Model { line, source: e };
                    tracing::warn!(%diag, "statement rejected");
                    report.diagnostics.push(diag);
                }
            },
            Err(e) => {
                tracing::warn!(%e, "statement rejected");
                report.diagnostics.push(e);
            }
        }
    }

    report
}

fn apply(model: &mut FsmModel, stmt: &Statement) -> Result<(), fsmgen_core::FsmError> {
    match stmt {
        Statement::Name(name) => model.set_name(name),
        Statement::State(name) => model.declare_state(name),
        Statement::Event(name) => model.declare_event(name),
        Statement::Initial(name) => model.set_initial_state(name),
        Statement::Transition { from, to, event } => model.add_transition(from, event, to),
    }
}

fn parse_statement(text: &str, line: usize) -> Result<Statement, ParseError> {
    let mut lexer = Lexer::new(text, line);
    let keyword = match lexer.next_token()? {
        Some(Token::Ident(word)) => word,
        Some(other) => {
            return Err(ParseError::UnexpectedToken {
                line,
                expected: "a statement keyword",
                found: other.to_string(),
            })
        }
        None => {
            return Err(ParseError::UnexpectedEnd {
                line,
                expected: "a statement keyword",
            })
        }
    };

    let stmt = match keyword.as_str() {
        "fsm" => Statement::Name(lexer.expect_ident("an FSM name")?),
        "state" => Statement::State(lexer.expect_ident("a state name")?),
        "event" => Statement::Event(lexer.expect_ident("an event name")?),
        "initial" => Statement::Initial(lexer.expect_ident("a state name")?),
        "transition" => {
            let from = lexer.expect_ident("a source state")?;
            lexer.expect(Token::Arrow, "'->'")?;
            let to = lexer.expect_ident("a target state")?;
            lexer.expect_keyword("on")?;
            let event = lexer.expect_ident("an event name")?;
            Statement::Transition { from, to, event }
        }
        _ => {
            return Err(ParseError::UnknownStatement {
                line,
                keyword,
            })
        }
    };

    lexer.expect_end()?;
    Ok(stmt)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Arrow,
    Semicolon,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "{s}"),
            Token::Arrow => write!(f, "->"),
            Token::Semicolon => write!(f, ";"),
        }
    }
}

/// Character scanner over one statement line.
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str, line: usize) -> Self {
        Self { input, pos: 0, line }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_whitespace();
        let rest = &self.input[self.pos..];
        let Some(ch) = rest.chars().next() else {
            return Ok(None);
        };

        if ch == ';' {
            self.pos += 1;
            return Ok(Some(Token::Semicolon));
        }

        if rest.starts_with("->") {
            self.pos += 2;
            return Ok(Some(Token::Arrow));
        }

        if ch.is_ascii_alphabetic() || ch == '_' {
            let len = rest
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
                .count();
            let word = &rest[..len];
            self.pos += len;
            return Ok(Some(Token::Ident(word.to_string())));
        }

        Err(ParseError::InvalidCharacter {
            line: self.line,
            ch,
        })
    }

    fn expect_ident(&mut self, expected: &'static str) -> Result<String, ParseError> {
        match self.next_token()? {
            Some(Token::Ident(word)) => Ok(word),
            Some(other) => Err(ParseError::UnexpectedToken {
                line: self.line,
                expected,
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd {
                line: self.line,
                expected,
            }),
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<(), ParseError> {
        match self.next_token()? {
            Some(found) if found == token => Ok(()),
            Some(other) => Err(ParseError::UnexpectedToken {
                line: self.line,
                expected,
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd {
                line: self.line,
                expected,
            }),
        }
    }

    fn expect_keyword(&mut self, word: &'static str) -> Result<(), ParseError> {
        match self.next_token()? {
            Some(Token::Ident(found)) if found == word => Ok(()),
            Some(other) => Err(ParseError::UnexpectedToken {
                line: self.line,
                expected: word,
                found: other.to_string(),
            }),
            None => Err(ParseError::UnexpectedEnd {
                line: self.line,
                expected: word,
            }),
        }
    }

    /// Consumes an optional trailing semicolon and requires end of line.
    fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.next_token()? {
            None => Ok(()),
            Some(Token::Semicolon) => match self.next_token()? {
                None => Ok(()),
                Some(other) => Err(ParseError::UnexpectedToken {
                    line: self.line,
                    expected: "end of statement",
                    found: other.to_string(),
                }),
            },
            Some(other) => Err(ParseError::UnexpectedToken {
                line: self.line,
                expected: "end of statement",
                found: other.to_string(),
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }
}
