use crate::ast::{Repeat, Tree};
use crate::builder::AstBuilder;
use crate::error::ParseError;
use crate::lexer::{Lexer, Token};
use crate::span::Span;

type PResult<T> = std::result::Result<T, ParseError>;

const ITEM: &str = "string, <symbol> or '('";

/// Deepest group nesting accepted; keeps parsing and generation off the stack limit
pub const MAX_GROUP_DEPTH: usize = 64;

/// Recursive-descent parser for pattern notation
///
/// ```text
/// Pattern  = Expr EOF
/// Expr     = ( (Group | Symbol | String) RepeatOp? )+
/// Group    = '(' Expr ( '|' Expr )* ')'
/// RepeatOp = '{' INT ',' INT '}' | '{' INT '}' | '+' | '*' | '?'
/// Symbol   = '<' NAME '>'
/// ```
pub struct Parser<'source> {
    lexer: Lexer<'source>,
    builder: AstBuilder,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Parser {
            lexer: Lexer::new(source),
            builder: AstBuilder::new(),
        }
    }

    /// Parse the whole input; leftover tokens are an error
    pub fn parse_pattern(mut self) -> PResult<Tree> {
        self.parse_expr()?;

        if let Some((token, span)) = self.next() {
            return Err(match token {
                Token::Error => ParseError::invalid_token(self.lexer.slice(span), span),
                _ => ParseError::TrailingInput { span },
            });
        }

        Ok(self.builder.finish())
    }

    /// One or more items, stopping at the first token that cannot start one
    fn parse_expr(&mut self) -> PResult<()> {
        self.parse_item()?;

        while let Some((token, _)) = self.peek() {
            if !token.is_item_start() {
                break;
            }
            self.parse_item()?;
        }

        Ok(())
    }

    fn parse_item(&mut self) -> PResult<()> {
        match self.next() {
            // `""` adds nothing; a repeat on it is dropped with it
            Some((Token::Str(text), _)) if text.is_empty() => {
                self.parse_repeat()?;
                return Ok(());
            }
            Some((Token::Str(text), span)) => {
                if text.chars().any(char::is_control) {
                    return Err(ParseError::InvalidLiteral { text, span });
                }
                self.builder.literal(text, span);
            }
            Some((Token::LAngle, span)) => self.parse_symbol(span)?,
            Some((Token::LParen, span)) => self.parse_group(span)?,
            Some((token, span)) => return Err(self.unexpected(ITEM, token, span)),
            None => return Err(ParseError::unexpected_eof(ITEM, self.lexer.eof_span())),
        }

        if let Some((repeat, span)) = self.parse_repeat()? {
            self.builder.set_repeat(repeat, span);
        }
        Ok(())
    }

    /// `<name>`; the opening bracket is already consumed
    fn parse_symbol(&mut self, open: Span) -> PResult<()> {
        let name_span = match self.next() {
            // Digit-only names lex as counts
            Some((Token::Name | Token::Int, span)) => span,
            Some((token, span)) => return Err(self.unexpected("symbol name", token, span)),
            None => return Err(ParseError::unexpected_eof("symbol name", self.lexer.eof_span())),
        };
        let close = self.expect_token(Token::RAngle)?;

        let name = self.lexer.slice(name_span);
        self.builder.symbol(name, open.merge(close));
        Ok(())
    }

    /// `( expr | expr ... )`; the opening paren is already consumed
    fn parse_group(&mut self, open: Span) -> PResult<()> {
        if self.builder.depth() >= MAX_GROUP_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_GROUP_DEPTH,
                span: open,
            });
        }
        self.builder.enter_group(open);
        self.parse_expr()?;

        while let Some((Token::Pipe, _)) = self.peek() {
            self.next();
            self.builder.alternative();
            self.parse_expr()?;
        }

        let close = self.expect_token(Token::RParen)?;
        self.builder.exit_group(close);
        Ok(())
    }

    /// Optional repeat operator following an item
    fn parse_repeat(&mut self) -> PResult<Option<(Repeat, Span)>> {
        let (repeat, span) = match self.peek() {
            Some((Token::Plus, span)) => {
                self.next();
                (Repeat::OneOrMore, span)
            }
            Some((Token::Star, span)) => {
                self.next();
                (Repeat::ZeroOrMore, span)
            }
            Some((Token::Question, span)) => {
                self.next();
                (Repeat::optional(), span)
            }
            Some((Token::LBrace, start)) => {
                self.next();
                self.parse_range(start)?
            }
            _ => return Ok(None),
        };

        Ok(Some((repeat, span)))
    }

    /// `{n}` or `{min,max}`; the opening brace is already consumed
    fn parse_range(&mut self, start: Span) -> PResult<(Repeat, Span)> {
        let min = self.expect_count()?;
        let max = if let Some((Token::Comma, _)) = self.peek() {
            self.next();
            self.expect_count()?
        } else {
            min
        };
        let span = start.merge(self.expect_token(Token::RBrace)?);

        if min > max {
            return Err(ParseError::InvalidRange { min, max, span });
        }
        Ok((Repeat::Range { min, max }, span))
    }

    // Helper methods

    fn peek(&mut self) -> Option<(Token, Span)> {
        self.lexer.peek_token()
    }

    fn next(&mut self) -> Option<(Token, Span)> {
        self.lexer.next_token()
    }

    fn expect_token(&mut self, expected: Token) -> PResult<Span> {
        match self.next() {
            Some((token, span)) if token == expected => Ok(span),
            Some((token, span)) => Err(self.unexpected(&expected.to_string(), token, span)),
            None => Err(ParseError::unexpected_eof(expected.to_string(), self.lexer.eof_span())),
        }
    }

    fn expect_count(&mut self) -> PResult<u32> {
        match self.next() {
            Some((Token::Int, span)) => {
                let text = self.lexer.slice(span);
                text.parse().map_err(|_| ParseError::InvalidCount {
                    text: text.to_string(),
                    span,
                })
            }
            Some((token, span)) => Err(self.unexpected("repeat count", token, span)),
            None => Err(ParseError::unexpected_eof("repeat count", self.lexer.eof_span())),
        }
    }

    fn unexpected(&self, expected: &str, found: Token, span: Span) -> ParseError {
        match found {
            Token::Error => ParseError::invalid_token(self.lexer.slice(span), span),
            token => ParseError::unexpected_token(expected, token.to_string(), span),
        }
    }
}

/// Parse a pattern string into a tree
pub fn parse(source: &str) -> PResult<Tree> {
    Parser::new(source).parse_pattern()
}
