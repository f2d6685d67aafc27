use crate::span::Span;
use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // Quoted literals, content is unescaped
    #[regex(r#""([^"\\]|\\.)*""#, unescape)]
    #[regex(r"'([^'\\]|\\.)*'", unescape)]
    Str(String),

    // Repeat counts - must win over Name for pure digits; range checked by the parser
    #[regex(r"[0-9]+", priority = 10)]
    Int,

    // Symbol names, only valid between angle brackets
    #[regex(r"[A-Za-z0-9_-]+", priority = 5)]
    Name,

    // Delimiters
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,

    // Separators
    #[token(",")]
    Comma,
    #[token("|")]
    Pipe,

    // Repeat operators
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("?")]
    Question,

    Error,
}

fn unescape(lex: &mut logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let body = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        // Only quotes and the backslash itself can be escaped
        match chars.next()? {
            quote @ ('"' | '\'' | '\\') => out.push(quote),
            _ => return None,
        }
    }
    Some(out)
}

impl Token {
    /// Tokens that may begin a pattern item
    pub fn is_item_start(&self) -> bool {
        matches!(self, Token::Str(_) | Token::LAngle | Token::LParen)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Str(s) => write!(f, "string {:?}", s),
            Token::Int => write!(f, "number"),
            Token::Name => write!(f, "name"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::LAngle => write!(f, "'<'"),
            Token::RAngle => write!(f, "'>'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::Comma => write!(f, "','"),
            Token::Pipe => write!(f, "'|'"),
            Token::Plus => write!(f, "'+'"),
            Token::Star => write!(f, "'*'"),
            Token::Question => write!(f, "'?'"),
            Token::Error => write!(f, "invalid input"),
        }
    }
}

/// Lexer wrapper with position tracking
pub struct Lexer<'source> {
    inner: logos::Lexer<'source, Token>,
    peeked: Option<Option<(Token, Span)>>,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            inner: Token::lexer(source),
            peeked: None,
        }
    }

    pub fn next_token(&mut self) -> Option<(Token, Span)> {
        if let Some(peeked) = self.peeked.take() {
            return peeked;
        }

        let token = self.inner.next()?;
        let span = Span::from(self.inner.span());
        Some((token.unwrap_or(Token::Error), span))
    }

    pub fn peek_token(&mut self) -> Option<(Token, Span)> {
        if self.peeked.is_none() {
            self.peeked = Some(self.next_token());
        }
        self.peeked.as_ref().and_then(|x| x.clone())
    }

    pub fn source(&self) -> &'source str {
        self.inner.source()
    }

    pub fn slice(&self, span: Span) -> &'source str {
        span.slice(self.source())
    }

    /// Zero-width span just past the last byte of input
    pub fn eof_span(&self) -> Span {
        Span::at(self.source().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        while let Some((token, _)) = lexer.next_token() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn test_lex_strings() {
        assert_eq!(
            lex(r#""おはよう" 'こんにちは'"#),
            vec![
                Token::Str("おはよう".to_string()),
                Token::Str("こんにちは".to_string())
            ]
        );
    }

    #[test]
    fn test_lex_string_escapes() {
        assert_eq!(
            lex(r#""say \"hi\"" 'it\'s' "a\\b""#),
            vec![
                Token::Str("say \"hi\"".to_string()),
                Token::Str("it's".to_string()),
                Token::Str("a\\b".to_string())
            ]
        );
    }

    #[test]
    fn test_lex_symbol() {
        assert_eq!(lex("<num_1-x>"), vec![Token::LAngle, Token::Name, Token::RAngle]);
    }

    #[test]
    fn test_lex_repeat_operators() {
        assert_eq!(
            lex(r#""a"{2,3} "b"{4} "c"+ "d"* "e"?"#),
            vec![
                Token::Str("a".to_string()),
                Token::LBrace,
                Token::Int,
                Token::Comma,
                Token::Int,
                Token::RBrace,
                Token::Str("b".to_string()),
                Token::LBrace,
                Token::Int,
                Token::RBrace,
                Token::Str("c".to_string()),
                Token::Plus,
                Token::Str("d".to_string()),
                Token::Star,
                Token::Str("e".to_string()),
                Token::Question
            ]
        );
    }

    #[test]
    fn test_lex_group() {
        assert_eq!(
            lex(r#"("a" | <b>)"#),
            vec![
                Token::LParen,
                Token::Str("a".to_string()),
                Token::Pipe,
                Token::LAngle,
                Token::Name,
                Token::RAngle,
                Token::RParen
            ]
        );
    }

    #[test]
    fn test_lex_unknown_escape_is_error() {
        assert_eq!(lex(r#""a\nb""#), vec![Token::Error]);
        assert_eq!(lex(r#""tab\t""#), vec![Token::Error]);
        assert_eq!(lex(r#"'\r'"#), vec![Token::Error]);
    }

    #[test]
    fn test_lex_long_digits_stay_one_token() {
        let mut lexer = Lexer::new("12345678901");
        let (token, span) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Int);
        assert_eq!(lexer.slice(span), "12345678901");
        assert!(lexer.next_token().is_none());
    }

    #[test]
    fn test_lex_unterminated_string_is_error() {
        assert!(lex(r#""abc"#).contains(&Token::Error));
    }

    #[test]
    fn test_lex_unknown_character_is_error() {
        assert_eq!(lex("&"), vec![Token::Error]);
    }

    #[test]
    fn test_lexer_peek_then_slice() {
        let input = "<weather>";
        let mut lexer = Lexer::new(input);

        let (token, _) = lexer.peek_token().unwrap();
        assert_eq!(token, Token::LAngle);
        let (token, _) = lexer.next_token().unwrap();
        assert_eq!(token, Token::LAngle);

        let (token, span) = lexer.next_token().unwrap();
        assert_eq!(token, Token::Name);
        assert_eq!(lexer.slice(span), "weather");
        assert_eq!(lexer.eof_span(), Span::at(9));
    }
}
