//! Lexer (tokenizer) for C-- source code
//!
//! Tokens are produced on demand through [`Lexer::next_token`]; the parser
//! pulls one token at a time and may rewind to a [`Checkpoint`] when a
//! top-level construct turns out to be a declaration rather than a function.
//!
//! Any maximal run of operator characters that does not spell one of the
//! built-in operators becomes a single [`Token::InfixOp`]. Whether that
//! symbol means anything is decided later by the parser's precedence table.
//! Adjacent operators therefore need whitespace between them: `a*-b` lexes
//! as `a`, `*-`, `b`.

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// All token variants produced by the lexer.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Magnitude only; `-2147483648` is a minus followed by `2147483648`
    IntLiteral(u32, SourceLocation),
    DoubleLiteral(f64, SourceLocation),
    BoolLiteral(bool, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Identifiers
    Ident(String, SourceLocation),

    // User-definable operator symbol, e.g. `<>` or `**`
    InfixOp(String, SourceLocation),

    // Keywords
    Bool(SourceLocation),
    Int(SourceLocation),
    Double(SourceLocation),
    Str(SourceLocation), // `string`
    Void(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    For(SourceLocation),
    Return(SourceLocation),
    Break(SourceLocation),
    Continue(SourceLocation),
    Infix(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Comparison
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Le(SourceLocation),    // <=
    Gt(SourceLocation),    // >
    Ge(SourceLocation),    // >=

    // Logical
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !

    // Bitwise
    Amp(SourceLocation),   // &
    Pipe(SourceLocation),  // |
    Caret(SourceLocation), // ^
    Tilde(SourceLocation), // ~
    LtLt(SourceLocation),  // <<
    GtGt(SourceLocation),  // >>

    // Assignment
    Eq(SourceLocation), // =

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    LBracket(SourceLocation),  // [
    RBracket(SourceLocation),  // ]
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    /// Malformed input; the message says what went wrong.
    Error(String, SourceLocation),

    // End of file
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::IntLiteral(_, loc)
            | Token::DoubleLiteral(_, loc)
            | Token::BoolLiteral(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Ident(_, loc)
            | Token::InfixOp(_, loc)
            | Token::Error(_, loc) => *loc,
            Token::Bool(loc)
            | Token::Int(loc)
            | Token::Double(loc)
            | Token::Str(loc)
            | Token::Void(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::For(loc)
            | Token::Return(loc)
            | Token::Break(loc)
            | Token::Continue(loc)
            | Token::Infix(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Le(loc)
            | Token::Gt(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Amp(loc)
            | Token::Pipe(loc)
            | Token::Caret(loc)
            | Token::Tilde(loc)
            | Token::LtLt(loc)
            | Token::GtGt(loc)
            | Token::Eq(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::LBracket(loc)
            | Token::RBracket(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::IntLiteral(n, _) => write!(f, "int literal {}", n),
            Token::DoubleLiteral(d, _) => write!(f, "double literal {:?}", d),
            Token::BoolLiteral(b, _) => write!(f, "bool literal {}", b),
            Token::StringLiteral(s, _) => write!(f, "string literal \"{}\"", s),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::InfixOp(s, _) => write!(f, "operator '{}'", s),
            Token::Bool(_) => write!(f, "'bool'"),
            Token::Int(_) => write!(f, "'int'"),
            Token::Double(_) => write!(f, "'double'"),
            Token::Str(_) => write!(f, "'string'"),
            Token::Void(_) => write!(f, "'void'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::For(_) => write!(f, "'for'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::Break(_) => write!(f, "'break'"),
            Token::Continue(_) => write!(f, "'continue'"),
            Token::Infix(_) => write!(f, "'infix'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Amp(_) => write!(f, "'&'"),
            Token::Pipe(_) => write!(f, "'|'"),
            Token::Caret(_) => write!(f, "'^'"),
            Token::Tilde(_) => write!(f, "'~'"),
            Token::LtLt(_) => write!(f, "'<<'"),
            Token::GtGt(_) => write!(f, "'>>'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::LBracket(_) => write!(f, "'['"),
            Token::RBracket(_) => write!(f, "']'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Error(message, _) => write!(f, "invalid token ({})", message),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Lexer error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Saved lexer position for backtracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    position: usize,
    line: usize,
    column: usize,
}

/// Characters that may appear in an operator symbol
fn is_operator_char(ch: char) -> bool {
    matches!(
        ch,
        '+' | '-'
            | '*'
            | '/'
            | '%'
            | '<'
            | '>'
            | '='
            | '!'
            | '&'
            | '|'
            | '^'
            | '~'
            | '@'
            | '#'
            | '$'
            | '?'
            | ':'
            | '.'
            | '\\'
    )
}

/// Built-in operator for an exact symbol, if there is one.
fn builtin_operator(symbol: &str, loc: SourceLocation) -> Option<Token> {
    let token = match symbol {
        "+" => Token::Plus(loc),
        "-" => Token::Minus(loc),
        "*" => Token::Star(loc),
        "/" => Token::Slash(loc),
        "%" => Token::Percent(loc),
        "==" => Token::EqEq(loc),
        "!=" => Token::NotEq(loc),
        "<" => Token::Lt(loc),
        "<=" => Token::Le(loc),
        ">" => Token::Gt(loc),
        ">=" => Token::Ge(loc),
        "&&" => Token::AndAnd(loc),
        "||" => Token::OrOr(loc),
        "!" => Token::Bang(loc),
        "&" => Token::Amp(loc),
        "|" => Token::Pipe(loc),
        "^" => Token::Caret(loc),
        "~" => Token::Tilde(loc),
        "<<" => Token::LtLt(loc),
        ">>" => Token::GtGt(loc),
        "=" => Token::Eq(loc),
        _ => return None,
    };
    Some(token)
}

/// Lexer for C-- source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current position, to be handed back to [`Lexer::restore`].
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Rewind to a previously taken checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    /// Tokenize the entire input, stopping at the first malformed token
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            match self.next_token() {
                Token::Error(message, location) => {
                    return Err(LexError { message, location })
                }
                Token::Eof(loc) => {
                    tokens.push(Token::Eof(loc));
                    break;
                }
                token => tokens.push(token),
            }
        }

        Ok(tokens)
    }

    /// Get next token. Returns `Eof` forever once the input is exhausted.
    pub fn next_token(&mut self) -> Token {
        if let Err(err) = self.skip_whitespace_and_comments() {
            return Token::Error(err.message, err.location);
        }

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Token::Eof(loc);
        };

        let result = match ch {
            // String literals
            '"' => self.string_literal(loc),

            // Numeric literals
            '0'..='9' => self.number_literal(ch, loc),

            // Identifiers and keywords
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            '[' => Ok(Token::LBracket(loc)),
            ']' => Ok(Token::RBracket(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ if is_operator_char(ch) => Ok(self.operator(ch, loc)),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        };

        result.unwrap_or_else(|err| Token::Error(err.message, err.location))
    }

    /// Maximal run of operator characters, stopping before a comment opener
    fn operator(&mut self, first: char, loc: SourceLocation) -> Token {
        let mut symbol = String::new();
        symbol.push(first);

        while let Some(ch) = self.peek() {
            if !is_operator_char(ch) || self.at_comment_start() {
                break;
            }
            symbol.push(ch);
            self.advance();
        }

        builtin_operator(&symbol, loc).unwrap_or(Token::InfixOp(symbol, loc))
    }

    /// Parse string literal
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == '"' {
                self.advance(); // consume closing quote
                return Ok(Token::StringLiteral(string, loc));
            }

            if ch == '\\' {
                self.advance();
                let escaped = self.advance().ok_or_else(|| LexError {
                    message: "Unexpected end of file in string literal"
                        .to_string(),
                    location: self.current_location(),
                })?;

                let unescaped = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    '0' => '\0',
                    _ => {
                        return Err(LexError {
                            message: format!(
                                "Unknown escape sequence: \\{}",
                                escaped
                            ),
                            location: self.current_location(),
                        });
                    }
                };
                string.push(unescaped);
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal: `123`, `1.5`, `2.5e-3`, `1e9`
    fn number_literal(
        &mut self,
        first_digit: char,
        loc: SourceLocation,
    ) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);
        let mut is_double = false;

        self.take_digits(&mut num_str);

        if self.peek() == Some('.')
            && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit())
        {
            is_double = true;
            num_str.push('.');
            self.advance();
            self.take_digits(&mut num_str);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let signed = matches!(self.peek_ahead(1), Some('+') | Some('-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_double = true;
                for _ in 0..digit_at {
                    if let Some(c) = self.advance() {
                        num_str.push(c);
                    }
                }
                self.take_digits(&mut num_str);
            }
        }

        if is_double {
            let value = num_str.parse::<f64>().map_err(|_| LexError {
                message: format!("Invalid floating point literal: {}", num_str),
                location: loc,
            })?;
            return Ok(Token::DoubleLiteral(value, loc));
        }

        let value = num_str
            .parse::<u32>()
            .ok()
            .filter(|&n| n <= i32::MIN.unsigned_abs())
            .ok_or_else(|| LexError {
                message: format!("Invalid integer literal: {}", num_str),
                location: loc,
            })?;

        Ok(Token::IntLiteral(value, loc))
    }

    fn take_digits(&mut self, buffer: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            buffer.push(ch);
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "bool" => Token::Bool(loc),
            "int" => Token::Int(loc),
            "double" => Token::Double(loc),
            "string" => Token::Str(loc),
            "void" => Token::Void(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "for" => Token::For(loc),
            "return" => Token::Return(loc),
            "break" => Token::Break(loc),
            "continue" => Token::Continue(loc),
            "infix" => Token::Infix(loc),
            "true" => Token::BoolLiteral(true, loc),
            "false" => Token::BoolLiteral(false, loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') if self.peek_ahead(1) == Some('/') => {
                    self.skip_line_comment();
                }
                Some('/') if self.peek_ahead(1) == Some('*') => {
                    self.skip_block_comment()?;
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn at_comment_start(&self) -> bool {
        self.peek() == Some('/') && matches!(self.peek_ahead(1), Some('/') | Some('*'))
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            self.advance();
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance(); // skip '*'
                self.advance(); // skip '/'
                return Ok(());
            }
            self.advance();
        }

        Err(LexError {
            message: "Unterminated block comment".to_string(),
            location: start_loc,
        })
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get current source location
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "main"));
        assert!(matches!(tokens[2], Token::LParen(_)));
        assert!(matches!(tokens[3], Token::RParen(_)));
        assert!(matches!(tokens[4], Token::LBrace(_)));
        assert!(matches!(tokens[5], Token::Return(_)));
        assert!(matches!(tokens[6], Token::IntLiteral(0, _)));
        assert!(matches!(tokens[7], Token::Semicolon(_)));
        assert!(matches!(tokens[8], Token::RBrace(_)));
        assert!(matches!(tokens[9], Token::Eof(_)));
    }

    #[test]
    fn test_builtin_operators() {
        let mut lexer = Lexer::new("== != && || << >> <= >= = !");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::EqEq(_)));
        assert!(matches!(tokens[1], Token::NotEq(_)));
        assert!(matches!(tokens[2], Token::AndAnd(_)));
        assert!(matches!(tokens[3], Token::OrOr(_)));
        assert!(matches!(tokens[4], Token::LtLt(_)));
        assert!(matches!(tokens[5], Token::GtGt(_)));
        assert!(matches!(tokens[6], Token::Le(_)));
        assert!(matches!(tokens[7], Token::Ge(_)));
        assert!(matches!(tokens[8], Token::Eq(_)));
        assert!(matches!(tokens[9], Token::Bang(_)));
    }

    #[test]
    fn test_unknown_operator_run_is_infix_symbol() {
        let mut lexer = Lexer::new("a <> b ** c @ d");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[1], Token::InfixOp(ref s, _) if s == "<>"));
        assert!(matches!(tokens[3], Token::InfixOp(ref s, _) if s == "**"));
        assert!(matches!(tokens[5], Token::InfixOp(ref s, _) if s == "@"));
    }

    #[test]
    fn test_operator_run_stops_at_comment() {
        let mut lexer = Lexer::new("a +// trailing\n b");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[1], Token::Plus(_)));
        assert!(matches!(tokens[2], Token::Ident(ref s, _) if s == "b"));
    }

    #[test]
    fn test_numeric_literals() {
        let mut lexer = Lexer::new("42 2.5 1e3 6.02E-2 7.");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::IntLiteral(42, _)));
        assert!(matches!(tokens[1], Token::DoubleLiteral(d, _) if d == 2.5));
        assert!(matches!(tokens[2], Token::DoubleLiteral(d, _) if d == 1000.0));
        assert!(matches!(tokens[3], Token::DoubleLiteral(d, _) if d == 0.0602));
        // A dot without digits after it is an operator
        assert!(matches!(tokens[4], Token::IntLiteral(7, _)));
        assert!(matches!(tokens[5], Token::InfixOp(ref s, _) if s == "."));
    }

    #[test]
    fn test_integer_overflow_is_error() {
        let mut lexer = Lexer::new("99999999999");
        let err = lexer.tokenize().unwrap_err();
        assert!(err.message.contains("Invalid integer literal"));

        let err = Lexer::new("2147483649").tokenize().unwrap_err();
        assert_eq!(err.message, "Invalid integer literal: 2147483649");
    }

    #[test]
    fn test_min_int_magnitude_is_lexed() {
        let tokens = Lexer::new("-2147483648").tokenize().unwrap();
        assert!(matches!(tokens[0], Token::Minus(_)));
        assert!(matches!(tokens[1], Token::IntLiteral(2147483648, _)));
    }

    #[test]
    fn test_assign_minus_is_one_operator() {
        // No space between `=` and a negative literal makes one symbol
        let tokens = Lexer::new("x=-1").tokenize().unwrap();
        assert!(matches!(tokens[0], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[1], Token::InfixOp(ref s, _) if s == "=-"));
        assert!(matches!(tokens[2], Token::IntLiteral(1, _)));

        let tokens = Lexer::new("x = -1").tokenize().unwrap();
        assert!(matches!(tokens[1], Token::Eq(_)));
        assert!(matches!(tokens[2], Token::Minus(_)));
    }

    #[test]
    fn test_keywords_and_bools() {
        let mut lexer = Lexer::new("bool double string infix true false");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Bool(_)));
        assert!(matches!(tokens[1], Token::Double(_)));
        assert!(matches!(tokens[2], Token::Str(_)));
        assert!(matches!(tokens[3], Token::Infix(_)));
        assert!(matches!(tokens[4], Token::BoolLiteral(true, _)));
        assert!(matches!(tokens[5], Token::BoolLiteral(false, _)));
    }

    #[test]
    fn test_comments() {
        let mut lexer =
            Lexer::new("int x; // comment\nint y; /* block\ncomment */ int z;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[2], Token::Semicolon(_)));
        assert!(matches!(tokens[3], Token::Int(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "y"));
        assert!(matches!(tokens[5], Token::Semicolon(_)));
        assert!(matches!(tokens[6], Token::Int(_)));
        assert!(matches!(tokens[7], Token::Ident(ref s, _) if s == "z"));
    }

    #[test]
    fn test_string_literal() {
        let mut lexer = Lexer::new(r#""hello\nworld""#);
        let tokens = lexer.tokenize().unwrap();

        match &tokens[0] {
            Token::StringLiteral(s, _) => {
                assert_eq!(s, "hello\nworld");
            }
            _ => panic!("Expected string literal"),
        }
    }

    #[test]
    fn test_unterminated_string() {
        let mut lexer = Lexer::new("\"abc");
        let err = lexer.tokenize().unwrap_err();
        assert_eq!(err.message, "Unterminated string literal");
        assert_eq!(err.location, SourceLocation::new(1, 1));
    }

    #[test]
    fn test_locations() {
        let mut lexer = Lexer::new("int\n  x;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(2, 3));
    }

    #[test]
    fn test_checkpoint_restore_relexes() {
        let mut lexer = Lexer::new("int x = 1;");
        lexer.next_token();
        let checkpoint = lexer.checkpoint();
        let first = lexer.next_token();
        lexer.next_token();
        lexer.restore(checkpoint);
        assert_eq!(lexer.next_token(), first);
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut lexer = Lexer::new("  ");
        assert!(matches!(lexer.next_token(), Token::Eof(_)));
        assert!(matches!(lexer.next_token(), Token::Eof(_)));
    }
}
