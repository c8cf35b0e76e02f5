use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  Comma,
  Dot,
  Minus,
  Plus,
  Semicolon,
  Slash,
  Star,

  Bang,
  BangEqual,
  Equal,
  EqualEqual,
  Greater,
  GreaterEqual,
  Less,
  LessEqual,

  Identifier,
  String,
  Number,

  And,
  Class,
  Else,
  False,
  Fun,
  For,
  If,
  Nil,
  Or,
  Print,
  Return,
  Super,
  This,
  True,
  Var,
  While,

  Eof,
}

/// Exact-match lookup deciding keyword vs plain identifier.
pub fn keyword(text: &str) -> Option<TokenKind> {
  let kind = match text {
    "and" => TokenKind::And,
    "class" => TokenKind::Class,
    "else" => TokenKind::Else,
    "false" => TokenKind::False,
    "fun" => TokenKind::Fun,
    "for" => TokenKind::For,
    "if" => TokenKind::If,
    "nil" => TokenKind::Nil,
    "or" => TokenKind::Or,
    "print" => TokenKind::Print,
    "return" => TokenKind::Return,
    "super" => TokenKind::Super,
    "this" => TokenKind::This,
    "true" => TokenKind::True,
    "var" => TokenKind::Var,
    "while" => TokenKind::While,
    _ => return None,
  };

  Some(kind)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Number(f64),
  String(String),
}

impl fmt::Display for Literal {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Literal::Number(value) => write!(f, "{}", value),
      Literal::String(value) => write!(f, "{}", value),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub lexeme: String,
  pub literal: Option<Literal>,
  pub line: usize,
}

impl Token {
  pub fn new(kind: TokenKind, lexeme: String, literal: Option<Literal>, line: usize) -> Token {
    Token {
      kind,
      lexeme,
      literal,
      line,
    }
  }
}

impl fmt::Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.literal {
      Some(literal) => write!(f, "{:?} {} {}", self.kind, self.lexeme, literal),
      None => write!(f, "{:?} {}", self.kind, self.lexeme),
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn keyword_table_is_exact_match() {
    assert_eq!(keyword("while"), Some(TokenKind::While));
    assert_eq!(keyword("whiles"), None);
    assert_eq!(keyword("Var"), None);
  }

  #[test]
  fn token_debug_form() {
    let number = Token::new(
      TokenKind::Number,
      "123".to_owned(),
      Some(Literal::Number(123.0)),
      1,
    );
    assert_eq!(number.to_string(), "Number 123 123");

    let semicolon = Token::new(TokenKind::Semicolon, ";".to_owned(), None, 4);
    assert_eq!(semicolon.to_string(), "Semicolon ;");
  }
}
