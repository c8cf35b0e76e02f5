use colored::Colorize;

use crate::env::Environment;
use crate::error::RuntimeError;
use crate::token::{Token, TokenKind};

/// Per-driver interpreter state: the global environment, the two error
/// flags the driver checks between pipeline stages, and the diagnostics
/// produced so far. One session lives for a whole REPL process; `reset`
/// clears the flags between lines without touching the environment.
pub struct Session {
  pub env: Environment,
  pub had_error: bool,
  pub had_runtime_error: bool,
  diagnostics: Vec<String>,
}

impl Session {
  pub fn new() -> Self {
    Session {
      env: Environment::new(),
      had_error: false,
      had_runtime_error: false,
      diagnostics: Vec::new(),
    }
  }

  /// Lexical diagnostic, no token to point at yet.
  pub fn error(&mut self, line: usize, message: &str) {
    self.report(line, "", message);
  }

  /// Syntax diagnostic anchored at a token.
  pub fn error_at(&mut self, token: &Token, message: &str) {
    if token.kind == TokenKind::Eof {
      self.report(token.line, " at end", message);
    } else {
      let location = format!(" at '{}'", token.lexeme);
      self.report(token.line, &location, message);
    }
  }

  pub fn report(&mut self, line: usize, location: &str, message: &str) {
    let rendered = format!("[line {}] Error{}: {}", line, location, message);
    eprintln!("{}", rendered.red());
    self.diagnostics.push(rendered);
    self.had_error = true;
  }

  pub fn runtime_error(&mut self, error: &RuntimeError) {
    let rendered = error.to_string();
    eprintln!("{}", rendered.red());
    self.diagnostics.push(rendered);
    self.had_runtime_error = true;
  }

  pub fn diagnostics(&self) -> &[String] {
    &self.diagnostics
  }

  /// Clears flags and the diagnostic log between REPL lines. Variable
  /// state persists.
  pub fn reset(&mut self) {
    self.had_error = false;
    self.had_runtime_error = false;
    self.diagnostics.clear();
  }
}

impl Default for Session {
  fn default() -> Self {
    Session::new()
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn report_shapes() {
    let mut session = Session::new();
    session.error(3, "Unexpected character: @");
    assert_eq!(
      session.diagnostics(),
      ["[line 3] Error: Unexpected character: @"]
    );
    assert!(session.had_error);

    let token = Token::new(TokenKind::Plus, "+".to_owned(), None, 5);
    session.error_at(&token, "Expect expression.");
    assert_eq!(
      session.diagnostics()[1],
      "[line 5] Error at '+': Expect expression."
    );

    let eof = Token::new(TokenKind::Eof, String::new(), None, 5);
    session.error_at(&eof, "Expect ';' after expression.");
    assert_eq!(
      session.diagnostics()[2],
      "[line 5] Error at end: Expect ';' after expression."
    );
  }

  #[test]
  fn reset_clears_flags_but_not_the_environment() {
    let mut session = Session::new();
    let global = session.env.global();
    session.env.define(global, "a", crate::object::Object::Number(1.0));
    session.error(1, "boom");

    session.reset();

    assert!(!session.had_error);
    assert!(session.diagnostics().is_empty());
    let token = Token::new(TokenKind::Identifier, "a".to_owned(), None, 1);
    assert!(session.env.get(global, &token).is_ok());
  }
}
