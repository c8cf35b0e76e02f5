use thiserror::Error;

use crate::token::Token;

/// Raised inside the parser when a production finds no matching alternative.
/// Caught at the nearest declaration boundary, where panic-mode recovery
/// takes over. The diagnostic itself has already been reported to the
/// session by the time this value exists.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
  pub token: Token,
  pub message: String,
}

/// Evaluation failure: a type mismatch in an operator or an undefined
/// variable. Carries the offending token so diagnostics can name its line.
#[derive(Debug, Clone, Error)]
#[error("{message}\n[line {}]", .token.line)]
pub struct RuntimeError {
  pub token: Token,
  pub message: String,
}

impl RuntimeError {
  pub fn new(token: &Token, message: impl Into<String>) -> RuntimeError {
    RuntimeError {
      token: token.clone(),
      message: message.into(),
    }
  }
}
