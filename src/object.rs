use std::fmt;
use std::fmt::Formatter;
use colored::Colorize;

/// Dynamic runtime value. Equality is structural and never crosses kinds,
/// so `1 == "1"` is false without any coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
  Nil,
  Number(f64),
  String(String),
  Boolean(bool),
}

impl Object {
  /// `nil` and `false` are falsy; everything else, including `0` and `""`,
  /// is truthy.
  pub fn is_truthy(&self) -> bool {
    !matches!(self, Object::Nil | Object::Boolean(false))
  }
}

impl fmt::Display for Object {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Object::Nil => {
        f.write_str(format!("{}", "nil".cyan()).as_str())
      },
      Object::Number(n) => write!(f, "{}", n),
      Object::String(s) => write!(f, "{}", s),
      Object::Boolean(b) => write!(f, "{}", b),
    }
  }
}
