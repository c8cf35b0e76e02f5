use std::collections::HashMap;

use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::Token;

type Bindings = HashMap<String, Object>;

/// Index into the environment arena. Handles are only valid while their
/// scope is live; block scopes are reclaimed when the block exits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeHandle(usize);

#[derive(Debug)]
struct Scope {
  bindings: Bindings,
  enclosing: Option<ScopeHandle>,
}

/// Lexical scope chain stored as an arena of scope records. Each record
/// links outward to its enclosing scope by handle; slot 0 is the global
/// scope and lives for the whole session.
#[derive(Debug)]
pub struct Environment {
  scopes: Vec<Scope>,
}

impl Environment {
  pub fn new() -> Self {
    Environment {
      scopes: vec![Scope {
        bindings: Bindings::new(),
        enclosing: None,
      }],
    }
  }

  pub fn global(&self) -> ScopeHandle {
    ScopeHandle(0)
  }

  /// Opens a child scope chained to `enclosing`. Blocks nest strictly, so
  /// the new scope is always the top of the arena.
  pub fn begin_scope(&mut self, enclosing: ScopeHandle) -> ScopeHandle {
    self.scopes.push(Scope {
      bindings: Bindings::new(),
      enclosing: Some(enclosing),
    });

    ScopeHandle(self.scopes.len() - 1)
  }

  /// Reclaims `scope` and anything opened inside it. The global scope is
  /// never reclaimed.
  pub fn end_scope(&mut self, scope: ScopeHandle) {
    debug_assert!(scope.0 > 0, "cannot reclaim the global scope");
    self.scopes.truncate(scope.0);
  }

  /// Inserts or overwrites in the given scope only. Redeclaring a name in
  /// one scope is not an error.
  pub fn define(&mut self, scope: ScopeHandle, name: &str, value: Object) {
    self.scopes[scope.0].bindings.insert(name.to_owned(), value);
  }

  pub fn get(&self, scope: ScopeHandle, name: &Token) -> Result<Object, RuntimeError> {
    let mut current = Some(scope);

    while let Some(handle) = current {
      let scope = &self.scopes[handle.0];

      if let Some(value) = scope.bindings.get(&name.lexeme) {
        return Ok(value.clone());
      }

      current = scope.enclosing;
    }

    Err(RuntimeError::new(
      name,
      format!("Undefined variable '{}'.", name.lexeme),
    ))
  }

  /// Mutates the innermost scope that already defines `name`. Assignment
  /// never implicitly creates a binding.
  pub fn assign(
    &mut self,
    scope: ScopeHandle,
    name: &Token,
    value: Object,
  ) -> Result<(), RuntimeError> {
    let mut current = Some(scope);

    while let Some(handle) = current {
      let scope = &mut self.scopes[handle.0];

      if scope.bindings.contains_key(&name.lexeme) {
        scope.bindings.insert(name.lexeme.clone(), value);
        return Ok(());
      }

      current = scope.enclosing;
    }

    Err(RuntimeError::new(
      name,
      format!("Undefined variable '{}'.", name.lexeme),
    ))
  }
}

impl Default for Environment {
  fn default() -> Self {
    Environment::new()
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::token::TokenKind;

  fn name(text: &str) -> Token {
    Token::new(TokenKind::Identifier, text.to_owned(), None, 1)
  }

  #[test]
  fn define_then_get() {
    let mut env = Environment::new();
    let global = env.global();

    env.define(global, "a", Object::Number(1.0));
    assert_eq!(env.get(global, &name("a")).unwrap(), Object::Number(1.0));
  }

  #[test]
  fn redefining_in_one_scope_overwrites() {
    let mut env = Environment::new();
    let global = env.global();

    env.define(global, "a", Object::Number(1.0));
    env.define(global, "a", Object::Boolean(true));
    assert_eq!(env.get(global, &name("a")).unwrap(), Object::Boolean(true));
  }

  #[test]
  fn inner_scope_shadows_without_leaking() {
    let mut env = Environment::new();
    let global = env.global();
    env.define(global, "x", Object::Number(1.0));

    let inner = env.begin_scope(global);
    env.define(inner, "x", Object::Number(2.0));
    assert_eq!(env.get(inner, &name("x")).unwrap(), Object::Number(2.0));

    env.end_scope(inner);
    assert_eq!(env.get(global, &name("x")).unwrap(), Object::Number(1.0));
  }

  #[test]
  fn assignment_reaches_the_enclosing_scope() {
    let mut env = Environment::new();
    let global = env.global();
    env.define(global, "x", Object::Number(1.0));

    let inner = env.begin_scope(global);
    env.assign(inner, &name("x"), Object::Number(2.0)).unwrap();
    env.end_scope(inner);

    assert_eq!(env.get(global, &name("x")).unwrap(), Object::Number(2.0));
  }

  #[test]
  fn undefined_names_fail_on_get_and_assign() {
    let mut env = Environment::new();
    let global = env.global();

    let error = env.get(global, &name("y")).unwrap_err();
    assert_eq!(error.message, "Undefined variable 'y'.");

    let error = env.assign(global, &name("y"), Object::Nil).unwrap_err();
    assert_eq!(error.message, "Undefined variable 'y'.");
  }
}
