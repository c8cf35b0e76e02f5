use crate::ast::{Expr, Stmt};
use crate::env::{Environment, ScopeHandle};
use crate::error::RuntimeError;
use crate::object::Object;
use crate::token::{Token, TokenKind};

type EvalResult<T> = Result<T, RuntimeError>;

/// Tree-walking evaluator. Statements execute for effect against the
/// session's environment; the first runtime error halts the remaining
/// statements of the call and is returned to the driver.
pub struct Evaluator<'e> {
  env: &'e mut Environment,
  current: ScopeHandle,
}

impl<'e> Evaluator<'e> {
  pub fn new(env: &'e mut Environment) -> Self {
    let current = env.global();

    Evaluator {
      env,
      current,
    }
  }

  pub fn eval(&mut self, program: &[Stmt]) -> EvalResult<()> {
    for statement in program {
      self.eval_statement(statement)?;
    }

    Ok(())
  }

  fn eval_statement(&mut self, statement: &Stmt) -> EvalResult<()> {
    match statement {
      Stmt::Expression(expression) => {
        self.eval_expression(expression)?;
        Ok(())
      }
      Stmt::Print(expression) => {
        let value = self.eval_expression(expression)?;
        println!("{}", value);
        Ok(())
      }
      Stmt::Var { name, initializer } => {
        let value = match initializer {
          Some(expression) => self.eval_expression(expression)?,
          None => Object::Nil,
        };

        self.env.define(self.current, &name.lexeme, value);
        Ok(())
      }
      Stmt::Block(statements) => self.eval_block(statements),
      Stmt::If { keyword, .. } => Err(Self::unsupported(keyword, "'if' statements")),
      Stmt::While { keyword, .. } => Err(Self::unsupported(keyword, "'while' loops")),
      Stmt::Function { name, .. } => Err(Self::unsupported(name, "function declarations")),
      Stmt::Return { keyword, .. } => Err(Self::unsupported(keyword, "'return' statements")),
      Stmt::Class { name, .. } => Err(Self::unsupported(name, "class declarations")),
    }
  }

  /// Runs the block in a fresh child scope. The scope is reclaimed on the
  /// way out even when a statement inside failed, so the enclosing scope
  /// never sees a stale child.
  fn eval_block(&mut self, statements: &[Stmt]) -> EvalResult<()> {
    let enclosing = self.current;
    let scope = self.env.begin_scope(enclosing);
    self.current = scope;

    let result = statements
      .iter()
      .try_for_each(|statement| self.eval_statement(statement));

    self.current = enclosing;
    self.env.end_scope(scope);

    result
  }

  fn eval_expression(&mut self, expression: &Expr) -> EvalResult<Object> {
    match expression {
      Expr::Literal(value) => Ok(value.clone()),
      Expr::Grouping(inner) => self.eval_expression(inner),
      Expr::Unary { operator, operand } => {
        let value = self.eval_expression(operand)?;
        Self::eval_unary_expression(operator, value)
      }
      Expr::Binary {
        left,
        operator,
        right,
      } => {
        let left = self.eval_expression(left)?;
        let right = self.eval_expression(right)?;
        Self::eval_binary_expression(left, operator, right)
      }
      Expr::Variable(name) => self.env.get(self.current, name),
      Expr::Assign { name, value } => {
        let value = self.eval_expression(value)?;
        self.env.assign(self.current, name, value.clone())?;
        // The assignment expression's own value, enabling `a = b = 1`.
        Ok(value)
      }
      Expr::Logical { operator, .. } => Err(Self::unsupported(operator, "logical operators")),
      Expr::Call { paren, .. } => Err(Self::unsupported(paren, "function calls")),
      Expr::Get { name, .. } => Err(Self::unsupported(name, "property access")),
      Expr::Set { name, .. } => Err(Self::unsupported(name, "property access")),
      Expr::Super { keyword, .. } => Err(Self::unsupported(keyword, "'super'")),
      Expr::This(keyword) => Err(Self::unsupported(keyword, "'this'")),
    }
  }

  fn eval_unary_expression(operator: &Token, value: Object) -> EvalResult<Object> {
    match operator.kind {
      TokenKind::Minus => match value {
        Object::Number(n) => Ok(Object::Number(-n)),
        _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
      },
      TokenKind::Bang => Ok(Object::Boolean(!value.is_truthy())),
      _ => Err(RuntimeError::new(operator, "Unknown unary operator.")),
    }
  }

  fn eval_binary_expression(left: Object, operator: &Token, right: Object) -> EvalResult<Object> {
    match operator.kind {
      TokenKind::Plus => match (left, right) {
        (Object::Number(left), Object::Number(right)) => Ok(Object::Number(left + right)),
        (Object::String(left), Object::String(right)) => Ok(Object::String(left + &right)),
        _ => Err(RuntimeError::new(
          operator,
          "Operands must be two numbers or two strings.",
        )),
      },
      TokenKind::Minus => {
        Self::numeric_operands(operator, left, right).map(|(l, r)| Object::Number(l - r))
      }
      TokenKind::Star => {
        Self::numeric_operands(operator, left, right).map(|(l, r)| Object::Number(l * r))
      }
      TokenKind::Slash => {
        Self::numeric_operands(operator, left, right).map(|(l, r)| Object::Number(l / r))
      }
      TokenKind::Greater => {
        Self::numeric_operands(operator, left, right).map(|(l, r)| Object::Boolean(l > r))
      }
      TokenKind::GreaterEqual => {
        Self::numeric_operands(operator, left, right).map(|(l, r)| Object::Boolean(l >= r))
      }
      TokenKind::Less => {
        Self::numeric_operands(operator, left, right).map(|(l, r)| Object::Boolean(l < r))
      }
      TokenKind::LessEqual => {
        Self::numeric_operands(operator, left, right).map(|(l, r)| Object::Boolean(l <= r))
      }
      TokenKind::EqualEqual => Ok(Object::Boolean(left == right)),
      TokenKind::BangEqual => Ok(Object::Boolean(left != right)),
      _ => Err(RuntimeError::new(operator, "Unknown binary operator.")),
    }
  }

  fn numeric_operands(operator: &Token, left: Object, right: Object) -> EvalResult<(f64, f64)> {
    match (left, right) {
      (Object::Number(left), Object::Number(right)) => Ok((left, right)),
      _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
  }

  fn unsupported(token: &Token, construct: &str) -> RuntimeError {
    RuntimeError::new(token, format!("{} are not supported.", construct))
  }
}
