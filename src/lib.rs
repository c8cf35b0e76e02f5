pub mod ast;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod object;
pub mod parser;
pub mod session;
pub mod token;

use evaluator::Evaluator;
use lexer::Lexer;
use parser::Parser;
use session::Session;

/// Runs one unit of source (a file or a REPL line) against the session.
/// Interpretation is skipped when scanning or parsing reported an error;
/// a runtime failure is routed into the session's diagnostic sink.
pub fn run(source: &str, session: &mut Session) {
    let tokens = Lexer::new(source, session).lex();
    let program = Parser::new(tokens, session).parse();

    if session.had_error {
        return;
    }

    let result = Evaluator::new(&mut session.env).eval(&program);
    if let Err(error) = result {
        session.runtime_error(&error);
    }
}
