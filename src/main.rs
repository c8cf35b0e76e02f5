use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

use clap::{Arg, Command};
use lox::session::Session;

fn main() {
    let matches = Command::new("lox")
        .about("Tree-walking interpreter for the Lox scripting language")
        .arg(
            Arg::new("script")
                .help("Script file to run; starts a REPL when omitted")
                .index(1),
        )
        .get_matches();

    match matches.get_one::<String>("script") {
        Some(path) => run_file(path),
        None => run_prompt(),
    }
}

fn run_file(path: &str) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Could not read {}: {}", path, error);
            process::exit(66);
        }
    };

    let mut session = Session::new();
    lox::run(&source, &mut session);

    if session.had_error {
        process::exit(65);
    }

    if session.had_runtime_error {
        process::exit(70);
    }
}

fn run_prompt() {
    let stdin = io::stdin();
    let mut session = Session::new();

    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        lox::run(line.trim_end(), &mut session);
        // A bad line should not poison the next one.
        session.reset();
    }

    println!("Exiting REPL.");
}
