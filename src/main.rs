//! Command-line front-end for parenlisp.
//!
//! With no FILE, starts an interactive REPL:  `RUST_LOG=debug parenlisp`.
//! With a FILE, evaluates each top-level expression and prints its result.

use clap::{App, Arg};
use colored::*;
use log::{info, LevelFilter};
use std::fs;
use std::process;

use parenlisp::error::LispError;
use parenlisp::interpreter::Interpreter;
use parenlisp::token::interactive_stream::InteractiveStream;
use parenlisp::value::Value;


fn main() {
    // Setup logging.
    env_logger::Builder::from_default_env()
        .filter_module("rustyline", LevelFilter::Warn)
        .init();

    // Parse args.
    let matches = App::new("parenlisp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A small Lisp interpreter")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Source file to evaluate; starts a REPL if absent"),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .value_name("EXPR")
                .takes_value(true)
                .conflicts_with("file")
                .help("Evaluate EXPR and print each result"),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Disable colored output"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Only print errors and program output"),
        )
        .get_matches();

    if matches.is_present("no-color") {
        colored::control::set_override(false);
    }
    let quiet = matches.is_present("quiet");

    let ok = if let Some(source) = matches.value_of("eval") {
        run_source(source, quiet)
    } else if let Some(path) = matches.value_of("file") {
        run_file(path, quiet)
    } else {
        interactive_repl();
        true
    };

    if !ok {
        process::exit(1);
    }
}

fn interactive_repl() {
    let mut interpreter = Interpreter::new();
    let chunks = InteractiveStream::new(interpreter.env().clone());

    for chunk in chunks {
        match interpreter.run_each(&chunk) {
            Ok(results) => {
                for result in &results {
                    print_result(result);
                }
            }
            Err(err) => print_error(&err),
        }
        println!();
    }
}

fn run_file(path: &str, quiet: bool) -> bool {
    info!("Running {}", path);
    match fs::read_to_string(path) {
        Ok(source) => run_source(&source, quiet),
        Err(err) => {
            print_error(&LispError::from(err));
            false
        }
    }
}

/// Returns false if the source failed to parse or any expression errored.
fn run_source(source: &str, quiet: bool) -> bool {
    let mut interpreter = Interpreter::new();
    let results = match interpreter.run_each(source) {
        Ok(results) => results,
        Err(err) => {
            print_error(&err);
            return false;
        }
    };

    let mut ok = true;
    for result in &results {
        match result {
            Ok(_) if quiet => {}
            Ok(_) => print_result(result),
            Err(err) => {
                ok = false;
                print_error(err);
            }
        }
    }
    ok
}

fn print_result(result: &Result<Value, LispError>) {
    match result {
        Ok(val) => println!("-> {}", val),
        Err(err) => print_error(err),
    }
}

fn print_error(err: &LispError) {
    eprintln!("{}", err.to_string().red());
}
