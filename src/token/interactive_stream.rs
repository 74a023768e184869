//! Line editor front-end that yields complete chunks of source.

use log::debug;
use rustyline::error::ReadlineError;
use rustyline::Editor;

use super::cli_helper::CliHelper;
use super::tokenizer::Tokenizer;
use crate::env::Env;


/// Reads lines until every opened list is closed, then yields the
/// accumulated text as one chunk.
///
/// ^C abandons a partially entered chunk; ^D ends the stream.
pub struct InteractiveStream {
    editor: Editor<CliHelper>,
    tokenizer: Tokenizer,

    curr_expr: String,
}

impl InteractiveStream {
    pub fn new(env: Env) -> InteractiveStream {
        let mut editor = Editor::<CliHelper>::new();
        editor.set_helper(Some(CliHelper::new(env)));

        InteractiveStream {
            editor,
            tokenizer: Tokenizer::new(),

            curr_expr: String::default(),
        }
    }

    fn prompt(&self) -> String {
        match self.tokenizer.depth() {
            0 => "> ".to_string(),
            depth => format!("..{}", "  ".repeat(depth)),
        }
    }

    fn reset(&mut self) {
        self.tokenizer.clear();
        self.curr_expr.clear();
    }
}


impl Iterator for InteractiveStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let prompt = self.prompt();
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !self.curr_expr.is_empty() {
                        self.curr_expr.push('\n');
                    }
                    self.curr_expr += &line;
                    self.tokenizer.tokenize(&line);
                    self.tokenizer.tokenize("\n");

                    if self.tokenizer.depth() > 0 {
                        continue;
                    }
                    if self.curr_expr.trim().is_empty() {
                        self.reset();
                        continue;
                    }

                    let chunk = std::mem::take(&mut self.curr_expr);
                    self.editor.add_history_entry(chunk.as_str());
                    self.tokenizer.clear();
                    return Some(chunk);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    if self.tokenizer.depth() > 0 {
                        debug!("cancelled pending input: {:?}", self.curr_expr);
                    }
                    self.reset();
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    self.reset();
                    return None;
                }
                Err(err) => {
                    println!("[Readline Error]: {:?}", err);
                    println!();
                    self.reset();
                    continue;
                }
            }
        }
    }
}
