use rustyline::completion::{Candidate, Completer};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::builtins;
use crate::env::Env;
use crate::interpreter::SpecialForm;


// Rustyline Helper for InteractiveStream.
pub struct CliHelper {
    env: Env,
}

pub struct CliCandidate {
    name: String,
}

impl CliHelper {
    /// Completes against `env` as it is at completion time, so later
    /// definitions show up without rebuilding the helper.
    pub fn new(env: Env) -> Self {
        Self { env }
    }

    fn names_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut res = SpecialForm::ALL
            .iter()
            .map(|form| form.name().to_string())
            .chain(builtins::names().map(str::to_string))
            .chain(self.env.symbols())
            .filter(|name| name.starts_with(prefix))
            .collect::<Vec<_>>();
        res.sort();
        res.dedup();
        res
    }

    fn word_bounds(&self, line: &str, pos: usize) -> (usize, usize) {
        let mut start: usize = 0;
        let mut end: usize = line.len();
        for (i, c) in line.char_indices() {
            if c.is_whitespace() || c == '(' || c == ')' || c == '"' {
                if i < pos {
                    start = i + c.len_utf8();
                } else {
                    end = i;
                    break;
                }
            }
        }
        (start, end)
    }
}


impl Completer for CliHelper {
    type Candidate = CliCandidate;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        let (start, _) = self.word_bounds(line, pos);
        let names = self.names_with_prefix(&line[start..pos]);
        Ok((
            start,
            names.into_iter().map(|name| CliCandidate { name }).collect(),
        ))
    }
}


impl Helper for CliHelper {}
impl Hinter for CliHelper {
    type Hint = String;
}
impl Highlighter for CliHelper {}
impl Validator for CliHelper {}


impl Candidate for CliCandidate {
    fn display(&self) -> &str {
        self.name.as_str()
    }

    fn replacement(&self) -> &str {
        self.name.as_str()
    }
}
