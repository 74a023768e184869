//! Line-oriented I/O used by the read, print, and format builtins.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;


pub trait Console {
    /// Shows `prompt` and blocks for one line, without its line ending.
    /// Ok(None) at end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    fn write_str(&mut self, text: &str) -> io::Result<()>;
}


/// Console over the process's stdin/stdout.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !prompt.is_empty() {
            self.write_str(prompt)?;
        }

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(&['\n', '\r'][..]).len();
        line.truncate(len);
        Ok(Some(line))
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()
    }
}


/// In-memory Console with scripted input and captured output.
///
/// Clones share the same buffers, so a caller can keep a handle after
/// giving the console to an Interpreter.
#[derive(Clone, Debug, Default)]
pub struct BufferConsole(Rc<RefCell<Buffers>>);

#[derive(Debug, Default)]
struct Buffers {
    input: VecDeque<String>,
    output: String,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(Rc::new(RefCell::new(Buffers {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
        })))
    }

    pub fn push_input<S: Into<String>>(&self, line: S) {
        self.0.borrow_mut().input.push_back(line.into());
    }

    pub fn output(&self) -> String {
        self.0.borrow().output.clone()
    }

    pub fn take_output(&self) -> String {
        std::mem::take(&mut self.0.borrow_mut().output)
    }
}

impl Console for BufferConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let mut buffers = self.0.borrow_mut();
        buffers.output.push_str(prompt);
        Ok(buffers.input.pop_front())
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.0.borrow_mut().output.push_str(text);
        Ok(())
    }
}
