use parenlisp::console::BufferConsole;
use parenlisp::error::LispError;
use parenlisp::interpreter::Interpreter;
use parenlisp::value::Value;


/// Returns a fresh interpreter plus a handle to the console it writes to.
pub fn setup() -> (Interpreter, BufferConsole) {
    // Integration tests will call this method multiple times; ignore the error.
    if let Err(_err) = env_logger::try_init() {}

    let console = BufferConsole::new();
    let interpreter = Interpreter::with_console(Box::new(console.clone()));
    (interpreter, console)
}

pub fn results<S: AsRef<str>>(interpreter: &mut Interpreter, s: S) -> Vec<Value> {
    interpreter.run(s).unwrap()
}

pub fn results_with_errors<S: AsRef<str>>(
    interpreter: &mut Interpreter,
    s: S,
) -> Vec<Result<Value, LispError>> {
    interpreter.run_each(s).unwrap()
}
