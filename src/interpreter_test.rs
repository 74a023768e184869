use super::*;

use crate::console::BufferConsole;


fn run(source: &str) -> Result<Vec<Value>, LispError> {
    Interpreter::with_console(Box::new(BufferConsole::new())).run(source)
}

fn last(source: &str) -> Value {
    run(source).unwrap().pop().unwrap()
}

fn last_err(source: &str) -> LispError {
    let mut interpreter = Interpreter::with_console(Box::new(BufferConsole::new()));
    let mut results = interpreter.run_each(source).unwrap();
    let err = results.pop().unwrap().unwrap_err();
    // Eval errors carry no position.
    assert!(!err.has_position());
    err
}


#[test]
fn self_evaluating() {
    assert_eq!(last("42"), Value::Integer(42));
    assert_eq!(last("2.5"), Value::Float(2.5));
    assert_eq!(last("\"s\""), Value::string("s"));
    assert_eq!(last("true"), Value::Boolean(true));
    assert_eq!(last("nil"), Value::Nil);
    assert_eq!(last("()"), Value::List(vec![]));
}

#[test]
fn global_constants() {
    assert_eq!(last("t"), Value::Boolean(true));
    assert_eq!(last("(list true false t nil)"), "(true false true nil)".parse::<Value>().unwrap());
}

#[test]
fn unbound_symbol() {
    assert_eq!(last_err("x").kind(), &ErrorKind::UnboundSymbol("x".to_string()));
    assert_eq!(last_err("(+ x 1)").kind(), &ErrorKind::UnboundSymbol("x".to_string()));
    assert_eq!(last_err("(frobnicate 1)").kind(), &ErrorKind::UnboundSymbol("frobnicate".to_string()));
}

#[test]
fn not_callable() {
    assert_eq!(last_err("(1 2)").kind(), &ErrorKind::NotCallable(Value::Integer(1)));
    assert!(matches!(last_err("((lambda (x) x) 1)").kind(), &ErrorKind::NotCallable(_)));
    assert_eq!(
        last_err("(let ((y 3)) (y))").kind(),
        &ErrorKind::NotCallable(Value::Integer(3))
    );
}

#[test]
fn if_branches() {
    assert_eq!(last("(if (< 1 2) \"yes\" \"no\")"), Value::string("yes"));
    assert_eq!(last("(if false 1 2)"), Value::Integer(2));
    assert_eq!(last("(if nil 1 2)"), Value::Integer(2));
    assert_eq!(last("(if t 1 2)"), Value::Integer(1));
}

#[test]
fn if_only_evaluates_taken_branch() {
    assert_eq!(last("(if true 1 (undefined-fn))"), Value::Integer(1));
}

#[test]
fn if_rejects_non_boolean_condition() {
    assert!(matches!(
        last_err("(if 0 1 2)").kind(),
        &ErrorKind::InvalidArgumentType { .. }
    ));
}

#[test]
fn if_arity() {
    assert_eq!(
        last_err("(if true 1)").kind(),
        &ErrorKind::ArityMismatch {
            name: "if".to_string(),
            given: 2,
            expected: ExpectedCount::Exactly(3),
        }
    );
}

#[test]
fn defun_returns_and_binds() {
    let mut interpreter = Interpreter::with_console(Box::new(BufferConsole::new()));
    let results = interpreter.run("(defun square (x) (* x x))").unwrap();
    assert_eq!(results[0].to_string(), "SQUARE");
    assert!(matches!(interpreter.env().get("square"), Some(Value::Function(_))));
    assert_eq!(interpreter.run("(square 4)").unwrap(), vec![Value::Integer(16)]);
}

#[test]
fn defun_invalid() {
    assert!(matches!(
        last_err("(defun 3 (x) x)").kind(),
        &ErrorKind::InvalidFunctionDefinition(_)
    ));
    assert!(matches!(
        last_err("(defun f x x)").kind(),
        &ErrorKind::InvalidFunctionDefinition(_)
    ));
    assert!(matches!(
        last_err("(defun f (x 1) x)").kind(),
        &ErrorKind::InvalidFunctionDefinition(_)
    ));
    assert!(matches!(
        last_err("(defun f (a a) a)").kind(),
        &ErrorKind::InvalidFunctionDefinition(_)
    ));
    assert!(matches!(
        last_err("(defun if (a) a)").kind(),
        &ErrorKind::InvalidFunctionDefinition(_)
    ));
}

#[test]
fn user_arity_mismatch() {
    assert_eq!(
        last_err("(defun f (a b) a) (f 1)").kind(),
        &ErrorKind::ArityMismatch {
            name: "f".to_string(),
            given: 1,
            expected: ExpectedCount::Exactly(2),
        }
    );
}

#[test]
fn lambda_is_anonymous() {
    let val = last("(lambda (x) x)");
    assert_eq!(val.to_string(), "FUNCTION");
    match val {
        Value::Function(function) => {
            assert_eq!(function.name(), None);
            assert_eq!(function.params(), &["x".to_string()]);
        }
        other => panic!("expected a function, got {}", other),
    }
}

#[test]
fn lambda_bound_by_let_is_callable() {
    assert_eq!(
        last("(let ((double (lambda (n) (* 2 n)))) (double 21))"),
        Value::Integer(42)
    );
}

#[test]
fn let_sequential() {
    assert_eq!(last("(let ((a 10) (b 20)) (+ a b))"), Value::Integer(30));
    assert_eq!(last("(let ((a 1) (b (+ a 1))) b)"), Value::Integer(2));
}

#[test]
fn let_does_not_leak() {
    let mut interpreter = Interpreter::with_console(Box::new(BufferConsole::new()));
    interpreter.run("(let ((hidden 1)) hidden)").unwrap();
    assert!(!interpreter.env().is_bound("hidden"));
}

#[test]
fn let_invalid_bindings() {
    assert!(matches!(last_err("(let x x)").kind(), &ErrorKind::InvalidLetBinding(_)));
    assert!(matches!(last_err("(let ((a)) a)").kind(), &ErrorKind::InvalidLetBinding(_)));
    assert!(matches!(last_err("(let ((1 2)) 1)").kind(), &ErrorKind::InvalidLetBinding(_)));
    assert!(matches!(last_err("(let (a) a)").kind(), &ErrorKind::InvalidLetBinding(_)));
}

#[test]
fn and_or_short_circuit() {
    assert_eq!(last("(and)"), Value::Boolean(true));
    assert_eq!(last("(or)"), Value::Boolean(false));
    assert_eq!(last("(and true (< 1 2))"), Value::Boolean(true));
    assert_eq!(last("(and false (undefined))"), Value::Boolean(false));
    assert_eq!(last("(or true (undefined))"), Value::Boolean(true));
    assert_eq!(last("(or nil false)"), Value::Boolean(false));
    assert!(matches!(
        last_err("(and true 1)").kind(),
        &ErrorKind::InvalidArgumentType { .. }
    ));
}

#[test]
fn not() {
    assert_eq!(last("(not true)"), Value::Boolean(false));
    assert_eq!(last("(not nil)"), Value::Boolean(true));
    assert!(matches!(
        last_err("(not \"x\")").kind(),
        &ErrorKind::InvalidArgumentType { .. }
    ));
}

#[test]
fn list_evaluates_elements() {
    assert_eq!(
        last("(list 1 (+ 1 1) \"three\")"),
        "(1 2 \"three\")".parse::<Value>().unwrap()
    );
    assert_eq!(last("(list)"), Value::List(vec![]));
}

#[test]
fn closures_capture_by_reference() {
    let source = "
        (defun make-adder (n) (lambda (x) (+ x n)))
        (let ((add5 (make-adder 5))) (add5 10))";
    assert_eq!(last(source), Value::Integer(15));

    // Later global defines are visible to earlier closures.
    let source = "
        (defun uses-later () (later 1))
        (defun later (x) (+ x 100))
        (uses-later)";
    assert_eq!(last(source), Value::Integer(101));
}

#[test]
fn args_evaluate_in_caller_env() {
    let source = "
        (defun f (x) (let ((x 100)) (g x)))
        (defun g (y) y)
        (let ((x 1)) (f (+ x 1)))";
    assert_eq!(last(source), Value::Integer(100));

    let source = "
        (defun id (x) x)
        (let ((x 7)) (id x))";
    assert_eq!(last(source), Value::Integer(7));
}

#[test]
fn user_function_shadows_builtin() {
    assert_eq!(
        last("(defun length (l) 99) (length (list 1))"),
        Value::Integer(99)
    );
    // Non-function bindings do not hide builtins.
    assert_eq!(
        last("(let ((car 5)) (car (list car)))"),
        Value::Integer(5)
    );
}

#[test]
fn run_stops_at_first_error() {
    let err = run("(+ 1 1) (car (list)) (+ 2 2)").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EmptyList("car"));
}

#[test]
fn run_each_continues() {
    let mut interpreter = Interpreter::with_console(Box::new(BufferConsole::new()));
    let results = interpreter.run_each("(+ 1 1) (/ 1 0) (+ 2 2)").unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0], Ok(Value::Integer(2)));
    assert!(results[1].is_err());
    assert_eq!(results[2], Ok(Value::Integer(4)));
}

#[test]
fn parse_errors_reject_chunk() {
    let mut interpreter = Interpreter::with_console(Box::new(BufferConsole::new()));
    let err = interpreter.run_each("(defun f (x) x) (f 1").unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
    assert_eq!((err.line(), err.col()), (1, 17));
    // Nothing was evaluated.
    assert!(!interpreter.env().is_bound("f"));
}

#[test]
fn special_form_names() {
    for form in SpecialForm::ALL.iter() {
        assert_eq!(SpecialForm::from_name(form.name()), Some(*form));
    }
    assert_eq!(SpecialForm::from_name("car"), None);
}
