use crate::error::{Error, Reason};
use crate::types::{Key, Type};
use crate::value::Value;
use crate::{eval_line, eval_program, eval_raw, Environment};


macro_rules! assert_seq {
    ($x:expr , $y:expr $(,)?) => {
        assert_eq!(eval_raw($x), Ok(Value::from($y)))
    };
}

macro_rules! assert_err {
    ($x:expr , $y:expr $(,)?) => {
        assert_eq!(eval_raw($x), Ok(Value::from(Error::new($y))))
    };
}

fn key(name: &str) -> Key {
    Key::from(name)
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().copied().map(Value::Integer).collect()
}


#[test]
fn self_evaluating() {
    assert_seq!("1", 1);
    assert_seq!("-1", -1);
    assert_seq!("2.5", 2.5);
    assert_seq!("{1 2}", Value::QExpr(ints(&[1, 2])));
    assert_seq!("()", Value::sexpr());
    assert_seq!("(5)", 5);
    assert_seq!("((((7))))", 7);
}


#[test]
fn arithmetic() {
    assert_seq!("(+ 1 2)", 3);
    assert_seq!("(+ 1 2 3 4)", 10);
    assert_seq!("(- 10 1 2)", 7);
    assert_seq!("(- 5)", -5);
    assert_seq!("(- 2.5)", -2.5);
    assert_seq!("(* 2 3 4)", 24);
    assert_seq!("(/ 10 2)", 5);
    assert_seq!("(/ 7 2)", 3);
    assert_seq!("(% 7 3)", 1);
    assert_seq!("(^ 2 10)", 1024);
    assert_seq!("(^ 2 3 2)", 64);
    assert_seq!("(min 3 1 2)", 1);
    assert_seq!("(max 3 1 2)", 3);
    assert_seq!("(+ 1 (* 2 3) (- 10 4))", 13);

    assert_seq!("(add 1 2)", 3);
    assert_seq!("(sub 1 2)", -1);
    assert_seq!("(mul 3 4)", 12);
    assert_seq!("(div 9 3)", 3);
    assert_seq!("(mod 9 4)", 1);
    assert_seq!("(pow 3 2)", 9);
}


#[test]
fn mixed_arithmetic() {
    assert_seq!("(+ 1 2.5)", 3.5);
    assert_seq!("(+ 2.5 1)", 3.5);
    assert_seq!("(* 2 1.5)", 3.0);
    assert_seq!("(^ 4 0.5)", 2.0);
    assert_seq!("(max 1 2.5)", 2.5);

    assert!(matches!(eval_raw("(+ 1 2.0)"), Ok(Value::Decimal(_))));
    assert!(matches!(eval_raw("(min 1 2.5)"), Ok(Value::Decimal(_))));

    // Division and modulo keep an integer left operand integral
    assert_seq!("(/ 7.0 2)", 3.5);
    assert!(matches!(eval_raw("(/ 7 2.0)"), Ok(Value::Integer(3))));
    assert!(matches!(eval_raw("(% 7 2.5)"), Ok(Value::Integer(2))));
    assert!(matches!(eval_raw("(% 7.5 2)"), Ok(Value::Decimal(_))));
}


#[test]
fn integer_overflow_wraps() {
    assert_seq!("(+ 9223372036854775807 1)", i64::MIN);
    assert_seq!("(- -9223372036854775808)", i64::MIN);
    assert_seq!("(/ -9223372036854775808 -1)", i64::MIN);
}


#[test]
fn division_by_zero() {
    assert_err!("(/ 1 0)", Reason::DivisionByZero);
    assert_err!("(/ 1.0 0)", Reason::DivisionByZero);
    assert_err!("(/ 1 0.0)", Reason::DivisionByZero);
    assert_err!("(% 5 0)", Reason::DivisionByZero);
    assert_err!("(/ 10 2 0 5)", Reason::DivisionByZero);
}


#[test]
fn arithmetic_type_errors() {
    assert_err!("(+ 1 {2})", Reason::WrongType {
        index: 1,
        function: key("+"),
        received: Type::QExpr,
        expected: Type::Number,
    });

    // Types are checked before anything is computed
    assert_err!("(/ 1 0 {})", Reason::WrongType {
        index: 2,
        function: key("/"),
        received: Type::QExpr,
        expected: Type::Number,
    });
}


#[test]
fn comparison() {
    assert_seq!("(> 2 1)", 1);
    assert_seq!("(> 1 2)", 0);
    assert_seq!("(< 1 2)", 1);
    assert_seq!("(>= 2 2)", 1);
    assert_seq!("(<= 3 2)", 0);
    assert_seq!("(< 1 1.5)", 1);

    assert_err!("(> 1)", Reason::WrongArity { function: key(">"), received: 1, expected: 2 });
    assert_err!("(< 1 {})", Reason::WrongType {
        index: 1,
        function: key("<"),
        received: Type::QExpr,
        expected: Type::Number,
    });
}


#[test]
fn equality() {
    assert_seq!("(== 1 1)", 1);
    assert_seq!("(== 1 1.0)", 1);
    assert_seq!("(== 1 2)", 0);
    assert_seq!("(!= 1 2)", 1);
    assert_seq!("(== {1 2 {3}} {1 2 {3}})", 1);
    assert_seq!("(== {1 2} {1 3})", 0);
    assert_seq!("(== + +)", 1);
    assert_seq!("(== + -)", 0);
    assert_seq!(r"(== (\ {x} {x}) (\ {x} {x}))", 1);
}


#[test]
fn conditionals() {
    assert_seq!("(if (> 2 1) {+ 1 1} {+ 2 2})", 2);
    assert_seq!("(if (> 1 2) {+ 1 1} {+ 2 2})", 4);
    assert_seq!("(if 0.0 {1} {2})", 2);

    assert_err!("(if {} {1} {2})", Reason::WrongType {
        index: 0,
        function: key("if"),
        received: Type::QExpr,
        expected: Type::Number,
    });
}


#[test]
fn list_operations() {
    assert_seq!("(list 1 2 3)", Value::QExpr(ints(&[1, 2, 3])));
    assert_seq!("(head {1 2 3})", Value::QExpr(ints(&[1])));
    assert_seq!("(tail {1 2 3})", Value::QExpr(ints(&[2, 3])));
    assert_seq!("(init {1 2 3})", Value::QExpr(ints(&[1, 2])));
    assert_seq!("(len {1 2 3})", 3);
    assert_seq!("(len {})", 0);
    assert_seq!("(cons 1 {2 3})", Value::QExpr(ints(&[1, 2, 3])));
    assert_seq!("(cons {1} {})", Value::QExpr(vec![Value::QExpr(ints(&[1]))]));
    assert_seq!("(join {1} {2 3} {})", Value::QExpr(ints(&[1, 2, 3])));
    assert_seq!("(eval {+ 1 2})", 3);
    assert_seq!("(eval (head {(+ 1 2) (+ 10 20)}))", 3);
    assert_seq!("(eval (tail {tail tail {5 6 7}}))", Value::QExpr(ints(&[6, 7])));
}


#[test]
fn list_errors() {
    assert_err!("(head {})", Reason::EmptyList { function: key("head"), index: 0 });
    assert_err!("(tail {})", Reason::EmptyList { function: key("tail"), index: 0 });
    assert_err!("(init {})", Reason::EmptyList { function: key("init"), index: 0 });
    assert_err!("(head {1} {2})", Reason::WrongArity { function: key("head"), received: 2, expected: 1 });
    assert_err!("(head 1)", Reason::WrongType {
        index: 0,
        function: key("head"),
        received: Type::Integer,
        expected: Type::QExpr,
    });
    assert_err!("(join {1} 2)", Reason::WrongType {
        index: 1,
        function: key("join"),
        received: Type::Integer,
        expected: Type::QExpr,
    });
    assert_err!("(cons 1 2)", Reason::WrongType {
        index: 1,
        function: key("cons"),
        received: Type::Integer,
        expected: Type::QExpr,
    });
    assert_err!("(eval (list 1 2 3))", Reason::NotAFunction(Type::Integer));
}


#[test]
fn not_a_function() {
    assert_err!("(1 2 3)", Reason::NotAFunction(Type::Integer));
    assert_err!("({+} 2 3)", Reason::NotAFunction(Type::QExpr));
}


#[test]
fn unbound_symbols() {
    assert_err!("x", Reason::UnboundSymbol(key("x")));

    let env = Environment::new().into_ref();
    assert_eq!(
        eval_program(&env, "(+ 1 2)"),
        Ok(Value::from(Error::new(Reason::UnboundSymbol(key("+"))))),
    );
}


#[test]
fn first_error_wins() {
    assert_err!("(+ x (head {}))", Reason::UnboundSymbol(key("x")));
    assert_err!("(+ (head {}) x)", Reason::EmptyList { function: key("head"), index: 0 });
}


#[test]
fn siblings_of_errors_are_evaluated() {
    let env = Environment::global_with_builtins();
    assert_eq!(
        eval_program(&env, "(list (def {a} 1) nope (def {b} 2))"),
        Ok(Value::from(Error::new(Reason::UnboundSymbol(key("nope"))))),
    );
    assert_eq!(eval_program(&env, "(+ a b)"), Ok(Value::Integer(3)));
}


#[test]
fn definitions() {
    assert_seq!("(def {x} 100) x", 100);
    assert_seq!("(def {a b} 1 2) (+ a b)", 3);
    assert_seq!("(def {x} 1) (def {x} 2) x", 2);
    assert_seq!("(def {x} 1)", Value::sexpr());
    assert_seq!("(def {arglist} {a b x y}) (def arglist 1 2 3 4) (list a b x y)", Value::QExpr(ints(&[1, 2, 3, 4])));
    assert_seq!("(= {x} 5) x", 5);

    assert_err!("(def {a b} 1)", Reason::ArityMismatch { function: key("def"), symbols: 2, values: 1 });
    assert_err!("(def {a} 1 2)", Reason::ArityMismatch { function: key("def"), symbols: 1, values: 2 });
    assert_err!("(def {1} 2)", Reason::NotASymbol { function: key("def"), received: Type::Integer });
    assert_err!("(def 1 2)", Reason::WrongType {
        index: 0,
        function: key("def"),
        received: Type::Integer,
        expected: Type::QExpr,
    });
}


#[test]
fn local_and_global_definitions() {
    assert_seq!(r"(def {f} (\ {x} {def {y} x})) (f 1) y", 1);
    assert_err!(r"(def {f} (\ {x} {= {y} x})) (f 1) y", Reason::UnboundSymbol(key("y")));

    // Parameters live in the closure's frame and don't leak
    assert_err!(r"(def {f} (\ {x} {x})) (f 1) x", Reason::UnboundSymbol(key("x")));
}


#[test]
fn closures() {
    assert_seq!(r"(def {f} (\ {x y} {+ x y})) (f 1 2)", 3);
    assert_seq!(r"((\ {x} {* x x}) 7)", 49);
    assert_seq!(r"(def {curry} (\ {f xs} {eval (join (list f) xs)})) (curry + {1 2 3})", 6);
    assert_seq!(r"(def {twice} (\ {f x} {f (f x)})) (twice (\ {x} {* 2 x}) 5)", 20);

    assert_err!(r"(\ {x 1} {x})", Reason::NotASymbol { function: key("\\"), received: Type::Integer });
    assert_err!(r"(\ {x} 1)", Reason::WrongType {
        index: 1,
        function: key("\\"),
        received: Type::Integer,
        expected: Type::QExpr,
    });
}


#[test]
fn partial_application() {
    assert_seq!(r"(def {add2} (\ {x y} {+ x y})) (def {add2-5} (add2 5)) (add2-5 10)", 15);
    assert_seq!(r"(def {f} (\ {x y z} {list x y z})) (((f 1) 2) 3)", Value::QExpr(ints(&[1, 2, 3])));

    // Partially applied copies are independent of each other
    assert_seq!(r"(def {f} (\ {x y} {- x y})) (def {g} (f 10)) (def {h} (f 20)) (list (g 1) (h 1))", Value::QExpr(ints(&[9, 19])));
}


#[test]
fn variadic_arguments() {
    assert_seq!(r"((\ {x & xs} {xs}) 1 2 3)", Value::QExpr(ints(&[2, 3])));
    assert_seq!(r"((\ {x & xs} {xs}) 1)", Value::qexpr());
    assert_seq!(r"((\ {x & xs} {x}) 1 2 3)", 1);
    assert_seq!(r"((\ {& xs} {len xs}) 1 2 3 4)", 4);
    assert_seq!(r"(def {f} (\ {x & xs} {cons x xs})) (def {g} (f 1)) g", Value::QExpr(ints(&[1])));
}


#[test]
fn closure_argument_errors() {
    assert_err!(r"((\ {x} {x}) 1 2)", Reason::TooManyArguments { received: 2, expected: 1 });
    assert_err!(r"((\ {& xs ys} {xs}) 1)", Reason::InvalidRestFormat);
    assert_err!(r"((\ {x &} {x}) 1)", Reason::InvalidRestFormat);
    assert_err!(r"((\ {x &} {x}) 1 2)", Reason::InvalidRestFormat);
}


#[test]
fn free_variables_resolve_at_the_call_site() {
    assert_seq!(r"(def {get-y} (\ {_} {y})) (def {y} 5) (get-y 0)", 5);
    assert_seq!(r"(def {g} (\ {_} {z})) (def {h} (\ {z} {g 0})) (h 7)", 7);
    assert_err!(r"(def {g} (\ {_} {z})) (g 0)", Reason::UnboundSymbol(key("z")));
}


#[test]
fn recursion() {
    let program = r"
        ; sum of a list
        (def {sum} (\ {xs} {
            if (== xs {}) {0} {+ (eval (head xs)) (sum (tail xs))}
        }))
        (sum {1 2 3 4 5})
    ";
    assert_seq!(program, 15);
}


#[test]
fn line_semantics() {
    let env = Environment::global_with_builtins();
    assert_eq!(eval_line(&env, "+ 1 2"), Ok(Value::Integer(3)));
    assert_eq!(eval_line(&env, "def {x} 10"), Ok(Value::sexpr()));
    assert_eq!(eval_line(&env, "* x x"), Ok(Value::Integer(100)));
    assert_eq!(eval_line(&env, ""), Ok(Value::sexpr()));
    assert!(eval_line(&env, "(+ 1").is_err());
}
