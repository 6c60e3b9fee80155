//! Unit tests for the analyzer module.
//!
//! This module contains tests for:
//! - Scoping (declaration, lookup, shadowing)
//! - Operator typing rules
//! - Functions, calls and returns
//! - Arrays and subscripts
//! - Scope frames being released after failures

use std::rc::Rc;

use crate::{
    ast::{
        ast::Program,
        expressions::{BinaryOp, Expr, Literal, UnaryOp},
        statements::Stmt,
        types::Type,
    },
    errors::errors::{Error, ErrorImpl, MismatchKind},
    lexer::lexer::tokenize,
    parser::{
        parser::parse,
        tree::{Rule, SyntaxNode},
    },
    Position, Span,
};

use super::analyzer::{analyze, Analyzer};

fn analyze_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.boum".to_string()))?;
    let tree = parse(tokens, source)?;
    analyze(&tree)
}

fn error_of(source: &str) -> Error {
    analyze_source(source).unwrap_err()
}

fn leaf(rule: Rule, text: &str) -> SyntaxNode {
    SyntaxNode::new(rule, text.to_string(), Span::null(), vec![])
}

fn node(rule: Rule, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode::new(rule, String::new(), Span::null(), children)
}

#[test]
fn test_declaration_and_use() {
    let program = analyze_source("let x = 1;\nprint(x);").unwrap();

    assert_eq!(program.statements.len(), 2);
    match &program.statements[1] {
        Stmt::Print(print) => {
            assert_eq!(print.argument, Expr::variable("x", Type::NUM));
        }
        other => panic!("expected print, got {:?}", other),
    }
}

#[test]
fn test_undeclared_name() {
    let error = error_of("let x = 1;\nprint(y);");

    assert_eq!(error.get_error_name(), "UndeclaredName");
    assert_eq!(error.to_string(), "identifier `y` has not been declared");
    assert_eq!(error.get_position().0, 17);
}

#[test]
fn test_undeclared_name_in_every_position() {
    for source in [
        "print(nope);",
        "let a = nope + 1;",
        "nope = 1;",
        "let a = [1]; a[nope] = 2;",
        "while nope: ()",
        "fun f(a: num): (print(a + nope);)",
    ] {
        assert_eq!(error_of(source).get_error_name(), "UndeclaredName", "{}", source);
    }
}

#[test]
fn test_initializer_cannot_see_its_own_name() {
    let error = error_of("let x = x + 1;");
    assert_eq!(error.get_error_name(), "UndeclaredName");
}

#[test]
fn test_duplicate_declaration_in_same_scope() {
    let error = error_of("let a = 10;\nlet a = a + 1;");

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
    assert_eq!(error.to_string(), "variable `a` already declared in this scope");
}

#[test]
fn test_shadowing_round_trip() {
    let program = analyze_source(
        "let a = 1;\nwhile true: (let a = \"inner\"; print(a);)\nprint(a);",
    )
    .unwrap();

    let Stmt::While(while_stmt) = &program.statements[1] else {
        panic!("expected while");
    };
    let Stmt::Print(inner) = &while_stmt.body[1] else {
        panic!("expected print");
    };
    assert_eq!(inner.argument.ty(), Type::STR);

    let Stmt::Print(outer) = &program.statements[2] else {
        panic!("expected print");
    };
    assert_eq!(outer.argument.ty(), Type::NUM);
}

#[test]
fn test_inner_bindings_are_dropped_after_block() {
    let error = error_of("while true: (let inner = 1;)\nprint(inner);");
    assert_eq!(error.get_error_name(), "UndeclaredName");
}

#[test]
fn test_relational_and_additive_operand_pairs() {
    let samples = [
        ("num", "1"),
        ("str", "\"s\""),
        ("bool", "true"),
        ("num[]", "[1]"),
    ];

    for op in ["==", "!=", "<", "<=", ">", ">=", "+", "-"] {
        for (left_type, left) in samples {
            for (right_type, right) in samples {
                let source = format!("print({} {} {});", left, op, right);
                let result = analyze_source(&source);

                if left_type != right_type {
                    let error = result.unwrap_err();
                    assert_eq!(error.get_error_name(), "TypeMismatch", "{}", source);
                    match error.get_impl() {
                        ErrorImpl::TypeMismatch {
                            kind,
                            expected,
                            received,
                        } => {
                            assert_eq!(*kind, MismatchKind::Binary(op.to_string()));
                            assert_eq!(expected, left_type);
                            assert_eq!(received, right_type);
                        }
                        other => panic!("unexpected error {:?}", other),
                    }
                } else if left_type == "num" {
                    assert!(result.is_ok(), "{}", source);
                }
            }
        }
    }
}

#[test]
fn test_result_types() {
    let program = analyze_source("print(1 < 2);\nprint(\"a\" + \"b\");\nprint(2 ** 3 % 2);").unwrap();
    let types: Vec<Type> = program
        .statements
        .iter()
        .map(|stmt| match stmt {
            Stmt::Print(print) => print.argument.ty(),
            other => panic!("expected print, got {:?}", other),
        })
        .collect();

    assert_eq!(types, vec![Type::BOOL, Type::STR, Type::NUM]);
}

#[test]
fn test_multiplicative_and_exponent_need_numbers() {
    let error = error_of("print(\"a\" * 2);");
    assert_eq!(
        error.to_string(),
        "type mismatch in operator `*`: expected `num`, received `str`"
    );

    let error = error_of("print(2 ** true);");
    assert_eq!(
        error.to_string(),
        "type mismatch in operator `**`: expected `num`, received `bool`"
    );
}

#[test]
fn test_unary_rules() {
    let program = analyze_source("print(-1);\nprint(!false);").unwrap();
    let Stmt::Print(negation) = &program.statements[0] else {
        panic!("expected print");
    };
    assert_eq!(
        negation.argument,
        Expr::unary(UnaryOp::Negate, Expr::number(1.0), Type::NUM)
    );

    let error = error_of("print(-true);");
    assert_eq!(
        error.to_string(),
        "type mismatch in unary operator `-`: expected `num`, received `bool`"
    );

    let error = error_of("print(!1);");
    assert_eq!(error.get_error_name(), "TypeMismatch");
}

#[test]
fn test_number_literals() {
    let program = analyze_source("print(12n);\nprint(1.5e2);").unwrap();
    let Stmt::Print(big) = &program.statements[0] else {
        panic!("expected print");
    };
    assert_eq!(big.argument, Expr::Literal(Literal::BigInt(12)));

    let Stmt::Print(float) = &program.statements[1] else {
        panic!("expected print");
    };
    assert_eq!(float.argument, Expr::number(150.0));
}

#[test]
fn test_oversized_bigint_literal() {
    let error = error_of("print(999999999999999999999999999999999999999999n);");
    assert_eq!(error.get_error_name(), "NumberParseError");

    let error = error_of("print(170141183460469231731687303715884105728n);");
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_largest_bigint_literal() {
    let program = analyze_source("print(170141183460469231731687303715884105727n);").unwrap();
    let Stmt::Print(print) = &program.statements[0] else {
        panic!("expected print");
    };
    assert_eq!(print.argument, Expr::Literal(Literal::BigInt(i128::MAX)));
}

#[test]
fn test_assignment_types() {
    assert!(analyze_source("let x = 1; x = 2;").is_ok());

    let error = error_of("let x = 1; x = \"two\";");
    assert_eq!(
        error.to_string(),
        "type mismatch in assignment: expected `num`, received `str`"
    );
}

#[test]
fn test_while_condition_must_be_bool() {
    let error = error_of("while 1: ()");
    assert_eq!(
        error.to_string(),
        "type mismatch in loop condition: expected `bool`, received `num`"
    );
}

#[test]
fn test_function_declaration_and_call() {
    let program =
        analyze_source("fun add(a: num, b: num) -> num: (return a + b;)\nprint(add(1, 2));")
            .unwrap();

    let Stmt::FunDec(fun_dec) = &program.statements[0] else {
        panic!("expected function");
    };
    assert_eq!(fun_dec.fun.name, "add");
    assert_eq!(fun_dec.fun.params.len(), 2);
    assert_eq!(fun_dec.fun.return_type, Type::NUM);

    let Stmt::Print(print) = &program.statements[1] else {
        panic!("expected print");
    };
    let Expr::Call(call) = &print.argument else {
        panic!("expected call");
    };
    assert_eq!(call.name, "add");
    assert_eq!(call.ty, Type::NUM);
}

#[test]
fn test_recursive_function() {
    let source = "fun fact(n: num) -> num: (\n  return n * fact(n - 1);\n)";
    assert!(analyze_source(source).is_ok());
}

#[test]
fn test_parameters_are_scoped_to_function() {
    let error = error_of("fun f(a: num): (print(a);)\nprint(a);");
    assert_eq!(error.get_error_name(), "UndeclaredName");
}

#[test]
fn test_duplicate_parameter() {
    let error = error_of("fun f(a: num, a: str): ()");
    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
}

#[test]
fn test_duplicate_function() {
    let error = error_of("fun f(): ()\nfun f(): ()");
    assert_eq!(error.get_error_name(), "DuplicateFunction");
}

#[test]
fn test_call_statement() {
    let program = analyze_source("fun hello(): (print(\"hi\");)\nhello();").unwrap();
    assert!(matches!(&program.statements[1], Stmt::Call(call) if call.name == "hello"));
}

#[test]
fn test_undeclared_function() {
    let error = error_of("missing(1);");
    assert_eq!(error.to_string(), "function `missing` not declared");
}

#[test]
fn test_arity_mismatch() {
    let error = error_of("fun add(a: num, b: num) -> num: (return a + b;)\nprint(add(1));");

    assert_eq!(error.get_error_name(), "ArityMismatch");
    assert!(error
        .to_string()
        .contains("expects 2 arguments but got 1"));
}

#[test]
fn test_argument_type_mismatch() {
    let error = error_of("fun f(a: num, b: str): ()\nf(1, 2);");
    assert_eq!(
        error.to_string(),
        "argument 2 of `f` expects type `str` but got `num`"
    );
}

#[test]
fn test_missing_required_return() {
    let error = error_of("let x = 1;\nlet y = 2;\nfun f() -> num: (x = x + y;)");

    assert_eq!(error.get_error_name(), "MissingRequiredReturn");
    assert_eq!(error.to_string(), "function `f` must return a `num`");
}

#[test]
fn test_return_inside_loop_satisfies_return_check() {
    assert!(analyze_source("fun f() -> num: (while true: (return 1;))").is_ok());
    assert!(analyze_source("fun f() -> num: (while true: (while false: (return 1;)))").is_ok());
    assert!(analyze_source("fun f() -> num: (while true: (return 1;) return 2;)").is_ok());
}

#[test]
fn test_nested_function_return_does_not_count_for_outer() {
    let error = error_of("fun f() -> num: (fun g() -> num: (return 1;) print(g());)");

    assert_eq!(error.get_error_name(), "MissingRequiredReturn");
    assert_eq!(error.to_string(), "function `f` must return a `num`");
}

#[test]
fn test_return_rules() {
    assert_eq!(error_of("return 1;").get_error_name(), "ReturnOutsideFunction");
    assert_eq!(
        error_of("fun f(): (return 1;)").get_error_name(),
        "VoidReturnsValue"
    );
    assert!(analyze_source("fun f(): (return;)").is_ok());

    let error = error_of("fun f() -> num: (return;)");
    assert_eq!(
        error.to_string(),
        "type mismatch in return type: expected `num`, received `void`"
    );

    let error = error_of("fun f() -> num: (return \"s\";)");
    assert_eq!(
        error.to_string(),
        "type mismatch in return type: expected `num`, received `str`"
    );
}

#[test]
fn test_unknown_type_annotation() {
    let error = error_of("fun f(a: number): ()");
    assert_eq!(error.get_error_name(), "UnknownType");
}

#[test]
fn test_arrays() {
    let program = analyze_source("let grid = [[1, 2], [3]];\nprint(grid[0][1]);").unwrap();

    let Stmt::VarDec(dec) = &program.statements[0] else {
        panic!("expected declaration");
    };
    assert_eq!(dec.variable.ty, Type::array_of(Type::array_of(Type::NUM)));
    assert_eq!(dec.variable.ty.to_string(), "num[][]");

    let Stmt::Print(print) = &program.statements[1] else {
        panic!("expected print");
    };
    assert_eq!(print.argument.ty(), Type::NUM);
}

#[test]
fn test_array_errors() {
    assert_eq!(error_of("print([]);").get_error_name(), "EmptyArrayLiteral");
    assert_eq!(
        error_of("print([1, \"a\"]);").get_error_name(),
        "HeterogeneousArray"
    );
    // Nested arrays are compared structurally
    assert_eq!(
        error_of("print([[1, 2], [\"a\", \"b\"]]);").get_error_name(),
        "HeterogeneousArray"
    );
}

#[test]
fn test_subscript_errors() {
    let error = error_of("let n = 1;\nprint(n[0]);");
    assert_eq!(
        error.to_string(),
        "only arrays can be subscripted, received `num`"
    );

    let error = error_of("let a = [1];\nprint(a[\"0\"]);");
    assert_eq!(
        error.to_string(),
        "array index must be a number, received `str`"
    );
}

#[test]
fn test_subscript_assignment() {
    let program = analyze_source("let a = [1, 2];\na[0] = 5;").unwrap();
    let Stmt::Assign(assign) = &program.statements[1] else {
        panic!("expected assignment");
    };
    assert!(matches!(assign.target, Expr::Subscript(_)));
}

#[test]
fn test_scopes_are_released_after_failure() {
    let mut analyzer = Analyzer::new();
    let tokens = tokenize("while true: (let a = 1; print(b);)".to_string(), None).unwrap();
    let tree = parse(tokens, "while true: (let a = 1; print(b);)").unwrap();

    assert!(analyzer.analyze_stmt(&tree.children[0]).is_err());
    assert_eq!(analyzer.scope_depth(), 1);

    // `a` went away with the failed block
    let use_a = leaf(Rule::Id, "a");
    assert!(analyzer.analyze_expr(&use_a).is_err());
}

#[test]
fn test_malformed_tree() {
    let tree = node(Rule::Program, vec![node(Rule::VarDec, vec![leaf(Rule::Id, "x")])]);
    let error = analyze(&tree).unwrap_err();

    assert_eq!(error.get_error_name(), "MalformedTree");
    assert_eq!(*error.get_position(), Position(0, Rc::new(String::from("<null>"))));
}

#[test]
fn test_hand_built_binary_tree() {
    let tree = node(
        Rule::Program,
        vec![node(
            Rule::PrintStmt,
            vec![node(
                Rule::Binary,
                vec![leaf(Rule::Num, "2"), leaf(Rule::Op, "*"), leaf(Rule::Num, "3")],
            )],
        )],
    );

    let program = analyze(&tree).unwrap();
    assert_eq!(
        program.statements[0],
        Stmt::Print(crate::ast::statements::PrintStmt {
            argument: Expr::binary(
                BinaryOp::Multiply,
                Expr::number(2.0),
                Expr::number(3.0),
                Type::NUM
            ),
        })
    );
}
