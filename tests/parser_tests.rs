// tests/parser_tests.rs

use wq_lang::ast::{
    BinOp, Expr, ExprKind, Literal, ParenForm, Program, Statement, Suffix, UnaryOp,
};
use wq_lang::diagnostic::{ParseError, Severity};
use wq_lang::lexer::Lexer;
use wq_lang::parser::{MAX_NESTING, ParseOptions, Parser, parse, parse_with};

fn parse_ok(source: &str) -> Program {
    let output = parse(source);
    assert!(
        !output.has_errors(),
        "{:?} failed: {:?}",
        source,
        output.diagnostics
    );
    output.program
}

/// The single expression statement in `source`.
fn expr(source: &str) -> Expr {
    let mut program = parse_ok(source);
    assert_eq!(program.statements.len(), 1, "{:?}", program.statements);
    match program.statements.remove(0) {
        Statement::Expression(expr) => expr,
        other => panic!("expected expression, got {:?}", other),
    }
}

fn fails(source: &str) -> bool {
    parse(source).has_errors()
}

fn is_int(expr: &Expr, n: i64) -> bool {
    matches!(expr.kind, ExprKind::Literal(Literal::Integer(m)) if m == n)
}

fn is_var(expr: &Expr, name: &str) -> bool {
    matches!(&expr.kind, ExprKind::Variable { name: n, .. } if n == name)
}

// ============================================================================
// Precedence
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    // Add(1, Multiply(2, 3))
    match expr("1+2*3").kind {
        ExprKind::BinaryOp {
            op: BinOp::Add,
            left,
            right,
        } => {
            assert!(is_int(&left, 1));
            assert!(matches!(
                right.kind,
                ExprKind::BinaryOp {
                    op: BinOp::Multiply,
                    ..
                }
            ));
        }
        other => panic!("Expected addition, got {:?}", other),
    }
}

#[test]
fn test_binary_operators_are_left_associative() {
    match expr("1-2-3").kind {
        ExprKind::BinaryOp {
            op: BinOp::Subtract,
            left,
            right,
        } => {
            assert!(matches!(
                left.kind,
                ExprKind::BinaryOp {
                    op: BinOp::Subtract,
                    ..
                }
            ));
            assert!(is_int(&right, 3));
        }
        other => panic!("Expected subtraction, got {:?}", other),
    }
}

#[test]
fn test_negation_applies_after_power() {
    // -(2^2)
    match expr("-2^2").kind {
        ExprKind::UnaryOp { ops, operand } => {
            assert_eq!(ops, vec![UnaryOp::Negate]);
            assert!(matches!(operand.kind, ExprKind::Power { .. }));
        }
        other => panic!("Expected unary op, got {:?}", other),
    }
}

#[test]
fn test_power_is_right_associative() {
    match expr("2^3^2").kind {
        ExprKind::Power { base, exponent } => {
            assert!(is_int(&base, 2));
            assert!(matches!(exponent.kind, ExprKind::Power { .. }));
        }
        other => panic!("Expected power, got {:?}", other),
    }
}

#[test]
fn test_signed_exponent() {
    match expr("2^-1").kind {
        ExprKind::Power { exponent, .. } => {
            assert!(matches!(exponent.kind, ExprKind::UnaryOp { .. }));
        }
        other => panic!("Expected power, got {:?}", other),
    }
}

#[test]
fn test_stacked_prefixes() {
    match expr("-#x").kind {
        ExprKind::UnaryOp { ops, operand } => {
            assert_eq!(ops, vec![UnaryOp::Negate, UnaryOp::Count]);
            assert!(is_var(&operand, "x"));
        }
        other => panic!("Expected unary op, got {:?}", other),
    }
}

#[test]
fn test_comparison_is_looser_than_additive() {
    match expr("a+1<b").kind {
        ExprKind::BinaryOp {
            op: BinOp::LessThan,
            left,
            ..
        } => assert!(matches!(left.kind, ExprKind::BinaryOp { op: BinOp::Add, .. })),
        other => panic!("Expected comparison, got {:?}", other),
    }
}

#[test]
fn test_both_inequality_spellings() {
    for source in ["x~y", "x!=y"] {
        assert!(matches!(
            expr(source).kind,
            ExprKind::BinaryOp {
                op: BinOp::NotEqual,
                ..
            }
        ));
    }
}

#[test]
fn test_integer_division_and_modulo() {
    assert!(matches!(
        expr("7/.2").kind,
        ExprKind::BinaryOp {
            op: BinOp::IntDivide,
            ..
        }
    ));
    assert!(matches!(
        expr("7%.2").kind,
        ExprKind::BinaryOp {
            op: BinOp::FloatModulo,
            ..
        }
    ));
}

#[test]
fn test_comma_collects_elements() {
    match expr("1+1,2,3").kind {
        ExprKind::Comma { elements } => {
            assert_eq!(elements.len(), 3);
            assert!(matches!(
                elements[0].kind,
                ExprKind::BinaryOp { op: BinOp::Add, .. }
            ));
        }
        other => panic!("Expected comma, got {:?}", other),
    }
}

#[test]
fn test_pipe_is_looser_than_comma() {
    match expr("x,y|f|g").kind {
        ExprKind::Pipe { stages } => {
            assert_eq!(stages.len(), 3);
            assert!(matches!(stages[0].kind, ExprKind::Comma { .. }));
            assert!(is_var(&stages[2], "g"));
        }
        other => panic!("Expected pipe, got {:?}", other),
    }
}

#[test]
fn test_assignment_is_right_associative() {
    match expr("a:b:1").kind {
        ExprKind::Assignment { left, right } => {
            assert!(is_var(&left, "a"));
            assert!(matches!(right.kind, ExprKind::Assignment { .. }));
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

#[test]
fn test_assignment_to_any_expression() {
    match expr("m[1]: x | f").kind {
        ExprKind::Assignment { left, right } => {
            assert!(matches!(left.kind, ExprKind::Postfix { .. }));
            assert!(matches!(right.kind, ExprKind::Pipe { .. }));
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}

// ============================================================================
// Juxtaposition and indexing
// ============================================================================

fn suffixes(expr: Expr) -> (Expr, Vec<Suffix>) {
    match expr.kind {
        ExprKind::Postfix { base, suffixes } => (*base, suffixes),
        other => panic!("Expected postfix, got {:?}", other),
    }
}

#[test]
fn test_application_by_juxtaposition() {
    let (base, suffixes) = suffixes(expr("f x"));
    assert!(is_var(&base, "f"));
    assert_eq!(suffixes.len(), 1);
    assert!(matches!(&suffixes[0], Suffix::Apply { arg } if is_var(arg, "x")));
}

#[test]
fn test_minus_between_operands_is_subtraction() {
    for source in ["f-x", "f -x", "f - x"] {
        assert!(
            matches!(
                expr(source).kind,
                ExprKind::BinaryOp {
                    op: BinOp::Subtract,
                    ..
                }
            ),
            "{}",
            source
        );
    }
    assert_ne!(expr("f x").kind, expr("f-x").kind);
}

#[test]
fn test_negated_argument_needs_parentheses() {
    let (_, suffixes) = suffixes(expr("f (-x)"));
    assert!(matches!(
        &suffixes[0],
        Suffix::Apply { arg } if matches!(arg.kind, ExprKind::Paren(ParenForm::List(_)))
    ));
}

#[test]
fn test_application_chains_left() {
    let (base, suffixes) = suffixes(expr("f x y"));
    assert!(is_var(&base, "f"));
    assert_eq!(suffixes.len(), 2);
    assert!(matches!(&suffixes[1], Suffix::Apply { arg } if is_var(arg, "y")));
}

#[test]
fn test_argument_keeps_its_index() {
    // f (x[1])
    let (_, suffixes) = suffixes(expr("f x[1]"));
    assert_eq!(suffixes.len(), 1);
    match &suffixes[0] {
        Suffix::Apply { arg } => assert!(matches!(arg.kind, ExprKind::Postfix { .. })),
        other => panic!("Expected apply, got {:?}", other),
    }
}

#[test]
fn test_argument_keeps_its_exponent() {
    let (_, suffixes) = suffixes(expr("f x^2"));
    assert!(matches!(
        &suffixes[0],
        Suffix::Apply { arg } if matches!(arg.kind, ExprKind::Power { .. })
    ));
}

#[test]
fn test_count_prefix_in_argument() {
    let (_, suffixes) = suffixes(expr("f #x"));
    assert!(matches!(
        &suffixes[0],
        Suffix::Apply { arg } if matches!(arg.kind, ExprKind::UnaryOp { .. })
    ));
}

#[test]
fn test_application_binds_tighter_than_operators() {
    match expr("f x + 1").kind {
        ExprKind::BinaryOp {
            op: BinOp::Add,
            left,
            ..
        } => assert!(matches!(left.kind, ExprKind::Postfix { .. })),
        other => panic!("Expected addition, got {:?}", other),
    }
}

#[test]
fn test_index_suffixes() {
    let (_, suffixes) = suffixes(expr("m[1;2][3]"));
    assert_eq!(suffixes.len(), 2);
    assert!(matches!(&suffixes[0], Suffix::Index { args, .. } if args.len() == 2));
    assert!(matches!(&suffixes[1], Suffix::Index { args, .. } if args.len() == 1));
}

#[test]
fn test_empty_index() {
    let (_, suffixes) = suffixes(expr("f[]"));
    assert!(matches!(&suffixes[0], Suffix::Index { args, .. } if args.is_empty()));
}

#[test]
fn test_index_must_touch_its_base() {
    assert!(fails("f [1]"));
}

#[test]
fn test_builtins_parse_as_variables() {
    assert!(matches!(
        expr("sqrt").kind,
        ExprKind::Variable { ref name, builtin: true } if name == "sqrt"
    ));
    assert!(matches!(
        expr("x").kind,
        ExprKind::Variable { builtin: false, .. }
    ));
}

// ============================================================================
// Parenthesized forms
// ============================================================================

#[test]
fn test_unit() {
    assert!(matches!(expr("()").kind, ExprKind::Paren(ParenForm::Unit)));
    assert!(matches!(expr("(\n)").kind, ExprKind::Paren(ParenForm::Unit)));
}

#[test]
fn test_grouping_is_single_item_list() {
    match expr("(1+2)*3").kind {
        ExprKind::BinaryOp {
            op: BinOp::Multiply,
            left,
            ..
        } => assert!(matches!(
            left.kind,
            ExprKind::Paren(ParenForm::List(ref items)) if items.len() == 1
        )),
        other => panic!("Expected multiplication, got {:?}", other),
    }
}

#[test]
fn test_list() {
    match expr("(1;2;3)").kind {
        ExprKind::Paren(ParenForm::List(items)) => {
            assert_eq!(items.len(), 3);
            assert!(is_int(&items[2], 3));
        }
        other => panic!("Expected list, got {:?}", other),
    }
}

#[test]
fn test_list_separators() {
    for source in ["(1;2;)", "(1\n2)", "(\n1;\n2\n)", "(1\n;2)"] {
        match expr(source).kind {
            ExprKind::Paren(ParenForm::List(items)) => assert_eq!(items.len(), 2, "{:?}", source),
            other => panic!("Expected list for {:?}, got {:?}", source, other),
        }
    }
}

#[test]
fn test_missing_item_separator() {
    assert!(fails("(1;;2)"));
    assert!(fails("(1;2"));
}

#[test]
fn test_dict() {
    match expr("(`a:1;`b:2)").kind {
        ExprKind::Paren(ParenForm::Dict(entries)) => {
            let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
            assert_eq!(keys, vec!["a", "b"]);
            assert!(is_int(&entries[0].value, 1));
            assert!(is_int(&entries[1].value, 2));
        }
        other => panic!("Expected dict, got {:?}", other),
    }
}

#[test]
fn test_symbol_without_colon_starts_a_list() {
    assert!(matches!(
        expr("(`a;`b)").kind,
        ExprKind::Paren(ParenForm::List(_))
    ));
}

#[test]
fn test_dict_entries_need_symbol_keys() {
    assert!(fails("(`a:1;2)"));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_empty_function() {
    for source in ["{}", "{;\n}"] {
        assert!(matches!(
            expr(source).kind,
            ExprKind::Function { ref params, body: None } if params.is_empty()
        ));
    }
}

#[test]
fn test_function_with_params() {
    match expr("{[a;b] a+b;}").kind {
        ExprKind::Function { params, body } => {
            let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["a", "b"]);
            assert_eq!(body.map(|b| b.statements.len()), Some(1));
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_function_body_statements() {
    match expr("{[x]\n  y: x*2\n  y+1\n}").kind {
        ExprKind::Function { params, body } => {
            assert_eq!(params.len(), 1);
            assert_eq!(body.map(|b| b.statements.len()), Some(2));
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_empty_param_list() {
    assert!(matches!(
        expr("{[] 1}").kind,
        ExprKind::Function { ref params, body: Some(_) } if params.is_empty()
    ));
}

#[test]
fn test_builtin_cannot_be_a_param() {
    let output = parse("{[sum] sum}");
    assert!(output.has_errors());
    assert!(output.diagnostics[0].message.contains("builtin `sum`"));
}

#[test]
fn test_params_need_semicolons() {
    assert!(fails("{[a b] a}"));
    assert!(fails("{[a,b] a}"));
}

#[test]
fn test_unclosed_function() {
    assert!(fails("{[a] a"));
}

// ============================================================================
// Control forms
// ============================================================================

#[test]
fn test_conditional() {
    match expr("$[c;1;2]").kind {
        ExprKind::Conditional {
            cond,
            then_branch,
            else_branch,
        } => {
            assert!(is_var(&cond, "c"));
            assert_eq!(then_branch.statements.len(), 1);
            assert_eq!(else_branch.statements.len(), 1);
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_conditional_arm_separators() {
    match expr("$[c\n  a: 1\n  b: 2; 3; 4]").kind {
        ExprKind::Conditional {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(then_branch.statements.len(), 2);
            assert_eq!(else_branch.statements.len(), 2);
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_newline_between_conditional_arms() {
    // Conditional(c, [1], [2])
    match expr("$[c\n1\n2]").kind {
        ExprKind::Conditional {
            cond,
            then_branch,
            else_branch,
        } => {
            assert!(is_var(&cond, "c"));
            assert_eq!(then_branch.statements.len(), 1);
            assert_eq!(else_branch.statements.len(), 1);
            assert_eq!(then_branch.span.start.line, 2);
            assert_eq!(else_branch.span.start.line, 3);
        }
        other => panic!("Expected conditional, got {:?}", other),
    }

    // only the last line moves to the false arm
    match expr("$[c\n  a: 1\n  b: 2\n  3\n]").kind {
        ExprKind::Conditional {
            then_branch,
            else_branch,
            ..
        } => {
            assert_eq!(then_branch.statements.len(), 2);
            assert_eq!(else_branch.statements.len(), 1);
            assert_eq!(then_branch.span.end.line, 3);
        }
        other => panic!("Expected conditional, got {:?}", other),
    }
}

#[test]
fn test_conditional_needs_both_arms() {
    assert!(fails("$[c;1]"));
    assert!(fails("$[c]"));
    assert!(fails("$[c\n1]"));
    assert!(fails("$[c\n1\n]"));
}

#[test]
fn test_one_arm_conditional() {
    for source in ["$.[c;1]", "$ .[c;1]", "$.[c;1;2;]"] {
        assert!(
            matches!(expr(source).kind, ExprKind::ConditionalOneArm { .. }),
            "{}",
            source
        );
    }
    match expr("$.[c;a;b]").kind {
        ExprKind::ConditionalOneArm { branch, .. } => assert_eq!(branch.statements.len(), 2),
        other => panic!("Expected one-arm conditional, got {:?}", other),
    }
}

#[test]
fn test_while_and_for() {
    match expr("W[i<3;i:i+1;]").kind {
        ExprKind::While { cond, body } => {
            assert!(matches!(
                cond.kind,
                ExprKind::BinaryOp {
                    op: BinOp::LessThan,
                    ..
                }
            ));
            assert_eq!(body.statements.len(), 1);
        }
        other => panic!("Expected while, got {:?}", other),
    }
    assert!(matches!(expr("N[3;x:x*2]").kind, ExprKind::For { .. }));
}

#[test]
fn test_loop_letters_as_names() {
    assert!(matches!(expr("W: 1").kind, ExprKind::Assignment { .. }));
    assert!(matches!(expr("N + 1").kind, ExprKind::BinaryOp { .. }));
}

#[test]
fn test_control_words() {
    match expr("{@r x+1}").kind {
        ExprKind::Function {
            body: Some(body), ..
        } => match &body.statements[0] {
            Statement::Expression(e) => assert!(matches!(
                &e.kind,
                ExprKind::Return(Some(value)) if matches!(value.kind, ExprKind::BinaryOp { .. })
            )),
            other => panic!("Expected expression, got {:?}", other),
        },
        other => panic!("Expected function, got {:?}", other),
    }

    assert!(matches!(expr("@r").kind, ExprKind::Return(None)));
    assert!(matches!(expr("@r -1").kind, ExprKind::Return(Some(_))));
    assert!(matches!(expr("@b").kind, ExprKind::Break));
    assert!(matches!(expr("@c").kind, ExprKind::Continue));
    assert!(matches!(
        expr("@a x=1").kind,
        ExprKind::Assert(ref value) if matches!(value.kind, ExprKind::BinaryOp { op: BinOp::Equal, .. })
    ));
    assert!(matches!(
        expr("@t f x").kind,
        ExprKind::Try(ref value) if matches!(value.kind, ExprKind::Postfix { .. })
    ));
}

#[test]
fn test_control_words_in_loops() {
    match expr("W[1;$.[done;@b];@c]").kind {
        ExprKind::While { body, .. } => assert_eq!(body.statements.len(), 2),
        other => panic!("Expected while, got {:?}", other),
    }
}

// ============================================================================
// Programs
// ============================================================================

#[test]
fn test_statement_separators() {
    let program = parse_ok("x:1;y:2\n\nz:3;");
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn test_trivia_only_programs_are_empty() {
    for source in ["", "   ", "\n\n", "// just a comment", "  \n// a\n\t\n// b\n"] {
        let output = parse(source);
        assert!(output.diagnostics.is_empty(), "{:?}", source);
        assert!(output.program.is_empty(), "{:?}", source);
    }
}

#[test]
fn test_statements_need_separators() {
    let output = parse("f x)");
    assert!(output.has_errors());
    assert!(output.diagnostics[0].message.contains("`;` or newline"));
}

#[test]
fn test_magic_commands() {
    let program = parse_ok("!load lib.wq\nx: 1\n!time");
    assert_eq!(program.statements.len(), 3);
    assert!(matches!(
        &program.statements[0],
        Statement::MagicCommand { payload, .. } if payload == "load lib.wq"
    ));
    assert!(matches!(&program.statements[2], Statement::MagicCommand { .. }));
}

#[test]
fn test_magic_commands_only_at_top_level() {
    assert!(fails("{\n!x\n}"));
}

#[test]
fn test_shebang() {
    let program = parse_ok("#!/usr/bin/env wq\nx: 1");
    assert_eq!(program.shebang.as_deref(), Some("/usr/bin/env wq"));
    assert_eq!(program.statements.len(), 1);
}

#[test]
fn test_legacy_spelling_warns() {
    let output = parse("x: Inf");
    assert!(!output.has_errors());
    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(output.diagnostics[0].severity, Severity::Warning);
    assert!(output.diagnostics[0].message.contains("`inf`"));

    assert!(parse("x: inf").diagnostics.is_empty());
}

#[test]
fn test_unterminated_string_is_fatal() {
    let output = parse("x: \"abc");
    assert!(output.has_errors());
    assert_eq!(output.diagnostics.len(), 1);
    assert!(output.diagnostics[0].message.contains("unterminated string"));
}

#[test]
fn test_fail_fast_keeps_partial_program() {
    let output = parse("a: 1\nb: )\nc: 3");
    assert_eq!(output.program.statements.len(), 1);
    assert_eq!(output.errors().count(), 1);
    assert_eq!(output.diagnostics[0].span.start.line, 2);
}

#[test]
fn test_recovery_reports_each_bad_statement() {
    let output = parse_with(
        "a: 1 +\nb: 2\nc: )\nd: 4",
        ParseOptions { recover: true },
    );
    assert_eq!(output.program.statements.len(), 2);
    let lines: Vec<usize> = output.errors().map(|d| d.span.start.line).collect();
    assert_eq!(lines, vec![1, 3]);
}

#[test]
fn test_recovery_stops_at_lex_errors() {
    let output = parse_with("a: )\nb: 'xy'\nc: 1", ParseOptions { recover: true });
    assert_eq!(output.errors().count(), 2);
    assert!(output.program.statements.is_empty());
}

#[test]
fn test_deep_nesting_is_an_error() {
    let depth = 10_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let output = parse(&source);
    assert_eq!(output.errors().count(), 1);
    assert!(output.diagnostics[0].message.contains("shallower nesting"));

    let chain = format!("x: {}\ny: 2", "-2^".repeat(depth));
    let output = parse_with(&chain, ParseOptions { recover: true });
    assert_eq!(output.errors().count(), 1);
    assert_eq!(output.program.statements.len(), 1);
}

#[test]
fn test_nesting_up_to_the_limit() {
    let depth = MAX_NESTING - 1;
    let parens = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert!(!fails(&parens));
    let functions = format!("{}x{}", "{".repeat(depth), "}".repeat(depth));
    assert!(!fails(&functions));
    assert!(fails(&format!("{}1{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING))));
    assert!(fails(&format!("{}x{}", "$.[c;".repeat(MAX_NESTING), "]".repeat(MAX_NESTING))));
}

#[test]
fn test_diagnostics_are_in_source_order() {
    let output = parse_with("a: Inf +\nb: NaN", ParseOptions { recover: true });
    let offsets: Vec<usize> = output.diagnostics.iter().map(|d| d.span.start.offset).collect();
    let mut sorted = offsets.clone();
    sorted.sort();
    assert_eq!(offsets, sorted);
    assert_eq!(output.diagnostics.len(), 3);
}

// ============================================================================
// Parser API
// ============================================================================

#[test]
fn test_single_expression() {
    let mut parser = Parser::new(Lexer::new("\n1 + 2\n")).unwrap();
    let expr = parser.parse().unwrap();
    assert!(matches!(expr.kind, ExprKind::BinaryOp { op: BinOp::Add, .. }));
}

#[test]
fn test_single_expression_rejects_trailing_input() {
    let mut parser = Parser::new(Lexer::new("1; 2")).unwrap();
    assert!(matches!(parser.parse(), Err(ParseError::Syntax(_))));
}

#[test]
fn test_parse_program_returns_first_error() {
    let mut parser = Parser::new(Lexer::new("x: (")).unwrap();
    let err = parser.parse_program().unwrap_err();
    assert!(matches!(err, ParseError::Syntax(ref e) if e.found == "end of input"));
}

#[test]
fn test_parser_collects_skipped_errors() {
    let mut parser = Parser::new(Lexer::new("a: )\nb: 2\nc: NaN"))
        .unwrap()
        .with_recovery(true);
    let program = parser.parse_program().unwrap();
    assert_eq!(program.statements.len(), 2);
    let severities: Vec<Severity> = parser.diagnostics().iter().map(|d| d.severity).collect();
    assert_eq!(severities, vec![Severity::Error, Severity::Warning]);
}

#[test]
fn test_lex_error_on_first_token() {
    assert!(matches!(
        Parser::new(Lexer::new("\"open")),
        Err(ParseError::Lex(_))
    ));
}

#[test]
fn test_spans() {
    let e = expr("x: 1 + 2");
    assert_eq!(e.span.start.offset, 0);
    assert_eq!(e.span.end.offset, 8);
    match e.kind {
        ExprKind::Assignment { right, .. } => {
            assert_eq!(right.span.start.offset, 3);
            assert_eq!(right.span.end.offset, 8);
        }
        other => panic!("Expected assignment, got {:?}", other),
    }
}
