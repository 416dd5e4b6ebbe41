//! Unit tests for the parser module.
//!
//! This module contains tests for decoding the JSON program format including:
//! - Types and declarations
//! - Places and expressions, with and without the `Val` wrapper
//! - Statements and the optional `else` branch
//! - Top-level items
//! - Malformed input

use serde_json::json;

use super::{
    expr::{parse_expr, parse_place},
    parser::{parse, parse_extern, parse_function_definition, parse_struct_definition},
    stmt::parse_stmt,
    types::{parse_declaration, parse_identifier, parse_type},
};
use crate::{
    ast::{
        expressions::{BinaryOperator, Expression, Place, UnaryOperator},
        statements::Statement,
        types::Type,
    },
    errors::errors::{ErrorClass, ErrorImpl},
    Location,
};

#[test]
fn test_parse_scalar_types() {
    assert_eq!(parse_type(&json!("Int")).unwrap(), Type::Int);
    assert_eq!(parse_type(&json!("Nil")).unwrap(), Type::Nil);
    assert_eq!(
        parse_type(&json!({"Struct": "Node"})).unwrap(),
        Type::Struct(String::from("Node"))
    );
}

#[test]
fn test_parse_compound_types() {
    let ty = parse_type(&json!({"Ptr": {"Array": {"Ptr": {"Struct": "Node"}}}})).unwrap();
    assert_eq!(
        ty,
        Type::pointer(Type::array(Type::pointer(Type::Struct(String::from("Node")))))
    );

    let ty = parse_type(&json!({"Fn": [["Int", {"Ptr": "Int"}], "Int"]})).unwrap();
    assert_eq!(ty, Type::function(vec![Type::Int, Type::pointer(Type::Int)], Type::Int));
}

#[test]
fn test_parse_type_rejects_unknown_shape() {
    let error = parse_type(&json!("Float")).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedNode");
    assert_eq!(error.get_class(), ErrorClass::Input);
}

#[test]
fn test_parse_type_validates_struct_names() {
    let error = parse_type(&json!({"Ptr": {"Struct": "9lives"}})).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidIdentifier {
            name: String::from("9lives")
        }
    );
}

#[test]
fn test_parse_declaration() {
    let declaration = parse_declaration(&json!({"name": "xs", "typ": {"Array": "Int"}})).unwrap();
    assert_eq!(declaration.name, "xs");
    assert_eq!(declaration.ty, Type::array(Type::Int));
}

#[test]
fn test_parse_declaration_rejects_bad_name() {
    let error = parse_declaration(&json!({"name": "a-b", "typ": "Int"})).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidIdentifier");
}

#[test]
fn test_parse_type_ignores_unknown_keys() {
    assert_eq!(
        parse_type(&json!({"Struct": "Node", "loc": 3})).unwrap(),
        Type::Struct(String::from("Node"))
    );
    assert_eq!(
        parse_type(&json!({"span": [1, 4], "Ptr": {"Array": "Int", "loc": 7}})).unwrap(),
        Type::pointer(Type::array(Type::Int))
    );
    assert_eq!(
        parse_type(&json!({"Fn": [[{"Ptr": "Int", "loc": 1}], {"Struct": "Node", "loc": 2}], "loc": 0})).unwrap(),
        Type::function(vec![Type::pointer(Type::Int)], Type::Struct(String::from("Node")))
    );
}

#[test]
fn test_parse_type_kind_spelling() {
    assert_eq!(parse_type(&json!({"kind": "Int"})).unwrap(), Type::Int);
    assert_eq!(parse_type(&json!({"kind": "Nil", "loc": 2})).unwrap(), Type::Nil);
    assert_eq!(
        parse_type(&json!({"kind": "Float"})).unwrap_err().get_error_name(),
        "MalformedNode"
    );
    assert_eq!(parse_type(&json!({"loc": 2})).unwrap_err().get_error_name(), "MalformedNode");
}

#[test]
fn test_parse_declaration_with_extra_keys() {
    let declaration =
        parse_declaration(&json!({"name": "head", "typ": {"Ptr": {"Struct": "Node", "loc": 3}}, "loc": 1})).unwrap();
    assert_eq!(declaration.name, "head");
    assert_eq!(declaration.ty, Type::pointer(Type::Struct(String::from("Node"))));

    let error = parse_declaration(&json!({"name": "head"})).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedNode");
}

#[test]
fn test_parse_nesting_depth() {
    let nested_program = |depth: usize| {
        let mut expr = json!({"Num": 1});
        for _ in 0..depth {
            expr = json!({"UnOp": ["Neg", expr]});
        }
        json!({
            "structs": [],
            "externs": [],
            "functions": [{"name": "main", "prms": [], "rettyp": "Int", "locals": [], "stmts": [{"Return": expr}]}]
        })
        .to_string()
    };

    // Each unary operation costs two levels of JSON nesting.
    assert!(parse(&nested_program(40)).is_ok());

    let error = parse(&nested_program(200)).unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidJson");
    assert_eq!(error.get_class(), ErrorClass::Input);
}

#[test]
fn test_parse_identifier() {
    assert_eq!(parse_identifier(&json!("_tmp1")).unwrap(), "_tmp1");
    assert_eq!(parse_identifier(&json!("")).unwrap_err().get_error_name(), "InvalidIdentifier");
    assert_eq!(parse_identifier(&json!(3)).unwrap_err().get_error_name(), "MalformedNode");
}

#[test]
fn test_parse_places() {
    assert_eq!(
        parse_place(&json!({"Id": "x"})).unwrap(),
        Place::Identifier(String::from("x"))
    );
    assert_eq!(
        parse_place(&json!({"Deref": {"Id": "p"}})).unwrap(),
        Place::Dereference(Box::new(Expression::identifier("p")))
    );
    assert_eq!(
        parse_place(&json!({"ArrayAccess": {"array": {"Id": "xs"}, "idx": {"Num": 0}}})).unwrap(),
        Place::ArrayAccess {
            array: Box::new(Expression::identifier("xs")),
            index: Box::new(Expression::Number(0)),
        }
    );
    assert_eq!(
        parse_place(&json!({"FieldAccess": {"ptr": {"Id": "n"}, "field": "next"}})).unwrap(),
        Place::FieldAccess {
            pointer: Box::new(Expression::identifier("n")),
            field: String::from("next"),
        }
    );
}

#[test]
fn test_parse_value_with_and_without_wrapper() {
    let wrapped = parse_expr(&json!({"Val": {"Id": "x"}})).unwrap();
    let bare = parse_expr(&json!({"Id": "x"})).unwrap();
    assert_eq!(wrapped, bare);
    assert_eq!(bare, Expression::identifier("x"));
}

#[test]
fn test_parse_literals() {
    assert_eq!(parse_expr(&json!({"Num": -7})).unwrap(), Expression::Number(-7));
    assert_eq!(parse_expr(&json!("Nil")).unwrap(), Expression::Nil);
    assert_eq!(parse_expr(&json!({"Num": 1.5})).unwrap_err().get_error_name(), "MalformedNode");
}

#[test]
fn test_parse_operations() {
    let expr = parse_expr(&json!({"UnOp": ["Neg", {"Num": 1}]})).unwrap();
    assert_eq!(
        expr,
        Expression::UnaryOperation {
            operator: UnaryOperator::Neg,
            operand: Box::new(Expression::Number(1)),
        }
    );

    let expr = parse_expr(&json!({"BinOp": {"op": "Lte", "left": {"Id": "a"}, "right": {"Num": 2}}})).unwrap();
    assert_eq!(
        expr,
        Expression::BinaryOperation {
            operator: BinaryOperator::Lte,
            lhs: Box::new(Expression::identifier("a")),
            rhs: Box::new(Expression::Number(2)),
        }
    );
}

#[test]
fn test_parse_unknown_operator() {
    let error = parse_expr(&json!({"BinOp": {"op": "Mod", "left": {"Num": 1}, "right": {"Num": 2}}})).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnknownTag {
            kind: String::from("binary operator"),
            tag: String::from("Mod")
        }
    );
}

#[test]
fn test_parse_select_and_allocations() {
    let expr = parse_expr(&json!({"Select": {"guard": {"Num": 1}, "tt": "Nil", "ff": {"Id": "p"}}})).unwrap();
    assert!(matches!(expr, Expression::Select { .. }));

    assert_eq!(
        parse_expr(&json!({"NewSingle": {"Struct": "Node"}})).unwrap(),
        Expression::NewSingleton(Type::Struct(String::from("Node")))
    );
    assert_eq!(
        parse_expr(&json!({"NewArray": ["Int", {"Num": 4}]})).unwrap(),
        Expression::NewArray {
            element_type: Type::Int,
            size: Box::new(Expression::Number(4)),
        }
    );
}

#[test]
fn test_parse_call_expr() {
    let expr = parse_expr(&json!({"Call": {"callee": {"Id": "f"}, "args": [{"Num": 1}, "Nil"]}})).unwrap();
    match expr {
        Expression::Call(call) => {
            assert_eq!(call.callee_name(), Some("f"));
            assert_eq!(call.arguments, vec![Expression::Number(1), Expression::Nil]);
        }
        other => panic!("expected a call, found {}", other),
    }
}

#[test]
fn test_parse_unknown_expression_tag() {
    let error = parse_expr(&json!({"Lambda": []})).unwrap_err();
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UnknownTag {
            kind: String::from("expression"),
            tag: String::from("Lambda")
        }
    );
}

#[test]
fn test_parse_ignores_unknown_keys() {
    let expr = parse_expr(&json!({"span": [0, 3], "Num": 3})).unwrap();
    assert_eq!(expr, Expression::Number(3));
}

#[test]
fn test_parse_empty_object_is_malformed() {
    assert_eq!(parse_expr(&json!({})).unwrap_err().get_error_name(), "MalformedNode");
}

#[test]
fn test_parse_simple_statements() {
    assert_eq!(parse_stmt(&json!("Break")).unwrap(), Statement::Break);
    assert_eq!(parse_stmt(&json!("Continue")).unwrap(), Statement::Continue);
    assert_eq!(parse_stmt(&json!({"Return": null})).unwrap(), Statement::Return(None));
    assert_eq!(
        parse_stmt(&json!({"Return": {"Num": 0}})).unwrap(),
        Statement::Return(Some(Expression::Number(0)))
    );
    assert_eq!(
        parse_stmt(&json!({"Assign": [{"Id": "x"}, {"Num": 1}]})).unwrap(),
        Statement::Assignment(Place::Identifier(String::from("x")), Expression::Number(1))
    );
}

#[test]
fn test_parse_statement_sequences() {
    let bare = parse_stmt(&json!(["Break", "Continue"])).unwrap();
    let tagged = parse_stmt(&json!({"Stmts": ["Break", "Continue"]})).unwrap();
    assert_eq!(bare, tagged);
    assert_eq!(bare, Statement::Statements(vec![Statement::Break, Statement::Continue]));
}

#[test]
fn test_parse_if_without_else() {
    for ff in [None, Some(json!(null)), Some(json!([]))] {
        let mut node = json!({"guard": {"Num": 1}, "tt": [{"Return": {"Num": 1}}]});
        if let Some(ff) = ff {
            node["ff"] = ff;
        }
        match parse_stmt(&json!({ "If": node })).unwrap() {
            Statement::If { unhappy_path, .. } => assert!(unhappy_path.is_none()),
            other => panic!("expected an if, found {}", other),
        }
    }
}

#[test]
fn test_parse_if_with_else() {
    let stmt = parse_stmt(&json!({"If": {
        "guard": {"Num": 1},
        "tt": [{"Return": {"Num": 1}}],
        "ff": [{"Return": {"Num": 0}}]
    }}))
    .unwrap();
    match stmt {
        Statement::If { unhappy_path, .. } => assert!(unhappy_path.is_some()),
        other => panic!("expected an if, found {}", other),
    }
}

#[test]
fn test_parse_while_and_call() {
    let stmt = parse_stmt(&json!({"While": [{"Num": 1}, ["Break"]]})).unwrap();
    assert!(matches!(stmt, Statement::While { .. }));

    let stmt = parse_stmt(&json!({"Call": {"callee": {"Id": "print"}, "args": [{"Num": 1}]}})).unwrap();
    assert!(matches!(stmt, Statement::Call(_)));
}

#[test]
fn test_parse_malformed_statements() {
    assert_eq!(parse_stmt(&json!("Halt")).unwrap_err().get_error_name(), "UnknownTag");
    assert_eq!(
        parse_stmt(&json!({"Assign": [{"Id": "x"}]})).unwrap_err().get_error_name(),
        "MalformedNode"
    );
    assert_eq!(parse_stmt(&json!(42)).unwrap_err().get_error_name(), "MalformedNode");
}

#[test]
fn test_parse_struct_definition() {
    let definition = parse_struct_definition(&json!({
        "name": "Node",
        "fields": [{"name": "value", "typ": "Int"}, {"name": "next", "typ": {"Ptr": {"Struct": "Node"}}}]
    }))
    .unwrap();
    assert_eq!(definition.name, "Node");
    assert_eq!(definition.fields.len(), 2);
}

#[test]
fn test_parse_extern() {
    let external = parse_extern(&json!({"name": "print", "typ": {"Fn": [["Int"], "Int"]}})).unwrap();
    assert_eq!(external.param_types, vec![Type::Int]);
    assert_eq!(external.return_type, Type::Int);

    let error = parse_extern(&json!({"name": "print", "typ": "Int"})).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedNode");
}

#[test]
fn test_parse_function_definition() {
    let function = parse_function_definition(&json!({
        "name": "main",
        "prms": [],
        "rettyp": "Int",
        "locals": [{"name": "x", "typ": "Int"}],
        "stmts": [{"Return": {"Id": "x"}}]
    }))
    .unwrap();
    assert_eq!(function.name, "main");
    assert_eq!(function.locals.len(), 1);
    assert_eq!(
        function.body,
        Statement::Statements(vec![Statement::Return(Some(Expression::identifier("x")))])
    );
}

#[test]
fn test_parse_program() {
    let source = json!({
        "structs": [],
        "externs": [],
        "functions": [{"name": "main", "prms": [], "rettyp": "Int", "locals": [], "stmts": [{"Return": {"Num": 0}}]}]
    })
    .to_string();

    let program = parse(&source).unwrap();
    assert_eq!(program.functions.len(), 1);
    assert!(program.structs.is_empty());
}

#[test]
fn test_parse_errors_are_located_at_input() {
    let error = parse("{ not json").unwrap_err();
    assert_eq!(error.get_error_name(), "InvalidJson");
    assert_eq!(error.get_location(), &Location::Input);

    let error = parse(&json!({"structs": [], "externs": []}).to_string()).unwrap_err();
    assert_eq!(error.get_error_name(), "MalformedNode");
    assert_eq!(error.get_location(), &Location::Input);
    assert_eq!(error.get_class(), ErrorClass::Input);
}
