use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

use crate::{
    ast::{
        expressions::{BinaryOperator, Expression, Place, UnaryOperator},
        statements::Statement,
    },
    errors::errors::Error,
};

use super::{expr::*, stmt::*};

pub type PlaceHandler = fn(&Value) -> Result<Place, Error>;
pub type ExprHandler = fn(&Value) -> Result<Expression, Error>;
pub type StmtHandler = fn(&Value) -> Result<Statement, Error>;

lazy_static! {
    pub static ref IDENTIFIER: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    pub static ref PLACE_LOOKUP: HashMap<&'static str, PlaceHandler> = {
        let mut map: HashMap<&'static str, PlaceHandler> = HashMap::new();
        map.insert("Id", parse_identifier_place);
        map.insert("Deref", parse_dereference_place);
        map.insert("ArrayAccess", parse_array_access_place);
        map.insert("FieldAccess", parse_field_access_place);
        map
    };

    pub static ref EXPR_LOOKUP: HashMap<&'static str, ExprHandler> = {
        let mut map: HashMap<&'static str, ExprHandler> = HashMap::new();
        map.insert("Val", parse_value_expr);
        map.insert("Num", parse_number_expr);
        map.insert("Nil", parse_nil_expr);
        map.insert("Select", parse_select_expr);
        map.insert("UnOp", parse_unary_expr);
        map.insert("BinOp", parse_binary_expr);
        map.insert("NewSingle", parse_new_singleton_expr);
        map.insert("NewArray", parse_new_array_expr);
        map.insert("Call", parse_call_expr);
        map
    };

    pub static ref STMT_LOOKUP: HashMap<&'static str, StmtHandler> = {
        let mut map: HashMap<&'static str, StmtHandler> = HashMap::new();
        map.insert("Stmts", parse_statements_stmt);
        map.insert("Assign", parse_assignment_stmt);
        map.insert("Call", parse_call_stmt);
        map.insert("If", parse_if_stmt);
        map.insert("While", parse_while_stmt);
        map.insert("Return", parse_return_stmt);
        map
    };

    pub static ref UNARY_OPERATOR_LOOKUP: HashMap<&'static str, UnaryOperator> = {
        let mut map = HashMap::new();
        map.insert("Neg", UnaryOperator::Neg);
        map.insert("Not", UnaryOperator::Not);
        map
    };

    pub static ref BINARY_OPERATOR_LOOKUP: HashMap<&'static str, BinaryOperator> = {
        let mut map = HashMap::new();
        map.insert("Add", BinaryOperator::Add);
        map.insert("Sub", BinaryOperator::Sub);
        map.insert("Mul", BinaryOperator::Mul);
        map.insert("Div", BinaryOperator::Div);
        map.insert("And", BinaryOperator::And);
        map.insert("Or", BinaryOperator::Or);
        map.insert("Eq", BinaryOperator::Eq);
        map.insert("NotEq", BinaryOperator::NotEq);
        map.insert("Lt", BinaryOperator::Lt);
        map.insert("Lte", BinaryOperator::Lte);
        map.insert("Gt", BinaryOperator::Gt);
        map.insert("Gte", BinaryOperator::Gte);
        map
    };
}
