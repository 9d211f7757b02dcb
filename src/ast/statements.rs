use std::any::Any;

use crate::Span;

use super::ast::{Expr, ExprWrapper, Stmt, StmtType, StmtWrapper};

/// A whole expression in statement position.
#[derive(Debug)]
pub struct ExpressionStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

impl Stmt for ExpressionStmt {
    fn get_stmt_type(&self) -> StmtType {
        StmtType::ExpressionStmt
    }
    fn get_node_type(&self) -> &'static str {
        self.expression.get_node_type()
    }
    fn render(&self) -> String {
        self.expression.render()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        self.expression.into_cloned_stmt_wrapper()
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}
