use std::{any::Any, fmt::Debug, fmt::Display, ops::Deref};

use super::statements::ExpressionStmt;

/// Statement Types
#[derive(PartialEq, Debug)]
pub enum StmtType {
    ExpressionStmt,
}

/// Statement Trait
///
/// Defines the behavior of all statement types in the AST.
pub trait Stmt: Debug {
    /// Returns the type of the statement.
    fn get_stmt_type(&self) -> StmtType;
    /// OGNL node-kind name of the statement.
    fn get_node_type(&self) -> &'static str;
    /// Canonical source form of the statement.
    fn render(&self) -> String;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Clones the statement into a StmtWrapper.
    /// Clone cannot be derived for certain trait objects, so this method is necessary.
    fn clone_wrapper(&self) -> StmtWrapper;
    /// Returns the span of the statement.
    fn get_span(&self) -> &crate::Span;
}

/// Statement Wrapper
///
/// A wrapper that allows for any statement kind to be stored with helper methods
#[derive(Debug)]
pub struct StmtWrapper(Box<dyn Stmt>);

impl StmtWrapper {
    pub fn new<T: Stmt + 'static>(stmt: T) -> Self {
        StmtWrapper(Box::new(stmt))
    }
}

impl Deref for StmtWrapper {
    type Target = Box<dyn Stmt>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Stmt for StmtWrapper {
    fn get_stmt_type(&self) -> StmtType {
        self.0.get_stmt_type()
    }
    fn get_node_type(&self) -> &'static str {
        self.0.get_node_type()
    }
    fn render(&self) -> String {
        self.0.render()
    }
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn clone_wrapper(&self) -> StmtWrapper {
        self.0.clone_wrapper()
    }
    fn get_span(&self) -> &crate::Span {
        self.0.get_span()
    }
}

impl Clone for StmtWrapper {
    fn clone(&self) -> Self {
        self.clone_wrapper()
    }
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Sequence,
    Assignment,
    Conditional,
    Binary,
    Prefix,
    Instanceof,
    Chain,
    Property,
    Index,
    DynamicSubscript,
    Call,
    StaticMethod,
    StaticField,
    Constructor,
    Projection,
    Selection,
    Eval,
    Lambda,
    Number,
    String,
    Char,
    Boolean,
    Null,
    Dollar,
    This,
    Root,
    Variable,
    List,
    Map,
}

impl ExprType {
    /// Operator forms that need parentheses when nested inside another
    /// operator or navigation step.
    pub fn is_compound(&self) -> bool {
        matches!(
            self,
            ExprType::Sequence
                | ExprType::Assignment
                | ExprType::Conditional
                | ExprType::Binary
                | ExprType::Instanceof
        )
    }
}

pub trait Expr: Debug {
    /// Returns the expression type of the expression.
    fn get_expr_type(&self) -> ExprType;
    /// OGNL node-kind name, e.g. `ASTAdd` or `ASTChain`.
    fn get_node_type(&self) -> &'static str;
    /// Canonical source form of the subtree.
    fn render(&self) -> String;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Clones the expression into an ExprWrapper.
    /// Clone cannot be derived for certain trait objects, so this method is necessary.
    fn clone_wrapper(&self) -> ExprWrapper;
    /// Returns the span of the expression.
    fn get_span(&self) -> &crate::Span;
}

/// Expression Wrapper
///
/// A wrapper that allows for any expression kind to be stored with helper methods
#[derive(Debug)]
pub struct ExprWrapper(Box<dyn Expr>);

impl ExprWrapper {
    pub fn new<T: Expr + 'static>(expression: T) -> Self {
        ExprWrapper(Box::new(expression))
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn is_compound(&self) -> bool {
        self.get_expr_type().is_compound()
    }

    /// Renders the expression, parenthesised when it is an operator form.
    pub fn render_operand(&self) -> String {
        if self.is_compound() {
            format!("({})", self.render())
        } else {
            self.render()
        }
    }

    /// Renders the expression where it starts a navigation chain or an
    /// `instanceof` test. A prefix operator there would otherwise bind looser.
    pub fn render_origin(&self) -> String {
        match self.get_expr_type() {
            ExprType::Prefix => format!("({})", self.render()),
            _ => self.render_operand(),
        }
    }

    /// Renders a list element, argument or map entry part. Only a sequence
    /// needs parentheses there.
    pub fn render_element(&self) -> String {
        match self.get_expr_type() {
            ExprType::Sequence => format!("({})", self.render()),
            _ => self.render(),
        }
    }

    /// Does not consume the wrapper
    pub fn into_cloned_stmt_wrapper(&self) -> StmtWrapper {
        StmtWrapper::new(ExpressionStmt {
            expression: self.0.clone_wrapper(),
            span: self.0.get_span().clone(),
        })
    }
}

impl Expr for ExprWrapper {
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn get_expr_type(&self) -> ExprType {
        self.0.get_expr_type()
    }
    fn get_node_type(&self) -> &'static str {
        self.0.get_node_type()
    }
    fn render(&self) -> String {
        self.0.render()
    }
    fn clone_wrapper(&self) -> ExprWrapper {
        self.0.clone_wrapper()
    }
    fn get_span(&self) -> &crate::Span {
        self.0.get_span()
    }
}

impl Clone for ExprWrapper {
    fn clone(&self) -> Self {
        self.clone_wrapper()
    }
}

impl Display for ExprWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}

/// Renders a comma separated list of expressions.
pub fn render_list(items: &[ExprWrapper]) -> String {
    items
        .iter()
        .map(|item| item.render_element())
        .collect::<Vec<_>>()
        .join(", ")
}
