use crate::{
    lexer::tokens::{DynamicSubscript, NumberLiteral, TokenKind},
    Span, MK_EXPR_BASE,
};

use super::ast::{render_list, Expr, ExprType, ExprWrapper};

// LITERALS

/// Number Expression
/// A numeric literal with the width its suffix selected.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: NumberLiteral,
    pub span: Span,
}

impl Expr for NumberExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Number
    }
    fn get_node_type(&self) -> &'static str {
        "ASTConst"
    }
    fn render(&self) -> String {
        self.value.to_string()
    }
}

/// String Expression
/// Holds the decoded text; rendering escapes it again.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

impl Expr for StringExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::String
    }
    fn get_node_type(&self) -> &'static str {
        "ASTConst"
    }
    fn render(&self) -> String {
        format!("\"{}\"", escape(&self.value, '"'))
    }
}

/// Char Expression
/// A `'c'` literal, or a `` `c` `` literal when `back_quoted` is set.
#[derive(Debug, Clone)]
pub struct CharExpr {
    pub value: char,
    pub back_quoted: bool,
    pub span: Span,
}

impl Expr for CharExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Char
    }
    fn get_node_type(&self) -> &'static str {
        "ASTConst"
    }
    fn render(&self) -> String {
        let quote = if self.back_quoted { '`' } else { '\'' };
        format!("{quote}{}{quote}", escape(&self.value.to_string(), quote))
    }
}

#[derive(Debug, Clone)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
}

impl Expr for BooleanExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Boolean
    }
    fn get_node_type(&self) -> &'static str {
        "ASTConst"
    }
    fn render(&self) -> String {
        self.value.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct NullExpr {
    pub span: Span,
}

impl Expr for NullExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Null
    }
    fn get_node_type(&self) -> &'static str {
        "ASTConst"
    }
    fn render(&self) -> String {
        String::from("null")
    }
}

/// Dollar Expression
/// The bare `$` constant.
#[derive(Debug, Clone)]
pub struct DollarExpr {
    pub span: Span,
}

impl Expr for DollarExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Dollar
    }
    fn get_node_type(&self) -> &'static str {
        "ASTConst"
    }
    fn render(&self) -> String {
        String::from("$")
    }
}

// VARIABLES

#[derive(Debug, Clone)]
pub struct ThisExpr {
    pub span: Span,
}

impl Expr for ThisExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::This
    }
    fn get_node_type(&self) -> &'static str {
        "ASTThisVarRef"
    }
    fn render(&self) -> String {
        String::from("#this")
    }
}

#[derive(Debug, Clone)]
pub struct RootExpr {
    pub span: Span,
}

impl Expr for RootExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Root
    }
    fn get_node_type(&self) -> &'static str {
        "ASTRootVarRef"
    }
    fn render(&self) -> String {
        String::from("#root")
    }
}

/// Variable Expression
/// A `#name` context variable reference.
#[derive(Debug, Clone)]
pub struct VariableExpr {
    pub name: String,
    pub span: Span,
}

impl Expr for VariableExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Variable
    }
    fn get_node_type(&self) -> &'static str {
        "ASTVarRef"
    }
    fn render(&self) -> String {
        format!("#{}", self.name)
    }
}

// OPERATORS

/// Sequence Expression
/// `a, b, c`; evaluates every item and yields the last.
#[derive(Debug, Clone)]
pub struct SequenceExpr {
    pub expressions: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for SequenceExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Sequence
    }
    fn get_node_type(&self) -> &'static str {
        "ASTSequence"
    }
    fn render(&self) -> String {
        self.expressions
            .iter()
            .map(|expr| expr.render_element())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub assignee: ExprWrapper,
    pub value: ExprWrapper,
    pub span: Span,
}

impl Expr for AssignmentExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Assignment
    }
    fn get_node_type(&self) -> &'static str {
        "ASTAssign"
    }
    fn render(&self) -> String {
        format!(
            "{} = {}",
            self.assignee.render_operand(),
            self.value.render_element()
        )
    }
}

/// Conditional Expression
/// `test ? consequent : alternative`
#[derive(Debug, Clone)]
pub struct ConditionalExpr {
    pub test: ExprWrapper,
    pub consequent: ExprWrapper,
    pub alternative: ExprWrapper,
    pub span: Span,
}

impl Expr for ConditionalExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Conditional
    }
    fn get_node_type(&self) -> &'static str {
        "ASTTest"
    }
    fn render(&self) -> String {
        let branch = |expr: &ExprWrapper| match expr.get_expr_type() {
            ExprType::Sequence | ExprType::Assignment => format!("({})", expr.render()),
            _ => expr.render(),
        };

        format!(
            "{} ? {} : {}",
            self.test.render_operand(),
            branch(&self.consequent),
            branch(&self.alternative)
        )
    }
}

/// Binary Expression
/// Any infix operator from `||` down to `%`, including `in` and `not in`.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: TokenKind,
    pub right: ExprWrapper,
    pub span: Span,
}

impl Expr for BinaryExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Binary
    }
    fn get_node_type(&self) -> &'static str {
        match self.operator {
            TokenKind::Or => "ASTOr",
            TokenKind::And => "ASTAnd",
            TokenKind::BitOr => "ASTBitOr",
            TokenKind::Xor => "ASTXor",
            TokenKind::BitAnd => "ASTBitAnd",
            TokenKind::Equals => "ASTEq",
            TokenKind::NotEquals => "ASTNotEq",
            TokenKind::Less => "ASTLess",
            TokenKind::Greater => "ASTGreater",
            TokenKind::LessEquals => "ASTLessEq",
            TokenKind::GreaterEquals => "ASTGreaterEq",
            TokenKind::In => "ASTIn",
            TokenKind::NotIn => "ASTNotIn",
            TokenKind::ShiftLeft => "ASTShiftLeft",
            TokenKind::ShiftRight => "ASTShiftRight",
            TokenKind::UnsignedShiftRight => "ASTUnsignedShiftRight",
            TokenKind::Plus => "ASTAdd",
            TokenKind::Minus => "ASTSubtract",
            TokenKind::Multiply => "ASTMultiply",
            TokenKind::Divide => "ASTDivide",
            TokenKind::Modulo => "ASTRemainder",
            _ => "ASTBinary",
        }
    }
    fn render(&self) -> String {
        format!(
            "{} {} {}",
            self.left.render_operand(),
            self.operator.operator_symbol(),
            self.right.render_operand()
        )
    }
}

/// Prefix Expression
/// Unary `-`, `!` / `not` and `~`.
#[derive(Debug, Clone)]
pub struct PrefixExpr {
    pub operator: TokenKind,
    pub operand: ExprWrapper,
    pub span: Span,
}

impl Expr for PrefixExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Prefix
    }
    fn get_node_type(&self) -> &'static str {
        match self.operator {
            TokenKind::Minus => "ASTNegate",
            TokenKind::Not => "ASTNot",
            _ => "ASTBitNegate",
        }
    }
    fn render(&self) -> String {
        format!(
            "{}{}",
            self.operator.operator_symbol(),
            self.operand.render_operand()
        )
    }
}

#[derive(Debug, Clone)]
pub struct InstanceofExpr {
    pub operand: ExprWrapper,
    pub class_name: String,
    pub span: Span,
}

impl Expr for InstanceofExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Instanceof
    }
    fn get_node_type(&self) -> &'static str {
        "ASTInstanceof"
    }
    fn render(&self) -> String {
        format!("{} instanceof {}", self.operand.render_origin(), self.class_name)
    }
}

// NAVIGATION

/// Chain Expression
/// A flat navigation chain such as `a.b[0].c()`. The first child is the
/// origin; each later child is evaluated against the result of the one
/// before it. Children that are not navigation steps render as `.(expr)`.
#[derive(Debug, Clone)]
pub struct ChainExpr {
    pub children: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for ChainExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Chain
    }
    fn get_node_type(&self) -> &'static str {
        "ASTChain"
    }
    fn render(&self) -> String {
        let mut out = String::new();

        for (i, child) in self.children.iter().enumerate() {
            if i == 0 {
                out.push_str(&child.render_origin());
                continue;
            }

            match child.get_expr_type() {
                ExprType::Index | ExprType::DynamicSubscript => out.push_str(&child.render()),
                ExprType::Property
                | ExprType::Call
                | ExprType::Projection
                | ExprType::Selection
                | ExprType::StaticMethod
                | ExprType::StaticField => {
                    out.push('.');
                    out.push_str(&child.render());
                }
                _ => {
                    out.push_str(".(");
                    out.push_str(&child.render());
                    out.push(')');
                }
            }
        }

        out
    }
}

/// Property Expression
/// A bare property name.
#[derive(Debug, Clone)]
pub struct PropertyExpr {
    pub name: String,
    pub span: Span,
}

impl Expr for PropertyExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Property
    }
    fn get_node_type(&self) -> &'static str {
        "ASTProperty"
    }
    fn render(&self) -> String {
        self.name.clone()
    }
}

/// Index Expression
/// `[index]`, either leading an expression or inside a chain.
#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub index: ExprWrapper,
    pub span: Span,
}

impl Expr for IndexExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Index
    }
    fn get_node_type(&self) -> &'static str {
        "ASTProperty"
    }
    fn render(&self) -> String {
        format!("[{}]", self.index.render())
    }
}

#[derive(Debug, Clone)]
pub struct DynamicSubscriptExpr {
    pub subscript: DynamicSubscript,
    pub span: Span,
}

impl Expr for DynamicSubscriptExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::DynamicSubscript
    }
    fn get_node_type(&self) -> &'static str {
        "ASTDynamicSubscript"
    }
    fn render(&self) -> String {
        self.subscript.to_string()
    }
}

/// Call Expression
/// `method(args)`, called on the current chain value.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub method: String,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for CallExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Call
    }
    fn get_node_type(&self) -> &'static str {
        "ASTMethod"
    }
    fn render(&self) -> String {
        format!("{}({})", self.method, render_list(&self.arguments))
    }
}

#[derive(Debug, Clone)]
pub struct StaticMethodExpr {
    pub class_name: String,
    pub method: String,
    pub arguments: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for StaticMethodExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::StaticMethod
    }
    fn get_node_type(&self) -> &'static str {
        "ASTStaticMethod"
    }
    fn render(&self) -> String {
        format!(
            "@{}@{}({})",
            self.class_name,
            self.method,
            render_list(&self.arguments)
        )
    }
}

#[derive(Debug, Clone)]
pub struct StaticFieldExpr {
    pub class_name: String,
    pub field: String,
    pub span: Span,
}

impl Expr for StaticFieldExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::StaticField
    }
    fn get_node_type(&self) -> &'static str {
        "ASTStaticField"
    }
    fn render(&self) -> String {
        format!("@{}@{}", self.class_name, self.field)
    }
}

#[derive(Debug, Clone)]
pub enum ConstructorKind {
    /// `new C(args)`
    Call(Vec<ExprWrapper>),
    /// `new C[]{ elements }`
    ArrayInit(Vec<ExprWrapper>),
    /// `new C[size]`
    ArraySized(ExprWrapper),
}

#[derive(Debug, Clone)]
pub struct ConstructorExpr {
    pub class_name: String,
    pub kind: ConstructorKind,
    pub span: Span,
}

impl Expr for ConstructorExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Constructor
    }
    fn get_node_type(&self) -> &'static str {
        "ASTCtor"
    }
    fn render(&self) -> String {
        match &self.kind {
            ConstructorKind::Call(arguments) => {
                format!("new {}({})", self.class_name, render_list(arguments))
            }
            ConstructorKind::ArrayInit(elements) if elements.is_empty() => {
                format!("new {}[]{{ }}", self.class_name)
            }
            ConstructorKind::ArrayInit(elements) => {
                format!("new {}[]{{ {} }}", self.class_name, render_list(elements))
            }
            ConstructorKind::ArraySized(size) => {
                format!("new {}[{}]", self.class_name, size.render())
            }
        }
    }
}

/// Projection Expression
/// `{expr}` applied to every element of the collection.
#[derive(Debug, Clone)]
pub struct ProjectionExpr {
    pub expression: ExprWrapper,
    pub span: Span,
}

impl Expr for ProjectionExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Projection
    }
    fn get_node_type(&self) -> &'static str {
        "ASTProject"
    }
    fn render(&self) -> String {
        format!("{{{}}}", self.expression.render_operand())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// `{? expr}`
    All,
    /// `{^ expr}`
    First,
    /// `{$ expr}`
    Last,
}

impl SelectionMode {
    pub fn symbol(&self) -> char {
        match self {
            SelectionMode::All => '?',
            SelectionMode::First => '^',
            SelectionMode::Last => '$',
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionExpr {
    pub expression: ExprWrapper,
    pub mode: SelectionMode,
    pub span: Span,
}

impl Expr for SelectionExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Selection
    }
    fn get_node_type(&self) -> &'static str {
        match self.mode {
            SelectionMode::All => "ASTSelect",
            SelectionMode::First => "ASTSelectFirst",
            SelectionMode::Last => "ASTSelectLast",
        }
    }
    fn render(&self) -> String {
        format!(
            "{{{} {}}}",
            self.mode.symbol(),
            self.expression.render_operand()
        )
    }
}

/// Eval Expression
/// `(target)(argument)`: evaluates `target` and applies the result to
/// `argument`, as with `#fact(5)` or `:[#this * 2](4)`.
#[derive(Debug, Clone)]
pub struct EvalExpr {
    pub target: ExprWrapper,
    pub argument: Option<ExprWrapper>,
    pub span: Span,
}

impl Expr for EvalExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Eval
    }
    fn get_node_type(&self) -> &'static str {
        "ASTEval"
    }
    fn render(&self) -> String {
        let argument = self
            .argument
            .as_ref()
            .map(|arg| arg.render())
            .unwrap_or_default();
        format!("({})({})", self.target.render(), argument)
    }
}

/// Lambda Expression
/// `:[body]`, a constant holding an unevaluated expression.
#[derive(Debug, Clone)]
pub struct LambdaExpr {
    pub body: ExprWrapper,
    pub span: Span,
}

impl Expr for LambdaExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Lambda
    }
    fn get_node_type(&self) -> &'static str {
        "ASTConst"
    }
    fn render(&self) -> String {
        format!(":[{}]", self.body.render())
    }
}

// COLLECTIONS

#[derive(Debug, Clone)]
pub struct ListExpr {
    pub elements: Vec<ExprWrapper>,
    pub span: Span,
}

impl Expr for ListExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::List
    }
    fn get_node_type(&self) -> &'static str {
        "ASTList"
    }
    fn render(&self) -> String {
        if self.elements.is_empty() {
            return String::from("{ }");
        }
        format!("{{ {} }}", render_list(&self.elements))
    }
}

/// Map Expression
/// `#{ key : value }`, or `#@java.util.LinkedHashMap@{ ... }` when a map
/// class is named. A key written without a value maps to `null`.
#[derive(Debug, Clone)]
pub struct MapExpr {
    pub entries: Vec<(ExprWrapper, Option<ExprWrapper>)>,
    pub class_name: Option<String>,
    pub span: Span,
}

impl Expr for MapExpr {
    MK_EXPR_BASE!();
    fn get_expr_type(&self) -> ExprType {
        ExprType::Map
    }
    fn get_node_type(&self) -> &'static str {
        "ASTMap"
    }
    fn render(&self) -> String {
        let entries = self
            .entries
            .iter()
            .map(|(key, value)| match value {
                Some(value) => format!("{} : {}", key.render_element(), value.render_element()),
                None => format!("{} : null", key.render_element()),
            })
            .collect::<Vec<_>>()
            .join(", ");

        let prefix = match &self.class_name {
            Some(class_name) => format!("#@{}@", class_name),
            None => String::from("#"),
        };

        if entries.is_empty() {
            format!("{}{{ }}", prefix)
        } else {
            format!("{}{{ {} }}", prefix, entries)
        }
    }
}

/// Escapes `text` for rendering inside `quote` delimiters.
fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
