/// Every expression form in the language. The set is closed on purpose:
/// consumers dispatch with an exhaustive `match`, so adding a variant is a
/// compile-visible event everywhere expressions are handled.
///
/// All variants are plain immutable values once built. `Binary` with op
/// `=` is assignment, not an ordinary binary operator: its left side must
/// resolve to a `Variable` (checked when the unit is executed).
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(String),
    Unary {
        op: char,
        operand: Box<Expr>,
    },
    Binary {
        op: char,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        callee: String,
        args: Vec<Expr>,
    },
    If {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    /// Expression-valued loop; always yields 0. A missing step is
    /// equivalent to a constant step of 1.
    For {
        var: String,
        start: Box<Expr>,
        end: Box<Expr>,
        step: Option<Box<Expr>>,
        body: Box<Expr>,
    },
    /// Introduces bindings scoped to `body`, shadowing outer names.
    /// A missing initializer means the binding starts at 0.
    Var {
        bindings: Vec<(String, Option<Expr>)>,
        body: Box<Expr>,
    },
}

/// Whether a prototype declares a plain function, a prefix unary operator
/// or an infix binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Plain,
    Unary,
    Binary,
}

/// Precedence given to `binary` operator definitions that omit one.
pub const DEFAULT_BINARY_PRECEDENCE: i32 = 30;

/// A function or operator signature without its body.
///
/// Operator prototypes get a synthesized name (`unary!`, `binary>`) so
/// call sites and operator applications resolve through the same
/// namespace. A unary operator has exactly one parameter, a binary
/// operator exactly two (enforced by the parser).
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    pub name: String,
    pub params: Vec<String>,
    pub kind: OperatorKind,
    pub precedence: Option<i32>,
}

impl Prototype {
    pub fn function(name: String, params: Vec<String>) -> Prototype {
        Prototype {
            name,
            params,
            kind: OperatorKind::Plain,
            precedence: None,
        }
    }

    pub fn unary_operator(op: char, param: String) -> Prototype {
        Prototype {
            name: format!("unary{}", op),
            params: vec![param],
            kind: OperatorKind::Unary,
            precedence: None,
        }
    }

    pub fn binary_operator(op: char, params: Vec<String>, precedence: Option<i32>) -> Prototype {
        Prototype {
            name: format!("binary{}", op),
            params,
            kind: OperatorKind::Binary,
            precedence,
        }
    }

    pub fn is_unary_operator(&self) -> bool {
        self.kind == OperatorKind::Unary
    }

    pub fn is_binary_operator(&self) -> bool {
        self.kind == OperatorKind::Binary
    }

    /// The character an operator prototype was declared with; `None` for
    /// plain functions.
    pub fn operator_char(&self) -> Option<char> {
        match self.kind {
            OperatorKind::Plain => None,
            OperatorKind::Unary | OperatorKind::Binary => self.name.chars().last(),
        }
    }

    pub fn binary_precedence(&self) -> i32 {
        self.precedence.unwrap_or(DEFAULT_BINARY_PRECEDENCE)
    }
}

/// A definition: prototype plus exactly one body expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub proto: Prototype,
    pub body: Expr,
}

/// A `global NAME = initializer` unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Global {
    pub name: String,
    pub initializer: Expr,
}
