//! Abstract syntax tree.
//!
//! Every node owns its children; the tree has no sharing and carries no source
//! positions. [Display] renders a node in constructor form, e.g.
//! `Return(Add(Number(1),Var(x)))`, which is stable across repeated parses of
//! the same input.
//!
//! [Display]: std::fmt::Display

use std::fmt;

pub type Identifier = String;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstExp {
    Number(u32),
    Var(Identifier),
    Not(Box<AstExp>),
    Binary(AstBinaryOp, Box<AstExp>, Box<AstExp>),
    Call(Identifier, Vec<AstExp>),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AstBinaryOp {
    Equal,
    NotEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstBlock {
    pub statements: Vec<AstStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstFunction {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: AstBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstStatement {
    Return(AstExp),
    Block(AstBlock),
    If {
        condition: AstExp,
        then: Box<AstStatement>,
        els: Box<AstStatement>,
    },
    While {
        condition: AstExp,
        body: AstBlock,
    },
    Function(AstFunction),
    Var {
        name: Identifier,
        init: AstExp,
    },
    Assign {
        name: Identifier,
        value: AstExp,
    },
    Exp(AstExp),
}

impl AstExp {
    pub fn binary(op: AstBinaryOp, lhs: AstExp, rhs: AstExp) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn not(operand: AstExp) -> Self {
        Self::Not(Box::new(operand))
    }

    pub fn var(name: impl Into<Identifier>) -> Self {
        Self::Var(name.into())
    }

    pub fn call(callee: impl Into<Identifier>, args: Vec<AstExp>) -> Self {
        Self::Call(callee.into(), args)
    }
}

impl AstBlock {
    pub fn new(statements: Vec<AstStatement>) -> Self {
        Self { statements }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

impl AstStatement {
    pub fn if_else(condition: AstExp, then: AstStatement, els: AstStatement) -> Self {
        Self::If {
            condition,
            then: Box::new(then),
            els: Box::new(els),
        }
    }

    /// `if` without `else`: the alternative is always an empty block.
    pub fn if_then(condition: AstExp, then: AstStatement) -> Self {
        Self::if_else(condition, then, Self::Block(AstBlock::empty()))
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Return(_) => "return",
            Self::Block(_) => "block",
            Self::If { .. } => "if",
            Self::While { .. } => "while",
            Self::Function(_) => "function",
            Self::Var { .. } => "var",
            Self::Assign { .. } => "assignment",
            Self::Exp(_) => "expression",
        }
    }
}

impl fmt::Display for AstBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "Equal"),
            Self::NotEqual => write!(f, "NotEqual"),
            Self::Add => write!(f, "Add"),
            Self::Subtract => write!(f, "Subtract"),
            Self::Multiply => write!(f, "Multiply"),
            Self::Divide => write!(f, "Divide"),
        }
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "]")
}

impl fmt::Display for AstExp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "Number({value})"),
            Self::Var(name) => write!(f, "Var({name})"),
            Self::Not(operand) => write!(f, "Not({operand})"),
            Self::Binary(op, lhs, rhs) => write!(f, "{op}({lhs},{rhs})"),
            Self::Call(callee, args) => {
                write!(f, "Call({callee},")?;
                write_list(f, args)?;
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for AstBlock {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Block(")?;
        write_list(f, &self.statements)?;
        write!(f, ")")
    }
}

impl fmt::Display for AstFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Function({},", self.name)?;
        write_list(f, &self.params)?;
        write!(f, ",{})", self.body)
    }
}

impl fmt::Display for AstStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Return(exp) => write!(f, "Return({exp})"),
            Self::Block(block) => write!(f, "{block}"),
            Self::If {
                condition,
                then,
                els,
            } => write!(f, "If({condition},{then},{els})"),
            Self::While { condition, body } => write!(f, "While({condition},{body})"),
            Self::Function(function) => write!(f, "{function}"),
            Self::Var { name, init } => write!(f, "Var({name},{init})"),
            Self::Assign { name, value } => write!(f, "Assign({name},{value})"),
            Self::Exp(exp) => write!(f, "{exp}"),
        }
    }
}
