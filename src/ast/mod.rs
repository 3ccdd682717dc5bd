macro_rules! literal_expr {
    ($value:expr) => {
        $crate::ast::ExprNode::Literal($value)
    };
}

#[allow(unused_macros)]
macro_rules! term_expr {
    ($lhs:expr, '+', $rhs:expr) => {
        $crate::ast::ExprNode::binary($crate::ast::BinaryOp::Add, $lhs, $rhs)
    };
    ($lhs:expr, '-', $rhs:expr) => {
        $crate::ast::ExprNode::binary($crate::ast::BinaryOp::Sub, $lhs, $rhs)
    };
}

#[allow(unused_macros)]
macro_rules! factor_expr {
    ($lhs:expr, '*', $rhs:expr) => {
        $crate::ast::ExprNode::binary($crate::ast::BinaryOp::Mul, $lhs, $rhs)
    };
    ($lhs:expr, '/', $rhs:expr) => {
        $crate::ast::ExprNode::binary($crate::ast::BinaryOp::Div, $lhs, $rhs)
    };
}

pub mod interpret;

/// Binary operators recognised by the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        };

        write!(f, "{}", repr)
    }
}

/// Represents a single expression in the ast. Every binary node exclusively
/// owns both of its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprNode {
    Literal(i64),
    Binary(BinaryOp, Box<ExprNode>, Box<ExprNode>),
}

impl ExprNode {
    pub fn binary(op: BinaryOp, lhs: ExprNode, rhs: ExprNode) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Returns the number of nodes in the tree rooted at `self`.
    pub fn size(&self) -> usize {
        match self {
            ExprNode::Literal(_) => 1,
            ExprNode::Binary(_, lhs, rhs) => 1 + lhs.size() + rhs.size(),
        }
    }

    /// Returns the length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            ExprNode::Literal(_) => 1,
            ExprNode::Binary(_, lhs, rhs) => 1 + lhs.depth().max(rhs.depth()),
        }
    }
}

/// Renders the tree as an s-expression, i.e. `(- (- 5 2) 1)`.
impl std::fmt::Display for ExprNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprNode::Literal(value) => write!(f, "{}", value),
            ExprNode::Binary(op, lhs, rhs) => write!(f, "({} {} {})", op, lhs, rhs),
        }
    }
}
