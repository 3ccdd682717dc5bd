pub mod machine;
pub mod register;

use crate::ast::ExprNode;

/// CodeGenerator defines the generate method, returning the complete, line
/// oriented instruction listing for an expression tree. Each returned string
/// is a single newline-terminated line.
pub trait CodeGenerator {
    fn generate(&self, input: ExprNode) -> Vec<String>;
}
