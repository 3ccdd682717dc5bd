use crate::ast::{BinaryOp, ExprNode};
use crate::codegen::CodeGenerator;

mod register;
pub use register::GeneralPurpose;

/// X86_64 represents the x86_64 bit machine target. Expressions are lowered
/// onto the hardware stack: every subtree leaves exactly one quad word pushed,
/// and `rax`, `rdi` and `rdx` are only ever used as scratch between a pop and
/// the following push.
#[derive(Debug, Clone, Copy, Default)]
pub struct X86_64;

pub const CG_PREAMBLE: &str = ".intel_syntax noprefix
.global main
main:
";

pub const CG_POSTAMBLE: &str = "  pop rax
  ret
";

impl CodeGenerator for X86_64 {
    fn generate(&self, input: ExprNode) -> Vec<String> {
        let insts: Vec<String> = vec![codegen_preamble(), codegen_expr(input), codegen_postamble()]
            .into_iter()
            .flatten()
            .collect();

        tracing::debug!(lines = insts.len(), "generated x86_64 assembly");
        insts
    }
}

pub fn codegen_preamble() -> Vec<String> {
    split_lines(CG_PREAMBLE)
}

pub fn codegen_postamble() -> Vec<String> {
    split_lines(CG_POSTAMBLE)
}

fn split_lines(block: &str) -> Vec<String> {
    block.lines().map(|line| format!("{}\n", line)).collect()
}

fn codegen_expr(expr: ExprNode) -> Vec<String> {
    match expr {
        ExprNode::Literal(value) => codegen_push_constant(value),
        ExprNode::Binary(op, lhs, rhs) => codegen_binary(op, *lhs, *rhs),
    }
}

/// `push` only encodes a sign-extended 32-bit immediate, so wider constants
/// are staged through `rax`.
fn codegen_push_constant(constant: i64) -> Vec<String> {
    match i32::try_from(constant) {
        Ok(imm) => vec![format!("  push {}\n", imm)],
        Err(_) => {
            let acc = GeneralPurpose::Rax;

            vec![
                format!("  mov {}, {}\n", acc, constant),
                format!("  push {}\n", acc),
            ]
        }
    }
}

/// Evaluates both operands onto the stack, then pops the right operand into
/// `rdi` and the left into `rax` before applying `op` and pushing `rax`.
fn codegen_binary(op: BinaryOp, lhs: ExprNode, rhs: ExprNode) -> Vec<String> {
    let (acc, operand) = (GeneralPurpose::Rax, GeneralPurpose::Rdi);

    vec![
        codegen_expr(lhs),
        codegen_expr(rhs),
        vec![
            format!("  pop {}\n", operand),
            format!("  pop {}\n", acc),
        ],
        codegen_operator(op, acc, operand),
        vec![format!("  push {}\n", acc)],
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn codegen_operator(op: BinaryOp, acc: GeneralPurpose, operand: GeneralPurpose) -> Vec<String> {
    match op {
        BinaryOp::Add => vec![format!("  add {}, {}\n", acc, operand)],
        BinaryOp::Sub => vec![format!("  sub {}, {}\n", acc, operand)],
        // unsigned rdx:rax = rax * operand, keeping only the low word.
        BinaryOp::Mul => vec![format!("  mul {}\n", operand)],
        BinaryOp::Div => vec![
            format!("  mov {}, 0\n", GeneralPurpose::Rdx),
            format!("  div {}\n", operand),
        ],
    }
}
