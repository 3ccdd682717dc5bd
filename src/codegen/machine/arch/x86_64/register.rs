use crate::codegen::register::Register;

/// The quad-word general purpose registers used as scratch space by the
/// stack machine lowering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralPurpose {
    /// Accumulator and left operand. Also holds the return value.
    Rax,
    /// Right operand and divisor.
    Rdi,
    /// High half of the dividend for `div`.
    Rdx,
}

impl Register for GeneralPurpose {
    /// returns the string representation of the register.
    fn id(&self) -> &'static str {
        match self {
            GeneralPurpose::Rax => "rax",
            GeneralPurpose::Rdi => "rdi",
            GeneralPurpose::Rdx => "rdx",
        }
    }
}

impl std::fmt::Display for GeneralPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // intel syntax with noprefix leaves register names bare.
        write!(f, "{}", self.id())
    }
}
