pub mod x86_64;

/// AvailableArchitectures represents each of the supported architectures in
/// an enumerable format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvailableArchitectures {
    #[default]
    X86_64,
}

impl AvailableArchitectures {
    /// Returns a code generator for the selected architecture.
    pub fn generator(self) -> Box<dyn crate::codegen::CodeGenerator> {
        match self {
            AvailableArchitectures::X86_64 => Box::new(x86_64::X86_64),
        }
    }
}
