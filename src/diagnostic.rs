//! Fatal error reporting.
//!
//! Every stage returns a typed error carrying a byte offset into the source.
//! Those errors are rendered into a [`Diagnostic`] that shows the unconsumed
//! remainder of the input, and the driver hands the result to [`fatal!`],
//! which is the only place a compilation error terminates the process.

/// Exit status used for every fatal condition.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Implemented by any error that can point at a location in the source.
pub trait Locate {
    /// Returns the byte offset of the offending input.
    fn offset(&self) -> usize;
}

/// A single-line, human readable report anchored to the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    message: String,
    remainder: String,
}

impl Diagnostic {
    /// Builds a diagnostic for `message` showing everything in `source` from
    /// `offset` onward. Offsets past the end, or not on a character
    /// boundary, are clamped to the nearest preceding boundary.
    pub fn new(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        Self {
            message: message.into(),
            remainder: source[offset..].to_string(),
        }
    }

    pub fn remainder(&self) -> &str {
        &self.remainder
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.remainder.is_empty() {
            write!(f, "{}: end of input", self.message)
        } else {
            write!(f, "{}: {}", self.message, self.remainder)
        }
    }
}

/// Writes a formatted message and a trailing newline to standard error, then
/// terminates the process with [`FATAL_EXIT_CODE`].
#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit($crate::diagnostic::FATAL_EXIT_CODE)
    }};
}
