use stackcc::diagnostic::Diagnostic;
use stackcc::fatal;
use stackcc::seq::{self, SelfTestFailure};
use std::env;
use std::fmt;
use std::io::prelude::*;
use tracing_subscriber::EnvFilter;

/// The sole argument value that selects the self-test mode.
const SELF_TEST_FLAG: &str = "-test";

type RuntimeResult<T> = Result<T, RuntimeError>;

enum RuntimeError {
    InvalidArgumentCount(String),
    SelfTest(SelfTestFailure),
    Compilation(Diagnostic),
    OutputUnwritable(String),
}

impl fmt::Debug for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgumentCount(program) => {
                write!(f, "invalid number of arguments\nusage: {} <expression>", program)
            }
            Self::SelfTest(failure) => write!(f, "{}", failure),
            Self::Compilation(diag) => write!(f, "{}", diag),
            Self::OutputUnwritable(e) => write!(f, "unable to write output: {}", e),
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &self)
    }
}

fn init_logging() {
    // logs share stderr with diagnostics and stay silent unless RUST_LOG is set.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn self_test() -> RuntimeResult<String> {
    seq::self_test()
        .map(|_| String::new())
        .map_err(RuntimeError::SelfTest)
}

fn compile(source: &str) -> RuntimeResult<String> {
    stackcc::compile(source).map_err(|e| {
        tracing::debug!(err = ?e, "compilation failed");
        RuntimeError::Compilation(e.diagnostic(source))
    })
}

fn write_output(asm: &str) -> RuntimeResult<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    handle
        .write_all(asm.as_bytes())
        .and_then(|_| handle.flush())
        .map_err(|e| RuntimeError::OutputUnwritable(e.to_string()))
}

fn run(args: &[&str]) -> RuntimeResult<()> {
    let program = args.first().copied().unwrap_or("stackcc");

    match args {
        [_, flag] if *flag == SELF_TEST_FLAG => self_test(),
        [_, source] => compile(source),
        _ => Err(RuntimeError::InvalidArgumentCount(program.to_string())),
    }
    .and_then(|asm| write_output(&asm))
}

fn main() {
    init_logging();

    let raw_args: Vec<String> = env::args().collect::<Vec<String>>();
    let args = raw_args.iter().map(|a| a.as_str()).collect::<Vec<&str>>();

    if let Err(e) = run(&args[..]) {
        fatal!("{}", e)
    }
}
