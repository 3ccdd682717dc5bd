//! A tiny interpreter for the subset of x86_64 intel-syntax instructions the
//! compiler emits, used to check that generated listings compute the right
//! value.

#![allow(dead_code)]

#[derive(Debug, Default)]
struct Machine {
    rax: u64,
    rdi: u64,
    rdx: u64,
    stack: Vec<u64>,
}

impl Machine {
    fn reg_mut(&mut self, id: &str) -> Result<&mut u64, String> {
        match id {
            "rax" => Ok(&mut self.rax),
            "rdi" => Ok(&mut self.rdi),
            "rdx" => Ok(&mut self.rdx),
            other => Err(format!("unknown register: {}", other)),
        }
    }

    fn reg(&mut self, id: &str) -> Result<u64, String> {
        self.reg_mut(id).map(|r| *r)
    }

    fn pop(&mut self) -> Result<u64, String> {
        self.stack.pop().ok_or_else(|| "stack underflow".to_string())
    }
}

/// Executes `asm` from the `main:` label until `ret`, returning `rax`
/// reinterpreted as a signed word.
pub fn execute(asm: &str) -> Result<i64, String> {
    let mut machine = Machine::default();
    let body = asm
        .lines()
        .skip_while(|line| *line != "main:")
        .skip(1)
        .map(str::trim);

    for line in body {
        let (mnemonic, operands) = line.split_once(' ').unwrap_or((line, ""));
        let operands: Vec<&str> = operands
            .split(',')
            .map(str::trim)
            .filter(|op| !op.is_empty())
            .collect();

        match (mnemonic, operands.as_slice()) {
            ("push", [src]) => {
                // only a sign-extended 32-bit immediate is encodable.
                let value = match src.parse::<i64>() {
                    Ok(imm) => i32::try_from(imm)
                        .map(|imm| i64::from(imm) as u64)
                        .map_err(|_| format!("immediate out of range for push: {}", imm))?,
                    Err(_) => machine.reg(src)?,
                };
                machine.stack.push(value)
            }
            ("pop", [dest]) => {
                let value = machine.pop()?;
                *machine.reg_mut(dest)? = value
            }
            ("add", [dest, src]) => {
                let rhs = machine.reg(src)?;
                let lhs = machine.reg_mut(dest)?;
                *lhs = lhs.wrapping_add(rhs)
            }
            ("sub", [dest, src]) => {
                let rhs = machine.reg(src)?;
                let lhs = machine.reg_mut(dest)?;
                *lhs = lhs.wrapping_sub(rhs)
            }
            ("mov", [dest, imm]) => {
                let value = imm
                    .parse::<i64>()
                    .map_err(|_| format!("unsupported mov source: {}", imm))?;
                *machine.reg_mut(dest)? = value as u64
            }
            ("mul", [src]) => {
                let product = u128::from(machine.rax) * u128::from(machine.reg(src)?);
                machine.rax = product as u64;
                machine.rdx = (product >> 64) as u64;
            }
            ("div", [src]) => {
                let divisor = u128::from(machine.reg(src)?);
                if divisor == 0 {
                    return Err("division by zero".to_string());
                }
                let dividend = (u128::from(machine.rdx) << 64) | u128::from(machine.rax);
                machine.rax = (dividend / divisor) as u64;
                machine.rdx = (dividend % divisor) as u64;
            }
            ("ret", []) => {
                return if machine.stack.is_empty() {
                    Ok(machine.rax as i64)
                } else {
                    Err(format!("{} values left on stack", machine.stack.len()))
                }
            }
            _ => return Err(format!("unsupported instruction: {}", line)),
        }
    }

    Err("fell off the end of main".to_string())
}

/// Compiles and executes `source`, panicking on compilation errors.
pub fn eval(source: &str) -> Result<i64, String> {
    let asm = stackcc::compile(source)
        .unwrap_or_else(|e| panic!("failed to compile {:?}: {:?}", source, e));

    execute(&asm)
}
