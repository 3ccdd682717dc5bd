/// Register implements the methods for a register that can be named in
/// generated instructions.
pub trait Register
where
    Self: Copy,
{
    fn id(&self) -> &'static str;
}
