use std::fmt::{Display, Formatter};

/// Everything that can go wrong while executing commands.
///
/// All variants except [`Io`](Self::Io) are recoverable: the command that raised them has
/// already restored its operands, so the caller may report the message and keep feeding input.
#[derive(Debug)]
pub enum ExecError {
	StackTooShort,
	ValueNotNumeric,
	ValueNotString,
	NotARegisterName,
	DivideByZero,
	NoImaginaryNumbers,
	WholeExponentsOnly,
	NotImplemented,
	Io(std::io::Error),
}
impl Display for ExecError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::StackTooShort => {write!(f, "stack too short")}
			Self::ValueNotNumeric => {write!(f, "value is not numeric")}
			Self::ValueNotString => {write!(f, "value is not a string")}
			Self::NotARegisterName => {write!(f, "not a register name")}
			Self::DivideByZero => {write!(f, "divide by zero")}
			Self::NoImaginaryNumbers => {write!(f, "no imaginary numbers allowed")}
			Self::WholeExponentsOnly => {write!(f, "only positive whole numbers are supported as exponents")}
			Self::NotImplemented => {write!(f, "not implemented")}
			Self::Io(e) => {write!(f, "io error: {e}")}
		}
	}
}
impl std::error::Error for ExecError {}

impl From<std::io::Error> for ExecError {
	fn from(e: std::io::Error) -> Self {
		Self::Io(e)
	}
}
