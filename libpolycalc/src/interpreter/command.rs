use super::CommandError;
use crate::common::Span;
use crate::math::Coeff;
use crate::scanner::{parse_int, Sign};

use num_traits::PrimInt;

/// A calculator command, with its argument if it takes one.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Zero,
    IsCoeff,
    IsZero,
    Clone,
    Add,
    Mul,
    Neg,
    Sub,
    IsEq,
    Deg,
    DegBy(u32),
    At(Coeff),
    Print,
    Pop,
    Compose(u32),
}

impl Command {
    /// Parses a command line.
    ///
    /// The command word runs up to the first space. Commands with an argument expect exactly one
    /// space and then the argument as the rest of the line; a malformed or missing argument is an
    /// error of that command. Any other command must be the whole line.
    pub fn parse(line: &[u8]) -> Result<Command, CommandError> {
        let (word, arg) = match line.iter().position(|&b| b == b' ') {
            Some(i) => (&line[..i], Some(Argument::new(line, i + 1))),
            None => (line, None),
        };
        let wrong_command = || CommandError::WrongCommand {
            span: Span::from(0..line.len()),
        };

        let command = match word {
            b"DEG_BY" => Command::DegBy(
                argument(arg, line, Sign::Unsigned)
                    .map_err(|span| CommandError::WrongVariable { span })?,
            ),
            b"AT" => Command::At(
                argument(arg, line, Sign::Signed)
                    .map_err(|span| CommandError::WrongValue { span })?,
            ),
            b"COMPOSE" => Command::Compose(
                argument(arg, line, Sign::Unsigned)
                    .map_err(|span| CommandError::WrongCount { span })?,
            ),
            _ if arg.is_some() => return Err(wrong_command()),
            b"ZERO" => Command::Zero,
            b"IS_COEFF" => Command::IsCoeff,
            b"IS_ZERO" => Command::IsZero,
            b"CLONE" => Command::Clone,
            b"ADD" => Command::Add,
            b"MUL" => Command::Mul,
            b"NEG" => Command::Neg,
            b"SUB" => Command::Sub,
            b"IS_EQ" => Command::IsEq,
            b"DEG" => Command::Deg,
            b"PRINT" => Command::Print,
            b"POP" => Command::Pop,
            _ => return Err(wrong_command()),
        };
        Ok(command)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Zero => "ZERO",
            Command::IsCoeff => "IS_COEFF",
            Command::IsZero => "IS_ZERO",
            Command::Clone => "CLONE",
            Command::Add => "ADD",
            Command::Mul => "MUL",
            Command::Neg => "NEG",
            Command::Sub => "SUB",
            Command::IsEq => "IS_EQ",
            Command::Deg => "DEG",
            Command::DegBy(_) => "DEG_BY",
            Command::At(_) => "AT",
            Command::Print => "PRINT",
            Command::Pop => "POP",
            Command::Compose(_) => "COMPOSE",
        }
    }

    /// Number of stack operands the command needs.
    pub fn arity(&self) -> usize {
        match self {
            Command::Zero => 0,
            Command::Add | Command::Mul | Command::Sub | Command::IsEq => 2,
            Command::Compose(k) => (*k as usize).saturating_add(1),
            _ => 1,
        }
    }
}

/// The argument part of a command line, starting at byte `start`.
#[derive(Copy, Clone)]
struct Argument<'a> {
    start: usize,
    text: &'a [u8],
}

impl<'a> Argument<'a> {
    fn new(line: &'a [u8], start: usize) -> Self {
        Self {
            start,
            text: &line[start..],
        }
    }
}

/// Parses a command argument, or returns the span to blame.
fn argument<N: PrimInt>(arg: Option<Argument>, line: &[u8], sign: Sign) -> Result<N, Span> {
    match arg {
        Some(arg) => parse_int(arg.text, sign)
            .map_err(|_| Span::from(arg.start..line.len().max(arg.start + 1))),
        None => Err(Span::from(line.len()..line.len() + 1)),
    }
}
