//! libpolycalc is a calculator over sparse multivariate polynomials with integer coefficients.
//!
//! Input is a sequence of lines, each either a polynomial literal or a stack command. A
//! [Calculator] processes one line at a time, reporting rejected lines as [LineError]s that carry
//! both the calculator's one-line error report and a rich [Diagnostic][diagnostics::Diagnostic].

pub mod common;
pub mod diagnostics;

pub mod scanner;

mod parser;
pub use parser::parse_poly;
pub use parser::{ParseError, ParseErrorKind, ParserOptions};

mod math;
pub use math::{Coeff, Degree, Exp, ExpOverflow, Mono, Poly};

mod stack;
pub use stack::ValueStack;

mod interpreter;
pub use interpreter::Calculator;
pub use interpreter::{Command, CommandError, LineError};
