//! The calculator: a stack machine over polynomials driven one line at a time.
//!
//! A line starting with an ASCII letter is a [command][Command]; any other line is a polynomial
//! literal that is parsed and pushed onto the [stack][ValueStack]. A rejected line never changes
//! the stack.

#[macro_use]
mod errors;
use errors::*;
pub use errors::CommandErrors;

mod command;
pub use command::Command;

use crate::common::Span;
use crate::diagnostics::Diagnostic;
use crate::math::{Coeff, Degree, ExpOverflow, Poly};
use crate::parser::{parse_poly, ParseError, ParserOptions};
use crate::stack::ValueStack;

use thiserror::Error;
use tracing::debug;

/// A rejected command. Each variant displays as its error category.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum CommandError {
    #[error("STACK UNDERFLOW")]
    StackUnderflow {
        command: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("WRONG COMMAND")]
    WrongCommand { span: Span },

    #[error("WRONG VALUE")]
    WrongValue { span: Span },

    #[error("WRONG VARIABLE")]
    WrongVariable { span: Span },

    #[error("WRONG COUNT")]
    WrongCount { span: Span },

    #[error("EXPONENT OVERFLOW")]
    ExponentOverflow {
        command: &'static str,
        #[source]
        overflow: ExpOverflow,
    },
}

impl CommandError {
    /// A diagnostic describing this error against its line.
    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            CommandError::StackUnderflow {
                command,
                needed,
                available,
            } => StackUnderflow!(0..command.len(), command, *needed, available),
            CommandError::WrongCommand { span } => UnknownCommand!(*span),
            CommandError::WrongValue { span } => InvalidValue!(*span),
            CommandError::WrongVariable { span } => InvalidVariable!(*span),
            CommandError::WrongCount { span } => InvalidCount!(*span),
            CommandError::ExponentOverflow { command, .. } => {
                ExponentOverflow!(0..command.len(), command)
            }
        }
    }
}

/// A rejected line of input. Displays as the calculator's one-line error report.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum LineError {
    #[error("ERROR {line} {column}")]
    Parse {
        line: usize,
        column: usize,
        #[source]
        error: ParseError,
    },

    #[error("ERROR {line} {error}")]
    Command {
        line: usize,
        #[source]
        error: CommandError,
    },
}

impl From<ParseError> for LineError {
    fn from(error: ParseError) -> Self {
        LineError::Parse {
            line: error.position.line,
            column: error.position.column,
            error,
        }
    }
}

impl LineError {
    pub fn line(&self) -> usize {
        match self {
            LineError::Parse { line, .. } | LineError::Command { line, .. } => *line,
        }
    }

    pub fn diagnostic(&self) -> Diagnostic {
        match self {
            LineError::Parse { error, .. } => error.diagnostic(),
            LineError::Command { error, .. } => error.diagnostic(),
        }
    }
}

/// The state of a calculator session: the operand stack and the literal parser's options.
#[derive(Default)]
pub struct Calculator {
    stack: ValueStack,
    options: ParserOptions,
}

impl Calculator {
    pub fn new(options: ParserOptions) -> Self {
        Self {
            stack: ValueStack::new(),
            options,
        }
    }

    pub fn stack(&self) -> &ValueStack {
        &self.stack
    }

    /// Processes one line of input, without its line terminator.
    ///
    /// Returns the line to print for a command with output.
    pub fn process_line(
        &mut self,
        line_no: usize,
        line: &[u8],
    ) -> Result<Option<String>, LineError> {
        debug!(
            target: "polycalc::interpreter",
            line = line_no,
            depth = self.stack.len(),
            "processing line"
        );

        if line.first().map_or(false, u8::is_ascii_alphabetic) {
            Command::parse(line)
                .and_then(|command| self.execute(command))
                .map_err(|error| LineError::Command {
                    line: line_no,
                    error,
                })
        } else {
            self.push_parsed_literal(line_no, line)?;
            Ok(None)
        }
    }

    /// Parses a polynomial literal and pushes it onto the stack.
    pub fn push_parsed_literal(&mut self, line_no: usize, line: &[u8]) -> Result<(), ParseError> {
        let poly = parse_poly(line, line_no, &self.options)?;
        self.stack.push(poly);
        Ok(())
    }

    /// Executes a command, returning its output if it has any.
    pub fn execute(&mut self, command: Command) -> Result<Option<String>, CommandError> {
        debug!(
            target: "polycalc::interpreter",
            command = command.name(),
            depth = self.stack.len(),
            "executing command"
        );

        let output = match command {
            Command::Zero => {
                self.zero();
                None
            }
            Command::IsCoeff => Some(flag(self.is_coeff()?)),
            Command::IsZero => Some(flag(self.is_zero()?)),
            Command::Clone => {
                self.clone_top()?;
                None
            }
            Command::Add => {
                self.add()?;
                None
            }
            Command::Mul => {
                self.mul()?;
                None
            }
            Command::Neg => {
                self.neg()?;
                None
            }
            Command::Sub => {
                self.sub()?;
                None
            }
            Command::IsEq => Some(flag(self.is_eq()?)),
            Command::Deg => Some(self.deg()?.to_string()),
            Command::DegBy(var) => Some(self.deg_by(var)?.to_string()),
            Command::At(x) => {
                self.at(x)?;
                None
            }
            Command::Print => Some(self.print()?),
            Command::Pop => {
                self.pop()?;
                None
            }
            Command::Compose(k) => {
                self.compose(k)?;
                None
            }
        };
        Ok(output)
    }

    fn underflow(&self, command: Command) -> CommandError {
        CommandError::StackUnderflow {
            command: command.name(),
            needed: command.arity(),
            available: self.stack.len(),
        }
    }

    fn require(&self, command: Command) -> Result<(), CommandError> {
        if self.stack.len() < command.arity() {
            return Err(self.underflow(command));
        }
        Ok(())
    }

    fn top(&self, command: Command) -> Result<&Poly, CommandError> {
        self.stack.peek().ok_or_else(|| self.underflow(command))
    }

    /// Pops the two topmost polynomials, the top first.
    fn pop_two(&mut self, command: Command) -> Result<(Poly, Poly), CommandError> {
        self.require(command)?;
        match (self.stack.pop(), self.stack.pop()) {
            (Some(top), Some(second)) => Ok((top, second)),
            _ => Err(self.underflow(command)),
        }
    }

    /// Replaces the top of the stack with `f` of it.
    fn map_top(
        &mut self,
        command: Command,
        f: impl FnOnce(&Poly) -> Poly,
    ) -> Result<(), CommandError> {
        self.require(command)?;
        if let Some(top) = self.stack.top_mut() {
            *top = f(top);
        }
        Ok(())
    }

    /// Pushes the zero polynomial.
    pub fn zero(&mut self) {
        self.stack.push(Poly::zero());
    }

    pub fn is_coeff(&self) -> Result<bool, CommandError> {
        Ok(self.top(Command::IsCoeff)?.is_coeff())
    }

    pub fn is_zero(&self) -> Result<bool, CommandError> {
        Ok(self.top(Command::IsZero)?.is_zero())
    }

    /// Pushes a copy of the top polynomial.
    pub fn clone_top(&mut self) -> Result<(), CommandError> {
        let copy = self.top(Command::Clone)?.clone();
        self.stack.push(copy);
        Ok(())
    }

    pub fn add(&mut self) -> Result<(), CommandError> {
        let (top, second) = self.pop_two(Command::Add)?;
        self.stack.push(&top + &second);
        Ok(())
    }

    pub fn mul(&mut self) -> Result<(), CommandError> {
        self.require(Command::Mul)?;
        let product = match (self.stack.peek_at(0), self.stack.peek_at(1)) {
            (Some(top), Some(second)) => top
                .checked_mul(second)
                .map_err(|overflow| exponent_overflow(Command::Mul, overflow))?,
            _ => return Err(self.underflow(Command::Mul)),
        };
        self.pop_two(Command::Mul)?;
        self.stack.push(product);
        Ok(())
    }

    pub fn neg(&mut self) -> Result<(), CommandError> {
        self.map_top(Command::Neg, Poly::negate)
    }

    /// Replaces the two topmost polynomials with the top minus the one below it.
    pub fn sub(&mut self) -> Result<(), CommandError> {
        let (top, second) = self.pop_two(Command::Sub)?;
        self.stack.push(&top - &second);
        Ok(())
    }

    /// Whether the two topmost polynomials are equal. Leaves the stack as is.
    pub fn is_eq(&self) -> Result<bool, CommandError> {
        self.require(Command::IsEq)?;
        Ok(self.stack.peek_at(0) == self.stack.peek_at(1))
    }

    pub fn deg(&self) -> Result<Degree, CommandError> {
        Ok(self.top(Command::Deg)?.deg())
    }

    pub fn deg_by(&self, var: u32) -> Result<Degree, CommandError> {
        Ok(self.top(Command::DegBy(var))?.deg_by(var))
    }

    /// Replaces the top polynomial with its value at `x_0 = x`.
    pub fn at(&mut self, x: Coeff) -> Result<(), CommandError> {
        self.map_top(Command::At(x), |p| p.at(x))
    }

    /// Renders the top polynomial.
    pub fn print(&self) -> Result<String, CommandError> {
        Ok(self.top(Command::Print)?.to_string())
    }

    pub fn pop(&mut self) -> Result<Poly, CommandError> {
        self.stack.pop().ok_or_else(|| self.underflow(Command::Pop))
    }

    /// Pops `p`, then `q_0` through `q_{k-1}`, and pushes `p(q_0, ..., q_{k-1}, 0, ...)`.
    pub fn compose(&mut self, k: u32) -> Result<(), CommandError> {
        let command = Command::Compose(k);
        self.require(command)?;
        let p = self.stack.pop().unwrap_or_default();
        let substitutes: Vec<Poly> = (0..k).filter_map(|_| self.stack.pop()).collect();
        match p.checked_compose(&substitutes) {
            Ok(composed) => {
                self.stack.push(composed);
                Ok(())
            }
            Err(overflow) => {
                substitutes
                    .into_iter()
                    .rev()
                    .for_each(|q| self.stack.push(q));
                self.stack.push(p);
                Err(exponent_overflow(command, overflow))
            }
        }
    }
}

fn exponent_overflow(command: Command, overflow: ExpOverflow) -> CommandError {
    CommandError::ExponentOverflow {
        command: command.name(),
        overflow,
    }
}

fn flag(b: bool) -> String {
    u8::from(b).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `input` to a fresh calculator, collecting stdout and stderr lines.
    fn run(input: &str) -> (Vec<String>, Vec<String>) {
        let mut calc = Calculator::default();
        let (mut out, mut err) = (vec![], vec![]);
        for (i, line) in input.lines().enumerate() {
            match calc.process_line(i + 1, line.as_bytes()) {
                Ok(Some(output)) => out.push(output),
                Ok(None) => {}
                Err(e) => err.push(e.to_string()),
            }
        }
        (out, err)
    }

    macro_rules! calc_tests {
        ($($name:ident: $input:expr => [$($out:expr),*], [$($err:expr),*])*) => {
        $(
            #[test]
            fn $name() {
                let (out, err) = run($input);
                assert_eq!(out, vec![$($out.to_string()),*] as Vec<String>);
                assert_eq!(err, vec![$($err.to_string()),*] as Vec<String>);
            }
        )*
        }
    }

    calc_tests! {
        print_sum: "(1,0)+(1,1)\nPRINT" => ["(1,0)+(1,1)"], []
        deg_scalar: "5\nDEG" => ["0"], []
        is_zero: "0\nIS_ZERO" => ["1"], []
        compose_zero_count: "(((1,6),5),2)+((1,0)+(1,2),3)+(5,7)\nCOMPOSE 0\nPRINT" => ["0"], []
        compose_negative: "COMPOSE -1" => [], ["ERROR 1 WRONG COUNT"]
        malformed_literal: "(1,2),3)" => [], ["ERROR 1 6"]

        empty_line: "\n1\nPRINT" => ["1"], ["ERROR 1 1"]
        zero_and_predicates: "ZERO\nIS_COEFF\nIS_ZERO\n(1,1)\nIS_COEFF\nIS_ZERO" => ["1", "1", "0", "0"], []
        clone: "(1,1)\nCLONE\nADD\nPRINT" => ["(2,1)"], []
        add: "(1,1)\n(2,0)\nADD\nPRINT" => ["(2,0)+(1,1)"], []
        mul: "(1,1)+(1,0)\n(1,1)+(-1,0)\nMUL\nPRINT" => ["(-1,0)+(1,2)"], []
        neg: "(1,1)\nNEG\nPRINT" => ["(-1,1)"], []
        sub_is_top_minus_second: "1\n5\nSUB\nPRINT" => ["4"], []
        is_eq_keeps_operands: "(1,2)\n(1,2)\nIS_EQ\nPOP\nPRINT" => ["1", "(1,2)"], []
        is_eq_different: "(1,2)\n(2,2)\nIS_EQ" => ["0"], []
        deg_by: "((1,3),2)\nDEG_BY 0\nDEG_BY 1\nDEG_BY 2\nDEG" => ["2", "3", "0", "5"], []
        deg_zero: "0\nDEG\nDEG_BY 4" => ["-1", "-1"], []
        at: "(1,2)+((1,1),1)\nAT 2\nPRINT" => ["(4,0)+(2,1)"], []
        at_zero: "(1,2)+(3,0)\nAT 0\nPRINT" => ["3"], []
        pop: "1\n2\nPOP\nPRINT" => ["1"], []
        compose_substitutes_top_first: "(1,1)\n(2,0)\n(1,2)\nCOMPOSE 2\nPRINT" => ["4"], []
        compose_with_polynomial: "((1,0)+(1,1),0)\n(1,2)+((1,1),0)\nCOMPOSE 1\nPRINT" => ["((1,0)+(2,1)+(1,2),0)"], []

        underflow: "ADD\n1\nADD\nPRINT\nPOP\nPRINT\nCOMPOSE 1" => ["1"], ["ERROR 1 STACK UNDERFLOW", "ERROR 3 STACK UNDERFLOW", "ERROR 6 STACK UNDERFLOW", "ERROR 7 STACK UNDERFLOW"]
        argument_checked_before_stack: "DEG_BY x\nAT x\nCOMPOSE x" => [], ["ERROR 1 WRONG VARIABLE", "ERROR 2 WRONG VALUE", "ERROR 3 WRONG COUNT"]
        argument_trailing_text: "DEG_BY 1x\nAT 1x\nCOMPOSE 1x" => [], ["ERROR 1 WRONG VARIABLE", "ERROR 2 WRONG VALUE", "ERROR 3 WRONG COUNT"]
        argument_missing: "DEG_BY\nAT\nCOMPOSE" => [], ["ERROR 1 WRONG VARIABLE", "ERROR 2 WRONG VALUE", "ERROR 3 WRONG COUNT"]
        wrong_command: "PRINT 1\nprint\nFOO" => [], ["ERROR 1 WRONG COMMAND", "ERROR 2 WRONG COMMAND", "ERROR 3 WRONG COMMAND"]
        failed_line_keeps_stack: "(1,1)\n(1,2\nPRINT\nCOMPOSE 3\nPRINT" => ["(1,1)", "(1,1)"], ["ERROR 2 5", "ERROR 4 STACK UNDERFLOW"]
        exponent_overflow_keeps_session: "(1,2147483647)\nCLONE\nMUL\nPRINT\n5\nPRINT" => ["(1,2147483647)", "5"], ["ERROR 3 EXPONENT OVERFLOW"]
        compose_exponent_overflow: "(1,2)\n(1,2147483647)\nCOMPOSE 1\nPRINT\nPOP\nPRINT" => ["(1,2147483647)", "(1,2)"], ["ERROR 3 EXPONENT OVERFLOW"]
        exponent_at_limit: "(1,2147483646)\n(1,1)\nMUL\nPRINT" => ["(1,2147483647)"], []
        error_lines_are_counted: "(1,1)\nBAD\n-\nPRINT" => ["(1,1)"], ["ERROR 2 WRONG COMMAND", "ERROR 3 2"]
    }

    #[test]
    fn underflow_leaves_stack_untouched() {
        let mut calc = Calculator::default();
        calc.process_line(1, b"(1,1)").unwrap();
        assert!(calc.process_line(2, b"COMPOSE 1").is_err());
        assert!(calc.process_line(3, b"MUL").is_err());
        assert_eq!(calc.stack().len(), 1);
        assert_eq!(calc.stack().peek().map(Poly::to_string), Some("(1,1)".to_string()));
    }

    #[test]
    fn line_error_carries_diagnostic() {
        let mut calc = Calculator::default();
        let err = calc.process_line(3, b"ADD").unwrap_err();
        assert_eq!(err.line(), 3);
        let diag = err.diagnostic();
        assert_eq!(diag.code, Some("C0001"));
        assert_eq!(diag.span, Span::from(0..3));
        assert_eq!(diag.msg.as_deref(), Some("`ADD` needs 2 operands"));

        let err = calc.process_line(4, b"(1,2),3)").unwrap_err();
        assert_eq!(err.to_string(), "ERROR 4 6");
        assert_eq!(err.diagnostic().code, Some("P0001"));
    }

    #[test]
    fn exponent_overflow_leaves_stack_untouched() {
        let mut calc = Calculator::default();
        calc.process_line(1, b"(3,1)").unwrap();
        calc.process_line(2, b"(1,2)").unwrap();
        calc.process_line(3, b"(1,2147483647)").unwrap();
        let err = calc.process_line(4, b"COMPOSE 2").unwrap_err();
        assert_eq!(err.to_string(), "ERROR 4 EXPONENT OVERFLOW");
        assert_eq!(err.diagnostic().code, Some("C0006"));
        assert_eq!(err.diagnostic().span, Span::from(0..7));
        let stack: Vec<_> = (0..3)
            .filter_map(|depth| calc.stack().peek_at(depth).map(Poly::to_string))
            .collect();
        assert_eq!(stack, vec!["(1,2147483647)", "(1,2)", "(3,1)"]);

        assert!(calc.process_line(5, b"ADD").is_ok());
        assert_eq!(calc.stack().len(), 2);
    }

    #[test]
    fn nesting_limit() {
        let mut calc = Calculator::new(ParserOptions::default().set_max_depth(1));
        assert!(calc.process_line(1, b"(1,1)").is_ok());
        assert_eq!(
            calc.process_line(2, b"((1,1),1)").unwrap_err().to_string(),
            "ERROR 2 2"
        );
    }
}
