//! Diagnostic errors produced by the command interpreter.

use crate::diagnostics::{DiagnosticRecord, DiagnosticRegistry};

macro_rules! define_errors {
    ($($(#[doc = $doc:expr])+ $code:ident: $error:ident $gen_macro:tt)*) => {$(
        $(#[doc = $doc])+
        pub(crate) struct $error;

        impl DiagnosticRecord for $error {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        })*

        pub struct CommandErrors;

        impl DiagnosticRegistry for CommandErrors {
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                let mut vec = Vec::new();
                $(vec.push(($error::CODE, $error::EXPLANATION));)*
                vec
            }
        }

        $(
            macro_rules! $error $gen_macro
        )*
    };
}

define_errors! {
    ///This error fires on a command that needs more operands than the stack holds.
    ///
    ///Most commands work on the top of the stack, and `ADD`, `SUB`, `MUL` and `IS_EQ` on the two
    ///topmost polynomials. `COMPOSE k` needs `k + 1` polynomials: the polynomial to compose, and
    ///`k` polynomials to substitute for its variables.
    ///
    ///```text
    ///(1,1)
    ///ADD
    ///^^^- needs 2 operands, but the stack holds 1
    ///```
    ///
    ///A command that fails this way leaves the stack untouched.
    C0001: StackUnderflow {
        ($span:expr, $command:expr, $needed:expr, $available:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Stack underflow",
                StackUnderflow::CODE,
                format!(
                    "`{}` needs {} operand{}",
                    $command,
                    $needed,
                    if $needed == 1 { "" } else { "s" }
                ),
            )
            .with_note(format!("the stack holds {}", $available))
        }}
    }

    ///This error fires on a line that starts with a letter but is not a calculator command.
    ///
    ///The commands are `ZERO`, `IS_COEFF`, `IS_ZERO`, `CLONE`, `ADD`, `MUL`, `NEG`, `SUB`,
    ///`IS_EQ`, `DEG`, `DEG_BY`, `AT`, `PRINT`, `POP` and `COMPOSE`. Command names are case
    ///sensitive.
    ///
    ///Only `DEG_BY`, `AT` and `COMPOSE` take an argument, separated from the command by a single
    ///space. Any other command must make up the whole line:
    ///
    ///```text
    ///PRINT 1
    ///^^^^^^^- `PRINT` takes no argument
    ///```
    C0002: UnknownCommand {
        ($span:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Unknown command",
                UnknownCommand::CODE,
                "not a calculator command".to_string(),
            )
            .with_help("only DEG_BY, AT and COMPOSE take an argument, after a single space")
        }}
    }

    ///This error fires on an `AT` command whose argument is not a valid coefficient.
    ///
    ///The evaluation point of `AT` is a signed 64-bit integer, in the range
    ///`-9223372036854775808..=9223372036854775807`, written without leading zeros or whitespace.
    C0003: InvalidValue {
        ($span:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Invalid evaluation point",
                InvalidValue::CODE,
                "expected a coefficient".to_string(),
            )
            .with_note("coefficients are in -9223372036854775808..=9223372036854775807")
        }}
    }

    ///This error fires on a `DEG_BY` command whose argument is not a valid variable index.
    ///
    ///Variable indices are unsigned 32-bit integers, in the range `0..=4294967295`, written
    ///without leading zeros or whitespace.
    C0004: InvalidVariable {
        ($span:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Invalid variable index",
                InvalidVariable::CODE,
                "expected a variable index".to_string(),
            )
            .with_note("variable indices are in 0..=4294967295")
        }}
    }

    ///This error fires on a `COMPOSE` command whose argument is not a valid count.
    ///
    ///The argument of `COMPOSE` is the number of polynomials to substitute, an unsigned 32-bit
    ///integer in the range `0..=4294967295`, written without leading zeros or whitespace.
    ///
    ///```text
    ///COMPOSE -1
    ///        ^^- not a count
    ///```
    C0005: InvalidCount {
        ($span:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Invalid composition count",
                InvalidCount::CODE,
                "expected a count of polynomials".to_string(),
            )
            .with_note("counts are in 0..=4294967295")
        }}
    }

    ///This error fires on a `MUL` or `COMPOSE` whose result would have an exponent beyond
    ///`2147483647`, the largest exponent a polynomial can hold.
    ///
    ///```text
    ///(1,2147483647)
    ///CLONE
    ///MUL
    ///^^^- x_0^4294967294 is not representable
    ///```
    ///
    ///A command that fails this way leaves the stack untouched.
    C0006: ExponentOverflow {
        ($span:expr, $command:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Exponent overflow",
                ExponentOverflow::CODE,
                format!("the result of `{}` has an exponent out of range", $command),
            )
            .with_note("exponents are in 0..=2147483647")
        }}
    }
}
