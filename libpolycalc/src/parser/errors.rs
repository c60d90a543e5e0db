//! Diagnostic errors produced by the literal parser.

use crate::diagnostics::{DiagnosticRecord, DiagnosticRegistry};

macro_rules! define_errors {
    ($($(#[doc = $doc:expr])+ $code:ident: $error:ident $gen_macro:tt)*) => {$(
        $(#[doc = $doc])+
        pub(crate) struct $error;

        impl DiagnosticRecord for $error {
            const CODE: &'static str = stringify!($code);
            const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
        })*

        pub struct ParseErrors;

        impl DiagnosticRegistry for ParseErrors {
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
    ///This error fires on a character that cannot continue a polynomial literal at its position.
    ///
    ///A polynomial literal is either a bare coefficient or a sum of monomials, where each monomial
    ///is a bracketed pair of a polynomial and an exponent:
    ///
    ///```text
    ///poly     := coeff | monomial ('+' monomial)*
    ///monomial := '(' poly ',' exponent ')'
    ///```
    ///
    ///The following are examples of lines that emit this error:
    ///
    ///```text
    ///(1,2),3)
    ///     ^- offending character: the literal is already complete
    ///```
    ///
    ///```text
    ///(1, 2)
    ///   ^- offending character: whitespace is not allowed
    ///```
    ///
    ///```text
    ///(1,02)
    ///     ^- offending character: a literal starting with `0` ends after it
    ///```
    P0001: UnexpectedCharacter {
        ($span:expr, $found:expr, $expected:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                format!("Unexpected character `{}`", $found),
                UnexpectedCharacter::CODE,
                format!("expected {}", $expected),
            )
        }}
    }

    ///This error fires on a polynomial literal that ends before it is complete.
    ///
    ///The following are examples of lines that emit this error:
    ///
    ///```text
    ///(1,2)+
    ///      ^- expected another monomial
    ///```
    ///
    ///```text
    ///((1,2),3
    ///        ^- expected `)`
    ///```
    ///
    ///An empty line is also an incomplete literal, and is rejected at column 1.
    P0002: UnexpectedEndOfLine {
        ($span:expr, $expected:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Unexpected end of line",
                UnexpectedEndOfLine::CODE,
                format!("expected {}", $expected),
            )
        }}
    }

    ///This error fires on an integer literal that does not fit its type.
    ///
    ///Coefficients are signed 64-bit integers, in the range
    ///`-9223372036854775808..=9223372036854775807`. Exponents are non-negative 32-bit integers,
    ///in the range `0..=2147483647`.
    ///
    ///The error is reported at the first digit at which the literal leaves its range:
    ///
    ///```text
    ///(1,2147483648)
    ///            ^- the exponent is out of range from here
    ///```
    P0003: LiteralOutOfRange {
        ($span:expr, $literal:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Integer literal out of range",
                LiteralOutOfRange::CODE,
                "the literal leaves the range of its type at this digit".to_string(),
            )
            .with_spanned_note($literal, "in this literal")
            .with_note("coefficients are in -9223372036854775808..=9223372036854775807")
            .with_note("exponents are in 0..=2147483647")
        }}
    }

    ///This error fires on a polynomial literal that opens more brackets at once than the
    ///calculator is configured to accept.
    ///
    ///Every open bracket introduces one more variable, so a deeply nested literal is a polynomial
    ///in many variables. The limit bounds the work every later operation does on the polynomial.
    ///It can be changed with the `--max-depth` option.
    P0004: NestingTooDeep {
        ($span:expr, $max_depth:expr) => {{
            use crate::diagnostics::*;

            Diagnostic::span_err(
                $span,
                "Polynomial nested too deeply",
                NestingTooDeep::CODE,
                "this bracket exceeds the nesting limit".to_string(),
            )
            .with_help(format!("at most {} brackets may be open at once", $max_depth))
        }}
    }
}
