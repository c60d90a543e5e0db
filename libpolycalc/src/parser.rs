//! Parser for polynomial literals.
//!
//! A literal is one line of input in the grammar
//!
//! ```text
//! poly     := coeff | monomial ('+' monomial)*
//! monomial := '(' poly ',' exponent ')'
//! coeff    := '-'? digit+
//! exponent := digit+
//! ```
//!
//! with no whitespace anywhere. The parser is a state machine over the bytes of the line that
//! keeps one [monomial buffer][LayerStack] per open bracket, so its stack usage does not grow with
//! the nesting depth of the literal.

#[macro_use]
mod errors;
use errors::*;
pub use errors::ParseErrors;

mod layers;
use layers::LayerStack;

mod options;
pub use options::ParserOptions;

use crate::common::{Position, Span};
use crate::diagnostics::Diagnostic;
use crate::math::{Coeff, Exp, Poly};
use crate::scanner::{scan_int, Cursor, ScanError, Sign};

use num_traits::PrimInt;
use thiserror::Error;
use tracing::trace;

/// Parses one line of input, without its line terminator, as a polynomial literal.
///
/// `line_no` is only used to position errors.
///
/// ```ignore
/// let p = parse_poly(b"(1,1)+(1,0)", 1, &ParserOptions::default())?;
/// assert_eq!(p.to_string(), "(1,0)+(1,1)");
/// ```
pub fn parse_poly(
    line: &[u8],
    line_no: usize,
    options: &ParserOptions,
) -> Result<Poly, ParseError> {
    LiteralParser::new(line, line_no, *options).parse()
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ParseErrorKind {
    #[error("unexpected character `{found}`, expected {expected}")]
    UnexpectedChar {
        found: char,
        expected: &'static str,
    },

    #[error("unexpected end of line, expected {expected}")]
    UnexpectedEndOfLine { expected: &'static str },

    /// `start` is the column the literal begins at.
    #[error("integer literal out of range")]
    LiteralOutOfRange { start: usize },

    #[error("more than {max_depth} nested brackets")]
    NestingTooDeep { max_depth: usize },
}

/// A rejected polynomial literal.
///
/// Only the first error of a line is reported; the rest of the line is discarded.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
#[error("{kind} at {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
}

impl ParseError {
    pub fn span(&self) -> Span {
        Span::at_column(self.position.column)
    }

    /// A diagnostic describing this error against its line.
    pub fn diagnostic(&self) -> Diagnostic {
        let span = self.span();
        match &self.kind {
            ParseErrorKind::UnexpectedChar { found, expected } => {
                UnexpectedCharacter!(span, found, expected)
            }
            ParseErrorKind::UnexpectedEndOfLine { expected } => {
                UnexpectedEndOfLine!(span, expected)
            }
            ParseErrorKind::LiteralOutOfRange { start } => {
                let literal = Span::from(start.saturating_sub(1)..span.lo);
                LiteralOutOfRange!(span, literal)
            }
            ParseErrorKind::NestingTooDeep { max_depth } => NestingTooDeep!(span, max_depth),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum State {
    /// Just read `(`.
    OpenBracket,
    /// Just read the coefficient body of a monomial.
    Coefficient,
    /// Just read `,`.
    Comma,
    /// Just read an exponent.
    Exponent(Exp),
    /// Just read `)`.
    CloseBracket,
    /// Just read `+`.
    Plus,
    /// The line is a bare coefficient.
    QuickScalar,
}

struct LiteralParser<'a> {
    cursor: Cursor<'a>,
    line_no: usize,
    options: ParserOptions,
    layers: LayerStack,
}

impl<'a> LiteralParser<'a> {
    fn new(line: &'a [u8], line_no: usize, options: ParserOptions) -> Self {
        Self {
            cursor: Cursor::new(line),
            line_no,
            options,
            layers: LayerStack::new(),
        }
    }

    fn parse(mut self) -> Result<Poly, ParseError> {
        let mut state = match self.cursor.peek() {
            Some(b'(') => self.open_bracket()?,
            Some(b'-') | Some(b'0'..=b'9') => State::QuickScalar,
            _ => return Err(self.unexpected("a polynomial")),
        };

        loop {
            trace!(
                target: "polycalc::parser",
                ?state,
                column = self.cursor.column(),
                depth = self.layers.depth(),
                "literal parser state"
            );

            state = match state {
                State::OpenBracket => match self.cursor.peek() {
                    Some(b'(') => self.open_bracket()?,
                    Some(b'-') | Some(b'0'..=b'9') => {
                        let c = self.scan::<Coeff>(Sign::Signed, "a coefficient")?;
                        self.layers.set_scalar(c);
                        State::Coefficient
                    }
                    _ => return Err(self.unexpected("`(` or a coefficient")),
                },
                State::Coefficient => {
                    self.expect(b',', "`,`")?;
                    State::Comma
                }
                State::Comma => State::Exponent(self.scan::<Exp>(Sign::Unsigned, "an exponent")?),
                State::Exponent(exp) => {
                    self.expect(b')', "`)`")?;
                    let mono = self.layers.reduce_top_layer(exp);
                    self.layers.add_monomial(mono);
                    State::CloseBracket
                }
                State::CloseBracket => match self.cursor.peek() {
                    Some(b',') if self.layers.depth() > 0 => {
                        self.cursor.bump();
                        State::Comma
                    }
                    Some(b'+') => {
                        self.cursor.bump();
                        State::Plus
                    }
                    None if self.layers.depth() == 0 => return Ok(self.layers.finalize()),
                    _ if self.layers.depth() > 0 => return Err(self.unexpected("`,` or `+`")),
                    _ => return Err(self.unexpected("`+` or end of line")),
                },
                State::Plus => match self.cursor.peek() {
                    Some(b'(') => self.open_bracket()?,
                    _ => return Err(self.unexpected("`(`")),
                },
                State::QuickScalar => {
                    let c = self.scan::<Coeff>(Sign::Signed, "a coefficient")?;
                    return match self.cursor.peek() {
                        None => Ok(Poly::coeff(c)),
                        Some(_) => Err(self.unexpected("end of line")),
                    };
                }
            }
        }
    }

    fn open_bracket(&mut self) -> Result<State, ParseError> {
        let max_depth = self.options.max_depth();
        if self.layers.depth() >= max_depth {
            return Err(self.error(ParseErrorKind::NestingTooDeep { max_depth }));
        }
        self.cursor.bump();
        self.layers.new_layer();
        Ok(State::OpenBracket)
    }

    fn expect(&mut self, b: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.cursor.eat(b) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn scan<N: PrimInt>(&mut self, sign: Sign, expected: &'static str) -> Result<N, ParseError> {
        let start = self.cursor.column();
        scan_int(&mut self.cursor, sign).map_err(|err| {
            let column = err.column();
            let kind = match err {
                ScanError::Unexpected { found: Some(b), .. } => ParseErrorKind::UnexpectedChar {
                    found: char::from(b),
                    expected,
                },
                ScanError::Unexpected { found: None, .. } => {
                    ParseErrorKind::UnexpectedEndOfLine { expected }
                }
                ScanError::OutOfRange { .. } => ParseErrorKind::LiteralOutOfRange { start },
            };
            ParseError {
                kind,
                position: Position::new(self.line_no, column),
            }
        })
    }

    /// An error at the byte under the cursor.
    fn unexpected(&self, expected: &'static str) -> ParseError {
        self.error(match self.cursor.peek() {
            Some(b) => ParseErrorKind::UnexpectedChar {
                found: char::from(b),
                expected,
            },
            None => ParseErrorKind::UnexpectedEndOfLine { expected },
        })
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            position: Position::new(self.line_no, self.cursor.column()),
        }
    }
}

#[cfg(test)]
mod tests {
    macro_rules! parser_tests {
        ($($name:ident: $input:expr => $expected:expr)*) => {
        $(
            #[test]
            fn $name() {
                use crate::parser::*;

                let parsed = parse_poly($input.as_bytes(), 1, &ParserOptions::default());
                assert_eq!(parsed.map(|p| p.to_string()), Ok($expected.to_string()));
            }
        )*
        }
    }

    macro_rules! parser_error_tests {
        ($($name:ident: $input:expr => $column:expr, $kind:ident)*) => {
        $(
            #[test]
            fn $name() {
                use crate::parser::*;

                let err = parse_poly($input.as_bytes(), 7, &ParserOptions::default()).unwrap_err();
                assert_eq!(err.position, Position::new(7, $column), "{}", err);
                assert!(matches!(err.kind, ParseErrorKind::$kind { .. }), "{}", err);
            }
        )*
        }
    }

    mod canonical {
        parser_tests! {
            scalar: "5" => "5"
            negative_scalar: "-5" => "-5"
            zero: "0" => "0"
            negative_zero: "-0" => "0"
            min_coeff: "-9223372036854775808" => "-9223372036854775808"
            max_coeff: "9223372036854775807" => "9223372036854775807"
            linear: "(1,0)+(1,1)" => "(1,0)+(1,1)"
            max_exp: "(1,2147483647)" => "(1,2147483647)"
            nested: "((1,2),3)" => "((1,2),3)"
            nested_sum: "((1,0)+(2,1),3)+(4,5)" => "((1,0)+(2,1),3)+(4,5)"
            scenario_four: "(((1,6),5),2)+((1,0)+(1,2),3)+(5,7)" => "(((1,6),5),2)+((1,0)+(1,2),3)+(5,7)"
        }
    }

    mod normalizes {
        parser_tests! {
            unordered: "(1,1)+(1,0)" => "(1,0)+(1,1)"
            duplicate_exponents: "(1,2)+(3,2)" => "(4,2)"
            cancelling: "(1,2)+(-1,2)" => "0"
            zero_body: "(0,3)" => "0"
            zero_body_in_sum: "(0,3)+(2,1)" => "(2,1)"
            disguised_scalar: "(5,0)" => "5"
            nested_disguised_scalar: "(((7,0),0),0)" => "7"
            constant_inner_sum: "((1,0)+(1,0),0)" => "2"
            exponent_zero_merge: "((1,1),0)+(2,0)" => "((2,0)+(1,1),0)"
            nested_cancellation: "((1,1),0)+((-1,1),0)+(3,0)" => "3"
        }
    }

    mod errors {
        parser_error_tests! {
            empty: "" => 1, UnexpectedEndOfLine
            leading_space: " 1" => 1, UnexpectedChar
            leading_plus: "+(1,1)" => 1, UnexpectedChar
            scenario_six: "(1,2),3)" => 6, UnexpectedChar
            trailing_bracket: "(1,2))" => 6, UnexpectedChar
            whitespace: "(1, 2)" => 4, UnexpectedChar
            missing_comma: "(1)" => 3, UnexpectedChar
            missing_exponent: "(1,)" => 4, UnexpectedChar
            negative_exponent: "(1,-2)" => 4, UnexpectedChar
            unclosed: "((1,2),3" => 9, UnexpectedEndOfLine
            unclosed_sum: "(1,2)+" => 7, UnexpectedEndOfLine
            sum_without_bracket: "(1,2)+3" => 7, UnexpectedChar
            open_only: "(" => 2, UnexpectedEndOfLine
            lone_minus: "-" => 2, UnexpectedEndOfLine
            minus_bracket: "-(1,1)" => 2, UnexpectedChar
            scalar_garbage: "5x" => 2, UnexpectedChar
            scalar_leading_zero: "007" => 2, UnexpectedChar
            coeff_leading_zero: "(01,1)" => 3, UnexpectedChar
            exp_leading_zero: "(1,02)" => 5, UnexpectedChar
            scalar_overflow: "9223372036854775808" => 19, LiteralOutOfRange
            scalar_overflow_long: "99999999999999999999" => 19, LiteralOutOfRange
            scalar_underflow: "-9223372036854775809" => 20, LiteralOutOfRange
            coeff_overflow: "(10000000000000000000,1)" => 21, LiteralOutOfRange
            exp_overflow: "(1,2147483648)" => 13, LiteralOutOfRange
            comma_at_top_level: "(1,1),(1,2)" => 6, UnexpectedChar
            scalar_body_then_plus: "((1,1)+2,3)" => 8, UnexpectedChar
        }
    }

    mod nesting {
        use crate::parser::*;

        fn nested(depth: usize) -> String {
            format!("{}1{}", "(".repeat(depth), ",1)".repeat(depth))
        }

        #[test]
        fn at_limit() {
            let options = ParserOptions::default().set_max_depth(3);
            let p = parse_poly(nested(3).as_bytes(), 1, &options).unwrap();
            assert_eq!(p.depth(), 3);
        }

        #[test]
        fn beyond_limit() {
            let options = ParserOptions::default().set_max_depth(3);
            let err = parse_poly(nested(4).as_bytes(), 2, &options).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::NestingTooDeep { max_depth: 3 });
            assert_eq!(err.position, Position::new(2, 4));
        }

        #[test]
        fn zero_depth_accepts_scalars_only() {
            let options = ParserOptions::default().set_max_depth(0);
            assert_eq!(parse_poly(b"42", 1, &options), Ok(Poly::coeff(42)));
            assert!(parse_poly(b"(1,1)", 1, &options).is_err());
        }

        #[test]
        fn deep_literal_default_limit() {
            let p = parse_poly(nested(512).as_bytes(), 1, &ParserOptions::default()).unwrap();
            assert_eq!(p.depth(), 512);
            assert_eq!(p.deg(), 512);
        }
    }

    mod roundtrip {
        use crate::math::Poly;
        use crate::parser::*;

        fn parse(s: &str) -> Poly {
            parse_poly(s.as_bytes(), 1, &ParserOptions::default()).unwrap()
        }

        #[test]
        fn algebra_results_roundtrip() {
            let (x0, x1, x2) = (Poly::var(0), Poly::var(1), Poly::var(2));
            let polys = vec![
                Poly::coeff(i64::MIN),
                &x0 + &x1,
                (&(&x0 * &x1) - &x2).pow(3),
                &(&x2 * &Poly::coeff(-4)) + &Poly::coeff(9),
                (&x0 - &Poly::one()).pow(5).compose(&[&x1 + &x2]),
            ];
            for p in polys {
                assert_eq!(parse(&p.to_string()), p, "{}", p);
            }
        }
    }

    mod diagnostics {
        use crate::parser::*;

        #[test]
        fn codes() {
            let diag = |line: &str| {
                parse_poly(line.as_bytes(), 1, &ParserOptions::default())
                    .unwrap_err()
                    .diagnostic()
            };
            assert_eq!(diag("(1,2),3)").code, Some("P0001"));
            assert_eq!(diag("(1,2").code, Some("P0002"));
            assert_eq!(diag("(1,9999999999)").code, Some("P0003"));
            let deep = "(".repeat(513);
            assert_eq!(diag(&deep).code, Some("P0004"));
        }

        #[test]
        fn span_points_at_column() {
            let diag = parse_poly(b"(1,2),3)", 1, &ParserOptions::default())
                .unwrap_err()
                .diagnostic();
            assert_eq!(diag.span, Span::from(5..6));
            assert_eq!(diag.title, "Unexpected character `,`");
            assert_eq!(diag.msg.as_deref(), Some("expected `+` or end of line"));
        }

        #[test]
        fn out_of_range_notes_literal() {
            let err = parse_poly(b"(1,2147483648)", 1, &ParserOptions::default()).unwrap_err();
            assert_eq!(err.kind, ParseErrorKind::LiteralOutOfRange { start: 4 });
            let diag = err.diagnostic();
            assert_eq!(diag.span, Span::from(12..13));
            assert_eq!(diag.associated_diagnostics.len(), 1);
            assert_eq!(diag.associated_diagnostics[0].span, Span::from(3..12));
        }
    }
}
