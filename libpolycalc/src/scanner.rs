//! Byte-level scanning of a single input line.
//!
//! The scanner does not tokenize ahead of time. The [literal parser][crate::parser] drives a
//! [Cursor] one byte at a time and calls [scan_int] whenever its grammar expects a number, so every
//! error is reported at the exact column where the input stopped making sense.

use num_traits::PrimInt;
use thiserror::Error;

/// A position-tracking view over one line of input, without its line terminator.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// The byte under the cursor, or `None` at end of line.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Advances past the byte under the cursor.
    #[inline]
    pub fn bump(&mut self) {
        if self.pos < self.input.len() {
            self.pos += 1;
        }
    }

    /// Consumes the byte under the cursor if it is `b`.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// 1-indexed column of the byte under the cursor. At end of line this is one past the last
    /// byte.
    #[inline]
    pub fn column(&self) -> usize {
        self.pos + 1
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

/// Whether an integer literal may start with a minus sign.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Sign {
    Signed,
    Unsigned,
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum ScanError {
    /// The literal is malformed at `column`.
    #[error("expected a digit at column {column}")]
    Unexpected { column: usize, found: Option<u8> },

    /// The literal leaves the range of its type at the digit in `column`.
    #[error("integer literal out of range at column {column}")]
    OutOfRange { column: usize },
}

impl ScanError {
    pub fn column(&self) -> usize {
        match self {
            ScanError::Unexpected { column, .. } | ScanError::OutOfRange { column } => *column,
        }
    }
}

/// Scans a decimal integer literal of type `N` at the cursor, leaving the cursor just past it.
///
/// The literal is scanned digit by digit with checked arithmetic, so there is no length limit
/// besides the range of `N`. A literal starting with `0` ends right after that `0`.
///
/// ```ignore
/// let mut cursor = Cursor::new(b"-42,7");
/// assert_eq!(scan_int::<i64>(&mut cursor, Sign::Signed), Ok(-42));
/// assert_eq!(cursor.peek(), Some(b','));
/// ```
pub fn scan_int<N: PrimInt>(cursor: &mut Cursor, sign: Sign) -> Result<N, ScanError> {
    let negative = sign == Sign::Signed && cursor.eat(b'-');

    match cursor.peek() {
        Some(b'0') => {
            cursor.bump();
            return Ok(N::zero());
        }
        Some(b) if b.is_ascii_digit() => {}
        found => {
            return Err(ScanError::Unexpected {
                column: cursor.column(),
                found,
            })
        }
    }

    let ten = N::from(10u8);
    let mut value = N::zero();
    while let Some(b) = cursor.peek().filter(u8::is_ascii_digit) {
        let digit = N::from(b - b'0');
        let next = match (ten, digit) {
            (Some(ten), Some(digit)) => value.checked_mul(&ten).and_then(|v| {
                if negative {
                    v.checked_sub(&digit)
                } else {
                    v.checked_add(&digit)
                }
            }),
            _ => None,
        };
        value = next.ok_or(ScanError::OutOfRange {
            column: cursor.column(),
        })?;
        cursor.bump();
    }
    Ok(value)
}

/// Parses `input` as exactly one integer literal of type `N`.
pub fn parse_int<N: PrimInt>(input: &[u8], sign: Sign) -> Result<N, ScanError> {
    let mut cursor = Cursor::new(input);
    let value = scan_int(&mut cursor, sign)?;
    match cursor.peek() {
        None => Ok(value),
        found => Err(ScanError::Unexpected {
            column: cursor.column(),
            found,
        }),
    }
}
