//! The calculator's operand stack.

use crate::math::Poly;

/// A LIFO of owned polynomials.
///
/// Values are moved in and out; reading a value in place borrows it from the stack.
#[derive(Default, Debug)]
pub struct ValueStack {
    values: Vec<Poly>,
}

impl ValueStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, poly: Poly) {
        self.values.push(poly);
    }

    pub fn pop(&mut self) -> Option<Poly> {
        self.values.pop()
    }

    /// The top of the stack.
    pub fn peek(&self) -> Option<&Poly> {
        self.values.last()
    }

    /// The value `depth` places below the top; `peek_at(0)` is the top.
    pub fn peek_at(&self, depth: usize) -> Option<&Poly> {
        self.values.iter().rev().nth(depth)
    }

    pub fn top_mut(&mut self) -> Option<&mut Poly> {
        self.values.last_mut()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}
