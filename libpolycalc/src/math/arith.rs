#![allow(clippy::should_implement_trait)]

use crate::math::poly::Repr;
use crate::math::{reduce, Coeff, Exp, Mono, Poly};

use core::cmp::Ordering;
use std::borrow::Cow;
use std::ops::{Add, Mul, Neg, Sub};
use thiserror::Error;

/// A product term whose exponent leaves the range of [Exp].
#[derive(Error, Copy, Clone, PartialEq, Eq, Debug)]
#[error("exponent overflow: {lhs} + {rhs} exceeds {max}", max = Exp::MAX)]
pub struct ExpOverflow {
    pub lhs: Exp,
    pub rhs: Exp,
}

/// Sums two exponents of a product term.
#[inline]
fn add_exps(lhs: Exp, rhs: Exp) -> Result<Exp, ExpOverflow> {
    lhs.checked_add(rhs).ok_or(ExpOverflow { lhs, rhs })
}

impl Poly {
    /// The monomials of `self` as a sum over the outermost variable. A non-zero scalar is a single
    /// exponent-0 term.
    fn terms(&self) -> Cow<'_, [Mono]> {
        match &self.repr {
            Repr::Coeff(0) => Cow::Borrowed(&[]),
            Repr::Coeff(c) => Cow::Owned(vec![Mono {
                exp: 0,
                poly: Poly::coeff(*c),
            }]),
            Repr::Sum(monos) => Cow::Borrowed(monos),
        }
    }

    /// Negates each coefficient of the polynomial.
    pub fn negate(&self) -> Poly {
        match &self.repr {
            Repr::Coeff(c) => Poly::coeff(c.wrapping_neg()),
            Repr::Sum(monos) => Poly {
                repr: Repr::Sum(
                    monos
                        .iter()
                        .map(|m| Mono {
                            exp: m.exp,
                            poly: m.poly.negate(),
                        })
                        .collect(),
                ),
            },
        }
    }

    /// Adds two polynomials.
    ///
    /// Both operands are walked as exponent-sorted term lists: unmatched terms carry over, matched
    /// terms add their bodies recursively and survive only if the sum is non-zero.
    ///
    /// ```ignore
    /// // (1 + x) + (2 - x) -> 3
    /// assert_eq!(parse("(1,0)+(1,1)").add(&parse("(2,0)+(-1,1)")), Poly::coeff(3));
    /// ```
    pub fn add(&self, other: &Poly) -> Poly {
        if let (Repr::Coeff(a), Repr::Coeff(b)) = (&self.repr, &other.repr) {
            return Poly::coeff(a.wrapping_add(*b));
        }

        let (lhs, rhs) = (self.terms(), other.terms());
        let mut sum = Vec::with_capacity(lhs.len() + rhs.len());
        let (mut i, mut j) = (0, 0);
        while i < lhs.len() && j < rhs.len() {
            let (a, b) = (&lhs[i], &rhs[j]);
            match a.exp.cmp(&b.exp) {
                Ordering::Less => {
                    sum.push(a.clone());
                    i += 1;
                }
                Ordering::Greater => {
                    sum.push(b.clone());
                    j += 1;
                }
                Ordering::Equal => {
                    let body = a.poly.add(&b.poly);
                    if !body.is_zero() {
                        sum.push(Mono {
                            exp: a.exp,
                            poly: body,
                        });
                    }
                    i += 1;
                    j += 1;
                }
            }
        }
        sum.extend_from_slice(&lhs[i..]);
        sum.extend_from_slice(&rhs[j..]);

        Poly::from_sorted(sum)
    }

    /// Subtracts `other` from `self`.
    #[inline]
    pub fn sub(&self, other: &Poly) -> Poly {
        self.add(&other.negate())
    }

    /// Multiplies each coefficient of the polynomial by a scalar.
    pub fn mul_coeff(&self, c: Coeff) -> Poly {
        match &self.repr {
            Repr::Coeff(a) => Poly::coeff(a.wrapping_mul(c)),
            Repr::Sum(_) if c == 0 => Poly::zero(),
            Repr::Sum(monos) => Poly::from_sorted(
                monos
                    .iter()
                    .filter_map(|m| {
                        // Wrapping products can vanish.
                        let body = m.poly.mul_coeff(c);
                        if body.is_zero() {
                            None
                        } else {
                            Some(Mono { exp: m.exp, poly: body })
                        }
                    })
                    .collect(),
            ),
        }
    }

    /// Multiplies two polynomials.
    ///
    /// # Panics
    ///
    /// Panics if an exponent of the product leaves the range of [Exp]. See
    /// [checked_mul](Poly::checked_mul).
    pub fn mul(&self, other: &Poly) -> Poly {
        self.checked_mul(other)
            .unwrap_or_else(|overflow| panic!("{}", overflow))
    }

    /// Multiplies two polynomials, failing if an exponent of the product leaves the range of
    /// [Exp].
    ///
    /// Two sums are expanded bilinearly, and the cross products are folded into canonical form by
    /// the reducer.
    pub fn checked_mul(&self, other: &Poly) -> Result<Poly, ExpOverflow> {
        match (&self.repr, &other.repr) {
            (Repr::Coeff(c), _) => Ok(other.mul_coeff(*c)),
            (_, Repr::Coeff(c)) => Ok(self.mul_coeff(*c)),
            (Repr::Sum(lhs), Repr::Sum(rhs)) => {
                let mut products = Vec::with_capacity(lhs.len() * rhs.len());
                for a in lhs {
                    for b in rhs {
                        products.push(Mono {
                            exp: add_exps(a.exp, b.exp)?,
                            poly: a.poly.checked_mul(&b.poly)?,
                        });
                    }
                }
                Ok(reduce::reduce(products))
            }
        }
    }

    /// Raises the polynomial to the power `exp`. Any polynomial, zero included, to the power 0
    /// is 1.
    ///
    /// # Panics
    ///
    /// Panics if an exponent of the result leaves the range of [Exp].
    pub fn pow(&self, exp: u32) -> Poly {
        self.checked_pow(exp)
            .unwrap_or_else(|overflow| panic!("{}", overflow))
    }

    /// Raises the polynomial to the power `exp` by binary exponentiation, failing if an exponent
    /// of the result leaves the range of [Exp].
    pub fn checked_pow(&self, mut exp: u32) -> Result<Poly, ExpOverflow> {
        if let Repr::Coeff(c) = self.repr {
            return Ok(Poly::coeff(c.wrapping_pow(exp)));
        }

        let mut result = Poly::one();
        let mut base = self.clone();
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.checked_mul(&base)?;
            }
            exp >>= 1;
            if exp > 0 {
                base = base.checked_mul(&base)?;
            }
        }
        Ok(result)
    }
}

macro_rules! impl_binop {
    ($($trait:ident::$method:ident => $inherent:ident)*) => {$(
        impl<'a> $trait<&'a Poly> for &'a Poly {
            type Output = Poly;

            #[inline]
            fn $method(self, rhs: &'a Poly) -> Poly {
                Poly::$inherent(self, rhs)
            }
        }
    )*};
}

impl_binop! {
    Add::add => add
    Sub::sub => sub
    Mul::mul => mul
}

impl Neg for &Poly {
    type Output = Poly;

    #[inline]
    fn neg(self) -> Poly {
        self.negate()
    }
}
