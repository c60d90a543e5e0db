use crate::math::reduce;

use core::fmt;

/// Coefficient of a polynomial. Coefficient arithmetic wraps around at 64 bits.
pub type Coeff = i64;

/// Exponent of a monomial. Always non-negative in a canonical polynomial.
pub type Exp = i32;

/// Degree of a polynomial; `-1` for the zero polynomial.
pub type Degree = i64;

/// A sparse multivariate polynomial in canonical form.
///
/// A polynomial is either a scalar coefficient or a sum of [monomials][Mono] in the "next"
/// variable, whose bodies are themselves polynomials in the variables after it. Nesting depth
/// corresponds to variable index: the outermost sum is over `x_0`, its bodies over `x_1`, and so
/// on.
///
/// Every `Poly` observable outside this crate is canonical:
///
///   - monomials of a sum are sorted by strictly increasing exponent,
///   - no monomial has a zero body,
///   - a sum is never a disguised scalar (a lone `(c, 0)` monomial with scalar `c` is `c`),
///   - and therefore the scalar `0` is the only representation of zero.
///
/// Canonical form is what makes the derived structural equality coincide with mathematical
/// equality.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Poly {
    pub(crate) repr: Repr,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub(crate) enum Repr {
    Coeff(Coeff),
    Sum(Vec<Mono>),
}

/// A monomial `body * x^exp`, owning its body exclusively.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Mono {
    pub(crate) exp: Exp,
    pub(crate) poly: Poly,
}

impl Mono {
    /// Creates a monomial `poly * x^exp`.
    ///
    /// # Panics
    ///
    /// If `exp` is negative.
    pub fn new(poly: Poly, exp: Exp) -> Self {
        assert!(exp >= 0, "monomial exponent must be non-negative, got {}", exp);
        Self { exp, poly }
    }

    #[inline]
    pub fn exp(&self) -> Exp {
        self.exp
    }

    #[inline]
    pub fn poly(&self) -> &Poly {
        &self.poly
    }

    /// Splits the monomial into its body and exponent.
    pub fn into_parts(self) -> (Poly, Exp) {
        (self.poly, self.exp)
    }
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<Coeff> for Poly {
    fn from(c: Coeff) -> Self {
        Self::coeff(c)
    }
}

impl Poly {
    /// The scalar polynomial `c`.
    #[inline]
    pub fn coeff(c: Coeff) -> Self {
        Self {
            repr: Repr::Coeff(c),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::coeff(0)
    }

    #[inline]
    pub fn one() -> Self {
        Self::coeff(1)
    }

    /// The polynomial `x_i`, i.e. the `i`th variable.
    pub fn var(i: usize) -> Self {
        let mut poly = Self::from_sorted(vec![Mono::new(Self::one(), 1)]);
        for _ in 0..i {
            poly = Self::from_sorted(vec![Mono::new(poly, 0)]);
        }
        poly
    }

    /// Folds an unordered list of monomials of one variable layer into a canonical polynomial.
    ///
    /// Monomials sharing an exponent are summed, and monomials whose bodies vanish are dropped.
    pub fn from_monos(monos: Vec<Mono>) -> Self {
        reduce::reduce(monos)
    }

    /// Builds a polynomial from monomials already sorted by strictly increasing exponent with
    /// non-zero bodies, collapsing a disguised scalar.
    pub(crate) fn from_sorted(mut monos: Vec<Mono>) -> Self {
        debug_assert!(monos.windows(2).all(|w| w[0].exp < w[1].exp));
        debug_assert!(monos.iter().all(|m| !m.poly.is_zero()));
        let disguised_scalar =
            matches!(monos.as_slice(), [Mono { exp: 0, poly }] if poly.is_coeff());
        if disguised_scalar || monos.is_empty() {
            monos.pop().map(|m| m.poly).unwrap_or_default()
        } else {
            Self {
                repr: Repr::Sum(monos),
            }
        }
    }

    #[inline]
    pub fn is_coeff(&self) -> bool {
        matches!(self.repr, Repr::Coeff(_))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        matches!(self.repr, Repr::Coeff(0))
    }

    /// The scalar value of the polynomial, if it is a scalar.
    #[inline]
    pub fn as_coeff(&self) -> Option<Coeff> {
        match self.repr {
            Repr::Coeff(c) => Some(c),
            Repr::Sum(_) => None,
        }
    }

    /// The monomials of the polynomial in increasing exponent order; empty for a scalar.
    #[inline]
    pub fn monos(&self) -> &[Mono] {
        match &self.repr {
            Repr::Coeff(_) => &[],
            Repr::Sum(monos) => monos,
        }
    }

    /// Number of nested sums; `0` for a scalar.
    pub fn depth(&self) -> usize {
        self.monos()
            .iter()
            .map(|m| m.poly.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total degree of the polynomial, or `-1` for zero.
    ///
    /// ```ignore
    /// // x_0^2 * x_1^3 + x_1 -> 5
    /// assert_eq!(parse("((1,3),2)+((1,1),0)").deg(), 5);
    /// ```
    pub fn deg(&self) -> Degree {
        match &self.repr {
            Repr::Coeff(0) => -1,
            Repr::Coeff(_) => 0,
            Repr::Sum(monos) => monos
                .iter()
                .map(|m| Degree::from(m.exp) + m.poly.deg())
                .max()
                .unwrap_or(-1),
        }
    }

    /// Degree of the polynomial with respect to the variable `x_var`, or `-1` for zero.
    pub fn deg_by(&self, var: u32) -> Degree {
        match &self.repr {
            Repr::Coeff(0) => -1,
            Repr::Coeff(_) => 0,
            Repr::Sum(monos) if var == 0 => monos.last().map_or(-1, |m| Degree::from(m.exp)),
            Repr::Sum(monos) => monos
                .iter()
                .map(|m| m.poly.deg_by(var - 1))
                .max()
                .unwrap_or(-1),
        }
    }
}

/// Renders the polynomial in the literal syntax accepted by the parser.
///
/// ```ignore
/// assert_eq!(parse("(1,1)+(1,0)").to_string(), "(1,0)+(1,1)");
/// ```
impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Coeff(c) => write!(f, "{}", c),
            Repr::Sum(monos) => {
                for (i, mono) in monos.iter().enumerate() {
                    if i > 0 {
                        f.write_str("+")?;
                    }
                    write!(f, "{}", mono)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Mono {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.poly, self.exp)
    }
}
