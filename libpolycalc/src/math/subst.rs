use crate::math::poly::Repr;
use crate::math::{Coeff, ExpOverflow, Poly};

impl Poly {
    /// Evaluates the polynomial at `x_0 = x`. The result is a polynomial in the remaining
    /// variables, each shifted down by one index.
    ///
    /// ```ignore
    /// // (x_0^2 + x_0 x_1)(2) -> 4 + 2 x_0
    /// assert_eq!(parse("(1,2)+((1,1),1)").at(2).to_string(), "(4,0)+(2,1)");
    /// ```
    pub fn at(&self, x: Coeff) -> Poly {
        match &self.repr {
            Repr::Coeff(_) => self.clone(),
            Repr::Sum(monos) => monos.iter().fold(Poly::zero(), |acc, m| {
                acc.add(&m.poly.mul_coeff(x.wrapping_pow(m.exp as u32)))
            }),
        }
    }

    /// Substitutes `substitutes[i]` for `x_i`, and `0` for every variable past the end of
    /// `substitutes`.
    ///
    /// ```ignore
    /// // x_0^2 + x_1, with x_0 := x_1 + 1
    /// let p = parse("(1,2)+((1,1),0)");
    /// assert_eq!(p.compose(&[parse("((1,1),0)+(1,0)")]).to_string(), "((1,0)+(2,1)+(1,2),0)");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if an exponent of the result leaves the range of [Exp](crate::math::Exp).
    pub fn compose(&self, substitutes: &[Poly]) -> Poly {
        self.checked_compose(substitutes)
            .unwrap_or_else(|overflow| panic!("{}", overflow))
    }

    /// Like [compose](Poly::compose), but fails if an exponent of the result leaves the range of
    /// [Exp](crate::math::Exp).
    pub fn checked_compose(&self, substitutes: &[Poly]) -> Result<Poly, ExpOverflow> {
        match (&self.repr, substitutes.split_first()) {
            (Repr::Coeff(_), _) => Ok(self.clone()),
            // Past the substitutes, only the exponent-0 term survives `x = 0`.
            (Repr::Sum(monos), None) => match monos.first() {
                Some(m) if m.exp == 0 => m.poly.checked_compose(&[]),
                _ => Ok(Poly::zero()),
            },
            (Repr::Sum(monos), Some((q, rest))) => {
                let mut result = Poly::zero();
                let mut power = Poly::one();
                let mut power_exp = 0;
                for m in monos {
                    power = power.checked_mul(&q.checked_pow((m.exp - power_exp) as u32)?)?;
                    power_exp = m.exp;
                    result = result.add(&power.checked_mul(&m.poly.checked_compose(rest)?)?);
                }
                Ok(result)
            }
        }
    }
}
