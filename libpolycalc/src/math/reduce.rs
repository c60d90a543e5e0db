//! Canonicalizing sum of monomials.

use crate::math::{Mono, Poly};

use tracing::debug;

/// Folds an unordered list of monomials belonging to one variable layer into a canonical
/// polynomial.
///
/// The monomials are stably sorted by exponent, each run of equal exponents is merged by adding
/// its bodies, and merged bodies that vanish are dropped. What remains is collapsed to a scalar if
/// it is one in disguise.
///
/// A scalar term of the layer is an exponent-0 monomial with a scalar body, so it merges with any
/// other exponent-0 term through the same recursive addition.
pub(crate) fn reduce(mut monos: Vec<Mono>) -> Poly {
    let count = monos.len();
    monos.sort_by_key(Mono::exp);

    let mut merged: Vec<Mono> = Vec::with_capacity(count);
    for mono in monos {
        match merged.last_mut() {
            Some(last) if last.exp == mono.exp => {
                last.poly = last.poly.add(&mono.poly);
            }
            _ => merged.push(mono),
        }
    }
    merged.retain(|m| !m.poly.is_zero());

    if merged.len() != count {
        debug!(
            target: "polycalc::math",
            before = count,
            after = merged.len(),
            "reduced monomials"
        );
    }
    Poly::from_sorted(merged)
}
