use crate::math::{Coeff, Exp, Mono, Poly};

/// Monomial buffers of the literal parser, one per open bracket plus the top-level sum.
///
/// The parser never recurses: opening a bracket pushes a layer, and closing it folds the layer
/// into one monomial of the layer below.
pub(crate) struct LayerStack {
    layers: Vec<Vec<Mono>>,
}

impl LayerStack {
    pub fn new() -> Self {
        Self {
            layers: vec![Vec::new()],
        }
    }

    /// Number of layers above the top-level sum, i.e. the number of open brackets.
    #[inline]
    pub fn depth(&self) -> usize {
        self.layers.len() - 1
    }

    pub fn new_layer(&mut self) {
        self.layers.push(Vec::new());
    }

    fn top(&mut self) -> &mut Vec<Mono> {
        let top = self.layers.len() - 1;
        &mut self.layers[top]
    }

    pub fn add_monomial(&mut self, mono: Mono) {
        self.top().push(mono);
    }

    /// Records the body of the innermost open monomial as the scalar `c`.
    pub fn set_scalar(&mut self, c: Coeff) {
        self.add_monomial(Mono::new(Poly::coeff(c), 0));
    }

    /// Closes the innermost open bracket, returning its monomial with exponent `exp`.
    ///
    /// # Panics
    ///
    /// If no bracket is open.
    pub fn reduce_top_layer(&mut self, exp: Exp) -> Mono {
        assert!(self.depth() > 0, "no open layer to reduce");
        let monos = self.layers.pop().unwrap_or_default();
        Mono::new(Poly::from_monos(monos), exp)
    }

    /// Folds the top-level sum into the parsed polynomial.
    ///
    /// # Panics
    ///
    /// If any bracket is still open.
    pub fn finalize(mut self) -> Poly {
        assert_eq!(self.layers.len(), 1, "finalized with open layers");
        Poly::from_monos(self.layers.pop().unwrap_or_default())
    }
}
