#[derive(Copy, Clone, Debug)]
pub struct ParserOptions {
    _max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { _max_depth: 512 }
    }
}

impl ParserOptions {
    pub fn set_max_depth(mut self, max_depth: usize) -> Self {
        self._max_depth = max_depth;
        self
    }

    /// The maximum number of brackets a literal may have open at once.
    pub fn max_depth(self) -> usize {
        self._max_depth
    }
}
