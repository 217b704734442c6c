use crate::engine::{WavefrontEngine, TILE_SIZE};

/// Builder for [`WavefrontEngine`] instances.
///
/// Pruning is exact and enabled by default; disabling it forces every tile
/// of every level to run, which is mainly useful for debugging and for
/// validating the pruning heuristic against the unpruned result.
pub struct WavefrontBuilder<const B: usize = TILE_SIZE> {
    pruning: Option<bool>,
}

impl<const B: usize> WavefrontBuilder<B> {
    pub fn new() -> Self {
        Self { pruning: None }
    }

    pub fn with_pruning(mut self, enabled: bool) -> Self {
        self.pruning = Some(enabled);
        self
    }

    pub fn build(self) -> WavefrontEngine<B> {
        WavefrontEngine::with_pruning(self.pruning.unwrap_or(true))
    }
}

impl<const B: usize> Default for WavefrontBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}
