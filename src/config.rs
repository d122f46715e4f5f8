//! Engine configuration shared by the protocol front end and the binary.

/// Bounds of the `Depth` option
pub const MIN_DEPTH: u32 = 1;
pub const MAX_DEPTH: u32 = 6;
pub const DEFAULT_DEPTH: u32 = 3;

/// Bounds of the `Threads` option
pub const MIN_THREADS: usize = 1;
pub const MAX_THREADS: usize = 256;

/// Search settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Plies searched per move
    pub depth: u32,
    /// Worker threads for root move scoring
    pub threads: usize,
}

impl EngineConfig {
    pub fn new(depth: u32, threads: usize) -> Self {
        EngineConfig {
            depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
            threads: threads.clamp(MIN_THREADS, MAX_THREADS),
        }
    }

    pub fn with_depth(self, depth: u32) -> Self {
        EngineConfig::new(depth, self.threads)
    }

    pub fn with_threads(self, threads: usize) -> Self {
        EngineConfig::new(self.depth, threads)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig::new(DEFAULT_DEPTH, num_cpus::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_clamped() {
        let config = EngineConfig::new(0, 0);
        assert_eq!(config.depth, MIN_DEPTH);
        assert_eq!(config.threads, MIN_THREADS);
        let config = config.with_depth(99).with_threads(10_000);
        assert_eq!(config.depth, MAX_DEPTH);
        assert_eq!(config.threads, MAX_THREADS);
    }

    #[test]
    fn default_depth() {
        let config = EngineConfig::default();
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert!(config.threads >= 1);
    }
}
