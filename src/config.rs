//! Settings for a counting run
use num_cpus;
use chunk::{ChunkMode, DEFAULT_CHUNK_SIZE};
use errors::*;
use tokenize::{Boundary, Tokenizer};

/// More workers than this is a typo, not a machine
pub const MAX_WORKERS: usize = 4096;
/// The queue's slots are allocated up front, so it can't be arbitrarily deep
pub const MAX_QUEUE_DEPTH: usize = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many counting workers run at once
    pub workers: usize,
    /// How many chunks may wait for a worker before the reader blocks
    pub queue_depth: usize,
    /// Target bytes per chunk
    pub chunk_size: usize,
    pub mode: ChunkMode,
    pub boundary: Boundary,
    pub fold_nukta: bool,
}

impl Default for Config {
    fn default() -> Config {
        let workers = num_cpus::get();
        Config {
            workers: workers,
            queue_depth: workers,
            chunk_size: DEFAULT_CHUNK_SIZE,
            mode: ChunkMode::default(),
            boundary: Boundary::default(),
            fold_nukta: false,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("there must be at least one worker".to_string()));
        }
        if self.queue_depth == 0 {
            return Err(Error::InvalidConfig("the queue must hold at least one chunk".to_string()));
        }
        if self.workers > MAX_WORKERS {
            return Err(Error::InvalidConfig(
                format!("{} workers is more than the limit of {}", self.workers, MAX_WORKERS)));
        }
        if self.queue_depth > MAX_QUEUE_DEPTH {
            return Err(Error::InvalidConfig(
                format!("a queue of {} chunks is more than the limit of {}",
                    self.queue_depth, MAX_QUEUE_DEPTH)));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidConfig("chunks must be at least one byte".to_string()));
        }
        Ok(())
    }

    /// Build the tokenizer these settings describe
    pub fn tokenizer(&self) -> Result<Tokenizer> {
        Ok(Tokenizer::new(&self.boundary)?.with_nukta_folding(self.fold_nukta))
    }

    /// Roughly the most chunk data held in memory at once: the queue plus one chunk per worker.
    ///
    /// Lines longer than a chunk can push past this.
    pub fn peak_chunk_bytes(&self) -> u64 {
        (self.queue_depth as u64)
            .saturating_add(self.workers as u64)
            .saturating_mul(self.chunk_size as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.workers, num_cpus::get());
        assert_eq!(config.chunk_size, 64 * 1024 * 1024);
        assert_eq!(config.mode, ChunkMode::Lines);
        assert_eq!(config.boundary, Boundary::Whitespace);
    }

    #[test]
    fn zeroes_are_rejected() {
        for tweak in 0..3 {
            let mut config = Config::default();
            match tweak {
                0 => config.workers = 0,
                1 => config.queue_depth = 0,
                _ => config.chunk_size = 0,
            }
            match config.validate() {
                Err(Error::InvalidConfig(_)) => {}
                other => panic!("expected a config error, got {:?}", other),
            }
        }
    }

    #[test]
    fn absurd_sizes_are_rejected() {
        for tweak in 0..4 {
            let mut config = Config::default();
            match tweak {
                0 => config.workers = MAX_WORKERS + 1,
                1 => config.queue_depth = MAX_QUEUE_DEPTH + 1,
                2 => config.queue_depth = usize::max_value(),
                _ => config.workers = usize::max_value(),
            }
            match config.validate() {
                Err(Error::InvalidConfig(_)) => {}
                other => panic!("expected a config error, got {:?}", other),
            }
        }
        let config = Config { workers: MAX_WORKERS, queue_depth: MAX_QUEUE_DEPTH, ..Config::default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn peak_memory_follows_the_queue() {
        let config = Config { workers: 4, queue_depth: 2, chunk_size: 10, ..Config::default() };
        assert_eq!(config.peak_chunk_bytes(), 60);
        let huge = Config {
            workers: usize::max_value(),
            queue_depth: usize::max_value(),
            chunk_size: usize::max_value(),
            ..Config::default()
        };
        assert_eq!(huge.peak_chunk_bytes(), u64::max_value());
    }
}
