use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Randomness handed to a single pass.
pub type PassRng = ChaCha8Rng;

/// Per-pass randomness for one run. Every pass gets its own ChaCha8 stream
/// of the run seed, numbered in the order passes first ask for one, so a
/// pass's draws depend only on the seed and its position in the pipeline.
#[derive(Debug, Clone)]
pub struct PassStreams {
    seed: u64,
    streams: Vec<(String, PassRng)>,
}

impl PassStreams {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streams: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The stream owned by `pass`, claimed on first request. Later requests
    /// continue where the previous one stopped.
    pub fn stream(&mut self, pass: &str) -> &mut PassRng {
        let index = match self.streams.iter().position(|(name, _)| name == pass) {
            Some(index) => index,
            None => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
                rng.set_stream(self.streams.len() as u64);
                self.streams.push((pass.to_string(), rng));
                self.streams.len() - 1
            }
        };
        &mut self.streams[index].1
    }

    /// Pass names in the order their streams were claimed.
    pub fn claimed(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|(name, _)| name.as_str())
    }
}
