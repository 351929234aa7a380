use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bernoulli-trial packet-loss sampler for network-simulation harnesses.
/// Bundled alongside the tracer; not used by the renderers themselves.
#[derive(Debug)]
pub struct QuicLossSimulator {
    rng: StdRng,
}

impl QuicLossSimulator {
    /// A seeded simulator replays the same loss pattern on every run.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Draws a uniform value in [0, 1) and reports whether this packet
    /// should be dropped.
    pub fn packet_lost(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }
}

impl Default for QuicLossSimulator {
    fn default() -> Self {
        Self::new(None)
    }
}
