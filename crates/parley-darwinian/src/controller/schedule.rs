//! Concession schedule: tp = 1 − (1 − t)^(1/β), concession = α × tp

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcessionSchedule {
    alpha: f64,
    beta: f64,
}

impl ConcessionSchedule {
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Time pressure in [0, 1]; non-decreasing in `elapsed`
    ///
    /// Concave for β < 1, so pressure builds ahead of the clock.
    pub fn time_pressure(&self, elapsed: f64) -> f64 {
        if elapsed.is_nan() {
            return 0.0;
        }
        1.0 - (1.0 - elapsed.clamp(0.0, 1.0)).powf(1.0 / self.beta)
    }

    /// Weight of own utility in the fitness blend, α × tp
    pub fn concession(&self, elapsed: f64) -> f64 {
        self.alpha * self.time_pressure(elapsed)
    }
}
