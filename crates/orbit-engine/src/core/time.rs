use crate::api::config::SpeedParams;

/// Multiplier a speed-up leaves a paused clock at, unless the configured
/// minimum is higher.
pub const RESUME_SPEED: f64 = 0.01;

/// Monotonic elapsed-time source with an adjustable speed multiplier.
///
/// Real time comes from the host as milliseconds on a monotonic clock.
/// The first observed timestamp becomes the origin; elapsed time never
/// goes backwards even if the host clock does.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Host timestamp of the first `advance` call.
    origin_ms: Option<f64>,
    /// Seconds of real time since the origin.
    elapsed_seconds: f64,
    /// Multiplier applied to elapsed time, always inside `[min, max]`.
    speed_multiplier: f64,
    min_speed: f64,
    max_speed: f64,
}

impl SimulationClock {
    pub fn new(params: &SpeedParams) -> Self {
        Self {
            origin_ms: None,
            elapsed_seconds: 0.0,
            speed_multiplier: 1.0_f64.clamp(params.min, params.max),
            min_speed: params.min,
            max_speed: params.max,
        }
    }

    /// Observe the host clock. Returns seconds since the first observation.
    pub fn advance(&mut self, now_ms: f64) -> f64 {
        let origin = *self.origin_ms.get_or_insert(now_ms);
        let elapsed = (now_ms - origin) / 1000.0;
        if elapsed.is_finite() && elapsed > self.elapsed_seconds {
            self.elapsed_seconds = elapsed;
        }
        self.elapsed_seconds
    }

    /// Store a new multiplier, clamped into the configured range.
    /// NaN is ignored.
    pub fn set_speed_multiplier(&mut self, multiplier: f64) {
        if multiplier.is_nan() {
            return;
        }
        self.speed_multiplier = multiplier.clamp(self.min_speed, self.max_speed);
    }

    /// Scale the multiplier by `factor` (e.g. 1.5 or 1/1.5), clamped.
    /// Speeding up from a pause steps to `RESUME_SPEED`.
    pub fn scale_speed(&mut self, factor: f64) {
        if self.speed_multiplier == 0.0 && factor > 1.0 {
            self.set_speed_multiplier(self.min_speed.max(RESUME_SPEED));
            return;
        }
        self.set_speed_multiplier(self.speed_multiplier * factor);
    }

    /// Back to real time.
    pub fn reset_speed(&mut self) {
        self.set_speed_multiplier(1.0);
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.speed_multiplier
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }

    /// `elapsed_seconds * speed_multiplier`.
    pub fn simulated_time(&self) -> f64 {
        self.elapsed_seconds * self.speed_multiplier
    }
}
