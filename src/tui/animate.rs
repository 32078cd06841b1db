use std::time::{Duration, Instant};

/// Ease-out quadratic: fast start, slow finish. `t` is clamped to [0, 1].
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * (2.0 - t)
}

/// A displayed number that eases from its previous value to a new target.
#[derive(Debug, Clone)]
pub struct AnimatedNumber {
    from: u64,
    to: u64,
    started: Instant,
    duration: Duration,
}

impl AnimatedNumber {
    pub fn new(value: u64, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            started: Instant::now(),
            duration,
        }
    }

    pub fn target(&self) -> u64 {
        self.to
    }

    /// Start easing toward `value` from whatever is on screen at `now`
    pub fn set_target_at(&mut self, value: u64, now: Instant) {
        if value == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = value;
        self.started = now;
    }

    pub fn set_target(&mut self, value: u64) {
        self.set_target_at(value, Instant::now());
    }

    pub fn value_at(&self, now: Instant) -> u64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.to;
        }

        let progress = ease_out_quad(elapsed.as_secs_f64() / self.duration.as_secs_f64());
        let from = self.from as f64;
        let to = self.to as f64;
        (from + (to - from) * progress).round() as u64
    }

    pub fn current(&self) -> u64 {
        self.value_at(Instant::now())
    }

    pub fn is_animating_at(&self, now: Instant) -> bool {
        self.value_at(now) != self.to
    }
}
