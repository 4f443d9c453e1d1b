/// Converts variable frame time into a whole number of fixed simulation steps.
///
/// The host calls [`advance`](Self::advance) once per rendered frame and then
/// runs `World::fixed_update` that many times. Leftover time carries over to
/// the next frame. Steps per frame are capped so a long stall drops time
/// instead of spiralling.
#[derive(Debug, Clone)]
pub struct FixedStepClock {
    fixed_dt: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
    dropped: f32,
}

impl FixedStepClock {
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    pub fn new(fixed_dt: f32) -> Self {
        Self::with_max_steps(fixed_dt, Self::DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(fixed_dt: f32, max_steps_per_frame: u32) -> Self {
        Self {
            fixed_dt,
            accumulator: 0.0,
            max_steps_per_frame: max_steps_per_frame.max(1),
            dropped: 0.0,
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Add one frame's worth of time and return how many fixed steps to run.
    /// Negative or NaN frame times count as zero.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }

        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < self.max_steps_per_frame {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }

        if self.accumulator >= self.fixed_dt {
            self.dropped += self.accumulator;
            tracing::warn!(
                dropped_ms = self.accumulator,
                steps,
                "fixed step budget exceeded, dropping time"
            );
            self.accumulator = 0.0;
        }
        steps
    }

    /// Fraction of a fixed step left in the accumulator, in `[0, 1)`.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_dt
    }

    /// Total time discarded by the per-frame step cap.
    pub fn dropped(&self) -> f32 {
        self.dropped
    }
}
