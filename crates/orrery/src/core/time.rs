/// Simulation clock controls: a time-scale multiplier and a pause switch.
/// Turns a wall-clock delta into a simulated step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeControl {
    /// Simulated seconds per wall-clock second. Never negative.
    time_scale: f32,
    /// Upper bound for `time_scale`.
    max_time_scale: f32,
    paused: bool,
}

impl TimeControl {
    pub fn new(time_scale: f32, max_time_scale: f32) -> Self {
        let mut tc = Self {
            time_scale: 1.0,
            max_time_scale: max_time_scale.max(0.0),
            paused: false,
        };
        tc.set_time_scale(time_scale);
        tc
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Negative and non-finite values clamp to zero; values above the
    /// configured maximum clamp to it.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = if scale.is_finite() {
            scale.clamp(0.0, self.max_time_scale)
        } else {
            0.0
        };
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Simulated step for a wall delta, or `None` while paused.
    pub fn step(&self, wall_dt: f32) -> Option<f32> {
        if self.paused {
            None
        } else {
            Some(wall_dt * self.time_scale)
        }
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        Self::new(1.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_scales_wall_time() {
        let mut tc = TimeControl::default();
        tc.set_time_scale(3.0);
        assert_eq!(tc.step(0.5), Some(1.5));
    }

    #[test]
    fn paused_yields_no_step() {
        let mut tc = TimeControl::default();
        tc.set_paused(true);
        assert_eq!(tc.step(5.0), None);
        assert!(!tc.toggle_pause());
        assert_eq!(tc.step(1.0), Some(1.0));
    }

    #[test]
    fn negative_scale_clamps_to_zero() {
        let mut tc = TimeControl::default();
        tc.set_time_scale(-2.0);
        assert_eq!(tc.time_scale(), 0.0);
        tc.set_time_scale(f32::NAN);
        assert_eq!(tc.time_scale(), 0.0);
    }

    #[test]
    fn scale_clamps_to_max() {
        let mut tc = TimeControl::new(1.0, 10.0);
        tc.set_time_scale(50.0);
        assert_eq!(tc.time_scale(), 10.0);
    }
}
