/// Timing parameters for one simulation tick, handed to every controller's `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeStep {
    /// Delta time of this tick in seconds.
    pub dt: f32,
    /// Inverse delta time (0.0 when `dt` is 0.0).
    pub inv_dt: f32,
    /// `dt * previous inv_dt`; scales warm-started impulses when the step size changes.
    pub dt_ratio: f32,
    pub velocity_iterations: u32,
    pub position_iterations: u32,
    pub warm_starting: bool,
}

impl TimeStep {
    pub const DEFAULT_VELOCITY_ITERATIONS: u32 = 8;
    pub const DEFAULT_POSITION_ITERATIONS: u32 = 3;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            inv_dt: if dt > 0.0 { 1.0 / dt } else { 0.0 },
            dt_ratio: 1.0,
            velocity_iterations: Self::DEFAULT_VELOCITY_ITERATIONS,
            position_iterations: Self::DEFAULT_POSITION_ITERATIONS,
            warm_starting: true,
        }
    }

    pub fn with_iterations(mut self, velocity: u32, position: u32) -> Self {
        self.velocity_iterations = velocity;
        self.position_iterations = position;
        self
    }

    pub fn with_warm_starting(mut self, enabled: bool) -> Self {
        self.warm_starting = enabled;
        self
    }
}

/// Turns variable frame time into a sequence of fixed `TimeStep`s.
pub struct FixedTimestep {
    dt: f32,
    /// Frame time not yet consumed by a step.
    accumulator: f32,
    /// Inverse dt of the last produced step, 0.0 before the first one.
    last_inv_dt: f32,
}

impl FixedTimestep {
    /// Frame time beyond this many steps is dropped.
    pub const MAX_STEPS_PER_FRAME: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            last_inv_dt: 0.0,
        }
    }

    /// Consume one frame's worth of time and return the steps to run, oldest first.
    pub fn advance(&mut self, frame_dt: f32) -> Vec<TimeStep> {
        self.accumulator += frame_dt;
        let mut count = (self.accumulator / self.dt) as u32;
        if count > Self::MAX_STEPS_PER_FRAME {
            count = Self::MAX_STEPS_PER_FRAME;
            self.accumulator %= self.dt;
        } else {
            self.accumulator -= count as f32 * self.dt;
        }
        (0..count).map(|_| self.next_step()).collect()
    }

    /// Produce the `TimeStep` for the next tick without consuming frame time.
    /// The first step has a `dt_ratio` of 0.0; there is nothing to warm start from.
    pub fn next_step(&mut self) -> TimeStep {
        let mut step = TimeStep::new(self.dt);
        step.dt_ratio = self.last_inv_dt * self.dt;
        self.last_inv_dt = step.inv_dt;
        step
    }

    /// Fraction of a step left over after the last `advance` (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn exact_frame_yields_one_step() {
        let mut clock = FixedTimestep::new(DT);
        let steps = clock.advance(DT);
        assert_eq!(steps.len(), 1);
        assert!((steps[0].dt - DT).abs() < 1e-6);
    }

    #[test]
    fn short_frames_carry_over() {
        let mut clock = FixedTimestep::new(DT);
        assert!(clock.advance(0.008).is_empty());
        assert!(clock.alpha() > 0.4 && clock.alpha() < 0.5, "alpha was {}", clock.alpha());
        assert_eq!(clock.advance(0.010).len(), 1);
    }

    #[test]
    fn long_frame_is_capped() {
        let mut clock = FixedTimestep::new(DT);
        let steps = clock.advance(1.0);
        assert_eq!(steps.len(), FixedTimestep::MAX_STEPS_PER_FRAME as usize);
        assert!(clock.alpha() < 1.0);
    }

    #[test]
    fn steps_in_one_frame_chain_dt_ratio() {
        let mut clock = FixedTimestep::new(DT);
        let steps = clock.advance(3.0 * DT + 0.001);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].dt_ratio, 0.0);
        for step in &steps[1..] {
            assert!((step.dt_ratio - 1.0).abs() < 0.001, "ratio was {}", step.dt_ratio);
        }
    }

    #[test]
    fn time_step_inverts_dt() {
        let step = TimeStep::new(0.5);
        assert!((step.inv_dt - 2.0).abs() < 0.001);
        assert!((step.dt_ratio - 1.0).abs() < 0.001);
        assert!(step.warm_starting);
    }

    #[test]
    fn zero_dt_has_zero_inverse() {
        let step = TimeStep::new(0.0);
        assert_eq!(step.inv_dt, 0.0);
    }

    #[test]
    fn builder_overrides_iterations() {
        let step = TimeStep::new(DT)
            .with_iterations(4, 2)
            .with_warm_starting(false);
        assert_eq!(step.velocity_iterations, 4);
        assert_eq!(step.position_iterations, 2);
        assert!(!step.warm_starting);
    }
}
