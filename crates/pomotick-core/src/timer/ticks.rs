/// A cancellable once-per-second signal.
///
/// The controller arms the source on start and cancels it on stop. After
/// `cancel()` returns no further ticks may be delivered.
pub trait TickSource {
    fn arm(&mut self);
    fn cancel(&mut self);
    fn is_armed(&self) -> bool;
}

/// Tick source driven by hand: the caller invokes `tick()` on the controller
/// itself. Counts arms so callers can detect duplicate tick generators.
#[derive(Debug, Default, Clone)]
pub struct ManualTicks {
    armed: bool,
    arm_count: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the source has been armed.
    pub fn arm_count(&self) -> u32 {
        self.arm_count
    }
}

impl TickSource for ManualTicks {
    fn arm(&mut self) {
        self.armed = true;
        self.arm_count += 1;
    }

    fn cancel(&mut self) {
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}
