//! One-shot initialization latch.
//!
//! Offsets delivered before the tab strip has been measured refer to a
//! layout that does not exist yet, so everything offset-driven waits for
//! [`GatePhase::Ready`].  Once ready the gate never reopens.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatePhase {
    #[default]
    Uninitialized,
    Measuring,
    Ready,
}

#[derive(Debug, Clone, Default)]
pub struct InitGate {
    phase: GatePhase,
}

impl InitGate {
    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == GatePhase::Ready
    }

    /// Enter the measuring pass.  Returns `false` when measurement already
    /// ran (or is running), in which case the caller must do nothing.
    pub fn begin_measuring(&mut self) -> bool {
        if self.phase != GatePhase::Uninitialized {
            return false;
        }
        self.phase = GatePhase::Measuring;
        true
    }

    /// Latch ready.  Only valid from [`GatePhase::Measuring`].
    pub fn finish(&mut self) -> bool {
        if self.phase != GatePhase::Measuring {
            return false;
        }
        self.phase = GatePhase::Ready;
        true
    }
}
