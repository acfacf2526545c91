//! Echo suppression for programmatic selection writes.
//!
//! Editors re-fire a selection-change event when a selection is assigned programmatically. The
//! linker must not mistake that echo for a user action, or two linked views would keep
//! re-selecting each other.
//!
//! Each write is counted as a *generation*: the latch is armed (generation bumped) before the
//! host is asked to write, and the next incoming event consumes one armed generation. An event
//! arriving while every armed generation has been consumed is a genuine user action.

/// Armed/consumed generation counters for one direction of one product identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoLatch {
    armed: u64,
    consumed: u64,
}

impl EchoLatch {
    /// Arm the latch for one upcoming echo and return the new generation.
    pub fn arm(&mut self) -> u64 {
        self.armed = self.armed.saturating_add(1);
        self.armed
    }

    /// Withdraw the most recent arm when the host reports that no event will follow the write.
    pub fn disarm(&mut self) {
        if self.armed > self.consumed {
            self.armed -= 1;
        }
    }

    /// Consume one pending echo. Returns `true` if the event should be swallowed.
    pub fn consume(&mut self) -> bool {
        if self.consumed < self.armed {
            self.consumed += 1;
            true
        } else {
            false
        }
    }

    /// Returns `true` if an echo is pending.
    pub fn is_armed(&self) -> bool {
        self.consumed < self.armed
    }

    /// Latest armed generation.
    pub fn generation(&self) -> u64 {
        self.armed
    }
}

/// Both latches of one product identity, kept by the session across clears and reset on save.
///
/// - `target` is armed by forward writes into the product view and consumed by the product
///   view's next selection event.
/// - `source` is armed by reverse writes into the source editor and consumed by the source
///   editor's next selection event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EchoGuard {
    /// Latch for writes into the product view.
    pub target: EchoLatch,
    /// Latch for writes into the source editor.
    pub source: EchoLatch,
}
