//! Requesting frames from whatever drives the display.

use std::collections::VecDeque;

/// Identifies one frame request, so that it can be cancelled, and so that a frame delivered for
/// an old request can be recognised and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(
    clippy::exhaustive_structs,
    reason = "It's just a newtype around a counter"
)]
pub struct FrameHandle(pub u64);

/// Something that can call back once per display refresh.
pub trait Scheduler {
    /// Ask for a callback on the next display refresh.
    fn schedule(&mut self) -> FrameHandle;

    /// Withdraw a request. Cancelling a handle that has already been delivered, or was never
    /// issued, does nothing.
    fn cancel(&mut self, handle: FrameHandle);

    /// Take every request that is due on this display refresh. Requests made while handling
    /// these are due on the next refresh.
    fn due(&mut self) -> Vec<FrameHandle>;
}

/// A scheduler that just queues requests until the host, or a test, drains them.
#[derive(Debug, Default)]
pub struct FrameQueue {
    /// The next handle to be issued
    next: u64,
    /// Requests waiting for the next refresh
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    /// Instantiate
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The requests waiting for the next refresh.
    #[must_use]
    pub fn pending(&self) -> Vec<FrameHandle> {
        self.pending.iter().copied().collect()
    }
}

impl Scheduler for FrameQueue {
    fn schedule(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.pending.push_back(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|pending| *pending != handle);
    }

    fn due(&mut self) -> Vec<FrameHandle> {
        self.pending.drain(..).collect()
    }
}
