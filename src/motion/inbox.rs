use std::{collections::VecDeque, sync::Arc};

use log::warn;
use parking_lot::Mutex;

use crate::motion::sample::MotionSample;

#[derive(Debug)]
struct InboxState {
    queue: VecDeque<MotionSample>,
    latest: Option<MotionSample>,
    capacity: usize,
    closed: bool,
    overflowing: bool,
    dropped: u64,
}

/// Frame-boundary mailbox for motion samples.
///
/// Sensors push samples from any thread through a [`MotionSender`]; the
/// owning world drains them between steps, so a sample is never applied
/// while a step is in progress. When full, the oldest pending sample is
/// discarded.
#[derive(Debug)]
pub struct MotionInbox {
    state: Arc<Mutex<InboxState>>,
}

/// Cloneable, thread-safe handle feeding a [`MotionInbox`].
#[derive(Debug, Clone)]
pub struct MotionSender {
    state: Arc<Mutex<InboxState>>,
}

impl MotionInbox {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Arc::new(Mutex::new(InboxState {
                queue: VecDeque::with_capacity(capacity),
                latest: None,
                capacity,
                closed: false,
                overflowing: false,
                dropped: 0,
            })),
        }
    }

    pub fn sender(&self) -> MotionSender {
        MotionSender {
            state: Arc::clone(&self.state),
        }
    }

    /// Moves every pending sample into `out`, oldest first.
    pub fn drain_into(&self, out: &mut Vec<MotionSample>) {
        let mut state = self.state.lock();
        out.extend(state.queue.drain(..));
        state.overflowing = false;
    }

    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Most recent sample ever received, applied or not.
    pub fn latest(&self) -> Option<MotionSample> {
        self.state.lock().latest
    }

    /// Total samples discarded because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.state.lock().dropped
    }

    /// Rejects all further samples and discards pending ones.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        state.queue.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

impl MotionSender {
    /// Queues a sample for the next step. Returns `false` once the inbox is closed.
    pub fn send(&self, sample: MotionSample) -> bool {
        let mut state = self.state.lock();
        if state.closed {
            return false;
        }

        let sample = sample.sanitized();
        if state.queue.len() >= state.capacity {
            state.queue.pop_front();
            state.dropped += 1;
            if !state.overflowing {
                state.overflowing = true;
                warn!(
                    "motion inbox full ({} samples), dropping oldest",
                    state.capacity
                );
            }
        }
        state.queue.push_back(sample);
        state.latest = Some(sample);
        true
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn latest(&self) -> Option<MotionSample> {
        self.state.lock().latest
    }
}
