//! External motion input: samples, the sensor contract, and frame-boundary delivery.

pub mod inbox;
pub mod sample;

use std::sync::Arc;

use parking_lot::Mutex;

pub use inbox::{MotionInbox, MotionSender};
pub use sample::MotionSample;

/// Contract for anything that produces device acceleration samples.
///
/// Capability checks and permission negotiation belong to the implementor;
/// the globe only starts, stops, and reads the latest sample.
pub trait MotionSource: Send {
    fn name(&self) -> &str;

    fn is_supported(&self) -> bool {
        true
    }

    /// Begins delivering samples to `sender`. Returns `false` if the source
    /// is unavailable or access was denied.
    fn start(&mut self, sender: MotionSender) -> bool;

    /// Detaches from the sender. Safe to call when not started.
    fn stop(&mut self);

    fn latest(&self) -> Option<MotionSample>;
}

/// Source for devices without a motion sensor. The globe still runs and
/// settles under gravity alone.
#[derive(Debug, Default)]
pub struct NoMotion;

impl NoMotion {
    pub fn new() -> Self {
        Self
    }
}

impl MotionSource for NoMotion {
    fn name(&self) -> &str {
        "none"
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn start(&mut self, _sender: MotionSender) -> bool {
        false
    }

    fn stop(&mut self) {}

    fn latest(&self) -> Option<MotionSample> {
        None
    }
}

#[derive(Debug, Default)]
struct ManualState {
    sender: Option<MotionSender>,
    latest: Option<MotionSample>,
    granted: bool,
}

/// Caller-fed motion source.
///
/// Clones share state: keep one handle to [`ManualMotion::emit`] samples and
/// attach another to a globe. A source created with [`ManualMotion::denied`]
/// behaves like a sensor whose permission was refused.
#[derive(Debug, Clone)]
pub struct ManualMotion {
    state: Arc<Mutex<ManualState>>,
}

impl Default for ManualMotion {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualMotion {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                granted: true,
                ..ManualState::default()
            })),
        }
    }

    pub fn denied() -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState::default())),
        }
    }

    /// Delivers a sample. Returns `false` when not started or the globe is gone.
    pub fn emit(&self, sample: MotionSample) -> bool {
        let mut state = self.state.lock();
        state.latest = Some(sample);
        match &state.sender {
            Some(sender) => sender.send(sample),
            None => false,
        }
    }

    pub fn is_started(&self) -> bool {
        self.state.lock().sender.is_some()
    }
}

impl MotionSource for ManualMotion {
    fn name(&self) -> &str {
        "manual"
    }

    fn start(&mut self, sender: MotionSender) -> bool {
        let mut state = self.state.lock();
        if !state.granted {
            return false;
        }
        state.sender = Some(sender);
        true
    }

    fn stop(&mut self) {
        self.state.lock().sender = None;
    }

    fn latest(&self) -> Option<MotionSample> {
        self.state.lock().latest
    }
}
