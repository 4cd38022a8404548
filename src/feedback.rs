use crossbeam_channel::{after, Receiver, TryRecvError};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub message: String,
    pub tip: Option<String>,
}

impl Feedback {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Success,
            message: message.into(),
            tip: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FeedbackKind::Error,
            message: message.into(),
            tip: None,
        }
    }

    pub fn with_tip(mut self, tip: Option<&str>) -> Self {
        self.tip = tip.map(str::to_string);
        self
    }

    pub fn is_success(&self) -> bool {
        self.kind == FeedbackKind::Success
    }
}

/// Feedback area of one exercise: `(slide, exercise index)`.
pub type RegionId = (usize, usize);

/// Visible feedback messages and their pending auto-dismiss timers.
///
/// Each region holds at most one timer. Showing new feedback drops the old
/// receiver, which cancels its dismissal.
#[derive(Debug, Default)]
pub struct FeedbackScheduler {
    visible: HashMap<RegionId, Feedback>,
    pending: HashMap<RegionId, Receiver<Instant>>,
}

impl FeedbackScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, region: RegionId, feedback: Feedback, dismiss_after: Duration) {
        self.visible.insert(region, feedback);
        self.pending.insert(region, after(dismiss_after));
    }

    pub fn get(&self, region: RegionId) -> Option<&Feedback> {
        self.visible.get(&region)
    }

    pub fn has_pending(&self, region: RegionId) -> bool {
        self.pending.contains_key(&region)
    }

    pub fn cancel(&mut self, region: RegionId) {
        self.pending.remove(&region);
    }

    /// Hides every region whose timer has fired and returns them.
    pub fn dismiss_expired(&mut self) -> Vec<RegionId> {
        let mut fired = Vec::new();
        self.pending.retain(|region, timer| match timer.try_recv() {
            Ok(_) | Err(TryRecvError::Disconnected) => {
                fired.push(*region);
                false
            }
            Err(TryRecvError::Empty) => true,
        });

        for region in &fired {
            self.visible.remove(region);
        }
        fired.sort_unstable();
        fired
    }
}
