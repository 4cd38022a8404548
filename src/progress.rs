//! Session-scoped progress: which slides were worked on and how accurately.
//!
//! Nothing here outlives the process. The tracker is built once at startup
//! and handed to the controller, so tests can create as many as they like.

use crate::models::AttemptResult;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressTracker {
    total_slides: usize,
    completed_slides: BTreeSet<usize>,
    done_marks: BTreeSet<usize>,
    total_attempts: u32,
    correct_attempts: u32,
}

impl ProgressTracker {
    pub fn new(total_slides: usize) -> Self {
        Self {
            total_slides,
            completed_slides: BTreeSet::new(),
            done_marks: BTreeSet::new(),
            total_attempts: 0,
            correct_attempts: 0,
        }
    }

    /// Adds the slide to the worked-on set. `None` records a visit without
    /// counting an attempt.
    pub fn record_attempt(&mut self, slide: usize, correct: Option<bool>) {
        if !self.in_range(slide) {
            return;
        }
        self.completed_slides.insert(slide);

        if let Some(correct) = correct {
            self.total_attempts += 1;
            if correct {
                self.correct_attempts += 1;
            }
        }
    }

    pub fn record(&mut self, result: AttemptResult) {
        self.record_attempt(result.slide, Some(result.correct));
    }

    /// Returns `true` only the first time a slide is marked, so the caller
    /// applies the done annotation once.
    pub fn mark_completed(&mut self, slide: usize) -> bool {
        if !self.in_range(slide) {
            return false;
        }
        self.completed_slides.insert(slide);
        self.done_marks.insert(slide)
    }

    pub fn is_marked_done(&self, slide: usize) -> bool {
        self.done_marks.contains(&slide)
    }

    pub fn done_marks(&self) -> impl Iterator<Item = usize> + '_ {
        self.done_marks.iter().copied()
    }

    pub fn completed_count(&self) -> usize {
        self.completed_slides.len()
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn correct_attempts(&self) -> u32 {
        self.correct_attempts
    }

    /// Percentage rounded to one decimal place, 0 with no attempts.
    pub fn accuracy(&self) -> f64 {
        if self.total_attempts == 0 {
            return 0.0;
        }
        let pct = self.correct_attempts as f64 / self.total_attempts as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    }

    pub fn summary(&self) -> String {
        format!(
            "Progress: {}/{} slides, {:.1}% accuracy",
            self.completed_count(),
            self.total_slides,
            self.accuracy()
        )
    }

    fn in_range(&self, slide: usize) -> bool {
        (1..=self.total_slides).contains(&slide)
    }
}
