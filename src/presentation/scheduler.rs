//! Suspension points in the turn sequence.
//!
//! The battle sequencer is a straight line of steps with named pauses
//! between visual beats. A presentation layer implements `Scheduler` to
//! actually wait (or to yield to its frame loop); tests use
//! `ImmediateScheduler`, which returns at once.

use std::time::Duration;

/// Which pause the sequencer has reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaitKind {
    /// Before a side's actions resolve.
    PreTurn,
    /// Between two player casts.
    CastGap,
    /// Between two enemy actions.
    EnemyActionGap,
    /// After a side's actions resolve.
    PostTurn,
}

/// A named pause with its configured duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitStep {
    pub kind: WaitKind,
    pub duration: Duration,
}

impl WaitStep {
    #[must_use]
    pub const fn new(kind: WaitKind, duration: Duration) -> Self {
        Self { kind, duration }
    }
}

/// Executes the sequencer's pauses.
pub trait Scheduler {
    fn wait(&mut self, step: WaitStep);
}

/// Scheduler that never waits.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn wait(&mut self, _step: WaitStep) {}
}

/// Scheduler that records every pause without waiting.
#[derive(Clone, Debug, Default)]
pub struct RecordingScheduler {
    pub steps: Vec<WaitStep>,
}

impl RecordingScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The kinds of pause reached so far, in order.
    #[must_use]
    pub fn kinds(&self) -> Vec<WaitKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    /// Sum of all recorded durations.
    #[must_use]
    pub fn total(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }
}

impl Scheduler for RecordingScheduler {
    fn wait(&mut self, step: WaitStep) {
        self.steps.push(step);
    }
}
