//! Hooks into the presentation layer.
//!
//! The engine calls out to audio, visual feedback and scheduling through
//! these traits but never depends on what they do:
//! - `Feedback`: fire-and-forget audio cues, flashes, floating numbers
//! - `Scheduler`: named suspension points between visual beats
//!
//! Tests run with `NoFeedback` and `ImmediateScheduler`, which do nothing.

mod feedback;
mod scheduler;

pub use feedback::{FlashKind, Feedback, NoFeedback, NumberKind, SoundCategory};
pub use scheduler::{ImmediateScheduler, RecordingScheduler, Scheduler, WaitKind, WaitStep};
