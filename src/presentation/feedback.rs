//! Audio and visual feedback hooks.

use crate::core::{CellPos, CombatantId};

/// Mixer category hint for an audio cue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCategory {
    Cast,
    Impact,
    Status,
}

/// Kind of flash to play on a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlashKind {
    Damage,
    Heal,
    Shield,
    Status,
}

/// Kind of floating number to spawn over a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NumberKind {
    Damage,
    Absorbed,
    Heal,
    Shield,
}

/// Fire-and-forget presentation callbacks.
///
/// Every method defaults to a no-op so implementors only override what
/// they render. Return values are never consumed by the engine.
pub trait Feedback {
    fn play_sound_cue(&mut self, _cue: &str, _category: SoundCategory) {}

    fn notify_flash(&mut self, _target: CombatantId, _kind: FlashKind) {}

    fn notify_floating_number(&mut self, _target: CombatantId, _value: i32, _kind: NumberKind) {}

    fn request_visual_refresh(&mut self, _cell: CellPos) {}
}

/// Feedback sink that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFeedback;

impl Feedback for NoFeedback {}
