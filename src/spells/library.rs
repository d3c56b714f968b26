//! Spell library for definition lookup and content loading.
//!
//! The `SpellLibrary` stores every spell and enemy definition for a game.
//! It provides lookup by `SpellId`, instantiation of runtime spells, and
//! loading from JSON content files.
//!
//! ## Example
//!
//! ```
//! use reel_battle::core::SpellId;
//! use reel_battle::effects::Effect;
//! use reel_battle::spells::{SpellDefinition, SpellLibrary};
//!
//! let mut library = SpellLibrary::new();
//! library
//!     .register(SpellDefinition::new(SpellId::new(1), "Strike").with_effect(Effect::damage(5)))
//!     .unwrap();
//!
//! let spell = library.instantiate(SpellId::new(1)).unwrap();
//! assert_eq!(spell.name(), "Strike");
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::definition::SpellDefinition;
use super::instance::RuntimeSpell;
use crate::battle::IntentPool;
use crate::combat::Combatant;
use crate::core::SpellId;

/// Errors raised while building a library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to parse spell content: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("spell {0} is already registered")]
    DuplicateSpell(SpellId),

    #[error("enemy {0:?} is already registered")]
    DuplicateEnemy(String),
}

fn default_weight() -> f32 {
    1.0
}

/// One entry in an enemy's intent table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IntentEntry {
    pub spell: SpellId,
    #[serde(default = "default_weight")]
    pub weight: f32,
}

/// Authored enemy data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_hp: i32,
    #[serde(default)]
    pub threat: i32,
    #[serde(default)]
    pub intents: Vec<IntentEntry>,
}

impl EnemyDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            max_hp,
            threat: 0,
            intents: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_threat(mut self, threat: i32) -> Self {
        self.threat = threat;
        self
    }

    /// Add a weighted intent (builder pattern).
    #[must_use]
    pub fn with_intent(mut self, spell: SpellId, weight: f32) -> Self {
        self.intents.push(IntentEntry { spell, weight });
        self
    }
}

/// Shape of a JSON content file.
#[derive(Debug, Default, Deserialize)]
struct LibraryContent {
    #[serde(default)]
    spells: Vec<SpellDefinition>,
    #[serde(default)]
    enemies: Vec<EnemyDefinition>,
}

/// Registry of spell and enemy definitions.
#[derive(Clone, Debug, Default)]
pub struct SpellLibrary {
    spells: FxHashMap<SpellId, Arc<SpellDefinition>>,
    enemies: FxHashMap<String, EnemyDefinition>,
}

impl SpellLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a library from a JSON document of the form
    /// `{ "spells": [...], "enemies": [...] }`.
    pub fn from_json(json: &str) -> Result<Self, LibraryError> {
        let content: LibraryContent = serde_json::from_str(json)?;
        let mut library = Self::new();
        for spell in content.spells {
            library.register(spell)?;
        }
        for enemy in content.enemies {
            library.register_enemy(enemy)?;
        }
        Ok(library)
    }

    /// Register a spell definition.
    pub fn register(&mut self, spell: SpellDefinition) -> Result<(), LibraryError> {
        if self.spells.contains_key(&spell.id) {
            return Err(LibraryError::DuplicateSpell(spell.id));
        }
        self.spells.insert(spell.id, Arc::new(spell));
        Ok(())
    }

    /// Register an enemy definition.
    pub fn register_enemy(&mut self, enemy: EnemyDefinition) -> Result<(), LibraryError> {
        if self.enemies.contains_key(&enemy.name) {
            return Err(LibraryError::DuplicateEnemy(enemy.name));
        }
        self.enemies.insert(enemy.name.clone(), enemy);
        Ok(())
    }

    /// Get a spell definition by ID.
    #[must_use]
    pub fn get(&self, id: SpellId) -> Option<&Arc<SpellDefinition>> {
        self.spells.get(&id)
    }

    /// Get an enemy definition by name.
    #[must_use]
    pub fn enemy(&self, name: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(name)
    }

    #[must_use]
    pub fn contains(&self, id: SpellId) -> bool {
        self.spells.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Iterate over all spell definitions.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<SpellDefinition>> {
        self.spells.values()
    }

    /// Create a fresh runtime instance of a spell.
    #[must_use]
    pub fn instantiate(&self, id: SpellId) -> Option<RuntimeSpell> {
        self.spells.get(&id).map(|def| RuntimeSpell::new(Arc::clone(def)))
    }

    /// Build the combatant and intent pool for an enemy in line-up slot
    /// `position`.
    ///
    /// Intent entries naming unknown spells are logged and skipped.
    #[must_use]
    pub fn spawn_enemy(&self, enemy: &EnemyDefinition, position: usize) -> (Combatant, IntentPool) {
        let combatant = Combatant::enemy(position, enemy.name.clone(), enemy.max_hp, enemy.threat);
        let mut pool = IntentPool::new();
        for entry in &enemy.intents {
            match self.instantiate(entry.spell) {
                Some(spell) => pool.push(spell, entry.weight),
                None => warn!(
                    enemy = %enemy.name,
                    spell = %entry.spell,
                    "intent references unknown spell; skipping"
                ),
            }
        }
        (combatant, pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;

    const CONTENT: &str = r#"{
        "spells": [
            { "id": 1, "name": "Strike",
              "effects": [ { "type": "Damage", "amount": 5 } ] },
            { "id": 2, "name": "Mend", "color": "Green",
              "effects": [ { "type": "Heal", "amount": 3 } ] }
        ],
        "enemies": [
            { "name": "Slime", "max_hp": 15, "threat": 2,
              "intents": [ { "spell": 1 }, { "spell": 99, "weight": 2.0 } ] }
        ]
    }"#;

    #[test]
    fn test_register_and_get() {
        let mut library = SpellLibrary::new();
        library
            .register(SpellDefinition::new(SpellId::new(1), "Strike"))
            .unwrap();

        assert!(library.contains(SpellId::new(1)));
        assert_eq!(library.get(SpellId::new(1)).unwrap().name, "Strike");
        assert!(library.get(SpellId::new(99)).is_none());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_duplicate_spell_rejected() {
        let mut library = SpellLibrary::new();
        library
            .register(SpellDefinition::new(SpellId::new(1), "A"))
            .unwrap();

        let err = library
            .register(SpellDefinition::new(SpellId::new(1), "B"))
            .unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateSpell(id) if id == SpellId::new(1)));
    }

    #[test]
    fn test_instances_share_definition() {
        let mut library = SpellLibrary::new();
        let strike = SpellDefinition::new(SpellId::new(1), "Strike").with_effect(Effect::damage(5));
        library.register(strike).unwrap();

        let a = library.instantiate(SpellId::new(1)).unwrap();
        let b = library.instantiate(SpellId::new(1)).unwrap();
        assert!(Arc::ptr_eq(a.definition_arc(), b.definition_arc()));
        assert!(a.same_definition(&b));
    }

    #[test]
    fn test_from_json() {
        let library = SpellLibrary::from_json(CONTENT).unwrap();

        assert_eq!(library.len(), 2);
        let mend = library.get(SpellId::new(2)).unwrap();
        assert_eq!(mend.effects[0], Effect::heal(3));

        let slime = library.enemy("Slime").unwrap();
        assert_eq!(slime.max_hp, 15);
        assert_eq!(slime.intents[0].weight, 1.0);
    }

    #[test]
    fn test_spawn_enemy_skips_unknown_intents() {
        let library = SpellLibrary::from_json(CONTENT).unwrap();
        let slime = library.enemy("Slime").unwrap();

        let (combatant, pool) = library.spawn_enemy(slime, 0);

        assert_eq!(combatant.hp(), 15);
        assert_eq!(combatant.name(), "Slime");
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SpellLibrary::from_json("[1, 2"),
            Err(LibraryError::Parse(_))
        ));
    }
}
