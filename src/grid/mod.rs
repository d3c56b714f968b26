//! The spell grid: reels, cells and neighbour lookup.
//!
//! - `Reel`: a looping strip of spells with a stop position
//! - `SpellGrid`: the battle's reels, sized by `BattleConfig`
//! - `GridView`: the read-only contract conditions evaluate against
//!
//! Only the centre row is cast. The other rows are inspected by
//! adjacency and mirror conditions.

mod reel;
mod spell_grid;
mod view;

pub use reel::Reel;
pub use spell_grid::SpellGrid;
pub use view::{offsets, GridView};
