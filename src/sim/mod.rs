//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only, constants are per tick
//! - Seeded RNG only
//! - No rendering, audio or terminal dependencies

pub mod bird;
pub mod collision;
pub mod ground;
pub mod pipes;
pub mod score;
pub mod state;

pub use bird::Bird;
pub use collision::{Rect, collides};
pub use ground::Ground;
pub use pipes::{Pipe, PipeField};
pub use score::Score;
pub use state::{Game, GameEvent, Phase, PhaseKind, Snapshot, TickInput, World};
