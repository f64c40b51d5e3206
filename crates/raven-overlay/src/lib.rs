//! Debug overlays: a variable console and an on-screen statistics block.
//!
//! Neither overlay feeds back into the scene core. The host reads and writes
//! console variables, and pushes formatted statistics once per frame.

mod console;
mod statistics;
mod value;

pub use console::{Console, OverlayRect, Scope, VariableScope};
pub use statistics::{Statistics, format_decimal, format_vec3};
pub use value::Value;
