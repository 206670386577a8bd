//! Element-wise transform operators: `Map`, `FlatMap`, `Filter` and
//! `PassThrough` (§4.C).
//!
//! A user function that panics is fatal to the hosting stage: the stage's
//! outbound channel closes and the failure surfaces only as an early sink
//! completion, per §7 there is no per-element error channel in the core.

pub mod filter;
pub mod flat_map;
pub mod map;
pub mod pass_through;

pub use filter::filter;
pub use flat_map::flat_map;
pub use map::map;
pub use pass_through::pass_through;
