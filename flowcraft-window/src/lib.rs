//! Time-windowing operators: `Tumbling`, `Sliding` (processing-time and
//! event-time), and `Session` (§4.F).
//!
//! Every operator here emits `Vec<I>` batches; empty batches are never
//! emitted (§4.F, §8 invariant 7).

pub mod session;
pub mod sliding_event;
pub mod sliding_processing;
pub mod tumbling;

pub use session::session;
pub use sliding_event::sliding_event_time;
pub use sliding_processing::sliding_processing_time;
pub use tumbling::tumbling;
