//! Fan-out/fan-in operators: `Split`, `FanOut`, `RoundRobin`, `Merge`,
//! `ZipWith` and `Flatten` (§4.E).

pub mod fan_out;
pub mod flatten;
pub mod merge;
pub mod round_robin;
pub mod split;
pub mod zip_with;

pub use fan_out::fan_out;
pub use flatten::flatten;
pub use merge::merge;
pub use round_robin::round_robin;
pub use split::{split, Split};
pub use zip_with::zip_with;
