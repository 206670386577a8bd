//! Streaming aggregation operators: `Reduce` and `Fold` (§4.G).
//!
//! Both are stateful and restricted to parallelism 1; the spec leaves higher
//! parallelism for stateful operators undefined (§9).

pub mod fold;
pub mod reduce;

pub use fold::fold;
pub use reduce::reduce;
