//! Order-preserving parallel transform engine backing `Map`, `FlatMap` and
//! `Filter` when built with parallelism greater than one (§4.D).

pub mod engine;

pub use engine::spawn_parallel;
