//! Analysis stages over the parsed component map and signal-flow graph.
//!
//! Each stage is a pure function of its inputs; stages after graph
//! construction are independent of each other and read-only, so callers
//! may run them in any order.

pub mod critical;
pub mod frequency;
pub mod grounding;
pub mod noise;
pub mod paths;
pub mod scoring;
