//! The classification and scoring pipeline.
//!
//! Every stage here is a pure function over owned collections: records flow
//! collect → dedup → classify/score → filter → rank, and no stage holds
//! mutable state across runs.

pub mod classify;
pub mod dedup;
pub mod identity;
pub mod rank;
pub mod run;
pub mod score;
