//! Orchestration layer: decides when each delayed task of a batch starts
//! and how its completion is awaited and reported.

mod orchestrator;
mod strategy;

pub use orchestrator::{BatchRun, DetachedBatch, Orchestrator};
pub use strategy::{ProgressEvent, Strategy};
