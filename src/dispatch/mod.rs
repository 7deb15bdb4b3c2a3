//! Merit-order dispatch.
//!
//! A run flows through the cost model, the merit order ranker, the greedy
//! allocator, the shortfall redistributor (only when demand is still
//! uncovered), and finally the plan assembler. Every stage is a plain
//! function of its inputs; progress is reported to a caller-supplied
//! [`DispatchObserver`].

pub mod cost;
pub mod greedy;
pub mod merit_order;
pub mod observer;
pub mod plan;
pub mod redistribute;
pub mod summary;
pub mod types;

pub use observer::{DispatchObserver, NullObserver, TracingObserver};
pub use plan::{Dispatcher, production_plan};
pub use summary::PlanSummary;
pub use types::{AllocationEntry, DispatchSettings, ProductionPlan};
