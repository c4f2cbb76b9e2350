//! CDE Workflow declarations
//!
//! Describes workflows as a graph of named tasks, each backed by an operator
//! the scheduling engine provides. The graph is validated here and handed
//! to the engine as JSON; running the tasks is the engine's job.

pub mod bucket;
pub mod graph;
pub mod operator;
pub mod schedule;
pub mod workflow;

pub use graph::{GraphError, Task, WorkflowGraph};
pub use operator::Operator;
pub use schedule::{DagSettings, DefaultArgs};
pub use workflow::{Workflow, WorkflowError};
