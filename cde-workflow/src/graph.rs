//! Task graph
//!
//! Tasks are nodes; an edge `a -> b` means `b` runs after `a` succeeds.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::operator::Operator;

/// Errors found while validating a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Duplicate task id: {0}")]
    DuplicateTask(String),

    #[error("Edge {upstream} -> {downstream} references unknown task {missing}")]
    UnknownTask {
        upstream: String,
        downstream: String,
        missing: String,
    },

    #[error("Cycle detected among tasks: {}", .0.join(", "))]
    Cycle(Vec<String>),

    #[error("Graph is not a single chain: {0}")]
    NotLinear(String),
}

/// A named step and the operator it runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: String,
    #[serde(flatten)]
    pub operator: Operator,
}

impl Task {
    pub fn new(task_id: impl Into<String>, operator: Operator) -> Self {
        Self {
            task_id: task_id.into(),
            operator,
        }
    }
}

/// Dependency between two tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub upstream: String,
    pub downstream: String,
}

/// Tasks and the dependencies between them, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    pub tasks: Vec<Task>,
    pub edges: Vec<Edge>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a task
    pub fn add_task(&mut self, task: Task) -> &mut Self {
        self.tasks.push(task);
        self
    }

    /// Make `downstream` depend on `upstream`
    pub fn add_edge(&mut self, upstream: &str, downstream: &str) -> &mut Self {
        self.edges.push(Edge {
            upstream: upstream.to_string(),
            downstream: downstream.to_string(),
        });
        self
    }

    /// Wire the given tasks into a sequence, each depending on the previous one
    pub fn chain(&mut self, task_ids: &[&str]) -> &mut Self {
        for pair in task_ids.windows(2) {
            self.add_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// Ids of the tasks `task_id` directly depends on
    pub fn upstream(&self, task_id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.downstream == task_id)
            .map(|e| e.upstream.as_str())
            .collect()
    }

    /// Ids of the tasks directly depending on `task_id`
    pub fn downstream(&self, task_id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter(|e| e.upstream == task_id)
            .map(|e| e.downstream.as_str())
            .collect()
    }

    /// Check the graph and return its tasks in execution order
    ///
    /// Ties between independent tasks are broken by declaration order.
    ///
    /// # Errors
    /// Duplicate task ids, edges naming undeclared tasks and cycles.
    pub fn validate(&self) -> Result<Vec<&str>, GraphError> {
        let mut seen = HashSet::new();
        for task in &self.tasks {
            if !seen.insert(task.task_id.as_str()) {
                return Err(GraphError::DuplicateTask(task.task_id.clone()));
            }
        }

        for edge in &self.edges {
            for end in [&edge.upstream, &edge.downstream] {
                if !seen.contains(end.as_str()) {
                    return Err(GraphError::UnknownTask {
                        upstream: edge.upstream.clone(),
                        downstream: edge.downstream.clone(),
                        missing: end.clone(),
                    });
                }
            }
        }

        self.topological_order()
    }

    /// Execution order of a graph that is one unbranched chain
    ///
    /// # Errors
    /// Anything `validate` rejects, plus graphs where a task has more than
    /// one upstream or downstream, or that fall apart into several pieces.
    pub fn linear_order(&self) -> Result<Vec<&str>, GraphError> {
        let order = self.validate()?;

        for task in &self.tasks {
            let id = task.task_id.as_str();
            if self.upstream(id).len() > 1 {
                return Err(GraphError::NotLinear(format!(
                    "{} has more than one upstream task",
                    id
                )));
            }
            if self.downstream(id).len() > 1 {
                return Err(GraphError::NotLinear(format!(
                    "{} has more than one downstream task",
                    id
                )));
            }
        }

        let roots = self
            .tasks
            .iter()
            .filter(|t| self.upstream(&t.task_id).is_empty())
            .count();
        if roots > 1 {
            return Err(GraphError::NotLinear(format!(
                "{} tasks have no upstream task",
                roots
            )));
        }

        Ok(order)
    }

    fn topological_order(&self) -> Result<Vec<&str>, GraphError> {
        let mut in_degree: HashMap<&str, usize> = self
            .tasks
            .iter()
            .map(|t| (t.task_id.as_str(), 0))
            .collect();
        for edge in &self.edges {
            *in_degree.entry(edge.downstream.as_str()).or_default() += 1;
        }

        let mut ready: VecDeque<&str> = self
            .tasks
            .iter()
            .map(|t| t.task_id.as_str())
            .filter(|id| in_degree[id] == 0)
            .collect();
        let mut order = Vec::with_capacity(self.tasks.len());

        while let Some(id) = ready.pop_front() {
            order.push(id);
            for next in self.downstream(id) {
                if let Some(degree) = in_degree.get_mut(next) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push_back(next);
                    }
                }
            }
        }

        if order.len() < self.tasks.len() {
            let stuck = self
                .tasks
                .iter()
                .map(|t| t.task_id.as_str())
                .filter(|id| !order.contains(id))
                .map(str::to_string)
                .collect();
            return Err(GraphError::Cycle(stuck));
        }

        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(ids: &[&str]) -> WorkflowGraph {
        let mut graph = WorkflowGraph::new();
        for id in ids {
            graph.add_task(Task::new(*id, Operator::Marker));
        }
        graph
    }

    #[test]
    fn test_chain_order() {
        let mut graph = graph(&["c", "a", "b"]);
        graph.chain(&["a", "b", "c"]);

        assert_eq!(graph.validate().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(graph.linear_order().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(graph.upstream("b"), vec!["a"]);
        assert_eq!(graph.downstream("b"), vec!["c"]);
    }

    #[test]
    fn test_duplicate_task_is_rejected() {
        let graph = graph(&["a", "a"]);
        assert_eq!(
            graph.validate(),
            Err(GraphError::DuplicateTask("a".to_string()))
        );
    }

    #[test]
    fn test_unknown_task_is_rejected() {
        let mut graph = graph(&["a"]);
        graph.add_edge("a", "ghost");

        match graph.validate() {
            Err(GraphError::UnknownTask { missing, .. }) => assert_eq!(missing, "ghost"),
            other => panic!("expected unknown task, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_is_rejected() {
        let mut graph = graph(&["start", "a", "b"]);
        graph.chain(&["start", "a", "b", "a"]);

        assert_eq!(
            graph.validate(),
            Err(GraphError::Cycle(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_fan_out_is_valid_but_not_linear() {
        let mut graph = graph(&["a", "b", "c"]);
        graph.add_edge("a", "b").add_edge("a", "c");

        assert_eq!(graph.validate().unwrap(), vec!["a", "b", "c"]);
        assert!(matches!(
            graph.linear_order(),
            Err(GraphError::NotLinear(_))
        ));
    }

    #[test]
    fn test_disconnected_tasks_are_not_linear() {
        let mut graph = graph(&["a", "b", "c"]);
        graph.chain(&["a", "b"]);

        assert!(matches!(
            graph.linear_order(),
            Err(GraphError::NotLinear(_))
        ));
    }

    #[test]
    fn test_task_serializes_flat() {
        let task = Task::new(
            "etl",
            Operator::CdeJobRun {
                job_name: "simple-pyspark".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_value(&task).unwrap(),
            serde_json::json!({
                "task_id": "etl",
                "operator": "cde_job_run",
                "job_name": "simple-pyspark"
            })
        );
    }
}
