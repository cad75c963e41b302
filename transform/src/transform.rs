//! The transform trait and sequential composition.

use graft_graph::Graph;

use crate::{TransformOutcome, TransformResult};

/// A rewrite applied to a graph in place.
pub trait Transform {
    /// Short label used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite `graph`. Finding nothing to rewrite is not an error.
    fn apply(&self, graph: &mut Graph) -> TransformResult<TransformOutcome>;
}

/// Transforms applied one after another.
#[derive(Default)]
pub struct Pipeline {
    steps: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step, builder style.
    pub fn then(mut self, step: impl Transform + 'static) -> Self {
        self.push(step);
        self
    }

    pub fn push(&mut self, step: impl Transform + 'static) {
        self.steps.push(Box::new(step));
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Transform for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    /// Run every step to completion before the next; stop at the first error.
    fn apply(&self, graph: &mut Graph) -> TransformResult<TransformOutcome> {
        let mut total = TransformOutcome::default();
        for (index, step) in self.steps.iter().enumerate() {
            let outcome = step.apply(graph)?;
            tracing::debug!(step = index, transform = step.name(), ?outcome, "pipeline step");
            total += outcome;
        }
        Ok(total)
    }
}
