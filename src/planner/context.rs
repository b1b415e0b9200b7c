//! Planning context and optimizer settings

use crate::common::error::SieveResult;
use crate::expression::BoxedExpression;
use crate::planner::TableFilter;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optimizer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Reorder conjunction operands so the cheaper side is evaluated first
    pub reorder_conjuncts: bool,
    /// Fold constant subtrees away at plan time
    pub fold_constants: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        PlannerSettings {
            reorder_conjuncts: true,
            fold_constants: true,
        }
    }
}

/// Context a condition is planned in
#[derive(Debug, Clone, Default)]
pub struct PlanContext {
    settings: PlannerSettings,
}

impl PlanContext {
    /// Create a context with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with explicit settings
    pub fn with_settings(settings: PlannerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    /// Run the full planning pipeline over a WHERE condition
    ///
    /// Binds columns against every filter, optimizes the tree, then walks the
    /// filters in scan order letting each one pull index conditions and scan
    /// filters out of it. A filter's columns only become evaluatable once its
    /// scan is reached, so a condition touching a later filter is not pushed
    /// into an earlier one. The returned tree evaluates to the same result as
    /// the input tree on every row.
    pub fn prepare(
        &self,
        condition: BoxedExpression,
        filters: &mut [TableFilter],
    ) -> SieveResult<BoxedExpression> {
        debug!(condition = %condition.to_sql(), filters = filters.len(), "preparing condition");
        let mut condition = condition;
        for filter in filters.iter() {
            condition.map_columns(filter)?;
        }
        for filter in filters.iter() {
            condition.set_evaluatable(filter, false);
        }
        let mut condition = condition.optimize(self)?;
        for filter in filters.iter_mut() {
            condition.set_evaluatable(filter, true);
            condition = condition.create_index_conditions(filter)?;
            condition.add_filter_conditions(filter, false);
        }
        Ok(condition)
    }
}
