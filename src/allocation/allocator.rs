//! Slot allocator: composes selection stages into a policy.

use std::sync::Arc;

use tracing::trace;

use super::stages::{CategoryDiversity, FirstDayPriority, RatingFill};
use super::{AllocationContext, Selection, SelectionStage};
use crate::config::ScheduleConfig;
use crate::models::Place;

/// Runs selection stages in order to fill one day.
///
/// The allocator never mutates the pool; it returns pool indices in
/// visiting order and the caller removes those places.
#[derive(Debug, Clone, Default)]
pub struct SlotAllocator {
    stages: Vec<Arc<dyn SelectionStage>>,
}

impl SlotAllocator {
    /// Creates an allocator with no stages (selects nothing).
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage.
    pub fn with_stage<S: SelectionStage + 'static>(mut self, stage: S) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Builds the standard three-stage policy from configuration.
    pub fn from_config(config: &ScheduleConfig) -> Self {
        let mut allocator = Self::new();
        if let Some(category) = &config.first_day_category {
            allocator = allocator.with_stage(FirstDayPriority::new(category.clone()));
        }
        allocator
            .with_stage(CategoryDiversity::new(config.category_preference.iter().cloned()))
            .with_stage(RatingFill)
    }

    /// Number of stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Picks up to `capacity` places from `pool` for one day.
    ///
    /// Returns indices into `pool` in the order the places were chosen,
    /// which is also their visiting order.
    pub fn allocate(&self, pool: &[Place], capacity: usize, is_first_day: bool) -> Vec<usize> {
        let context = AllocationContext {
            capacity: capacity.min(pool.len()),
            is_first_day,
        };
        let mut selection = Selection::with_capacity(context.capacity);

        for stage in &self.stages {
            if selection.is_full() {
                break;
            }
            let before = selection.len();
            stage.select(pool, &context, &mut selection);
            trace!(stage = stage.name(), added = selection.len() - before, "selection stage");
        }

        selection.into_indices()
    }
}
