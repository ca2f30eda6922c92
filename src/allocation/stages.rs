//! Built-in selection stages.
//!
//! All stages scan the pool in its original order, so ties are always
//! resolved in favor of the place that came first.

use super::{AllocationContext, Selection, SelectionStage};
use crate::models::Place;

/// Leads the first day with a place of a given category.
#[derive(Debug, Clone)]
pub struct FirstDayPriority {
    pub category: String,
}

impl FirstDayPriority {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }
}

impl SelectionStage for FirstDayPriority {
    fn name(&self) -> &'static str {
        "first-day-priority"
    }

    fn select(&self, pool: &[Place], context: &AllocationContext, selection: &mut Selection) {
        if !context.is_first_day {
            return;
        }
        if let Some(index) = pool.iter().position(|p| p.is_category(&self.category)) {
            selection.push(index);
        }
    }
}

/// Takes one place per category, walking a preference order.
///
/// For each category, the first pool place of that category that is not
/// already selected is added, until the day is full or the order runs out.
#[derive(Debug, Clone)]
pub struct CategoryDiversity {
    pub order: Vec<String>,
}

impl CategoryDiversity {
    pub fn new<S: Into<String>>(order: impl IntoIterator<Item = S>) -> Self {
        Self {
            order: order.into_iter().map(Into::into).collect(),
        }
    }
}

impl SelectionStage for CategoryDiversity {
    fn name(&self) -> &'static str {
        "category-diversity"
    }

    fn select(&self, pool: &[Place], _context: &AllocationContext, selection: &mut Selection) {
        for category in &self.order {
            if selection.is_full() {
                break;
            }
            let candidate = pool
                .iter()
                .enumerate()
                .find(|(i, p)| p.is_category(category) && !selection.contains(*i));
            if let Some((index, _)) = candidate {
                selection.push(index);
            }
        }
    }
}

/// Fills remaining capacity with the highest-rated places.
///
/// Missing ratings count as 0. The sort is stable, so equal ratings keep
/// pool order.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingFill;

impl SelectionStage for RatingFill {
    fn name(&self) -> &'static str {
        "rating-fill"
    }

    fn select(&self, pool: &[Place], _context: &AllocationContext, selection: &mut Selection) {
        if selection.is_full() {
            return;
        }
        let mut candidates: Vec<usize> = (0..pool.len()).filter(|&i| !selection.contains(i)).collect();
        candidates.sort_by(|&a, &b| pool[b].rating_or_zero().total_cmp(&pool[a].rating_or_zero()));

        for index in candidates {
            if !selection.push(index) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::category;

    fn ctx(capacity: usize, is_first_day: bool) -> AllocationContext {
        AllocationContext {
            capacity,
            is_first_day,
        }
    }

    fn run(stage: &dyn SelectionStage, pool: &[Place], context: AllocationContext) -> Vec<usize> {
        let mut selection = Selection::with_capacity(context.capacity);
        stage.select(pool, &context, &mut selection);
        selection.into_indices()
    }

    fn pool() -> Vec<Place> {
        vec![
            Place::new("r1", "Diner").with_category(category::RESTAURANT).with_rating(3.0),
            Place::new("a1", "Castle").with_category(category::TOURIST_ATTRACTION).with_rating(4.0),
            Place::new("m1", "Museum").with_category(category::MUSEUM).with_rating(4.9),
            Place::new("a2", "Bridge").with_category(category::TOURIST_ATTRACTION).with_rating(5.0),
            Place::new("r2", "Cafe").with_category(category::RESTAURANT).with_rating(4.5),
            Place::new("x1", "Viewpoint"),
        ]
    }

    #[test]
    fn test_first_day_priority_only_on_first_day() {
        let stage = FirstDayPriority::new(category::TOURIST_ATTRACTION);
        assert_eq!(run(&stage, &pool(), ctx(3, true)), vec![1]);
        assert!(run(&stage, &pool(), ctx(3, false)).is_empty());
    }

    #[test]
    fn test_first_day_priority_absent_category() {
        let stage = FirstDayPriority::new("zoo");
        assert!(run(&stage, &pool(), ctx(3, true)).is_empty());
    }

    #[test]
    fn test_category_diversity_first_of_each() {
        let stage = CategoryDiversity::new([category::RESTAURANT, category::MUSEUM, category::PARK]);
        // First restaurant in pool order (r1), not the better-rated r2
        assert_eq!(run(&stage, &pool(), ctx(5, false)), vec![0, 2]);
    }

    #[test]
    fn test_category_diversity_respects_capacity() {
        let stage = CategoryDiversity::new([category::RESTAURANT, category::MUSEUM]);
        assert_eq!(run(&stage, &pool(), ctx(1, false)), vec![0]);
    }

    #[test]
    fn test_category_diversity_skips_selected() {
        let stage = CategoryDiversity::new([category::RESTAURANT]);
        let mut selection = Selection::with_capacity(3);
        selection.push(0);
        stage.select(&pool(), &ctx(3, false), &mut selection);
        assert_eq!(selection.into_indices(), vec![0, 4]);
    }

    #[test]
    fn test_rating_fill_descending() {
        assert_eq!(run(&RatingFill, &pool(), ctx(3, false)), vec![3, 2, 4]);
    }

    #[test]
    fn test_rating_fill_ties_keep_pool_order() {
        let pool = vec![
            Place::new("u1", "One"),
            Place::new("u2", "Two").with_rating(0.0),
            Place::new("u3", "Three"),
        ];
        assert_eq!(run(&RatingFill, &pool, ctx(3, false)), vec![0, 1, 2]);
    }

    #[test]
    fn test_rating_fill_nothing_when_full() {
        assert!(run(&RatingFill, &pool(), ctx(0, false)).is_empty());
    }
}
