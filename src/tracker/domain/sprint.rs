//! Sprint time window used by analytics.

use super::{BoardId, SprintId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A sprint: a date window over a board's tasks.
///
/// Sprints carry no lifecycle logic; analytics uses them purely as a
/// creation-date filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    /// Sprint identifier.
    pub id: SprintId,
    /// Board the sprint belongs to.
    pub board_id: BoardId,
    /// First day of the sprint, inclusive.
    pub start_date: NaiveDate,
    /// Last day of the sprint, inclusive.
    pub end_date: NaiveDate,
}

impl Sprint {
    /// Creates a sprint window.
    #[must_use]
    pub const fn new(
        id: SprintId,
        board_id: BoardId,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            board_id,
            start_date,
            end_date,
        }
    }

    /// Returns `true` when the given date falls inside the sprint window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
