use crate::domain::model::CounterRecord;
use chrono::NaiveDateTime;

/// Daily ticket numbering.
///
/// The sequence restarts whenever the calendar day of `now` differs from the
/// day stored in the record. Crossing midnight always resets, however little
/// time has passed since the previous ticket.
#[derive(Debug, Clone, Copy, Default)]
pub struct TicketSequencer;

impl TicketSequencer {
    pub fn new() -> Self {
        Self
    }

    /// Advances `state` by one ticket and returns the new number.
    pub fn next(&self, now: NaiveDateTime, state: &mut CounterRecord) -> u64 {
        let today = now.date();
        if state.date != today {
            tracing::info!(
                previous_date = %state.date,
                previous_count = state.count,
                "🌅 New day, restarting ticket sequence"
            );
            state.date = today;
            state.count = 0;
        }

        state.count += 1;
        state.count
    }
}
