use thiserror::Error;

/// Errors that can occur while evaluating emission schedules.
///
/// The calendar, rate, and supply operations are total; only the sub-network
/// table lookup can fail, and only when handed an empty table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmissionsError {
    #[error("sub-network emission schedule is empty")]
    EmptySchedule,
}
