use serde::{Deserialize, Serialize};

/// Timestamp range in which an action may be included.
///
/// A bound of `-1` is open. The executors never read it; hosts check it
/// before scheduling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidityWindow {
    pub start: i64,
    pub end: i64,
}

impl ValidityWindow {
    /// Valid at every timestamp.
    pub const ALWAYS: ValidityWindow = ValidityWindow { start: -1, end: -1 };

    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    pub fn is_always(&self) -> bool {
        *self == Self::ALWAYS
    }

    pub fn contains(&self, timestamp: i64) -> bool {
        let after_start = self.start < 0 || timestamp >= self.start;
        let before_end = self.end < 0 || timestamp <= self.end;
        after_start && before_end
    }
}

impl Default for ValidityWindow {
    fn default() -> Self {
        Self::ALWAYS
    }
}
