//! Choosing one record out of a result list.

use crate::catalog::Record;

/// Picks the record to download.
///
/// Returning `None` means the user declined; the session then ends without
/// touching any mirror.
pub trait RecordPicker {
    /// Chooses one of `records`, which is never empty when called by a session.
    fn pick(&mut self, records: &[Record]) -> Option<Record>;
}

/// Non-interactive picker selecting a fixed 1-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexPicker(pub usize);

impl RecordPicker for IndexPicker {
    fn pick(&mut self, records: &[Record]) -> Option<Record> {
        self.0
            .checked_sub(1)
            .and_then(|index| records.get(index))
            .cloned()
    }
}

impl<F> RecordPicker for F
where
    F: FnMut(&[Record]) -> Option<Record>,
{
    fn pick(&mut self, records: &[Record]) -> Option<Record> {
        self(records)
    }
}
