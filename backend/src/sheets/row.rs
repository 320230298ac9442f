//! A single row-addressing convention for all spreadsheet operations.
//!
//! The spreadsheet service itself speaks three conventions at once: value
//! reads and appends are 0-indexed over the returned sequence, A1-notation
//! updates address 1-indexed sheet rows, and structural deletes take 0-indexed
//! grid indices. Callers of the gateway only ever see `RowId`; the conversion
//! to whichever convention an external call needs happens at that call site.

/// 0-based position of a row within the sequence returned by a full-range
/// read. `RowId(0)` is the first row of the sheet (usually the header).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RowId(pub u32);

impl RowId {
    /// The 1-based row number used in A1 notation (`A3:Z3` for `RowId(2)`).
    pub fn sheet_row(self) -> u32 {
        self.0 + 1
    }

    /// The 0-based grid index used by structural requests
    /// (`deleteDimension.startIndex`).
    pub fn grid_index(self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_is_sheet_row_one() {
        assert_eq!(RowId(0).sheet_row(), 1);
        assert_eq!(RowId(0).grid_index(), 0);
    }

    #[test]
    fn conversions_differ_by_exactly_one() {
        for i in [0u32, 1, 5, 999] {
            assert_eq!(RowId(i).sheet_row(), RowId(i).grid_index() + 1);
        }
    }
}
