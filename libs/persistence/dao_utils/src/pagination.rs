/// A 1-indexed page of `row` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub row: u64,
}

/// The skip/limit pair a store reads for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, row: u64) -> Self { Self { page, row } }

    /// Number of pages needed for `total` items. Zero when `row` is zero.
    pub fn total_pages(&self, total: u64) -> u64 {
        if self.row == 0 {
            return 0;
        }
        total.div_ceil(self.row)
    }

    /// Resolves the request against `total` items; `None` when the page
    /// does not exist.
    pub fn window(&self, total: u64) -> Option<PageWindow> {
        if self.page == 0 || self.page > self.total_pages(total) {
            return None;
        }

        Some(PageWindow {
            skip: (self.page - 1) * self.row,
            limit: self.row,
        })
    }
}
