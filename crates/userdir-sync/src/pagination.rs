//! Page pointer and "more pages" flag.

/// Current page and whether the server reported more pages.
///
/// Pages start at 1. Until a page has been admitted, `has_more` is false and
/// `next_page` is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationController {
    page: u32,
    has_more: bool,
}

impl PaginationController {
    /// Start at `page`, clamped to 1.
    pub fn new(page: u32) -> Self {
        Self {
            page: page.max(1),
            has_more: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Record the `has_more` flag of the last admitted page.
    pub fn set_has_more(&mut self, has_more: bool) {
        self.has_more = has_more;
    }

    /// Whether `next_page` would advance.
    pub fn can_next(&self) -> bool {
        self.has_more && self.page < u32::MAX
    }

    /// Whether `prev_page` would move back.
    pub fn can_prev(&self) -> bool {
        self.page > 1
    }

    /// Advance one page. Returns `None` when there are no more pages.
    pub fn next_page(&mut self) -> Option<u32> {
        if !self.has_more {
            return None;
        }
        self.page = self.page.checked_add(1)?;
        Some(self.page)
    }

    /// Move back one page, never below 1. Returns the resulting page.
    pub fn prev_page(&mut self) -> u32 {
        self.page = self.page.saturating_sub(1).max(1);
        self.page
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(1)
    }
}
