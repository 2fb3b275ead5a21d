//! Page navigation and the page-number window.

use serde::{Deserialize, Serialize};

/// Pages on each side of the current page that are always shown.
pub const WINDOW_RADIUS: u32 = 2;

/// Number of pages needed for `total` records. Never less than 1.
#[must_use]
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    let pages = total.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX).max(1)
}

/// One slot in the page-number bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    /// A page button.
    Page(u32),
    /// A gap between non-adjacent page buttons.
    Ellipsis,
}

/// The page buttons shown for a position: the first page, the last page and
/// every page within [`WINDOW_RADIUS`] of the current one, with an ellipsis
/// for each gap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    current: u32,
    total_pages: u32,
    items: Vec<PageItem>,
}

impl PageWindow {
    /// Builds the window for `current` out of `total_pages`.
    #[must_use]
    pub fn new(current: u32, total_pages: u32) -> Self {
        let total_pages = total_pages.max(1);
        let low = current.saturating_sub(WINDOW_RADIUS).max(1);
        let high = current.saturating_add(WINDOW_RADIUS).min(total_pages);

        let mut pages = vec![1];
        pages.extend(low..=high);
        pages.push(total_pages);
        pages.sort_unstable();
        pages.dedup();

        let mut items = Vec::with_capacity(pages.len() * 2);
        let mut previous: Option<u32> = None;
        for page in pages {
            if previous.is_some_and(|p| page > p + 1) {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page(page));
            previous = Some(page);
        }

        Self {
            current,
            total_pages,
            items,
        }
    }

    /// The buttons in display order.
    #[must_use]
    pub fn items(&self) -> &[PageItem] {
        &self.items
    }

    /// The highlighted page.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// Whether "Previous" is enabled.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current > 1
    }

    /// Whether "Next" is enabled.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current < self.total_pages
    }

    /// The bar is hidden when everything fits on one page.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}

/// Current page and page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current: u32,
    total_pages: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            current: 1,
            total_pages: 1,
        }
    }
}

impl Paginator {
    /// Creates a paginator on page 1 of 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current page.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.current
    }

    /// The page count.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Updates the page count from a record total.
    ///
    /// The current page is left alone, so a page past the end stays visible
    /// as an empty page instead of jumping.
    pub fn set_total(&mut self, total: u64, page_size: u32) {
        self.total_pages = total_pages(total, page_size);
    }

    /// Collapses to a single page, as after a failed fetch.
    pub fn reset_total(&mut self) {
        self.total_pages = 1;
    }

    /// Returns to page 1. Returns true if the page changed.
    pub fn reset(&mut self) -> bool {
        self.go_to(1)
    }

    /// Moves back one page, stopping at 1.
    pub fn previous(&mut self) -> bool {
        self.go_to(self.current.saturating_sub(1))
    }

    /// Moves forward one page, stopping at the last page.
    pub fn next(&mut self) -> bool {
        self.go_to(self.current.saturating_add(1))
    }

    /// Jumps to `page`, clamped into `1..=total_pages`.
    pub fn go_to(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages.max(1));
        if target == self.current {
            return false;
        }
        self.current = target;
        true
    }

    /// The page-number window for the current position.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.current, self.total_pages)
    }
}
