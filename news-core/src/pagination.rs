/// Articles shown per page.
pub const PAGE_SIZE: usize = 9;

/// One page of a filtered sequence. `number` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// Navigation is only rendered when there is somewhere to go.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

pub fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Slices `items[(page-1)*page_size .. page*page_size]`, clipped to the
/// sequence. Page 0 is read as page 1; pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let number = page.max(1);
    let start = (number - 1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    Page {
        items: &items[start..end],
        number,
        total_pages: total_pages(items.len(), page_size),
    }
}

pub fn previous_page(current: usize) -> usize {
    current.saturating_sub(1).max(1)
}

pub fn next_page(current: usize, total_pages: usize) -> usize {
    (current + 1).min(total_pages).max(1)
}
