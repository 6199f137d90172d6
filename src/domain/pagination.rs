//! Page requests and paged results returned by repositories.

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    /// Creates a page request. `page` is 1-based; callers validate it is non-zero.
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Returns the first page with the given size.
    pub fn first(size: u32) -> Self {
        Self { page: 1, size }
    }

    /// Row offset for SQL queries.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.size)
    }

    /// Row limit for SQL queries.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// One page of results plus the size of the whole result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_items: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: i64) -> Self {
        Self {
            items,
            page: request.page,
            page_size: request.size,
            total_items,
        }
    }

    /// Returns an empty page for the request.
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), request, 0)
    }

    /// Number of pages needed for `total_items`.
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 || self.total_items <= 0 {
            return 0;
        }
        let size = i64::from(self.page_size);
        ((self.total_items + size - 1) / size) as u32
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages()
    }

    /// Builds the requested page out of an already ordered, complete slice.
    pub fn slice(all: &[T], request: PageRequest) -> Self
    where
        T: Clone,
    {
        let total_items = all.len() as i64;
        let items = all
            .iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .cloned()
            .collect();
        Self::new(items, request, total_items)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
        }
    }
}
