//! Table view-model: filter → sort → paginate over the full row set.

use std::ops::Range;

use leptos::prelude::*;

use super::list_utils::{filter_indices, get_sort_indicator, normalize_query, stable_sort_indices, Searchable, Sortable};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn is_ascending(&self) -> bool {
        matches!(self, SortOrder::Asc)
    }

    pub fn toggled(&self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Why a table shows no rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    NoRecords,
    NoMatches(String),
}

impl EmptyState {
    pub fn message(&self) -> String {
        match self {
            EmptyState::NoRecords => "No records found.".to_string(),
            EmptyState::NoMatches(query) => format!("No results match \"{}\".", query),
        }
    }
}

/// Slice of a `total`-long sequence shown on `page`, clamped to the data.
pub fn page_range(total: usize, page: usize, page_size: usize) -> Range<usize> {
    if page_size == 0 {
        return 0..0;
    }
    let start = page.saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    start..end
}

pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

pub struct TableState<R>
where
    R: Searchable + Sortable + Clone + Send + Sync + 'static,
{
    rows: RwSignal<Vec<R>>,
    query: RwSignal<String>,
    order_by: RwSignal<R::Field>,
    order: RwSignal<SortOrder>,
    page: RwSignal<usize>,
    page_size: RwSignal<usize>,
}

impl<R> Clone for TableState<R>
where
    R: Searchable + Sortable + Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for TableState<R> where R: Searchable + Sortable + Clone + Send + Sync + 'static {}

impl<R> TableState<R>
where
    R: Searchable + Sortable + Clone + Send + Sync + 'static,
{
    pub fn new(order_by: R::Field, order: SortOrder, page_size: usize) -> Self {
        Self {
            rows: RwSignal::new(Vec::new()),
            query: RwSignal::new(String::new()),
            order_by: RwSignal::new(order_by),
            order: RwSignal::new(order),
            page: RwSignal::new(0),
            page_size: RwSignal::new(page_size.max(1)),
        }
    }

    /// A new row set always starts again from the first page.
    pub fn set_rows(&self, rows: Vec<R>) {
        self.rows.set(rows);
        self.page.set(0);
    }

    pub fn query(&self) -> String {
        self.query.get()
    }

    /// A different query always starts again from the first page.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let normalized = normalize_query(&query);
        if self
            .query
            .with_untracked(|current| normalize_query(current) == normalized)
        {
            return;
        }
        self.query.set(query);
        self.page.set(0);
    }

    pub fn order_by(&self) -> R::Field {
        self.order_by.get()
    }

    pub fn order(&self) -> SortOrder {
        self.order.get()
    }

    /// Header click: same column flips direction, another column sorts ascending.
    pub fn request_sort(&self, field: R::Field) {
        let same = self.order_by.get_untracked() == field;
        let next = if same && self.order.get_untracked().is_ascending() {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        };
        self.set_sort(field, next);
    }

    pub fn set_sort(&self, field: R::Field, order: SortOrder) {
        self.order_by.set(field);
        self.order.set(order);
    }

    pub fn sort_indicator(&self, field: R::Field) -> &'static str {
        get_sort_indicator(self.order_by.get(), field, self.order.get().is_ascending())
    }

    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn set_page(&self, page: usize) {
        let last = self.page_count_untracked().saturating_sub(1);
        self.page.set(page.min(last));
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn set_page_size(&self, page_size: usize) {
        self.page_size.set(page_size.max(1));
        self.page.set(0);
    }

    /// Indices into the row set after filtering and sorting.
    pub fn ordered_indices(&self) -> Vec<usize> {
        let query = self.query.get();
        let field = self.order_by.get();
        let ascending = self.order.get().is_ascending();
        self.rows.with(|rows| {
            let mut indices = filter_indices(rows, &query);
            stable_sort_indices(rows, &mut indices, field, ascending);
            indices
        })
    }

    pub fn filtered_count(&self) -> usize {
        let query = normalize_query(&self.query.get());
        self.rows
            .with(|rows| rows.iter().filter(|row| row.matches_filter(&query)).count())
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered_count(), self.page_size.get())
    }

    /// Rows of the current page.
    pub fn visible_rows(&self) -> Vec<R> {
        let indices = self.ordered_indices();
        let range = page_range(indices.len(), self.page.get(), self.page_size.get());
        self.rows
            .with(|rows| indices[range].iter().map(|&i| rows[i].clone()).collect())
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.rows.with(|rows| rows.is_empty()) {
            return Some(EmptyState::NoRecords);
        }
        if self.filtered_count() == 0 {
            return Some(EmptyState::NoMatches(self.query.get().trim().to_string()));
        }
        None
    }

    // Mutators read through these so an enclosing effect does not subscribe.
    fn filtered_count_untracked(&self) -> usize {
        let query = self.query.with_untracked(|query| normalize_query(query));
        self.rows
            .with_untracked(|rows| rows.iter().filter(|row| row.matches_filter(&query)).count())
    }

    fn page_count_untracked(&self) -> usize {
        page_count(self.filtered_count_untracked(), self.page_size.get_untracked())
    }
}
