//! Content-log table: search, sort and paging over a station's log.

use std::cmp::Ordering;

use contracts::domain::common::ContentLogEntry;

use crate::shared::config::TableSection;
use crate::shared::date_utils::format_datetime;
use crate::shared::list_utils::{compare_instants, compare_text, Searchable, Sortable};
use crate::shared::table_state::{SortOrder, TableState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentField {
    Timestamp,
    Title,
    Artist,
    Origin,
}

impl ContentField {
    pub const ALL: [ContentField; 4] = [
        ContentField::Timestamp,
        ContentField::Title,
        ContentField::Artist,
        ContentField::Origin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ContentField::Timestamp => "Timestamp",
            ContentField::Title => "Title",
            ContentField::Artist => "Artist",
            ContentField::Origin => "Origin",
        }
    }
}

impl Searchable for ContentLogEntry {
    fn search_fields(&self) -> Vec<String> {
        vec![
            format_datetime(&self.timestamp),
            self.title.clone(),
            self.artist.clone(),
            self.origin.as_str().to_string(),
        ]
    }
}

impl Sortable for ContentLogEntry {
    type Field = ContentField;

    fn compare_by_field(&self, other: &Self, field: ContentField) -> Ordering {
        match field {
            ContentField::Timestamp => compare_instants(self.instant(), other.instant()),
            ContentField::Title => compare_text(&self.title, &other.title),
            ContentField::Artist => compare_text(&self.artist, &other.artist),
            ContentField::Origin => compare_text(self.origin.as_str(), other.origin.as_str()),
        }
    }
}

pub type ContentTable = TableState<ContentLogEntry>;

/// Oldest entries first, configured page size.
pub fn content_table(config: &TableSection, log: Vec<ContentLogEntry>) -> ContentTable {
    let table = TableState::new(ContentField::Timestamp, SortOrder::Asc, config.page_size);
    table.set_rows(log);
    table
}

/// Row as displayed: formatted timestamp plus the raw fields.
pub fn display_row(entry: &ContentLogEntry) -> [String; 4] {
    [
        format_datetime(&entry.timestamp),
        entry.title.clone(),
        entry.artist.clone(),
        entry.origin.as_str().to_string(),
    ]
}
