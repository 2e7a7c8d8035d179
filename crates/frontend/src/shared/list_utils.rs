/// Универсальные утилиты для работы со списками (поиск, сортировка)
use std::cmp::Ordering;
use std::fmt::Debug;

use chrono::{DateTime, Utc};

/// Trait для типов данных, поддерживающих поиск
pub trait Searchable {
    /// Строки, по которым ищет пользователь (в том виде, в каком они отображаются)
    fn search_fields(&self) -> Vec<String>;

    /// Проверяет, соответствует ли объект нормализованному запросу
    fn matches_filter(&self, normalized_query: &str) -> bool {
        normalized_query.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(normalized_query))
    }
}

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    type Field: Copy + PartialEq + Debug + Send + Sync + 'static;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: Self::Field) -> Ordering;
}

/// Trimmed, lower-cased query; empty means "no filter".
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Case-insensitive text comparison.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Instants compare chronologically; values that failed to parse come first.
pub fn compare_instants(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    a.cmp(&b)
}

/// Positions of the items that match `query`, in input order.
pub fn filter_indices<T: Searchable>(items: &[T], query: &str) -> Vec<usize> {
    let query = normalize_query(query);
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.matches_filter(&query))
        .map(|(index, _)| index)
        .collect()
}

/// Order `indices` by `field`. Equal keys keep input order in both directions.
pub fn stable_sort_indices<T: Sortable>(
    items: &[T],
    indices: &mut [usize],
    field: T::Field,
    ascending: bool,
) {
    indices.sort_by(|&a, &b| {
        let cmp = items[a].compare_by_field(&items[b], field);
        let cmp = if ascending { cmp } else { cmp.reverse() };
        cmp.then(a.cmp(&b))
    });
}

/// Сортирует список по указанному полю
pub fn sort_list<T: Sortable>(items: &mut Vec<T>, field: T::Field, ascending: bool) {
    // sort_by is stable, and reversing the comparator keeps equal items in place
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Фильтрует список по поисковому запросу
pub fn filter_list<T: Searchable>(items: Vec<T>, query: &str) -> Vec<T> {
    let query = normalize_query(query);
    if query.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(&query))
        .collect()
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator<F: PartialEq>(current_field: F, field: F, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}
