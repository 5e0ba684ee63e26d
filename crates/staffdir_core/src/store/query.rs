//! Read-side helpers: search, sort and pagination over a record slice.
//!
//! # Invariants
//! - Every helper returns new vectors; the input order is never changed.
//! - Sorting is stable, so ties keep their input order.

use crate::model::employee::{Employee, UnknownLabel};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Field a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Id,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfEmployment,
    DateOfBirth,
    Department,
    Position,
}

impl SortField {
    pub const ALL: [SortField; 9] = [
        SortField::Id,
        SortField::FirstName,
        SortField::LastName,
        SortField::Email,
        SortField::Phone,
        SortField::DateOfEmployment,
        SortField::DateOfBirth,
        SortField::Department,
        SortField::Position,
    ];

    /// Wire name, matching the persisted JSON field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DateOfEmployment => "dateOfEmployment",
            Self::DateOfBirth => "dateOfBirth",
            Self::Department => "department",
            Self::Position => "position",
        }
    }

    /// Ascending comparison: dates as dates, everything else as
    /// case-insensitive text.
    pub fn compare(self, a: &Employee, b: &Employee) -> Ordering {
        match self {
            Self::DateOfEmployment => a.date_of_employment.cmp(&b.date_of_employment),
            Self::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
            Self::Id => cmp_text(&a.id, &b.id),
            Self::FirstName => cmp_text(&a.first_name, &b.first_name),
            Self::LastName => cmp_text(&a.last_name, &b.last_name),
            Self::Email => cmp_text(&a.email, &b.email),
            Self::Phone => cmp_text(&a.phone, &b.phone),
            Self::Department => cmp_text(a.department.as_str(), b.department.as_str()),
            Self::Position => cmp_text(a.position.as_str(), b.position.as_str()),
        }
    }
}

impl FromStr for SortField {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == value)
            .ok_or_else(|| UnknownLabel {
                kind: "sort field",
                value: value.to_string(),
            })
    }
}

impl Display for SortField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Direction after clicking the header of the active sort column again.
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(UnknownLabel {
                kind: "sort direction",
                value: other.to_string(),
            }),
        }
    }
}

/// One page of a listing plus the totals needed to render navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Page numbers to render as links around `current_page`.
    pub fn visible_pages(&self, window: usize) -> Vec<usize> {
        visible_pages(self.current_page, self.total_pages, window)
    }

    /// Whether navigating to `page` from this page is meaningful.
    pub fn can_navigate_to(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages && page != self.current_page
    }
}

/// Records whose first name, last name or email contains `query`
/// case-insensitively, or whose raw phone contains it.
///
/// A blank query matches everything.
pub fn search(employees: &[Employee], query: &str) -> Vec<Employee> {
    if query.trim().is_empty() {
        return employees.to_vec();
    }

    let needle = query.to_lowercase();
    employees
        .iter()
        .filter(|employee| matches_query(employee, &needle))
        .cloned()
        .collect()
}

fn matches_query(employee: &Employee, needle: &str) -> bool {
    employee.first_name.to_lowercase().contains(needle)
        || employee.last_name.to_lowercase().contains(needle)
        || employee.email.to_lowercase().contains(needle)
        || employee.phone.contains(needle)
}

/// Slices `items` into the 1-based `page`. Out-of-range pages are empty;
/// no clamping happens here.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_items.div_ceil(page_size)
    };

    let page_items = if page == 0 || page_size == 0 {
        Vec::new()
    } else {
        let start = (page - 1).saturating_mul(page_size);
        items.into_iter().skip(start).take(page_size).collect()
    };

    Page {
        items: page_items,
        total_items,
        total_pages,
        current_page: page,
        page_size,
        has_next: page < total_pages,
        has_prev: page > 1,
    }
}

/// Stable sort of a copy of `employees`.
pub fn sort(employees: &[Employee], field: SortField, direction: SortDirection) -> Vec<Employee> {
    let mut sorted = employees.to_vec();
    sorted.sort_by(|a, b| direction.apply(field.compare(a, b)));
    sorted
}

/// Window of at most `window` consecutive page numbers containing
/// `current`, shifted left when it would run past `total`.
pub fn visible_pages(current: usize, total: usize, window: usize) -> Vec<usize> {
    if window == 0 || total == 0 {
        return Vec::new();
    }

    let half = window / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = total.min(start + window - 1);
    if end < start {
        return Vec::new();
    }
    if end - start + 1 < window {
        start = (end + 1).saturating_sub(window).max(1);
    }

    (start..=end).collect()
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{paginate, visible_pages, SortDirection, SortField};

    #[test]
    fn visible_pages_centers_and_shifts_at_the_end() {
        assert_eq!(visible_pages(1, 10, 5), vec![1, 2, 3, 4, 5]);
        assert_eq!(visible_pages(5, 10, 5), vec![3, 4, 5, 6, 7]);
        assert_eq!(visible_pages(10, 10, 5), vec![6, 7, 8, 9, 10]);
        assert_eq!(visible_pages(2, 3, 5), vec![1, 2, 3]);
        assert!(visible_pages(1, 0, 5).is_empty());
    }

    #[test]
    fn paginate_reports_totals_for_out_of_range_page() {
        let page = paginate((1..=25).collect::<Vec<_>>(), 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_items, 25);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn navigation_targets_exclude_current_and_out_of_range_pages() {
        let page = paginate((1..=25).collect::<Vec<_>>(), 2, 10);
        assert!(page.can_navigate_to(1));
        assert!(page.can_navigate_to(3));
        assert!(!page.can_navigate_to(2));
        assert!(!page.can_navigate_to(0));
        assert!(!page.can_navigate_to(4));
    }

    #[test]
    fn paginate_zero_page_size_has_no_pages() {
        let page = paginate(vec![1, 2, 3], 1, 0);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn sort_labels_parse_from_wire_names() {
        assert_eq!("lastName".parse::<SortField>().unwrap(), SortField::LastName);
        assert!("salary".parse::<SortField>().is_err());
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
    }
}
