use std::fmt;

use serde::Serialize;

use crate::listing::history::Location;

/// Entry kind filter. `Any` serializes to the empty string, which the service
/// treats as "no kind restriction".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    Any,
    File,
    Directory,
}

impl KindFilter {
    /// Lenient parse from user input. Unrecognized text means `Any`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" | "f" => KindFilter::File,
            "directory" | "dir" | "d" => KindFilter::Directory,
            _ => KindFilter::Any,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KindFilter::Any => "",
            KindFilter::File => "File",
            KindFilter::Directory => "Directory",
        }
    }

    /// Cycle Any → File → Directory → Any.
    pub fn next(&self) -> Self {
        match self {
            KindFilter::Any => KindFilter::File,
            KindFilter::File => KindFilter::Directory,
            KindFilter::Directory => KindFilter::Any,
        }
    }
}

impl fmt::Display for KindFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for KindFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One of the four user-editable filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    SizeGreaterThan,
    SizeLessThan,
    NameContains,
    KindEquals,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::SizeGreaterThan,
        FilterField::SizeLessThan,
        FilterField::NameContains,
        FilterField::KindEquals,
    ];

    /// Chip title shown in the filter bar.
    pub fn title(&self) -> &'static str {
        match self {
            FilterField::SizeGreaterThan => "File Size Min",
            FilterField::SizeLessThan => "File Size Max",
            FilterField::NameContains => "Name Contains",
            FilterField::KindEquals => "Type (File | Directory)",
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            FilterField::SizeGreaterThan | FilterField::SizeLessThan
        )
    }
}

/// Current filter predicate as edited by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub size_greater_than: i64,
    pub size_less_than: i64,
    pub name_contains: String,
    pub kind_equals: KindFilter,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            size_greater_than: DEFAULT_SIZE_GT,
            size_less_than: DEFAULT_SIZE_LT,
            name_contains: String::new(),
            kind_equals: KindFilter::File,
        }
    }
}

/// Default lower size bound for a fresh session.
pub const DEFAULT_SIZE_GT: i64 = 200;
/// Default upper size bound for a fresh session.
pub const DEFAULT_SIZE_LT: i64 = 2000;

impl FilterState {
    /// Apply raw user input to a field. Numeric fields never reject input:
    /// see [`coerce_number`].
    pub fn set(&mut self, field: FilterField, value: &str) {
        match field {
            FilterField::SizeGreaterThan => self.size_greater_than = coerce_number(value),
            FilterField::SizeLessThan => self.size_less_than = coerce_number(value),
            FilterField::NameContains => self.name_contains = value.to_string(),
            FilterField::KindEquals => self.kind_equals = KindFilter::parse(value),
        }
    }

    /// Reset a field to its "cleared" value (0 or empty), not to the session default.
    pub fn clear(&mut self, field: FilterField) {
        match field {
            FilterField::SizeGreaterThan => self.size_greater_than = 0,
            FilterField::SizeLessThan => self.size_less_than = 0,
            FilterField::NameContains => self.name_contains.clear(),
            FilterField::KindEquals => self.kind_equals = KindFilter::Any,
        }
    }

    /// Current value of a field, rendered as the user would type it.
    pub fn display(&self, field: FilterField) -> String {
        match field {
            FilterField::SizeGreaterThan => self.size_greater_than.to_string(),
            FilterField::SizeLessThan => self.size_less_than.to_string(),
            FilterField::NameContains => self.name_contains.clone(),
            FilterField::KindEquals => self.kind_equals.to_string(),
        }
    }
}

/// Coerce free text into a size bound.
///
/// Integers parse as-is, finite decimals truncate toward zero, and anything
/// else (empty, garbage, NaN, infinities) becomes 0.
pub fn coerce_number(input: &str) -> i64 {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(f) if f.is_finite() => f.trunc() as i64,
        _ => 0,
    }
}

/// `where` clause of the listing query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhereClause {
    pub size_gt: i64,
    pub size_lt: i64,
    pub name_contains: String,
    pub type_eq: KindFilter,
}

/// Variables for one listing request. Two equal values describe the same
/// request, which is what the query tracker keys on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryVariables {
    pub path: String,
    pub page: u32,
    #[serde(rename = "where")]
    pub filter: WhereClause,
}

/// Derive the request for the current location, page and filters.
///
/// No range validation: `size_gt > size_lt` simply yields an empty page.
pub fn build(current: &Location, page: &PageState, filters: &FilterState) -> QueryVariables {
    QueryVariables {
        path: current.path.clone(),
        page: page.number(),
        filter: WhereClause {
            size_gt: filters.size_greater_than,
            size_lt: filters.size_less_than,
            name_contains: filters.name_contains.clone(),
            type_eq: filters.kind_equals,
        },
    }
}

/// One-based page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    number: u32,
}

impl Default for PageState {
    fn default() -> Self {
        Self { number: 1 }
    }
}

impl PageState {
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Zero-based index as used by the paginator.
    pub fn index(&self) -> usize {
        page_index_from_number(self.number)
    }

    pub fn reset(&mut self) {
        self.number = 1;
    }

    /// Move to the page the paginator calls `zero_based_index`.
    pub fn set_from_index(&mut self, zero_based_index: usize) {
        self.number = page_number_from_index(zero_based_index);
    }
}

/// Paginator index (zero-based) to page number (one-based).
pub fn page_number_from_index(zero_based_index: usize) -> u32 {
    u32::try_from(zero_based_index)
        .unwrap_or(u32::MAX - 1)
        .saturating_add(1)
}

/// Page number (one-based) to paginator index (zero-based).
pub fn page_index_from_number(page_number: u32) -> usize {
    page_number.saturating_sub(1) as usize
}
