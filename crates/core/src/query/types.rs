//! List query types.

use serde::Serialize;

/// Default page size.
pub const DEFAULT_LIMIT: u64 = 100;
/// Smallest accepted page size.
pub const MIN_LIMIT: u64 = 1;
/// Largest accepted page size.
pub const MAX_LIMIT: u64 = 500;
/// Default offset.
pub const DEFAULT_OFFSET: u64 = 0;
/// Largest accepted offset.
pub const MAX_OFFSET: u64 = 1_000_000;

/// Query keys that never become filters.
pub const RESERVED_KEYS: [&str; 4] = ["select", "order", "limit", "offset"];

/// Comparison operator carried in a filter value prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    /// `eq.` - equal.
    Eq,
    /// `neq.` - not equal.
    Neq,
    /// `gt.` - greater than.
    Gt,
    /// `gte.` - greater than or equal.
    Gte,
    /// `lt.` - less than.
    Lt,
    /// `lte.` - less than or equal.
    Lte,
    /// `ilike.` - case-insensitive pattern match (`*` is a wildcard).
    Ilike,
    /// `in.(a,b)` - membership.
    In,
}

impl FilterOp {
    /// Parses an operator prefix without its trailing dot.
    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "eq" => Some(Self::Eq),
            "neq" => Some(Self::Neq),
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "ilike" => Some(Self::Ilike),
            "in" => Some(Self::In),
            _ => None,
        }
    }
}

/// A coerced filter operand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// `true` / `false`.
    Bool(bool),
    /// Integral numeric string.
    Int(i64),
    /// Non-integral finite numeric string.
    Float(f64),
    /// Anything else.
    Text(String),
    /// Operand list of an `in.(...)` filter.
    List(Vec<FilterValue>),
}

/// One column comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    /// Column name as sent by the client.
    pub column: String,
    /// Operator.
    pub op: FilterOp,
    /// Coerced operand.
    pub value: FilterValue,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending (the default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Single-column ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderBy {
    /// Column name as sent by the client.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

/// Parsed list query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListQuery {
    /// Filters, conjoined with AND.
    pub filters: Vec<Filter>,
    /// Requested ordering, if any.
    pub order: Option<OrderBy>,
    /// Clamped page size.
    pub limit: u64,
    /// Clamped offset.
    pub offset: u64,
    /// Requested output fields; `None` means every field.
    pub select: Option<Vec<String>>,
    /// Keys whose value carried no recognized operator.
    pub ignored: Vec<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            order: None,
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
            select: None,
            ignored: Vec::new(),
        }
    }
}

impl ListQuery {
    /// Returns true when the query yields no predicate.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.filters.is_empty()
    }
}
