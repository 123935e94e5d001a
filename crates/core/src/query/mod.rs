//! List query parsing.
//!
//! Turns flat query-string pairs (`?price=gt.100&order=created_at.desc&limit=20`)
//! into a [`ListQuery`] describing filters, ordering, paging and projection.
//! Parsing never fails: malformed input degrades to defaults or no-ops.

mod parser;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;

pub use parser::{clamp_limit, clamp_offset, coerce_value};
pub use types::{
    DEFAULT_LIMIT, DEFAULT_OFFSET, Filter, FilterOp, FilterValue, ListQuery, MAX_LIMIT, MAX_OFFSET,
    MIN_LIMIT, OrderBy, RESERVED_KEYS, SortDirection,
};
