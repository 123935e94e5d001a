//! Query-string parsing for list endpoints.

use super::types::{
    DEFAULT_LIMIT, DEFAULT_OFFSET, Filter, FilterOp, FilterValue, ListQuery, MAX_LIMIT, MAX_OFFSET,
    MIN_LIMIT, OrderBy, RESERVED_KEYS, SortDirection,
};

impl ListQuery {
    /// Parses query-string pairs.
    ///
    /// Later occurrences of a reserved key win. Filter keys keep their input
    /// order.
    pub fn parse<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        let mut limit = None;
        let mut offset = None;

        for (key, value) in pairs {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "select" => query.select = parse_select(value),
                "order" => query.order = parse_order(value),
                "limit" => limit = Some(value.to_string()),
                "offset" => offset = Some(value.to_string()),
                "" => {}
                _ => match parse_filter(key, value) {
                    Some(filter) => query.filters.push(filter),
                    None => query.ignored.push(key.to_string()),
                },
            }
        }

        query.limit = clamp_limit(limit.as_deref());
        query.offset = clamp_offset(offset.as_deref());
        query
    }
}

/// Parses and clamps a `limit` value into `[1, 500]`, defaulting to 100.
#[must_use]
pub fn clamp_limit(raw: Option<&str>) -> u64 {
    clamp_number(raw, DEFAULT_LIMIT, MIN_LIMIT, MAX_LIMIT)
}

/// Parses and clamps an `offset` value into `[0, 1_000_000]`, defaulting to 0.
#[must_use]
pub fn clamp_offset(raw: Option<&str>) -> u64 {
    clamp_number(raw, DEFAULT_OFFSET, DEFAULT_OFFSET, MAX_OFFSET)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn clamp_number(raw: Option<&str>, default: u64, min: u64, max: u64) -> u64 {
    let Some(value) = raw.and_then(parse_finite) else {
        return default;
    };
    value.trunc().clamp(min as f64, max as f64) as u64
}

fn parse_finite(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Coerces a raw operand: booleans, then numbers, then text.
#[must_use]
pub fn coerce_value(raw: &str) -> FilterValue {
    match raw {
        "true" => return FilterValue::Bool(true),
        "false" => return FilterValue::Bool(false),
        _ => {}
    }

    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        if let Ok(int) = trimmed.parse::<i64>() {
            return FilterValue::Int(int);
        }
        if let Some(float) = parse_finite(trimmed) {
            return FilterValue::Float(float);
        }
    }

    FilterValue::Text(raw.to_string())
}

fn parse_filter(column: &str, raw: &str) -> Option<Filter> {
    if RESERVED_KEYS.contains(&column) {
        return None;
    }

    let (prefix, operand) = raw.split_once('.')?;
    let op = FilterOp::from_prefix(prefix)?;

    let value = match op {
        FilterOp::In => FilterValue::List(parse_list(operand)?),
        FilterOp::Ilike => FilterValue::Text(operand.replace('*', "%")),
        _ => coerce_value(operand),
    };

    Some(Filter {
        column: column.to_string(),
        op,
        value,
    })
}

fn parse_list(operand: &str) -> Option<Vec<FilterValue>> {
    let inner = operand.strip_prefix('(')?.strip_suffix(')')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }

    Some(
        inner
            .split(',')
            .map(|item| {
                let item = item.trim();
                let item = item
                    .strip_prefix('"')
                    .and_then(|s| s.strip_suffix('"'))
                    .unwrap_or(item);
                coerce_value(item)
            })
            .collect(),
    )
}

fn parse_select(raw: &str) -> Option<Vec<String>> {
    let fields: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    if fields.is_empty() || fields.iter().any(|f| f == "*") {
        None
    } else {
        Some(fields)
    }
}

fn parse_order(raw: &str) -> Option<OrderBy> {
    let mut parts = raw.trim().split('.');
    let column = parts.next().map(str::trim).filter(|c| !c.is_empty())?;
    let direction = match parts.next() {
        Some(dir) if dir.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
        _ => SortDirection::Asc,
    };

    Some(OrderBy {
        column: column.to_string(),
        direction,
    })
}
