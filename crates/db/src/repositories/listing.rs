//! Compiles a parsed [`ListQuery`] into `SeaORM` select clauses.
//!
//! Only columns an entity exposes through [`ListSpec`] can be filtered or
//! sorted on; filters naming any other column are skipped.

use sea_orm::{
    ColumnTrait, Condition, EntityTrait, IdenStatic, Order, QueryFilter, QueryOrder, QuerySelect,
    Select, Value,
    sea_query::{Expr, Func, SimpleExpr},
};
use toronto_core::query::{Filter, FilterOp, FilterValue, ListQuery, SortDirection};

/// Per-entity listing rules.
pub trait ListSpec: EntityTrait {
    /// Columns clients may filter and sort on.
    fn exposed_columns() -> Vec<Self::Column>;

    /// Ordering applied when the client asks for none (or an unknown column).
    fn default_order() -> Vec<(Self::Column, Order)>;

    /// Looks up an exposed column by its database name.
    fn exposed_column(name: &str) -> Option<Self::Column> {
        Self::exposed_columns()
            .into_iter()
            .find(|col| col.as_str() == name)
    }
}

/// Builds the AND-ed predicate for `query`, or `None` when nothing applies.
pub fn build_condition<E: ListSpec>(query: &ListQuery) -> Option<Condition> {
    let exprs: Vec<SimpleExpr> = query
        .filters
        .iter()
        .filter_map(|filter| {
            let expr = E::exposed_column(&filter.column).and_then(|col| filter_expr(col, filter));
            if expr.is_none() {
                tracing::debug!(column = %filter.column, "Skipping filter on unexposed column");
            }
            expr
        })
        .collect();

    if exprs.is_empty() {
        return None;
    }

    Some(
        exprs
            .into_iter()
            .fold(Condition::all(), |cond, expr| cond.add(expr)),
    )
}

/// Applies filters, ordering and paging to `select`.
pub fn apply_list_query<E: ListSpec>(select: Select<E>, query: &ListQuery) -> Select<E> {
    filter_and_order(select, query)
        .limit(query.limit)
        .offset(query.offset)
}

/// Applies filters and ordering but no paging, for callers that page after
/// post-processing rows.
pub fn filter_and_order<E: ListSpec>(select: Select<E>, query: &ListQuery) -> Select<E> {
    let mut select = match build_condition::<E>(query) {
        Some(cond) => select.filter(cond),
        None => select,
    };

    let requested = query.order.as_ref().and_then(|order| {
        E::exposed_column(&order.column).map(|col| {
            let dir = match order.direction {
                SortDirection::Asc => Order::Asc,
                SortDirection::Desc => Order::Desc,
            };
            (col, dir)
        })
    });

    match requested {
        Some((col, dir)) => select = select.order_by(col, dir),
        None => {
            for (col, dir) in E::default_order() {
                select = select.order_by(col, dir);
            }
        }
    }

    select
}

fn filter_expr<C: ColumnTrait>(col: C, filter: &Filter) -> Option<SimpleExpr> {
    let expr = match (filter.op, &filter.value) {
        (FilterOp::In, FilterValue::List(items)) => {
            col.is_in(items.iter().filter_map(scalar_value))
        }
        (FilterOp::Ilike, FilterValue::Text(pattern)) => {
            Expr::expr(Func::lower(Expr::col(col))).like(pattern.to_lowercase())
        }
        (op, value) => {
            let value = scalar_value(value)?;
            match op {
                FilterOp::Eq => col.eq(value),
                FilterOp::Neq => col.ne(value),
                FilterOp::Gt => col.gt(value),
                FilterOp::Gte => col.gte(value),
                FilterOp::Lt => col.lt(value),
                FilterOp::Lte => col.lte(value),
                FilterOp::Ilike | FilterOp::In => return None,
            }
        }
    };
    Some(expr)
}

fn scalar_value(value: &FilterValue) -> Option<Value> {
    match value {
        FilterValue::Bool(b) => Some((*b).into()),
        FilterValue::Int(i) => Some((*i).into()),
        FilterValue::Float(f) => Some((*f).into()),
        FilterValue::Text(s) => Some(s.clone().into()),
        FilterValue::List(_) => None,
    }
}
