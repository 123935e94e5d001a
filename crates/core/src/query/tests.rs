//! Unit tests for list query parsing.

use rstest::rstest;

use super::*;

fn parse(pairs: &[(&str, &str)]) -> ListQuery {
    ListQuery::parse(pairs.iter().copied())
}

#[rstest]
#[case("eq.5", FilterOp::Eq, FilterValue::Int(5))]
#[case("neq.draft", FilterOp::Neq, FilterValue::Text("draft".into()))]
#[case("gt.100", FilterOp::Gt, FilterValue::Int(100))]
#[case("gte.2.5", FilterOp::Gte, FilterValue::Float(2.5))]
#[case("lt.-3", FilterOp::Lt, FilterValue::Int(-3))]
#[case("lte.true", FilterOp::Lte, FilterValue::Bool(true))]
#[case("eq.false", FilterOp::Eq, FilterValue::Bool(false))]
#[case("ilike.*villa*", FilterOp::Ilike, FilterValue::Text("%villa%".into()))]
fn parses_operator_prefixes(
    #[case] raw: &str,
    #[case] op: FilterOp,
    #[case] value: FilterValue,
) {
    let query = parse(&[("price", raw)]);

    assert_eq!(
        query.filters,
        vec![Filter {
            column: "price".into(),
            op,
            value,
        }]
    );
    assert!(query.ignored.is_empty());
}

#[test]
fn ilike_keeps_numeric_looking_patterns_as_text() {
    let query = parse(&[("slug", "ilike.2024")]);
    assert_eq!(query.filters[0].value, FilterValue::Text("2024".into()));
}

#[test]
fn in_list_coerces_each_item() {
    let query = parse(&[("id", "in.(1, \"two\",true)")]);

    assert_eq!(query.filters[0].op, FilterOp::In);
    assert_eq!(
        query.filters[0].value,
        FilterValue::List(vec![
            FilterValue::Int(1),
            FilterValue::Text("two".into()),
            FilterValue::Bool(true),
        ])
    );
}

#[test]
fn empty_in_list_is_kept() {
    let query = parse(&[("id", "in.()")]);
    assert_eq!(query.filters[0].value, FilterValue::List(vec![]));
}

#[rstest]
#[case("between.10,20")]
#[case("in.1,2")]
#[case("published")]
#[case("EQ.5")]
#[case("")]
fn unrecognized_prefixes_produce_no_filter(#[case] raw: &str) {
    let query = parse(&[("price", raw)]);

    assert!(query.is_unfiltered());
    assert_eq!(query.ignored, vec!["price".to_string()]);
}

#[test]
fn multiple_filters_keep_input_order() {
    let query = parse(&[
        ("is_active", "eq.true"),
        ("limit", "10"),
        ("display_order", "gte.2"),
    ]);

    let columns: Vec<&str> = query.filters.iter().map(|f| f.column.as_str()).collect();
    assert_eq!(columns, vec!["is_active", "display_order"]);
    assert_eq!(query.limit, 10);
}

#[test]
fn no_filters_yield_no_predicate() {
    let query = parse(&[("select", "slug"), ("order", "title")]);
    assert!(query.is_unfiltered());
}

#[rstest]
#[case(None, 100)]
#[case(Some("abc"), 100)]
#[case(Some("NaN"), 100)]
#[case(Some("inf"), 100)]
#[case(Some(""), 100)]
#[case(Some("99999"), 500)]
#[case(Some("0"), 1)]
#[case(Some("-4"), 1)]
#[case(Some("20"), 20)]
#[case(Some("7.9"), 7)]
fn limit_is_clamped(#[case] raw: Option<&str>, #[case] expected: u64) {
    assert_eq!(clamp_limit(raw), expected);
}

#[rstest]
#[case(None, 0)]
#[case(Some("x"), 0)]
#[case(Some("-10"), 0)]
#[case(Some("50"), 50)]
#[case(Some("5000000"), 1_000_000)]
fn offset_is_clamped(#[case] raw: Option<&str>, #[case] expected: u64) {
    assert_eq!(clamp_offset(raw), expected);
}

#[rstest]
#[case("created_at.desc", "created_at", SortDirection::Desc)]
#[case("created_at.DESC", "created_at", SortDirection::Desc)]
#[case("title.asc", "title", SortDirection::Asc)]
#[case("title.sideways", "title", SortDirection::Asc)]
#[case("title", "title", SortDirection::Asc)]
fn order_parses_single_pair(
    #[case] raw: &str,
    #[case] column: &str,
    #[case] direction: SortDirection,
) {
    let query = parse(&[("order", raw)]);
    assert_eq!(
        query.order,
        Some(OrderBy {
            column: column.into(),
            direction,
        })
    );
}

#[test]
fn empty_order_is_dropped() {
    assert_eq!(parse(&[("order", ".desc")]).order, None);
}

#[test]
fn select_splits_fields() {
    let query = parse(&[("select", "slug, title,,")]);
    assert_eq!(
        query.select,
        Some(vec!["slug".to_string(), "title".to_string()])
    );
}

#[test]
fn select_star_means_everything() {
    assert_eq!(parse(&[("select", "*")]).select, None);
    assert_eq!(parse(&[("select", "")]).select, None);
}

#[test]
fn reserved_keys_never_become_filters() {
    let query = parse(&[("select", "eq.1"), ("offset", "eq.1")]);
    assert!(query.is_unfiltered());
    assert!(query.ignored.is_empty());
    assert_eq!(query.offset, 0);
}

#[rstest]
#[case("true", FilterValue::Bool(true))]
#[case("True", FilterValue::Text("True".into()))]
#[case("42", FilterValue::Int(42))]
#[case("1e3", FilterValue::Float(1000.0))]
#[case("0.5", FilterValue::Float(0.5))]
#[case("NaN", FilterValue::Text("NaN".into()))]
#[case("", FilterValue::Text(String::new()))]
#[case("villa-bosphorus", FilterValue::Text("villa-bosphorus".into()))]
fn coerces_values(#[case] raw: &str, #[case] expected: FilterValue) {
    assert_eq!(coerce_value(raw), expected);
}
