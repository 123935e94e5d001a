//! SQL rendering tests for the list query compiler.

use rstest::rstest;
use sea_orm::{DbBackend, EntityTrait, QueryTrait};
use toronto_core::query::ListQuery;

use super::listing::{apply_list_query, build_condition, filter_and_order};
use crate::entities::{contact_messages, projects};

fn project_sql(pairs: &[(&str, &str)]) -> String {
    let query = ListQuery::parse(pairs.iter().copied());
    apply_list_query(projects::Entity::find(), &query)
        .build(DbBackend::MySql)
        .to_string()
}

#[rstest]
#[case("display_order", "gt.3", "`projects`.`display_order` > 3")]
#[case("display_order", "gte.3", "`projects`.`display_order` >= 3")]
#[case("display_order", "lt.3", "`projects`.`display_order` < 3")]
#[case("display_order", "lte.3", "`projects`.`display_order` <= 3")]
#[case("slug", "eq.villa-a", "`projects`.`slug` = 'villa-a'")]
#[case("slug", "neq.villa-a", "`projects`.`slug` <> 'villa-a'")]
#[case("category", "in.(villa,office)", "`projects`.`category` IN ('villa', 'office')")]
#[case("project_year", "in.(2023,2024)", "`projects`.`project_year` IN (2023, 2024)")]
fn renders_comparisons(#[case] key: &str, #[case] value: &str, #[case] expected: &str) {
    let sql = project_sql(&[(key, value)]);
    assert!(sql.contains(expected), "{sql}");
}

#[test]
fn ilike_lowercases_both_sides() {
    let sql = project_sql(&[("slug", "ilike.*VILLA*")]);
    assert!(sql.contains("LOWER(`slug`) LIKE '%villa%'"), "{sql}");
}

#[test]
fn filters_are_conjoined() {
    let sql = project_sql(&[("is_featured", "eq.true"), ("display_order", "lt.10")]);
    assert!(sql.contains(" AND "), "{sql}");
    assert!(sql.contains("`projects`.`display_order` < 10"), "{sql}");
}

#[test]
fn unexposed_columns_are_skipped() {
    let query = ListQuery::parse([("cover_image_url", "eq.x"), ("password", "eq.y")]);
    assert!(build_condition::<projects::Entity>(&query).is_none());

    let sql = project_sql(&[("cover_image_url", "eq.x")]);
    assert!(!sql.contains("WHERE"), "{sql}");
}

#[test]
fn unfiltered_query_has_no_where_clause() {
    let sql = project_sql(&[]);
    assert!(!sql.contains("WHERE"), "{sql}");
}

#[test]
fn default_order_and_limit_apply() {
    let sql = project_sql(&[]);
    assert!(
        sql.contains("ORDER BY `projects`.`display_order` ASC, `projects`.`created_at` DESC"),
        "{sql}"
    );
    assert!(sql.contains("LIMIT 100"), "{sql}");
}

#[test]
fn requested_order_replaces_default() {
    let sql = project_sql(&[("order", "created_at.desc")]);
    assert!(sql.contains("ORDER BY `projects`.`created_at` DESC"), "{sql}");
    assert!(!sql.contains("`display_order` ASC"), "{sql}");
}

#[test]
fn order_on_unknown_column_falls_back_to_default() {
    let sql = project_sql(&[("order", "nope.desc")]);
    assert!(sql.contains("`projects`.`display_order` ASC"), "{sql}");
}

#[test]
fn paging_is_clamped() {
    let sql = project_sql(&[("limit", "99999"), ("offset", "20")]);
    assert!(sql.contains("LIMIT 500"), "{sql}");
    assert!(sql.contains("OFFSET 20"), "{sql}");
}

#[test]
fn contact_messages_default_to_newest_first() {
    let query = ListQuery::parse([("status", "eq.new")]);
    let sql = apply_list_query(contact_messages::Entity::find(), &query)
        .build(DbBackend::MySql)
        .to_string();
    assert!(sql.contains("`contact_messages`.`status` = 'new'"), "{sql}");
    assert!(sql.contains("ORDER BY `contact_messages`.`created_at` DESC"), "{sql}");
}

#[test]
fn filter_and_order_leaves_paging_to_the_caller() {
    let query = ListQuery::parse([("limit", "5"), ("offset", "10"), ("slug", "eq.a")]);
    let sql = filter_and_order(projects::Entity::find(), &query)
        .build(DbBackend::MySql)
        .to_string();
    assert!(sql.contains("WHERE `projects`.`slug` = 'a'"));
    assert!(sql.contains("ORDER BY"));
    assert!(!sql.contains("LIMIT"));
    assert!(!sql.contains("OFFSET"));
}
