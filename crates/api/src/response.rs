//! JSON response helpers, including `select=` projection.

use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};
use toronto_shared::AppError;

use crate::error::{ApiError, ApiResult};

/// Keeps only the `select`ed keys of an object, or of each object in an array.
///
/// `None` keeps everything. Unknown names are ignored.
#[must_use]
pub fn project(value: Value, select: Option<&[String]>) -> Value {
    let Some(fields) = select else {
        return value;
    };
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| project(item, Some(fields)))
                .collect(),
        ),
        Value::Object(mut map) => {
            let kept: Map<String, Value> = fields
                .iter()
                .filter_map(|field| map.remove(field).map(|v| (field.clone(), v)))
                .collect();
            Value::Object(kept)
        }
        other => other,
    }
}

/// Serializes `items` and applies the projection.
pub fn list_json<T: Serialize>(items: &[T], select: Option<&[String]>) -> ApiResult<Json<Value>> {
    Ok(Json(project(to_value(items)?, select)))
}

/// Serializes a single item.
pub fn item_json<T: Serialize>(item: &T) -> ApiResult<Json<Value>> {
    Ok(Json(to_value(item)?))
}

fn to_value<T: Serialize + ?Sized>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| ApiError(AppError::Internal(format!("failed to serialize response: {e}"))))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn projects_each_array_element() {
        let value = json!([
            { "id": "1", "slug": "a", "title": "A" },
            { "id": "2", "slug": "b", "title": "B" },
        ]);
        let projected = project(value, Some(&fields(&["slug"])));
        assert_eq!(projected, json!([{ "slug": "a" }, { "slug": "b" }]));
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let projected = project(json!({ "id": "1" }), Some(&fields(&["id", "nope"])));
        assert_eq!(projected, json!({ "id": "1" }));
    }

    #[test]
    fn no_selection_keeps_everything() {
        let value = json!({ "id": "1", "slug": "a" });
        assert_eq!(project(value.clone(), None), value);
    }
}
