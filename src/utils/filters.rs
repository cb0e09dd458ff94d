//! Conference filter translation
//!
//! Turns client-supplied (field, operator, value) triples into a SQL
//! WHERE/ORDER BY pair with bound parameters. The backing store can only
//! order and range-filter on one column per query, so at most one distinct
//! field may carry a non-equality operator; a second one rejects the whole
//! query.

use crate::error::ApiError;
use crate::models::ConferenceFilter;

/// Client field name -> conferences column
const FIELDS: &[(&str, &str)] = &[
    ("CITY", "city"),
    ("TOPIC", "topics"),
    ("MONTH", "month"),
    ("MAX_ATTENDEES", "max_attendees"),
];

/// Client operator name -> SQL operator
const OPERATORS: &[(&str, &str)] = &[
    ("EQ", "="),
    ("GT", ">"),
    ("GTEQ", ">="),
    ("LT", "<"),
    ("LTEQ", "<="),
    ("NE", "!="),
];

/// Columns whose filter values are coerced from string to integer
const NUMERIC_COLUMNS: &[&str] = &["month", "max_attendees"];

/// A bindable filter value after coercion
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
}

/// One validated filter, ready to render as a SQL predicate
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedFilter {
    pub column: &'static str,
    pub op: &'static str,
    pub value: FilterValue,
}

/// Translated query: SQL fragments plus bind values in predicate order
#[derive(Debug)]
pub struct ConferenceQuery {
    /// Empty string, or "WHERE ..." with one `?` per bind value
    pub where_sql: String,
    /// Always present: inequality column first (if any), then name
    pub order_sql: String,
    pub binds: Vec<FilterValue>,
}

/// Parse, check validity and coerce user-supplied filters.
///
/// Returns the inequality column (if any) and the formatted filters in the
/// order received. Any unknown field or operator, a second inequality field,
/// or a non-numeric value for a numeric field aborts the whole query.
pub fn format_filters(
    filters: &[ConferenceFilter],
) -> Result<(Option<&'static str>, Vec<FormattedFilter>), ApiError> {
    let mut formatted = Vec::with_capacity(filters.len());
    let mut inequality_column: Option<&'static str> = None;

    for f in filters {
        let column = FIELDS
            .iter()
            .find(|(name, _)| *name == f.field)
            .map(|(_, col)| *col)
            .ok_or_else(|| {
                ApiError::BadRequest(format!("Filter contains invalid field: {}", f.field))
            })?;

        let op = OPERATORS
            .iter()
            .find(|(name, _)| *name == f.operator)
            .map(|(_, op)| *op)
            .ok_or_else(|| {
                ApiError::BadRequest(format!("Filter contains invalid operator: {}", f.operator))
            })?;

        // Every operation except "=" is an inequality; the store can only
        // range-filter on one column per query.
        if op != "=" {
            match inequality_column {
                Some(prev) if prev != column => {
                    return Err(ApiError::BadRequest(
                        "Inequality filter is allowed on only one field.".to_string(),
                    ));
                }
                _ => inequality_column = Some(column),
            }
        }

        let value = if NUMERIC_COLUMNS.contains(&column) {
            let n = f.value.parse::<i64>().map_err(|_| {
                ApiError::BadRequest(format!(
                    "Filter value for {} must be an integer: {}",
                    f.field, f.value
                ))
            })?;
            FilterValue::Int(n)
        } else {
            FilterValue::Text(f.value.clone())
        };

        formatted.push(FormattedFilter { column, op, value });
    }

    Ok((inequality_column, formatted))
}

/// Build the WHERE/ORDER BY fragments for a conference filter query.
///
/// Predicates are ANDed in the order received. The topics column holds a
/// JSON array, so its predicate matches when any element satisfies the
/// operator.
pub fn build_conference_query(filters: &[ConferenceFilter]) -> Result<ConferenceQuery, ApiError> {
    let (inequality_column, formatted) = format_filters(filters)?;

    let mut conditions = Vec::with_capacity(formatted.len());
    let mut binds = Vec::with_capacity(formatted.len());

    for f in formatted {
        if f.column == "topics" {
            conditions.push(format!(
                "EXISTS (SELECT 1 FROM json_each(c.topics) WHERE json_each.value {} ?)",
                f.op
            ));
        } else {
            conditions.push(format!("c.{} {} ?", f.column, f.op));
        }
        binds.push(f.value);
    }

    let where_sql = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let order_sql = match inequality_column {
        Some(col) => format!("ORDER BY c.{}, c.name", col),
        None => "ORDER BY c.name".to_string(),
    };

    Ok(ConferenceQuery {
        where_sql,
        order_sql,
        binds,
    })
}
