//! Input type and required-ness resolution.
//!
//! Resolution is total: it always yields a type, falling back to
//! [`InputType::String`] when nothing else is known. Schema introspection
//! failures narrow the available information but never fail a render.
//!
//! # Precedence
//!
//! First match wins:
//!
//! 1. The caller's explicit input type
//! 2. Associations: any association, or the foreign key of a `belongs_to`
//!    (`author_id` for `author`), renders as a select
//! 3. Name heuristics, only for short-text columns or unknown fields
//!    (`password` → password, `email` → email, ...)
//! 4. The column type (boolean, text, date, numeric, ...)
//! 5. String

use log::{debug, trace};

use crate::config::FormConfig;
use crate::input_type::InputType;
use crate::schema::{AssociationKind, ColumnType, Schema};

/// Resolves the input type for `field`.
///
/// ```rust
/// use semform::{resolve_input_type, ColumnType, InputType, Record};
///
/// let user = Record::new("user")
///     .column("password", ColumnType::String)
///     .column("admin", ColumnType::Boolean);
///
/// assert_eq!(resolve_input_type("password", None, Some(&user)), InputType::Password);
/// assert_eq!(resolve_input_type("admin", None, Some(&user)), InputType::Boolean);
/// assert_eq!(
///     resolve_input_type("admin", Some(&InputType::Select), Some(&user)),
///     InputType::Select
/// );
/// ```
pub fn resolve_input_type<S>(field: &str, explicit: Option<&InputType>, schema: Option<&S>) -> InputType
where
    S: Schema + ?Sized,
{
    if let Some(input_type) = explicit {
        return input_type.clone();
    }

    let Some(schema) = schema else {
        return from_name(field).unwrap_or(InputType::String);
    };

    if schema.association(field).is_some() || is_foreign_key(field, schema) {
        return InputType::Select;
    }

    let column = match schema.column_type(field) {
        Ok(column) => column,
        Err(err) => {
            debug!("resolving '{}' without column information: {}", field, err);
            None
        }
    };

    let resolved = match column {
        None | Some(ColumnType::String) => from_name(field).unwrap_or(InputType::String),
        Some(column) => from_column(column),
    };
    trace!("'{}' ({:?}) resolves to {}", field, column, resolved);
    resolved
}

/// Resolves whether `field` is required.
///
/// The caller's flag wins, then schema metadata, then
/// [`FormConfig::all_fields_required_by_default`].
pub fn resolve_required<S>(
    field: &str,
    explicit: Option<bool>,
    schema: Option<&S>,
    config: &FormConfig,
) -> bool
where
    S: Schema + ?Sized,
{
    explicit
        .or_else(|| schema.and_then(|s| s.is_required(field)))
        .unwrap_or(config.all_fields_required_by_default)
}

fn is_foreign_key<S: Schema + ?Sized>(field: &str, schema: &S) -> bool {
    field
        .strip_suffix("_id")
        .is_some_and(|stem| schema.association(stem) == Some(AssociationKind::BelongsTo))
}

/// Name heuristics for short-text fields.
fn from_name(field: &str) -> Option<InputType> {
    let input_type = if field.contains("password") {
        InputType::Password
    } else if field.ends_with("country") {
        InputType::Country
    } else if field.contains("time_zone") {
        InputType::TimeZone
    } else if field.contains("email") {
        InputType::Email
    } else if field == "url" || field == "website" || field.ends_with("_url") {
        InputType::Url
    } else if field.contains("phone") || field.contains("fax") {
        InputType::Phone
    } else if field == "search" {
        InputType::Search
    } else {
        return None;
    };
    Some(input_type)
}

fn from_column(column: ColumnType) -> InputType {
    match column {
        ColumnType::Boolean => InputType::Boolean,
        ColumnType::Text => InputType::Text,
        ColumnType::Date => InputType::Date,
        ColumnType::Datetime | ColumnType::Timestamp => InputType::DateTime,
        ColumnType::Time => InputType::Time,
        ColumnType::Integer | ColumnType::Float | ColumnType::Decimal => InputType::Numeric,
        ColumnType::String | ColumnType::Binary => InputType::String,
    }
}
