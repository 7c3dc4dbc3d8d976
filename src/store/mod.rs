pub mod base;
pub mod schema;

pub use base::{BaseStore, Repository};
pub use schema::{ColumnDef, Model, TableSchema};

use sqlx::{QueryBuilder, Sqlite};
use thiserror::Error;

/// Value bound into a query predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Integer(i64),
    Real(f64),
    Text(String),
    Bool(bool),
}

impl SqlValue {
    /// Append this value to the builder as a bound parameter.
    pub(crate) fn push_bind_to(&self, builder: &mut QueryBuilder<'_, Sqlite>) {
        match self {
            SqlValue::Integer(v) => builder.push_bind(*v),
            SqlValue::Real(v) => builder.push_bind(*v),
            SqlValue::Text(v) => builder.push_bind(v.clone()),
            SqlValue::Bool(v) => builder.push_bind(*v),
        };
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_owned())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

/// Comparison operator usable in a filter condition. A closed set, so filter
/// callers can never smuggle SQL fragments into a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
}

impl Comparison {
    pub fn as_sql(self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::Ne => "<>",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Like => "LIKE",
        }
    }
}

/// A single filter condition: resolved column, operator and bound value.
/// Constructed per query, discarded after execution.
#[derive(Debug, Clone)]
pub struct Condition {
    pub column: &'static str,
    pub comparison: Comparison,
    pub value: SqlValue,
}

/// A filter transforms a table schema into a condition, so callers name
/// logical fields and never hardcode storage column names.
pub type Filter = Box<dyn Fn(&TableSchema) -> Result<Condition, StoreError> + Send + Sync>;

/// Filter on a logical field with an explicit comparison operator.
pub fn by_field(
    field: &'static str,
    comparison: Comparison,
    value: impl Into<SqlValue>,
) -> Filter {
    let value = value.into();

    Box::new(move |schema| {
        Ok(Condition {
            column: schema.column_for(field)?,
            comparison,
            value: value.clone(),
        })
    })
}

/// Equality filter on a logical field.
pub fn field_equals(field: &'static str, value: impl Into<SqlValue>) -> Filter {
    by_field(field, Comparison::Eq, value)
}

/// Entity/model conversion failure. Conversions are expected to be total;
/// hitting this in steady state is a programming error.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ConversionError(pub String);

/// Errors surfaced by repository operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("converting entity to model: {0}")]
    IntoModel(#[source] ConversionError),

    #[error("converting model to entity: {0}")]
    IntoEntity(#[source] ConversionError),

    #[error("no record with id {0}")]
    NotFound(i64),

    #[error("filter references unknown field {0:?}")]
    UnknownField(String),

    #[error("{op}: {source}")]
    Storage {
        op: String,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    pub(crate) fn storage(op: impl Into<String>, source: sqlx::Error) -> Self {
        StoreError::Storage {
            op: op.into(),
            source,
        }
    }
}
