use sqlx::sqlite::SqliteRow;
use sqlx::FromRow;

use super::{SqlValue, StoreError};

/// One entry in the field-to-column mapping table.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    pub field: &'static str,
    pub column: &'static str,
}

/// Statically declared description of a persistence model's table: name,
/// well-known metadata columns and the logical-field-to-column mapping.
/// Declared once per model, resolved at compile time — there is no runtime
/// introspection of the storage layer.
#[derive(Debug)]
pub struct TableSchema {
    pub table: &'static str,
    pub id_column: &'static str,
    pub created_at_column: &'static str,
    pub updated_at_column: &'static str,
    pub deleted_at_column: &'static str,
    pub columns: &'static [ColumnDef],
}

impl TableSchema {
    /// Resolve a logical field name to its storage column name.
    pub fn column_for(&self, field: &str) -> Result<&'static str, StoreError> {
        self.columns
            .iter()
            .find(|def| def.field == field)
            .map(|def| def.column)
            .ok_or_else(|| StoreError::UnknownField(field.to_owned()))
    }
}

/// A persistence model the generic store can operate on. Implementors declare
/// their table schema and expose the values of their business columns for
/// inserts and updates; identifier and timestamp columns are managed by the
/// store itself.
pub trait Model: Send + Sync + Unpin + for<'r> FromRow<'r, SqliteRow> {
    fn schema() -> &'static TableSchema;

    /// Current identifier; zero means "not yet persisted".
    fn id(&self) -> i64;

    /// Business column values, in schema order, as `(column, value)` pairs.
    fn values(&self) -> Vec<(&'static str, SqlValue)>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::user::UserRecord;

    #[test]
    fn resolves_known_fields() {
        let schema = UserRecord::schema();
        assert_eq!(schema.column_for("id").unwrap(), "id");
        assert_eq!(schema.column_for("updatedAt").unwrap(), "updated_at");
        assert_eq!(schema.column_for("name").unwrap(), "name");
    }

    #[test]
    fn rejects_unknown_fields() {
        let schema = UserRecord::schema();
        assert!(matches!(
            schema.column_for("deletedAt"),
            Err(StoreError::UnknownField(_))
        ));
    }
}
