use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::store::{ColumnDef, Model, SqlValue, TableSchema};

/// Row shape of the `users` table. Storage-only metadata (`deleted_at`) never
/// leaves this layer.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub address: String,
}

/// Field-to-column mapping for `users`. The soft-delete marker is storage
/// metadata and deliberately not addressable as a logical field.
static USERS_SCHEMA: TableSchema = TableSchema {
    table: "users",
    id_column: "id",
    created_at_column: "created_at",
    updated_at_column: "updated_at",
    deleted_at_column: "deleted_at",
    columns: &[
        ColumnDef { field: "id", column: "id" },
        ColumnDef { field: "createdAt", column: "created_at" },
        ColumnDef { field: "updatedAt", column: "updated_at" },
        ColumnDef { field: "name", column: "name" },
        ColumnDef { field: "surname", column: "surname" },
        ColumnDef { field: "phone", column: "phone" },
        ColumnDef { field: "address", column: "address" },
    ],
};

impl Model for UserRecord {
    fn schema() -> &'static TableSchema {
        &USERS_SCHEMA
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn values(&self) -> Vec<(&'static str, SqlValue)> {
        vec![
            ("name", SqlValue::Text(self.name.clone())),
            ("surname", SqlValue::Text(self.surname.clone())),
            ("phone", SqlValue::Text(self.phone.clone())),
            ("address", SqlValue::Text(self.address.clone())),
        ]
    }
}
