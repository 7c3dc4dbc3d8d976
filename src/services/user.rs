use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::database::models::user::UserRecord;
use crate::store::{BaseStore, ConversionError};

/// Domain-facing user representation, decoupled from the storage schema.
/// Empty business fields are omitted from JSON output; timestamps are set by
/// the store on save and absent until then.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserEntity {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub surname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
}

/// User repository: the generic store specialized to the user entity/record
/// pair with its conversion functions.
pub type UserService = BaseStore<UserEntity, UserRecord>;

pub fn user_service(pool: SqlitePool) -> UserService {
    BaseStore::new(pool, to_record, to_entity)
}

/// Both conversions are total and round-trip-preserving for every persisted
/// business field. Timestamps flow model -> entity only; the store owns them
/// on the way in. `deleted_at` is storage metadata and has no entity side.
fn to_record(entity: &UserEntity) -> Result<UserRecord, ConversionError> {
    Ok(UserRecord {
        id: entity.id,
        created_at: entity.created_at.unwrap_or(DateTime::UNIX_EPOCH),
        updated_at: entity.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
        deleted_at: None,
        name: entity.name.clone(),
        surname: entity.surname.clone(),
        phone: entity.phone.clone(),
        address: entity.address.clone(),
    })
}

fn to_entity(record: &UserRecord) -> Result<UserEntity, ConversionError> {
    Ok(UserEntity {
        id: record.id,
        created_at: Some(record.created_at),
        updated_at: Some(record.updated_at),
        name: record.name.clone(),
        surname: record.surname.clone(),
        phone: record.phone.clone(),
        address: record.address.clone(),
    })
}
