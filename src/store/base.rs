use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::schema::Model;
use super::{ConversionError, Filter, StoreError};

/// Converts an entity to its persistence model.
pub type FromEntityFn<E, M> = fn(&E) -> Result<M, ConversionError>;

/// Converts a persistence model to its entity.
pub type ToEntityFn<E, M> = fn(&M) -> Result<E, ConversionError>;

/// Standard set of CRUD operations over an entity type.
#[async_trait]
pub trait Repository<E>: Send + Sync {
    /// Upsert the entity: insert when its identifier is unset (zero), update
    /// otherwise. On success the caller's entity is overwritten in place with
    /// the authoritative post-persistence values, generated identifier and
    /// timestamps included.
    async fn save(&self, entity: &mut E) -> Result<(), StoreError>;

    /// Fetch the entity with the given identifier.
    async fn get_by_id(&self, id: i64) -> Result<E, StoreError>;

    /// Existence probe that does not materialize the row. Absence is `false`,
    /// not an error.
    async fn record_exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Fetch all entities matching the given filters, ANDed together. No
    /// ordering guarantee beyond what the store returns.
    async fn get_with_filter(&self, filters: Vec<Filter>) -> Result<Vec<E>, StoreError>;

    /// Soft-delete by identifier. Deleting an absent identifier is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}

/// Generic repository over an entity/model pair, parameterized by the two
/// conversion functions supplied at construction. Column names come from the
/// model's statically declared schema, so this implementation serves any
/// entity/model pair without knowing their storage naming.
pub struct BaseStore<E, M> {
    pool: SqlitePool,
    from_entity: FromEntityFn<E, M>,
    to_entity: ToEntityFn<E, M>,
}

impl<E, M: Model> BaseStore<E, M> {
    pub fn new(
        pool: SqlitePool,
        from_entity: FromEntityFn<E, M>,
        to_entity: ToEntityFn<E, M>,
    ) -> Self {
        Self {
            pool,
            from_entity,
            to_entity,
        }
    }

    async fn insert(&self, model: &M) -> Result<M, StoreError> {
        let schema = M::schema();
        let now = Utc::now();
        let values = model.values();

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("INSERT INTO {} (", schema.table));
        builder
            .push(schema.created_at_column)
            .push(", ")
            .push(schema.updated_at_column);
        for (column, _) in &values {
            builder.push(", ").push(*column);
        }
        builder.push(") VALUES (");
        builder.push_bind(now).push(", ").push_bind(now);
        for (_, value) in &values {
            builder.push(", ");
            value.push_bind_to(&mut builder);
        }
        builder.push(") RETURNING *");

        builder
            .build_query_as::<M>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| StoreError::storage(format!("inserting {} row", schema.table), e))
    }

    async fn update(&self, model: &M) -> Result<M, StoreError> {
        let schema = M::schema();
        let id = model.id();
        let now = Utc::now();

        let mut builder: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("UPDATE {} SET ", schema.table));
        builder.push(schema.updated_at_column).push(" = ").push_bind(now);
        for (column, value) in &model.values() {
            builder.push(", ").push(*column).push(" = ");
            value.push_bind_to(&mut builder);
        }
        builder
            .push(" WHERE ")
            .push(schema.id_column)
            .push(" = ")
            .push_bind(id)
            .push(" AND ")
            .push(schema.deleted_at_column)
            .push(" IS NULL RETURNING *");

        builder
            .build_query_as::<M>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::storage(format!("updating {} row {id}", schema.table), e))?
            .ok_or(StoreError::NotFound(id))
    }
}

#[async_trait]
impl<E, M> Repository<E> for BaseStore<E, M>
where
    E: Send + Sync,
    M: Model,
{
    async fn save(&self, entity: &mut E) -> Result<(), StoreError> {
        let model = (self.from_entity)(entity).map_err(StoreError::IntoModel)?;

        let saved = if model.id() == 0 {
            self.insert(&model).await?
        } else {
            self.update(&model).await?
        };

        *entity = (self.to_entity)(&saved).map_err(StoreError::IntoEntity)?;

        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<E, StoreError> {
        let schema = M::schema();
        let sql = format!(
            "SELECT * FROM {} WHERE {} = ? AND {} IS NULL",
            schema.table, schema.id_column, schema.deleted_at_column
        );

        let model = sqlx::query_as::<_, M>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::storage(format!("fetching {} row {id}", schema.table), e))?
            .ok_or(StoreError::NotFound(id))?;

        (self.to_entity)(&model).map_err(StoreError::IntoEntity)
    }

    async fn record_exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let schema = M::schema();
        let sql = format!(
            "SELECT 1 FROM {} WHERE {} = ? AND {} IS NULL",
            schema.table, schema.id_column, schema.deleted_at_column
        );

        let row = sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                StoreError::storage(format!("checking {} row {id} exists", schema.table), e)
            })?;

        Ok(row.is_some())
    }

    async fn get_with_filter(&self, filters: Vec<Filter>) -> Result<Vec<E>, StoreError> {
        let schema = M::schema();

        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new(format!(
            "SELECT * FROM {} WHERE {} IS NULL",
            schema.table, schema.deleted_at_column
        ));
        for filter in &filters {
            let condition = filter(schema)?;
            builder
                .push(" AND ")
                .push(condition.column)
                .push(" ")
                .push(condition.comparison.as_sql())
                .push(" ");
            condition.value.push_bind_to(&mut builder);
        }

        let models = builder
            .build_query_as::<M>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::storage(format!("filtering {} rows", schema.table), e))?;

        models
            .iter()
            .map(|model| (self.to_entity)(model).map_err(StoreError::IntoEntity))
            .collect()
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let schema = M::schema();
        let sql = format!(
            "UPDATE {} SET {} = ? WHERE {} = ? AND {} IS NULL",
            schema.table, schema.deleted_at_column, schema.id_column, schema.deleted_at_column
        );

        sqlx::query(&sql)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::storage(format!("deleting {} row {id}", schema.table), e))?;

        Ok(())
    }
}
