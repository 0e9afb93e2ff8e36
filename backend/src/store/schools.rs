use sqlx::PgPool;
use time::OffsetDateTime;

use super::{bounded, StoreError};
use crate::models::{filters::Filters, school::School};

#[derive(Clone)]
pub struct SchoolStore {
    pub(crate) pool: PgPool,
}

impl SchoolStore {
    /// Insert a new record and write the store-assigned id, created_at and
    /// initial version back into the entity. Validation is the caller's job.
    pub async fn insert(&self, school: &mut School) -> Result<(), StoreError> {
        let query = sqlx::query_as::<_, (i64, OffsetDateTime, i32)>(
            r#"
            INSERT INTO schools (name, level, contact, phone, email, website, address, mode)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, created_at, version
            "#,
        )
        .bind(&school.name)
        .bind(&school.level)
        .bind(&school.contact)
        .bind(&school.phone)
        .bind(&school.email)
        .bind(&school.website)
        .bind(&school.address)
        .bind(&school.mode)
        .fetch_one(&self.pool);

        let (id, created_at, version) = bounded(query).await?;
        school.id = id;
        school.created_at = created_at;
        school.version = version;
        Ok(())
    }

    pub async fn get(&self, id: i64) -> Result<School, StoreError> {
        if id < 1 {
            return Err(StoreError::NotFound);
        }

        let query = sqlx::query_as::<_, School>(
            r#"
            SELECT id, created_at, name, level, contact, phone, email, website, address, mode, version
            FROM schools
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool);

        bounded(query).await?.ok_or(StoreError::NotFound)
    }

    /// Version-guarded update. The WHERE clause's version predicate is the
    /// optimistic-lock check: zero matched rows means another writer advanced
    /// the version since this caller last read it.
    pub async fn update(&self, school: &mut School) -> Result<(), StoreError> {
        let query = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE schools
            SET name = $1, level = $2, contact = $3, phone = $4, email = $5,
                website = $6, address = $7, mode = $8, version = version + 1
            WHERE id = $9 AND version = $10
            RETURNING version
            "#,
        )
        .bind(&school.name)
        .bind(&school.level)
        .bind(&school.contact)
        .bind(&school.phone)
        .bind(&school.email)
        .bind(&school.website)
        .bind(&school.address)
        .bind(&school.mode)
        .bind(school.id)
        .bind(school.version)
        .fetch_optional(&self.pool);

        match bounded(query).await? {
            Some(version) => {
                school.version = version;
                Ok(())
            }
            None => Err(StoreError::EditConflict),
        }
    }

    /// Hard delete. A non-positive id deletes nothing and succeeds quietly.
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        if id < 1 {
            return Ok(());
        }

        let query = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(&self.pool);

        let result = bounded(query).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Filtered listing. Each predicate collapses to "match all" when its
    /// argument is empty; the mode predicate is set containment. The ORDER BY
    /// identifier is the one fragment that cannot be bound as a parameter,
    /// so it comes from the safelist-checked resolver.
    pub async fn list(
        &self,
        name: &str,
        level: &str,
        mode: &[String],
        filters: &Filters,
    ) -> Result<Vec<School>, StoreError> {
        let query = format!(
            r#"
            SELECT id, created_at, name, level, contact, phone, email, website, address, mode, version
            FROM schools
            WHERE (LOWER(name) = LOWER($1) OR $1 = '')
              AND (LOWER(level) = LOWER($2) OR $2 = '')
              AND (mode @> $3 OR $3 = '{{}}')
            ORDER BY {} {}
            LIMIT $4 OFFSET $5
            "#,
            filters.sort_column(),
            filters.sort_direction(),
        );

        let rows = sqlx::query_as::<_, School>(&query)
            .bind(name)
            .bind(level)
            .bind(mode)
            .bind(filters.limit())
            .bind(filters.offset())
            .fetch_all(&self.pool);

        bounded(rows).await
    }
}
