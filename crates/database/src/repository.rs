use crate::error::StoreError;
use crate::store::SchoolStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{NewSchool, School};
use sqlx::FromRow;
use sqlx::postgres::PgPool;

/// The `DbRepository` talks to PostgreSQL directly. It encapsulates all SQL
/// for the schools table.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
    /// Already quoted for interpolation into SQL.
    table: String,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool, table: &str) -> Self {
        Self {
            pool,
            table: quote_identifier(table),
        }
    }
}

// This struct represents a row fetched from the schools table created by our migration.
#[derive(FromRow, Debug, Clone)]
struct SchoolRow {
    id: i64,
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
    created_at: Option<DateTime<Utc>>,
}

impl From<SchoolRow> for School {
    fn from(row: SchoolRow) -> Self {
        School {
            id: row.id.into(),
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            created_at: row.created_at.map(Into::into),
        }
    }
}

#[async_trait]
impl SchoolStore for DbRepository {
    async fn insert(&self, school: &NewSchool) -> Result<School, StoreError> {
        let sql = format!(
            "INSERT INTO {} (name, address, latitude, longitude) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, address, latitude, longitude, created_at",
            self.table
        );
        let row = sqlx::query_as::<_, SchoolRow>(&sql)
            .bind(&school.name)
            .bind(&school.address)
            .bind(school.latitude)
            .bind(school.longitude)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<School>, StoreError> {
        let sql = format!(
            "SELECT id, name, address, latitude, longitude, created_at FROM {}",
            self.table
        );
        let rows = sqlx::query_as::<_, SchoolRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(School::from).collect())
    }
}

/// Quotes a table name as a PostgreSQL identifier.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_convert_to_schools_with_opaque_ids() {
        let school = School::from(SchoolRow {
            id: 9,
            name: "Lincoln High".to_string(),
            address: "1 Main St".to_string(),
            latitude: 40.0,
            longitude: -75.0,
            created_at: None,
        });
        assert_eq!(school.id, core_types::SchoolId::Int(9));
        assert_eq!(school.created_at, None);
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_identifier("schools"), "\"schools\"");
        assert_eq!(quote_identifier("we\"ird"), "\"we\"\"ird\"");
    }
}
