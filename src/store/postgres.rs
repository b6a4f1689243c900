//! PostgreSQL store: table DDL, car/trip/user queries, and database bootstrap.

use super::Store;
use crate::error::AppError;
use crate::models::{Car, CarFilter, CarInput, CarOutput, Trip, TripInput, User};
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

const CAR_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS car (
        id BIGSERIAL PRIMARY KEY,
        size TEXT NOT NULL,
        fuel TEXT DEFAULT 'electric',
        doors INTEGER NOT NULL,
        transmission TEXT DEFAULT 'auto'
    )
"#;

const TRIP_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS trip (
        id BIGSERIAL PRIMARY KEY,
        "start" INTEGER NOT NULL,
        "end" INTEGER NOT NULL,
        description TEXT NOT NULL,
        car_id BIGINT NOT NULL REFERENCES car (id) ON DELETE CASCADE
    )
"#;

const USER_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS app_user (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL
    )
"#;

/// Order matters: `trip` references `car`.
const SCHEMA: &[(&str, &str)] = &[("car", CAR_DDL), ("trip", TRIP_DDL), ("app_user", USER_DDL)];

const CAR_COLUMNS: &str = "id, size, fuel, doors, transmission";
const TRIP_COLUMNS: &str = r#"id, "start", "end", description, car_id"#;

type CarRow = (i64, String, Option<String>, i32, Option<String>);
type TripRow = (i64, i32, i32, String, i64);

fn car_from_row((id, size, fuel, doors, transmission): CarRow) -> Car {
    Car {
        id,
        size,
        fuel,
        doors,
        transmission,
    }
}

fn trip_from_row((id, start, end, description, car_id): TripRow) -> Trip {
    Trip {
        id,
        start,
        end,
        description,
        car_id,
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        for (table, ddl) in SCHEMA {
            tracing::debug!(table, "ensure table");
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn list_cars(&self, filter: &CarFilter) -> Result<Vec<Car>, AppError> {
        let sql = format!(
            "SELECT {} FROM car WHERE ($1::TEXT IS NULL OR size = $1) AND ($2::INTEGER IS NULL OR doors >= $2) ORDER BY id",
            CAR_COLUMNS
        );
        tracing::debug!(sql = %sql, filter = ?filter, "query");
        let rows: Vec<CarRow> = sqlx::query_as(&sql)
            .bind(filter.size.as_deref())
            .bind(filter.doors)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(car_from_row).collect())
    }

    async fn get_car(&self, id: i64) -> Result<Option<CarOutput>, AppError> {
        let sql = format!("SELECT {} FROM car WHERE id = $1", CAR_COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<CarRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let trips_sql = format!("SELECT {} FROM trip WHERE car_id = $1 ORDER BY id", TRIP_COLUMNS);
        let trips: Vec<TripRow> = sqlx::query_as(&trips_sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        Ok(Some(CarOutput {
            car: car_from_row(row),
            trips: trips.into_iter().map(trip_from_row).collect(),
        }))
    }

    async fn create_car(&self, input: &CarInput) -> Result<Car, AppError> {
        let sql = format!(
            "INSERT INTO car (size, fuel, doors, transmission) VALUES ($1, $2, $3, $4) RETURNING {}",
            CAR_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let row: CarRow = sqlx::query_as(&sql)
            .bind(&input.size)
            .bind(input.fuel.as_deref())
            .bind(input.doors)
            .bind(input.transmission.as_deref())
            .fetch_one(&self.pool)
            .await?;
        Ok(car_from_row(row))
    }

    async fn update_car(&self, id: i64, input: &CarInput) -> Result<Option<Car>, AppError> {
        let sql = format!(
            "UPDATE car SET size = $2, fuel = $3, doors = $4, transmission = $5 WHERE id = $1 RETURNING {}",
            CAR_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<CarRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(&input.size)
            .bind(input.fuel.as_deref())
            .bind(input.doors)
            .bind(input.transmission.as_deref())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(car_from_row))
    }

    async fn delete_car(&self, id: i64) -> Result<bool, AppError> {
        tracing::debug!(id, "delete car");
        let res = sqlx::query("DELETE FROM car WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn add_trip(&self, car_id: i64, input: &TripInput) -> Result<Trip, AppError> {
        let sql = format!(
            r#"INSERT INTO trip ("start", "end", description, car_id) VALUES ($1, $2, $3, $4) RETURNING {}"#,
            TRIP_COLUMNS
        );
        tracing::debug!(sql = %sql, car_id, "query");
        let row: TripRow = sqlx::query_as(&sql)
            .bind(input.start)
            .bind(input.end)
            .bind(&input.description)
            .bind(car_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db) = &e {
                    if db.is_foreign_key_violation() {
                        return AppError::NotFound(format!("car {}", car_id));
                    }
                }
                AppError::Db(e)
            })?;
        Ok(trip_from_row(row))
    }

    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User, AppError> {
        let row: (i64, String, String) = sqlx::query_as(
            "INSERT INTO app_user (username, password_hash) VALUES ($1, $2) RETURNING id, username, password_hash",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return AppError::Conflict(format!("username '{}' is taken", username));
                }
            }
            AppError::Db(e)
        })?;
        Ok(User {
            id: row.0,
            username: row.1,
            password_hash: row.2,
        })
    }

    async fn find_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let row: Option<(i64, String, String)> =
            sqlx::query_as("SELECT id, username, password_hash FROM app_user WHERE username = $1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(id, username, password_hash)| User {
            id,
            username,
            password_hash,
        }))
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let (db_name, query) = match path_and_query.split_once('?') {
        Some((name, query)) => (name.trim(), Some(query)),
        None => (path_and_query.trim(), None),
    };
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = match query {
        Some(q) => format!("{}postgres?{}", base, q),
        None => format!("{}postgres", base),
    };
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
