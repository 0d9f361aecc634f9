//! Get-or-create resolution of the country → state → city chain.
//!
//! Every lookup is a single `INSERT … ON CONFLICT … RETURNING` against the
//! per-parent unique constraints, so two requests naming the same new place
//! converge on one row instead of racing a read-then-insert. All calls run on
//! the caller's connection and never commit.

use sqlx::PgConnection;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::locations::models::{City, Country, State};

/// Ids of one consistent country → state → city chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoChain {
    pub country_id: Uuid,
    pub state_id: Uuid,
    pub city_id: Uuid,
}

pub struct GeoResolver;

impl GeoResolver {
    /// Resolve (creating as needed) the whole chain.
    ///
    /// The state is scoped to the resolved country and the city to the
    /// resolved state. Names are used verbatim.
    pub async fn resolve(
        conn: &mut PgConnection,
        country_name: &str,
        state_name: &str,
        city_name: &str,
    ) -> Result<GeoChain> {
        let country = Self::country(&mut *conn, country_name).await?;
        let state = Self::state(&mut *conn, state_name, country.id).await?;
        let city = Self::city(&mut *conn, city_name, state.id).await?;

        Ok(GeoChain {
            country_id: country.id,
            state_id: state.id,
            city_id: city.id,
        })
    }

    pub async fn country(conn: &mut PgConnection, name: &str) -> Result<Country> {
        sqlx::query_as::<_, Country>(
            "INSERT INTO countries (id, name) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            tracing::error!("Failed to resolve country '{}': {:?}", name, e);
            AppError::Database(e)
        })
    }

    pub async fn state(conn: &mut PgConnection, name: &str, country_id: Uuid) -> Result<State> {
        sqlx::query_as::<_, State>(
            "INSERT INTO states (id, name, country_id) VALUES ($1, $2, $3) \
             ON CONFLICT (country_id, name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name, country_id",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(country_id)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to resolve state '{}' in country {}: {:?}",
                name,
                country_id,
                e
            );
            AppError::Database(e)
        })
    }

    pub async fn city(conn: &mut PgConnection, name: &str, state_id: Uuid) -> Result<City> {
        sqlx::query_as::<_, City>(
            "INSERT INTO cities (id, name, state_id) VALUES ($1, $2, $3) \
             ON CONFLICT (state_id, name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, name, state_id",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(state_id)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to resolve city '{}' in state {}: {:?}",
                name,
                state_id,
                e
            );
            AppError::Database(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    async fn count(pool: &PgPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_resolve_is_idempotent_within_transaction(pool: PgPool) {
        let mut tx = pool.begin().await.unwrap();

        let first = GeoResolver::resolve(&mut tx, "Russia", "Moscow Oblast", "Moscow")
            .await
            .unwrap();
        let second = GeoResolver::resolve(&mut tx, "Russia", "Moscow Oblast", "Moscow")
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(count(&pool, "countries").await, 1);
        assert_eq!(count(&pool, "states").await, 1);
        assert_eq!(count(&pool, "cities").await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_same_state_name_under_different_countries(pool: PgPool) {
        let mut tx = pool.begin().await.unwrap();

        let a = GeoResolver::resolve(&mut tx, "A", "Central", "Town")
            .await
            .unwrap();
        let b = GeoResolver::resolve(&mut tx, "B", "Central", "Town")
            .await
            .unwrap();
        tx.commit().await.unwrap();

        assert_ne!(a.country_id, b.country_id);
        assert_ne!(a.state_id, b.state_id);
        assert_ne!(a.city_id, b.city_id);

        let parent: Uuid = sqlx::query_scalar("SELECT country_id FROM states WHERE id = $1")
            .bind(b.state_id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(parent, b.country_id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_names_are_not_normalised(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        let upper = GeoResolver::country(&mut conn, "Russia").await.unwrap();
        let lower = GeoResolver::country(&mut conn, "russia").await.unwrap();
        let padded = GeoResolver::country(&mut conn, " Russia").await.unwrap();
        let blank = GeoResolver::country(&mut conn, "").await.unwrap();

        assert_ne!(upper.id, lower.id);
        assert_ne!(upper.id, padded.id);
        assert_eq!(blank.name, "");
        assert_eq!(count(&pool, "countries").await, 4);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires Postgres (DATABASE_URL)"]
    async fn test_rollback_discards_created_rows(pool: PgPool) {
        let mut tx = pool.begin().await.unwrap();
        GeoResolver::resolve(&mut tx, "Russia", "Moscow Oblast", "Moscow")
            .await
            .unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(count(&pool, "countries").await, 0);
        assert_eq!(count(&pool, "cities").await, 0);
    }
}
