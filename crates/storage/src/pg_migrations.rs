//! PostgreSQL schema migrations for reelsync storage.

use sqlx::PgPool;

/// Run all PostgreSQL migrations. Idempotent.
pub(crate) async fn run_pg_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS films (
            id TEXT PRIMARY KEY,
            episode_id BIGINT,
            title TEXT NOT NULL,
            opening_crawl TEXT NOT NULL DEFAULT '',
            director TEXT NOT NULL DEFAULT '',
            producer TEXT NOT NULL DEFAULT '',
            release_date TIMESTAMPTZ,
            species JSONB NOT NULL DEFAULT '[]',
            starships JSONB NOT NULL DEFAULT '[]',
            vehicles JSONB NOT NULL DEFAULT '[]',
            characters JSONB NOT NULL DEFAULT '[]',
            planets JSONB NOT NULL DEFAULT '[]',
            url TEXT,
            is_external BOOLEAN NOT NULL DEFAULT FALSE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Merge key. NULLs are distinct, so any number of local films may coexist.
    sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_films_episode ON films (episode_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_films_title ON films (title)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_films_created ON films (created_at, id)")
        .execute(pool)
        .await?;

    tracing::debug!("PostgreSQL migrations applied");
    Ok(())
}
