//! Artist profile and image operations.

use sqlx::PgPool;
use tracing::debug;

use crate::{
    DbError,
    models::{group_artist_rows, ArtistDetail, ArtistDetailRow, ArtistSummary},
};

/// Return up to `limit` artists, one row each, with their lexically first
/// image as the representative one.
///
/// Artists without any image row are not listed. A negative `limit` is
/// passed through and rejected by Postgres.
pub async fn list_top(pool: &PgPool, limit: i64) -> Result<Vec<ArtistSummary>, DbError> {
    let rows = sqlx::query_as::<_, ArtistSummary>(
        r#"
        WITH ranked AS (
            SELECT
                a.id,
                m.image,
                a.category,
                a.job,
                a.rating,
                a.description,
                a.address,
                a.fullname,
                a.dob,
                a.phone,
                ROW_NUMBER() OVER (PARTITION BY a.id ORDER BY m.image) AS rn
            FROM artist a
            JOIN artist_image m ON a.id = m.artist_id
        )
        SELECT id, image, category, job, rating, description, address, fullname, dob, phone
        FROM ranked
        WHERE rn = 1
        ORDER BY id
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    debug!(limit, returned = rows.len(), "listed top artists");
    Ok(rows)
}

/// Fetch one artist's profile with all of its images.
///
/// Returns `None` when the join yields nothing, which includes an existing
/// artist that has no image rows.
pub async fn detail(pool: &PgPool, id: i32) -> Result<Option<ArtistDetail>, DbError> {
    let rows = sqlx::query_as::<_, ArtistDetailRow>(
        r#"
        SELECT a.id, a.fullname, a.job, a.address, a.category, a.description,
               a.phone, a.rating, a.dob, m.image
        FROM artist a
        JOIN artist_image m ON a.id = m.artist_id
        WHERE a.id = $1
        ORDER BY m.image
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    debug!(artist_id = id, image_rows = rows.len(), "fetched artist detail");
    Ok(group_artist_rows(rows).into_iter().next())
}

/// Overwrite the artist's description and replace its whole image set.
///
/// All three steps run in one transaction; a failure in any of them rolls
/// the update back when the transaction is dropped.
pub async fn update(
    pool: &PgPool,
    artist_id: i32,
    description: &str,
    images: &[String],
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE artist SET description = $1 WHERE id = $2")
        .bind(description)
        .bind(artist_id)
        .execute(&mut *tx)
        .await?;

    let removed = sqlx::query("DELETE FROM artist_image WHERE artist_id = $1")
        .bind(artist_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    for image in images {
        sqlx::query("INSERT INTO artist_image (artist_id, image) VALUES ($1, $2)")
            .bind(artist_id)
            .bind(image)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;

    debug!(artist_id, removed, inserted = images.len(), "replaced artist images");
    Ok(())
}
