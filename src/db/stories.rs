use rusqlite::{params, Row, TransactionBehavior};

use crate::content::story::{self, Story};
use crate::db::{self, DbPool};
use crate::store::StoreError;

fn row_to_story(row: &Row) -> rusqlite::Result<Story> {
    let tags: String = row.get(10)?;
    Ok(Story {
        slug: row.get(0)?,
        title: row.get(1)?,
        excerpt: row.get(2)?,
        body: row.get(3)?,
        author: row.get(4)?,
        category: row.get(5)?,
        time: row.get(6)?,
        status: row.get(7)?,
        image_url: row.get(8)?,
        pdf_url: row.get(9)?,
        tags: serde_json::from_str(&tags).unwrap_or_default(),
    })
}

/// Fetch the full story collection in saved order. A table that has never
/// been written yields the compiled-in samples.
pub fn fetch_all(pool: &DbPool) -> Result<Vec<Story>, StoreError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT slug, title, excerpt, body, author, category, time, status,
                image_url, pdf_url, tags
         FROM stories ORDER BY position",
    )?;
    let stories = stmt
        .query_map([], row_to_story)?
        .collect::<Result<Vec<_>, _>>()?;

    if stories.is_empty() && !db::collection_saved(&conn, "stories")? {
        return Ok(story::samples());
    }
    Ok(stories)
}

/// Replace the whole collection inside one immediate transaction, so a racing
/// or failing save never leaves a half-written table.
pub fn replace_all(pool: &DbPool, stories: &[Story]) -> Result<(), StoreError> {
    let mut conn = pool.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute("DELETE FROM stories", [])?;
    for (position, story) in stories.iter().enumerate() {
        tx.execute(
            "INSERT OR REPLACE INTO stories
                 (slug, title, excerpt, body, author, category, time, status,
                  image_url, pdf_url, tags, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                story.slug,
                story.title,
                story.excerpt,
                story.body,
                story.author,
                story.category,
                story.time,
                story.status,
                story.image_url,
                story.pdf_url,
                serde_json::to_string(&story.tags)?,
                position as i64,
            ],
        )?;
    }
    db::mark_collection_saved(&tx, "stories")?;

    tx.commit()?;
    Ok(())
}
