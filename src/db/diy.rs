use rusqlite::{params, Row, TransactionBehavior};

use crate::content::diy::{self, DiyProject};
use crate::db::{self, DbPool};
use crate::store::StoreError;

fn row_to_project(row: &Row) -> rusqlite::Result<DiyProject> {
    let materials: String = row.get(4)?;
    let steps: String = row.get(5)?;
    let safety_tips: String = row.get(6)?;
    Ok(DiyProject {
        name: row.get(0)?,
        difficulty: row.get(1)?,
        time: row.get(2)?,
        outcome: row.get(3)?,
        materials: serde_json::from_str(&materials).unwrap_or_default(),
        steps: serde_json::from_str(&steps).unwrap_or_default(),
        safety_tips: serde_json::from_str(&safety_tips).unwrap_or_default(),
        image_url: row.get(7)?,
        pdf_url: row.get(8)?,
    })
}

/// Fetch all guides in saved order; a never-written table yields the samples.
pub fn fetch_all(pool: &DbPool) -> Result<Vec<DiyProject>, StoreError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT name, difficulty, time, outcome, materials, steps, safety_tips,
                image_url, pdf_url
         FROM diy_projects ORDER BY position",
    )?;
    let projects = stmt
        .query_map([], row_to_project)?
        .collect::<Result<Vec<_>, _>>()?;

    if projects.is_empty() && !db::collection_saved(&conn, "diy_projects")? {
        return Ok(diy::samples());
    }
    Ok(projects)
}

/// Replace the whole collection inside one immediate transaction.
pub fn replace_all(pool: &DbPool, projects: &[DiyProject]) -> Result<(), StoreError> {
    let mut conn = pool.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    tx.execute("DELETE FROM diy_projects", [])?;
    for (position, project) in projects.iter().enumerate() {
        tx.execute(
            "INSERT OR REPLACE INTO diy_projects
                 (name, difficulty, time, outcome, materials, steps, safety_tips,
                  image_url, pdf_url, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                project.name,
                project.difficulty,
                project.time,
                project.outcome,
                serde_json::to_string(&project.materials)?,
                serde_json::to_string(&project.steps)?,
                serde_json::to_string(&project.safety_tips)?,
                project.image_url,
                project.pdf_url,
                position as i64,
            ],
        )?;
    }
    db::mark_collection_saved(&tx, "diy_projects")?;

    tx.commit()?;
    Ok(())
}
