//! The persistence gateway: every piece of site content loads from and saves
//! to an ordered set of storage tiers (SQLite database, JSON files on disk,
//! compiled-in defaults) without callers knowing which tier answered.
//!
//! Reads are total: a failing tier is logged and the next one is tried, and
//! the defaults tier always yields. Writes land in exactly one tier and
//! report which; the only loud failure modes are a configured database that
//! cannot take the write, and a production deployment with no database at
//! all (the local disk is ephemeral there, so silently "saving" would lose
//! the data on the next deploy).

mod files;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Config;
use crate::content::chat::{self, ChatMessage, NewMessage};
use crate::content::diy::{self, DiyProject};
use crate::content::site::{SiteData, SitePatch};
use crate::content::story::{self, Story};
use crate::db::{self, DbPool};

pub use self::files::DataPaths;

/// The filesystem tier keeps only this many of the newest chat messages.
const CHAT_FILE_CAP: usize = 200;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("the configured database is unavailable")]
    DatabaseUnavailable,

    #[error("no durable storage available: configure a database or run outside production")]
    ReadOnly,
}

/// Where a write landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageTier {
    Database,
    Filesystem,
}

/// Read tiers in the order they are tried. Database and file tiers may
/// decline (not configured / nothing stored) or fail (logged, skipped);
/// defaults always yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadTier {
    Database,
    File,
    Defaults,
}

const READ_ORDER: [ReadTier; 3] = [ReadTier::Database, ReadTier::File, ReadTier::Defaults];

pub struct ContentStore {
    db: Option<DbPool>,
    db_configured: bool,
    paths: DataPaths,
    production: bool,
}

impl ContentStore {
    /// One-time store initialization: open the pool and run migrations when a
    /// database is configured. A database that fails to come up is logged and
    /// left out - reads fall back to files, writes report it unavailable.
    pub fn open(config: &Config, data_dir: &Path) -> Self {
        let production = config.deployment.production;
        match &config.database.path {
            Some(path) => {
                let init = db::create_pool(path).and_then(|pool| {
                    db::run_migrations(&pool)?;
                    Ok(pool)
                });
                let pool = match init {
                    Ok(pool) => {
                        tracing::info!("Database tier ready: {}", path.display());
                        Some(pool)
                    }
                    Err(err) => {
                        tracing::error!(
                            "Configured database failed to initialize ({}); reads will \
                             fall back to files: {}",
                            path.display(),
                            err
                        );
                        None
                    }
                };
                Self::new(pool, true, data_dir, production)
            }
            None => Self::new(None, false, data_dir, production),
        }
    }

    pub fn new(db: Option<DbPool>, db_configured: bool, data_dir: &Path, production: bool) -> Self {
        Self {
            db,
            db_configured,
            paths: DataPaths::new(data_dir),
            production,
        }
    }

    pub fn database_active(&self) -> bool {
        self.db.is_some()
    }

    pub fn database_configured(&self) -> bool {
        self.db_configured
    }

    // ── Site data ───────────────────────────────────────────────────────────

    pub fn load_site(&self) -> SiteData {
        let patch = self.read_tiers(
            "site data",
            db::site::fetch,
            &self.paths.site,
            SitePatch::default,
        );
        SiteData::from_patch(patch)
    }

    /// Merge the patch over the current data and persist the whole object.
    pub fn save_site(&self, patch: SitePatch) -> Result<StorageTier, StoreError> {
        let mut site = self.load_site();
        site.apply(patch);
        self.write_tier(
            |pool| db::site::replace(pool, &site),
            &self.paths.site,
            &site,
        )
    }

    // ── Stories ─────────────────────────────────────────────────────────────

    pub fn load_stories(&self) -> Vec<Story> {
        self.read_tiers(
            "stories",
            db::stories::fetch_all,
            &self.paths.stories,
            story::samples,
        )
    }

    /// Replace the whole collection. Slugs are normalized (and derived from
    /// titles where blank) before anything is written.
    pub fn save_stories(&self, mut stories: Vec<Story>) -> Result<StorageTier, StoreError> {
        for story in &mut stories {
            story.ensure_slug();
        }
        self.write_tier(
            |pool| db::stories::replace_all(pool, &stories),
            &self.paths.stories,
            &stories,
        )
    }

    // ── DIY guides ──────────────────────────────────────────────────────────

    pub fn load_diy_projects(&self) -> Vec<DiyProject> {
        self.read_tiers(
            "diy projects",
            db::diy::fetch_all,
            &self.paths.diy,
            diy::samples,
        )
    }

    pub fn save_diy_projects(&self, projects: Vec<DiyProject>) -> Result<StorageTier, StoreError> {
        self.write_tier(
            |pool| db::diy::replace_all(pool, &projects),
            &self.paths.diy,
            &projects,
        )
    }

    // ── Story chat ──────────────────────────────────────────────────────────

    pub fn messages_for(&self, story_slug: &str) -> Vec<ChatMessage> {
        self.load_chat()
            .into_iter()
            .filter(|m| m.story_slug == story_slug)
            .collect()
    }

    pub fn all_messages(&self) -> BTreeMap<String, Vec<ChatMessage>> {
        chat::group_by_story(self.load_chat())
    }

    pub fn post_message(&self, input: NewMessage) -> Result<ChatMessage, StoreError> {
        let message = ChatMessage::from_input(input);
        if self.db_configured {
            let pool = self.db.as_ref().ok_or(StoreError::DatabaseUnavailable)?;
            db::chat::insert(pool, &message)?;
            return Ok(message);
        }
        if self.production {
            return Err(StoreError::ReadOnly);
        }

        let mut all = self.load_chat();
        all.push(message.clone());
        if all.len() > CHAT_FILE_CAP {
            let excess = all.len() - CHAT_FILE_CAP;
            all.drain(..excess);
        }
        files::write_json(&self.paths.chat, &all)?;
        Ok(message)
    }

    pub fn add_reaction(&self, id: &str, emoji: &str) -> Result<ChatMessage, StoreError> {
        if self.db_configured {
            let pool = self.db.as_ref().ok_or(StoreError::DatabaseUnavailable)?;
            return db::chat::add_reaction(pool, id, emoji);
        }
        if self.production {
            return Err(StoreError::ReadOnly);
        }

        let mut all = self.load_chat();
        let message = all
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("chat message {id}")))?;
        message.add_reaction(emoji);
        let updated = message.clone();
        files::write_json(&self.paths.chat, &all)?;
        Ok(updated)
    }

    fn load_chat(&self) -> Vec<ChatMessage> {
        self.read_tiers("chat messages", db::chat::fetch_all, &self.paths.chat, Vec::new)
    }

    // ── Tier plumbing ───────────────────────────────────────────────────────

    /// Walk the ordered read tiers. A tier either yields, declines, or fails;
    /// failures log a warning and the walk continues. Total by construction:
    /// the defaults tier cannot decline.
    fn read_tiers<T: DeserializeOwned>(
        &self,
        entity: &str,
        from_db: impl Fn(&DbPool) -> Result<T, StoreError>,
        file: &Path,
        defaults: impl Fn() -> T,
    ) -> T {
        for tier in READ_ORDER {
            let outcome: Result<Option<T>, StoreError> = match tier {
                ReadTier::Database => match &self.db {
                    Some(pool) => from_db(pool).map(Some),
                    None => Ok(None),
                },
                ReadTier::File => files::read_json(file),
                ReadTier::Defaults => Ok(Some(defaults())),
            };
            match outcome {
                Ok(Some(value)) => return value,
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(
                        "{} read failed at {:?} tier, trying next: {}",
                        entity,
                        tier,
                        err
                    );
                }
            }
        }
        defaults()
    }

    /// Route a write to exactly one tier.
    ///
    /// A configured database takes the write or the save fails - the file
    /// tier never papers over a database failure, in production or out of
    /// it, so the two stores cannot silently diverge. Without a database,
    /// production refuses (ephemeral disk) and everything else writes the
    /// JSON file.
    fn write_tier<T: Serialize>(
        &self,
        to_db: impl FnOnce(&DbPool) -> Result<(), StoreError>,
        file: &Path,
        value: &T,
    ) -> Result<StorageTier, StoreError> {
        if self.db_configured {
            let pool = self.db.as_ref().ok_or(StoreError::DatabaseUnavailable)?;
            to_db(pool)?;
            return Ok(StorageTier::Database);
        }
        if self.production {
            return Err(StoreError::ReadOnly);
        }
        files::write_json(file, value)?;
        Ok(StorageTier::Filesystem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_order_ends_in_defaults() {
        assert_eq!(READ_ORDER.last(), Some(&ReadTier::Defaults));
        assert_eq!(READ_ORDER[0], ReadTier::Database);
    }

    #[test]
    fn storage_tier_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&StorageTier::Database).unwrap(),
            "\"database\""
        );
        assert_eq!(
            serde_json::to_string(&StorageTier::Filesystem).unwrap(),
            "\"filesystem\""
        );
    }
}
