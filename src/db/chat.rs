use rusqlite::{params, Row, TransactionBehavior};

use crate::content::chat::ChatMessage;
use crate::db::DbPool;
use crate::store::StoreError;

fn row_to_message(row: &Row) -> rusqlite::Result<ChatMessage> {
    let reactions: String = row.get(5)?;
    Ok(ChatMessage {
        id: row.get(0)?,
        story_slug: row.get(1)?,
        name: row.get(2)?,
        message: row.get(3)?,
        at: row.get(4)?,
        reactions: serde_json::from_str(&reactions).unwrap_or_default(),
        reply_to: row.get(6)?,
        status: row.get(7)?,
        moderated: row.get(8)?,
    })
}

const SELECT_COLUMNS: &str =
    "id, story_slug, name, message, at, reactions, reply_to, status, moderated";

/// All messages, oldest first. No cap in the database tier.
pub fn fetch_all(pool: &DbPool) -> Result<Vec<ChatMessage>, StoreError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {SELECT_COLUMNS} FROM chat_messages ORDER BY at, id"
    ))?;
    let messages = stmt
        .query_map([], row_to_message)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(messages)
}

pub fn insert(pool: &DbPool, message: &ChatMessage) -> Result<(), StoreError> {
    let conn = pool.get()?;
    conn.execute(
        "INSERT INTO chat_messages
             (id, story_slug, name, message, at, reactions, reply_to, status, moderated)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            message.id,
            message.story_slug,
            message.name,
            message.message,
            message.at,
            serde_json::to_string(&message.reactions)?,
            message.reply_to,
            message.status,
            message.moderated,
        ],
    )?;
    Ok(())
}

/// Increment one emoji count in place and return the updated message.
pub fn add_reaction(pool: &DbPool, id: &str, emoji: &str) -> Result<ChatMessage, StoreError> {
    let mut conn = pool.get()?;
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let found = tx.query_row(
        &format!("SELECT {SELECT_COLUMNS} FROM chat_messages WHERE id = ?1"),
        params![id],
        row_to_message,
    );
    let mut message = match found {
        Ok(message) => message,
        Err(rusqlite::Error::QueryReturnedNoRows) => {
            return Err(StoreError::NotFound(format!("chat message {id}")))
        }
        Err(e) => return Err(e.into()),
    };

    message.add_reaction(emoji);
    tx.execute(
        "UPDATE chat_messages SET reactions = ?1 WHERE id = ?2",
        params![serde_json::to_string(&message.reactions)?, id],
    )?;

    tx.commit()?;
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::chat::NewMessage;
    use crate::db;

    fn test_pool() -> DbPool {
        let manager = r2d2_sqlite::SqliteConnectionManager::memory();
        let pool = r2d2::Pool::builder().max_size(1).build(manager).unwrap();
        db::run_migrations(&pool).unwrap();
        pool
    }

    fn message(slug: &str, text: &str) -> ChatMessage {
        ChatMessage::from_input(NewMessage {
            story_slug: slug.into(),
            name: "tester".into(),
            message: text.into(),
            reply_to: None,
        })
    }

    #[test]
    fn insert_then_fetch_round_trips() {
        let pool = test_pool();
        let msg = message("from-trash-to-treasure", "great read");
        insert(&pool, &msg).unwrap();

        let all = fetch_all(&pool).unwrap();
        assert_eq!(all, vec![msg]);
    }

    #[test]
    fn messages_come_back_oldest_first() {
        let pool = test_pool();
        let first = message("a", "first");
        let second = message("a", "second");
        insert(&pool, &first).unwrap();
        insert(&pool, &second).unwrap();

        let all = fetch_all(&pool).unwrap();
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn sequential_reactions_count_exactly() {
        let pool = test_pool();
        let msg = message("a", "react to me");
        insert(&pool, &msg).unwrap();

        for expected in 1..=4u32 {
            let updated = add_reaction(&pool, &msg.id, "♻️").unwrap();
            assert_eq!(updated.reactions["♻️"], expected);
        }
        let all = fetch_all(&pool).unwrap();
        assert_eq!(all[0].reactions["♻️"], 4);
    }

    #[test]
    fn reacting_to_missing_message_is_not_found() {
        let pool = test_pool();
        let err = add_reaction(&pool, "no-such-id", "👍").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }
}
