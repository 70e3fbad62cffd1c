//! Note records: plain create and list

use serde::{Deserialize, Serialize};

use crate::error::{InkwellError, Result};

use super::StoreSession;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
}

impl StoreSession {
    pub async fn create_note(&mut self, title: &str, content: &str) -> Result<Note> {
        if title.trim().is_empty() {
            return Err(InkwellError::InvalidInput("Note title must not be empty".into()));
        }

        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (title, content) VALUES (?, ?) RETURNING id, title, content",
        )
        .bind(title)
        .bind(content)
        .fetch_one(&mut *self.conn)
        .await?;
        Ok(note)
    }

    /// All notes, oldest first
    pub async fn list_notes(&mut self) -> Result<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>("SELECT id, title, content FROM notes ORDER BY id")
            .fetch_all(&mut *self.conn)
            .await?;
        Ok(notes)
    }
}
