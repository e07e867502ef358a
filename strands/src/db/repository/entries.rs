use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::{Result, StrandsError};
use crate::models::{canonical_value, Entry, Filter, PropertySet};

const SELECT_ENTRY: &str = "SELECT s.id, s.value, s.created_at, \
            p.length, p.word_count, p.unique_characters, p.character_frequency, \
            p.is_palindrome, p.content_hash \
     FROM strings s JOIN string_properties p ON p.string_id = s.id";

pub struct EntryRepository;

impl EntryRepository {
    pub async fn create(conn: &Connection, entry: &Entry) -> Result<()> {
        let props = &entry.properties;
        let tx = conn.transaction().await?;

        let inserted = tx
            .execute(
                "INSERT INTO strings (id, value, created_at) VALUES (?1, ?2, ?3)",
                params![
                    entry.id.clone(),
                    entry.value.clone(),
                    entry.created_at.to_rfc3339()
                ],
            )
            .await;

        match inserted {
            Ok(_) => {}
            Err(e) if StrandsError::is_unique_violation(&e) => {
                return Err(StrandsError::AlreadyExists(
                    "string already exists in the system".to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        tx.execute(
            r#"
            INSERT INTO string_properties (
                string_id, length, word_count, unique_characters,
                character_frequency, is_palindrome, content_hash
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                entry.id.clone(),
                props.length,
                props.word_count,
                props.unique_characters,
                serde_json::to_string(&props.character_frequency)?,
                props.is_palindrome as i64,
                props.content_hash.clone(),
            ],
        )
        .await?;

        tx.commit().await?;
        Ok(())
    }

    pub async fn get_by_value(conn: &Connection, value: &str) -> Result<Option<Entry>> {
        let sql = format!("{SELECT_ENTRY} WHERE s.value = ?1");
        let mut rows = conn.query(&sql, params![canonical_value(value)]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_entry(&row)?))
        } else {
            Ok(None)
        }
    }

    pub async fn delete_by_value(conn: &Connection, value: &str) -> Result<bool> {
        let value = canonical_value(value);
        let tx = conn.transaction().await?;

        tx.execute(
            "DELETE FROM string_properties WHERE string_id IN (SELECT id FROM strings WHERE value = ?1)",
            params![value.clone()],
        )
        .await?;
        let affected = tx
            .execute("DELETE FROM strings WHERE value = ?1", params![value])
            .await?;

        tx.commit().await?;
        Ok(affected > 0)
    }

    pub async fn list(conn: &Connection, filter: &Filter) -> Result<Vec<Entry>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<libsql::Value> = Vec::new();

        let mut bind = |clause: &str, value: libsql::Value| {
            values.push(value);
            clauses.push(clause.replace('?', &format!("?{}", values.len())));
        };

        if let Some(is_palindrome) = filter.is_palindrome {
            bind(
                "p.is_palindrome = ?",
                libsql::Value::Integer(is_palindrome as i64),
            );
        }
        if let Some(min_length) = filter.min_length {
            bind("p.length >= ?", libsql::Value::Integer(min_length));
        }
        if let Some(max_length) = filter.max_length {
            bind("p.length <= ?", libsql::Value::Integer(max_length));
        }
        if let Some(word_count) = filter.word_count {
            bind("p.word_count = ?", libsql::Value::Integer(word_count));
        }
        // Stored values are already lowercased; SQLite's lower() only folds ASCII.
        if let Some(needle) = filter.contains() {
            bind(
                "instr(s.value, ?) > 0",
                libsql::Value::Text(needle.to_lowercase()),
            );
        }

        let mut sql = SELECT_ENTRY.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY s.created_at, s.id");

        let mut rows = conn.query(&sql, libsql::params_from_iter(values)).await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(Self::row_to_entry(&row)?);
        }
        Ok(results)
    }

    fn row_to_entry(row: &libsql::Row) -> Result<Entry> {
        Ok(Entry {
            id: row.get(0)?,
            value: row.get(1)?,
            created_at: DateTime::parse_from_rfc3339(&row.get::<String>(2)?)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StrandsError::Internal(format!("Corrupt created_at: {e}")))?,
            properties: PropertySet {
                length: row.get(3)?,
                word_count: row.get(4)?,
                unique_characters: row.get(5)?,
                character_frequency: serde_json::from_str(&row.get::<String>(6)?)?,
                is_palindrome: row.get::<i64>(7)? != 0,
                content_hash: row.get(8)?,
            },
        })
    }
}
