use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- Accepted strings, keyed by their canonical (trimmed, lowercased) value
        CREATE TABLE IF NOT EXISTS strings (
            id TEXT PRIMARY KEY,
            value TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_strings_created_at ON strings(created_at);

        -- Derived properties, exactly one row per string
        CREATE TABLE IF NOT EXISTS string_properties (
            string_id TEXT PRIMARY KEY,
            length INTEGER NOT NULL,
            word_count INTEGER NOT NULL,
            unique_characters INTEGER NOT NULL,
            character_frequency TEXT NOT NULL DEFAULT '{}',
            is_palindrome INTEGER NOT NULL DEFAULT 0,
            content_hash TEXT NOT NULL,
            FOREIGN KEY (string_id) REFERENCES strings(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_string_properties_length ON string_properties(length);
        CREATE INDEX IF NOT EXISTS idx_string_properties_word_count ON string_properties(word_count);
        CREATE INDEX IF NOT EXISTS idx_string_properties_is_palindrome ON string_properties(is_palindrome);
        CREATE INDEX IF NOT EXISTS idx_string_properties_content_hash ON string_properties(content_hash);
        "#,
    )
    .await?;

    Ok(())
}
