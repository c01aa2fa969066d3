pub(crate) const SCHEMA_VERSION: i64 = 1;

pub(crate) const MIGRATION: &str = r#"
    CREATE TABLE IF NOT EXISTS files (
        id TEXT PRIMARY KEY,
        mime TEXT NOT NULL,
        blob BLOB NOT NULL
    );
"#;
