use std::io;
use std::path::Path;

use tracing::debug;

/// A named SQL input, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFile {
    pub name: String,
    pub content: String,
}

impl SqlFile {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    /// Loads every `.sql` file in `dir`, sorted by file name.
    pub async fn load_dir(dir: impl AsRef<Path>) -> io::Result<Vec<SqlFile>> {
        let mut files: Vec<SqlFile> = vec![];
        let mut entries = tokio::fs::read_dir(dir.as_ref()).await?;

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_sql = path
                .extension()
                .is_some_and(|extension| extension.eq_ignore_ascii_case("sql"));
            if !is_sql || !entry.file_type().await?.is_file() {
                debug!(path = %path.display(), "skipping non-sql entry");
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            let content = tokio::fs::read_to_string(&path).await?;
            files.push(SqlFile { name, content });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}
