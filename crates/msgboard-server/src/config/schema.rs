use serde::Deserialize;

use msgboard_core::error::{BoardError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub database: DatabaseSection,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(BoardError::BadRequest(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.database.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Name reported by the `/health` endpoint.
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            service_name: default_service_name(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        // the name is spliced into the hand-formatted /health JSON body
        if self.service_name.is_empty() || self.service_name.contains(['"', '\\']) {
            return Err(BoardError::BadRequest(
                "server.service_name must be non-empty and free of quotes and backslashes".into(),
            ));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_service_name() -> String {
    "flask-app".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSection {
    /// Connection URL. One fresh connection is opened per request; there is
    /// no pool, so the URL must point at shared storage (a file, not
    /// `sqlite::memory:`).
    #[serde(default = "default_db_url")]
    pub url: String,

    /// Which column name the messages table uses for the text body. Two
    /// deployed schema variants exist; this is a config choice, not a
    /// semantic difference.
    #[serde(default)]
    pub content_column: ContentColumn,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            content_column: ContentColumn::default(),
        }
    }
}

impl DatabaseSection {
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(BoardError::BadRequest("database.url must not be empty".into()));
        }
        Ok(())
    }
}

fn default_db_url() -> String {
    "sqlite://msgboard.db?mode=rwc".into()
}

/// Closed set of accepted column names. Keeping this an enum means the SQL
/// text is never built from free-form config input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentColumn {
    #[default]
    Message,
    Content,
}

impl ContentColumn {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentColumn::Message => "message",
            ContentColumn::Content => "content",
        }
    }
}
