use std::fs;
use std::path::{Path, PathBuf};

use directories::UserDirs;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BUGZILLA_URL: &str = "https://bugzilla.mozilla.org/";
pub const DEFAULT_PRODUCT: &str = "Conduit";
pub const DEFAULT_COMPONENT: &str = "General";
pub const DEFAULT_VERSION: &str = "unspecified";

const CONFIG_FILE_NAME: &str = ".trello-to-bug";

/// Credentials and defaults for the two services, read from an INI-style
/// file with a `[bugzilla]` and a `[trello]` section.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub bugzilla_api_key: Option<String>,
    pub bugzilla_url: Option<String>,
    pub bugzilla_product: Option<String>,
    pub bugzilla_component: Option<String>,
    pub bugzilla_version: Option<String>,
    pub trello_api_key: Option<String>,
    pub trello_api_secret: Option<String>,
    pub trello_oauth_token: Option<String>,
    pub trello_oauth_token_secret: Option<String>,
}

/// A required credential field, identified by its INI section and key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BugzillaApiKey,
    TrelloApiKey,
    TrelloApiSecret,
    TrelloOauthToken,
}

impl Field {
    pub fn section(&self) -> &'static str {
        match self {
            Field::BugzillaApiKey => "bugzilla",
            _ => "trello",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Field::BugzillaApiKey => "api_key",
            Field::TrelloApiKey => "api_key",
            Field::TrelloApiSecret => "api_secret",
            Field::TrelloOauthToken => "oauth_token",
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(AppError::Io(err)),
        };
        Self::parse(&contents, path)
    }

    fn parse(contents: &str, path: &Path) -> AppResult<Self> {
        let mut config = Config::default();
        let mut section = String::new();

        for (number, raw_line) in contents.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                section = name.trim().to_string();
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(AppError::Configuration(format!(
                    "{}:{}: expected 'key = value', got '{line}'",
                    path.display(),
                    number + 1,
                )));
            };
            config.set(&section, key.trim(), value.trim().to_string());
        }

        Ok(config)
    }

    fn set(&mut self, section: &str, key: &str, value: String) {
        let slot = match (section, key) {
            ("bugzilla", "api_key") => &mut self.bugzilla_api_key,
            ("bugzilla", "url") => &mut self.bugzilla_url,
            ("bugzilla", "product") => &mut self.bugzilla_product,
            ("bugzilla", "component") => &mut self.bugzilla_component,
            ("bugzilla", "version") => &mut self.bugzilla_version,
            ("trello", "api_key") => &mut self.trello_api_key,
            ("trello", "api_secret") => &mut self.trello_api_secret,
            ("trello", "oauth_token") => &mut self.trello_oauth_token,
            ("trello", "oauth_token_secret") => &mut self.trello_oauth_token_secret,
            _ => return,
        };
        *slot = Some(value);
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        let mut out = String::new();
        out.push_str("[bugzilla]\n");
        push_option(&mut out, "api_key", &self.bugzilla_api_key);
        push_option(&mut out, "url", &self.bugzilla_url);
        push_option(&mut out, "product", &self.bugzilla_product);
        push_option(&mut out, "component", &self.bugzilla_component);
        push_option(&mut out, "version", &self.bugzilla_version);
        out.push_str("\n[trello]\n");
        push_option(&mut out, "api_key", &self.trello_api_key);
        push_option(&mut out, "api_secret", &self.trello_api_secret);
        push_option(&mut out, "oauth_token", &self.trello_oauth_token);
        push_option(
            &mut out,
            "oauth_token_secret",
            &self.trello_oauth_token_secret,
        );
        fs::write(path, out)?;
        Ok(())
    }

    /// Required fields that are absent or empty. A run is attempted only once
    /// this comes back empty.
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if is_blank(&self.bugzilla_api_key) {
            missing.push(Field::BugzillaApiKey);
        }
        if is_blank(&self.trello_api_key) {
            missing.push(Field::TrelloApiKey);
        }
        if is_blank(&self.trello_api_secret) {
            missing.push(Field::TrelloApiSecret);
        }
        if is_blank(&self.trello_oauth_token) {
            missing.push(Field::TrelloOauthToken);
        }
        missing
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::BugzillaApiKey => self.bugzilla_api_key = Some(value),
            Field::TrelloApiKey => self.trello_api_key = Some(value),
            Field::TrelloApiSecret => self.trello_api_secret = Some(value),
            Field::TrelloOauthToken => self.trello_oauth_token = Some(value),
        }
    }

    pub fn bugzilla_url(&self) -> &str {
        self.bugzilla_url.as_deref().unwrap_or(DEFAULT_BUGZILLA_URL)
    }

    pub fn bugzilla_product(&self) -> &str {
        self.bugzilla_product.as_deref().unwrap_or(DEFAULT_PRODUCT)
    }

    pub fn bugzilla_component(&self) -> &str {
        self.bugzilla_component
            .as_deref()
            .unwrap_or(DEFAULT_COMPONENT)
    }

    pub fn bugzilla_version(&self) -> &str {
        self.bugzilla_version.as_deref().unwrap_or(DEFAULT_VERSION)
    }
}

fn push_option(out: &mut String, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(value);
        out.push('\n');
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// `.trello-to-bug` in the current directory when it exists, otherwise the
/// home-directory copy; new files are created in the current directory.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dirs) = UserDirs::new() {
        let home = dirs.home_dir().join(CONFIG_FILE_NAME);
        if home.exists() {
            return home;
        }
    }
    local
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_sections() {
        let contents = "\
[bugzilla]
api_key = bzkey
product = Firefox

; comment
[trello]
api_key = tkey
api_secret = tsecret
oauth_token = token
oauth_token_secret = tokensecret
";
        let config = Config::parse(contents, Path::new("test")).unwrap();
        assert_eq!(config.bugzilla_api_key.as_deref(), Some("bzkey"));
        assert_eq!(config.bugzilla_product.as_deref(), Some("Firefox"));
        assert_eq!(config.trello_api_key.as_deref(), Some("tkey"));
        assert_eq!(config.trello_oauth_token_secret.as_deref(), Some("tokensecret"));
        assert!(config.missing_fields().is_empty());
    }

    #[test]
    fn rejects_malformed_lines() {
        let result = Config::parse("[bugzilla]\nnot a pair\n", Path::new("test"));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn reports_missing_required_fields() {
        let config = Config::parse("[bugzilla]\napi_key = k\n", Path::new("test")).unwrap();
        let missing = config.missing_fields();
        assert_eq!(
            missing,
            vec![
                Field::TrelloApiKey,
                Field::TrelloApiSecret,
                Field::TrelloOauthToken,
            ]
        );
    }

    #[test]
    fn applies_bugzilla_defaults() {
        let config = Config::default();
        assert_eq!(config.bugzilla_url(), DEFAULT_BUGZILLA_URL);
        assert_eq!(config.bugzilla_product(), "Conduit");
        assert_eq!(config.bugzilla_component(), "General");
        assert_eq!(config.bugzilla_version(), "unspecified");
    }

    #[test]
    fn round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");

        let mut config = Config::default();
        config.bugzilla_api_key = Some("bz".to_string());
        config.trello_api_key = Some("key".to_string());
        config.trello_api_secret = Some("secret".to_string());
        config.trello_oauth_token = Some("token".to_string());
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.bugzilla_api_key.as_deref(), Some("bz"));
        assert_eq!(loaded.trello_oauth_token.as_deref(), Some("token"));
        assert!(loaded.bugzilla_url.is_none());
    }

    #[test]
    fn load_of_absent_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("nope")).unwrap();
        assert_eq!(config.missing_fields().len(), 4);
    }
}
