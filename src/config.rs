use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATABASE: &str = "contacts.db";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RolodexConfig {
    pub database: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl RolodexConfig {
    /// Config written by `rolodex init`: every default spelled out
    pub fn with_defaults() -> Self {
        Self {
            database: Some(DEFAULT_DATABASE.to_string()),
            host: Some(DEFAULT_HOST.to_string()),
            port: Some(DEFAULT_PORT),
        }
    }

    /// Database path: flag, then config, then default
    pub fn database_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }

    /// Bind address: flags, then config, then defaults
    pub fn bind_addr(&self, host: Option<String>, port: Option<u16>) -> anyhow::Result<SocketAddr> {
        let host = host
            .or_else(|| self.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port.or(self.port).unwrap_or(DEFAULT_PORT);

        format!("{host}:{port}")
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address {host}:{port}: {e}"))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("rolodex.toml")
}

/// Read `rolodex.toml` (or `path`); a missing file means "use defaults"
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<RolodexConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("reading rolodex config {}", path.display()));
        }
    };

    let config: RolodexConfig = toml::from_str(&contents)
        .with_context(|| format!("parsing rolodex config {}", path.display()))?;
    tracing::debug!("Loaded rolodex config from {}", path.display());
    Ok(Some(config))
}

/// Write the config `rolodex init` produces; an existing file needs `--force`
pub fn write_config(path: &Path, config: &RolodexConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "rolodex config already exists at {} (rerun `rolodex init --force` to overwrite)",
            path.display()
        );
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)
        .with_context(|| format!("writing rolodex config {}", path.display()))
}

/// Create the directory that will hold the contacts database
pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display())),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        let config = RolodexConfig {
            database: Some("from-config.db".into()),
            host: None,
            port: Some(8080),
        };

        assert_eq!(config.database_path(None), PathBuf::from("from-config.db"));
        assert_eq!(
            config.database_path(Some("flag.db".into())),
            PathBuf::from("flag.db")
        );
        assert_eq!(
            config.bind_addr(None, None).unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            config.bind_addr(Some("0.0.0.0".into()), Some(9000)).unwrap(),
            "0.0.0.0:9000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            RolodexConfig::default().database_path(None),
            PathBuf::from(DEFAULT_DATABASE)
        );
    }

    #[test]
    fn test_invalid_host() {
        assert!(RolodexConfig::default()
            .bind_addr(Some("not a host".into()), None)
            .is_err());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rolodex.toml");

        write_config(&path, &RolodexConfig::with_defaults(), false).unwrap();
        assert!(write_config(&path, &RolodexConfig::default(), false).is_err());

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, RolodexConfig::with_defaults());
        assert!(load_config(Some(&dir.path().join("missing.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_existing_config_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rolodex.toml");
        std::fs::write(&path, "port = 1\n").unwrap();

        let err = write_config(&path, &RolodexConfig::with_defaults(), false).unwrap_err();
        assert!(err.to_string().contains("rolodex init --force"));

        write_config(&path, &RolodexConfig::with_defaults(), true).unwrap();
        assert_eq!(
            load_config(Some(&path)).unwrap(),
            Some(RolodexConfig::with_defaults())
        );
    }

    #[test]
    fn test_malformed_config_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rolodex.toml");
        std::fs::write(&path, "port = \"not a number\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("rolodex.toml"));
    }

    #[test]
    fn test_ensure_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("contacts.db");

        ensure_db_dir(&db).unwrap();
        assert!(dir.path().join("nested").is_dir());

        // Bare file names have no directory to create
        ensure_db_dir(Path::new("contacts.db")).unwrap();
    }
}
