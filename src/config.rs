use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Folder the list opens on when no URL says otherwise.
    pub default_tag: String,
    pub start_url: Option<String>,
    pub db_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tag: "inbox".to_string(),
            start_url: None,
            db_path: None,
        }
    }
}

fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("no config dir available"))?
        .join("rs_webmail"))
}

pub fn config_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("config.toml");
    Ok(p)
}

pub fn default_db_path() -> Result<PathBuf> {
    let mut p = config_dir()?;
    fs::create_dir_all(&p)?;
    p.push("mails.db");
    Ok(p)
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        // create a template config for users to edit
        let tom = toml::to_string_pretty(&Config::default())?;
        fs::write(path, tom)?;
        return Err(anyhow::anyhow!(
            "Created template config at {}; edit it and run again",
            path.display()
        ));
    }
    let s = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&s)?;
    Ok(cfg)
}

pub fn resolve_db_path(cfg: &Config) -> Result<PathBuf> {
    if let Some(p) = &cfg.db_path {
        Ok(PathBuf::from(p))
    } else {
        default_db_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let cfg: Config = toml::from_str(
            r#"
            default_tag = "drafts"
            start_url = "https://mail.example/#/drafts/mail/5"
            db_path = "/tmp/mails.db"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.default_tag, "drafts");
        assert_eq!(
            cfg.start_url.as_deref(),
            Some("https://mail.example/#/drafts/mail/5")
        );
        assert_eq!(cfg.db_path.as_deref(), Some("/tmp/mails.db"));
    }

    #[test]
    fn template_round_trips() {
        let tom = toml::to_string_pretty(&Config::default()).unwrap();
        let cfg: Config = toml::from_str(&tom).unwrap();
        assert_eq!(cfg.default_tag, "inbox");
        assert!(cfg.start_url.is_none());
        assert!(cfg.db_path.is_none());
    }

    #[test]
    fn first_load_writes_a_template_and_asks_to_edit() {
        let dir = std::env::temp_dir().join(format!("rs_webmail_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("edit it and run again"));
        assert!(path.exists());

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.default_tag, "inbox");

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir(&dir);
    }
}
