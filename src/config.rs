use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default account name (if not set, uses first account)
    pub default_account: Option<String>,
    /// Address book path, overridable per account
    pub book: Option<String>,
    /// Named accounts
    pub accounts: HashMap<String, AccountConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    /// Your email address for this account
    pub email: Option<String>,
    /// Address book path override for this account
    pub book: Option<String>,
}

impl Config {
    /// Load from the given path, or from the default config location.
    /// A missing default file yields the built-in defaults; an explicitly
    /// given path must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (
                dirs::config_dir()
                    .map(|p| p.join("mailcard/config.toml"))
                    .unwrap_or_else(|| PathBuf::from("~/.config/mailcard/config.toml")),
                false,
            ),
        };

        if !path.exists() {
            if explicit {
                bail!("config file {} does not exist", path.display());
            }
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("cannot parse config file {}", path.display()))
    }

    /// Get account names in sorted order
    pub fn account_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.accounts.keys().cloned().collect();
        names.sort();
        names
    }

    /// Resolve the account to file cards under. An explicitly requested
    /// account must exist; otherwise fall back to the default account, then
    /// to the first configured account.
    pub fn resolve_account(&self, requested: Option<&str>) -> Result<String> {
        if let Some(name) = requested {
            if !self.accounts.contains_key(name) {
                bail!("account {name} is not configured");
            }
            return Ok(name.to_string());
        }
        if let Some(name) = &self.default_account {
            if !self.accounts.contains_key(name) {
                bail!("default account {name} is not configured");
            }
            return Ok(name.clone());
        }
        match self.account_names().into_iter().next() {
            Some(name) => Ok(name),
            None => bail!("no accounts configured"),
        }
    }

    /// Address book path for an account: account override, then the top-level
    /// setting, then the default data location.
    pub fn book_path(&self, account: &str) -> PathBuf {
        let configured = self
            .accounts
            .get(account)
            .and_then(|a| a.book.as_deref())
            .or(self.book.as_deref());

        match configured {
            Some(path) => PathBuf::from(shellexpand::tilde(path).into_owned()),
            None => dirs::data_dir()
                .map(|p| p.join("mailcard/book.json"))
                .unwrap_or_else(|| PathBuf::from("~/.local/share/mailcard/book.json")),
        }
    }
}
