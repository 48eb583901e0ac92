//! Load settings from XDG `config.toml` and a project `.env`, then apply them to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! The agent crate reads every setting from the environment, so this is the only place that
//! knows about files.

mod dotenv_file;
mod xdg_toml;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(String),
}

/// Loads `.env` and `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]`, then sets environment
/// variables only for keys that are **not** already set.
///
/// * `app_name`: e.g. `"nexus"`; selects `~/.config/<app_name>/config.toml`.
/// * `override_dir`: directory holding `.env`; defaults to the current directory.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let config_home = xdg_toml::config_home()?;
    load_and_apply_from(&config_home, app_name, override_dir)
}

/// Same as [`load_and_apply`] with an explicit XDG config home.
pub fn load_and_apply_from(
    config_home: &Path,
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(config_home, app_name)?;
    let dotenv_map = dotenv_file::load_env_map(override_dir)?;
    for (key, value) in merge_missing(&xdg_map, &dotenv_map, |k| std::env::var(k).is_ok()) {
        std::env::set_var(key, value);
    }
    Ok(())
}

/// Pairs to set: keys absent from the environment, `.env` value preferred over XDG.
fn merge_missing(
    xdg_map: &HashMap<String, String>,
    dotenv_map: &HashMap<String, String>,
    is_set: impl Fn(&str) -> bool,
) -> Vec<(String, String)> {
    let mut keys: HashSet<&String> = xdg_map.keys().collect();
    keys.extend(dotenv_map.keys());

    let mut out: Vec<(String, String)> = keys
        .into_iter()
        .filter(|k| !is_set(k))
        .filter_map(|k| {
            dotenv_map
                .get(k)
                .or_else(|| xdg_map.get(k))
                .map(|v| (k.clone(), v.clone()))
        })
        .collect();
    out.sort();
    out
}
