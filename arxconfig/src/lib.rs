//! # ArtXR configuration
//!
//! A single YAML tree shared by every crate of the viewer:
//! - embedded defaults (`artxr.yaml`) overlaid with `<dir>/config.yaml`
//! - environment overrides (`ARTXR_CONFIG__SECTION__KEY=value`)
//! - typed getters with defaults, used by the per-crate extension traits
//! - a lazily loaded process-wide instance
//!
//! ## Usage
//!
//! ```no_run
//! use arxconfig::get_config;
//!
//! let config = get_config();
//! let level = config.get_log_min_level()?;
//! let dwell = config.get_u64(&["viewer", "dwell_secs"], 5);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! Crates that need their own settings extend [`Config`] with a trait
//! (`CollectionConfigExt`, `ViewerConfigExt`) built on the typed getters below.

use anyhow::{anyhow, bail, Context, Result};
use dirs::home_dir;
use lazy_static::lazy_static;
use serde_yaml::{Mapping, Number, Value};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::{debug, info, warn};

const DEFAULT_CONFIG: &str = include_str!("artxr.yaml");

lazy_static! {
    static ref CONFIG: Arc<Config> =
        Arc::new(Config::load_config("").expect("Failed to load ArtXR configuration"));
}

const ENV_CONFIG_DIR: &str = "ARTXR_CONFIG";
const ENV_PREFIX: &str = "ARTXR_CONFIG__";
const DEFAULT_DIR_NAME: &str = ".artxr";
const CONFIG_FILE_NAME: &str = "config.yaml";

const DEFAULT_LOG_MIN_LEVEL: &str = "INFO";
const DEFAULT_LOG_ENABLE_CONSOLE: bool = true;

/// Generates a getter/setter pair for a boolean key with a default
macro_rules! impl_bool_config {
    ($getter:ident, $setter:ident, $path:expr, $default:expr) => {
        pub fn $getter(&self) -> Result<bool> {
            Ok(self.get_value($path)?.as_bool().unwrap_or($default))
        }

        pub fn $setter(&self, value: bool) -> Result<()> {
            self.set_value($path, Value::Bool(value))
        }
    };
}

/// ArtXR settings
///
/// Holds the merged YAML tree behind a mutex; every setter persists the
/// whole tree back to `config.yaml`.
#[derive(Debug)]
pub struct Config {
    directory: String,
    file: PathBuf,
    tree: Mutex<Value>,
}

impl Clone for Config {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            file: self.file.clone(),
            tree: Mutex::new(self.snapshot()),
        }
    }
}

impl Config {
    /// Picks the configuration directory
    ///
    /// Order: the `directory` argument when not empty, the `ARTXR_CONFIG`
    /// environment variable, `.artxr` in the working directory, `.artxr` in
    /// the home directory. Falls back to `.artxr` in the working directory.
    fn locate(directory: &str) -> PathBuf {
        if !directory.is_empty() {
            return PathBuf::from(directory);
        }

        if let Ok(from_env) = env::var(ENV_CONFIG_DIR) {
            info!(env_var = ENV_CONFIG_DIR, path = %from_env, "Config directory from environment");
            return PathBuf::from(from_env);
        }

        let local = PathBuf::from(DEFAULT_DIR_NAME);
        let in_home = home_dir().map(|home| home.join(DEFAULT_DIR_NAME));

        [Some(local.clone()), in_home]
            .into_iter()
            .flatten()
            .find(|candidate| candidate.is_dir())
            .unwrap_or(local)
    }

    /// Creates the directory when missing and checks it is writable
    fn prepare(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create config directory {}", dir.display()))?;
        if !dir.is_dir() {
            bail!("{} is not a directory", dir.display());
        }

        let probe = dir.join(".write_test");
        fs::write(&probe, b"artxr")
            .with_context(|| format!("Config directory {} is not writable", dir.display()))?;
        fs::remove_file(&probe)?;
        Ok(())
    }

    /// Resolves, creates and validates the configuration directory
    ///
    /// See [`Config::load_config`] for the search order.
    pub fn config_dir(directory: &str) -> Result<String> {
        let dir = Self::locate(directory);
        Self::prepare(&dir)?;
        Ok(dir.to_string_lossy().into_owned())
    }

    /// Loads the configuration
    ///
    /// The directory is, in order: `directory` when not empty, `$ARTXR_CONFIG`,
    /// `./.artxr`, `~/.artxr`. The embedded defaults are overlaid with
    /// `config.yaml` (if present) after lower-casing every key, environment
    /// overrides are applied and the result is written back.
    pub fn load_config(directory: &str) -> Result<Self> {
        let directory = Self::config_dir(directory)?;
        info!(config_dir = %directory, "Using config directory");

        let file = Path::new(&directory).join(CONFIG_FILE_NAME);
        let mut tree = lowercase_keys(serde_yaml::from_str(DEFAULT_CONFIG)?);

        match fs::read_to_string(&file) {
            Ok(text) => {
                info!(config_file = %file.display(), "Loaded config file");
                let user: Value = serde_yaml::from_str(&text)
                    .with_context(|| format!("Invalid YAML in {}", file.display()))?;
                overlay_yaml(&mut tree, lowercase_keys(user));
            }
            Err(_) => {
                info!(config_file = %file.display(), "No config file, using embedded defaults");
            }
        }

        apply_env_overrides(&mut tree, env::vars());

        let config = Config {
            directory,
            file,
            tree: Mutex::new(tree),
        };
        config.save()?;
        Ok(config)
    }

    /// Directory holding `config.yaml`
    pub fn directory(&self) -> &str {
        &self.directory
    }

    fn snapshot(&self) -> Value {
        self.tree.lock().unwrap().clone()
    }

    /// Writes the current tree to `config.yaml`
    pub fn save(&self) -> Result<()> {
        let yaml = serde_yaml::to_string(&*self.tree.lock().unwrap())?;
        fs::write(&self.file, yaml)
            .with_context(|| format!("Cannot write {}", self.file.display()))?;
        Ok(())
    }

    /// Stores `value` at `path` and saves the file
    ///
    /// `path` is a list of keys, e.g. `&["viewer", "dwell_secs"]`; missing
    /// intermediate mappings are created.
    pub fn set_value(&self, path: &[&str], value: Value) -> Result<()> {
        {
            let mut tree = self.tree.lock().unwrap();
            insert_at(&mut tree, path, value)?;
        }
        self.save()
    }

    /// Value at `path`
    ///
    /// Fails when a key is missing or an intermediate node is not a mapping.
    pub fn get_value(&self, path: &[&str]) -> Result<Value> {
        let tree = self.tree.lock().unwrap();
        lookup(&tree, path).cloned()
    }

    // ========================================================================
    // Typed getters
    // ========================================================================

    /// String value at `path`, or `default` when missing or not a string
    pub fn get_string(&self, path: &[&str], default: &str) -> String {
        match self.get_value(path) {
            Ok(Value::String(s)) => s,
            Ok(Value::Number(n)) => n.to_string(),
            Ok(_) => {
                warn!(path = %path.join("."), "Not a string, using default '{}'", default);
                default.to_string()
            }
            Err(_) => default.to_string(),
        }
    }

    /// Unsigned integer at `path`, or `default`
    ///
    /// Numeric strings are accepted (environment overrides may arrive quoted).
    pub fn get_u64(&self, path: &[&str], default: u64) -> u64 {
        match self.get_value(path) {
            Ok(Value::Number(n)) if n.is_u64() => n.as_u64().unwrap_or(default),
            Ok(Value::String(s)) => match s.trim().parse::<u64>() {
                Ok(v) => v,
                Err(_) => {
                    warn!(path = %path.join("."), "Invalid integer '{}', using default {}", s, default);
                    default
                }
            },
            Ok(_) => {
                warn!(path = %path.join("."), "Not an unsigned integer, using default {}", default);
                default
            }
            Err(_) => default,
        }
    }

    /// Floating point value at `path`, or `default`
    pub fn get_f64(&self, path: &[&str], default: f64) -> f64 {
        match self.get_value(path) {
            Ok(Value::Number(n)) => n.as_f64().unwrap_or(default),
            Ok(Value::String(s)) => match s.trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    warn!(path = %path.join("."), "Invalid number '{}', using default {}", s, default);
                    default
                }
            },
            Ok(_) => {
                warn!(path = %path.join("."), "Not a number, using default {}", default);
                default
            }
            Err(_) => default,
        }
    }

    /// Three-component vector stored as a YAML sequence, or `default`
    pub fn get_vec3(&self, path: &[&str], default: [f32; 3]) -> [f32; 3] {
        let seq = match self.get_value(path) {
            Ok(Value::Sequence(seq)) if seq.len() == 3 => seq,
            Ok(_) => {
                warn!(path = %path.join("."), "Expected a 3-element sequence, using default {:?}", default);
                return default;
            }
            Err(_) => return default,
        };

        let mut out = default;
        for (slot, value) in out.iter_mut().zip(seq.iter()) {
            match value.as_f64() {
                Some(v) => *slot = v as f32,
                None => {
                    warn!(path = %path.join("."), "Non-numeric component, using default {:?}", default);
                    return default;
                }
            }
        }
        out
    }

    /// Stores an unsigned integer at `path`
    pub fn set_u64(&self, path: &[&str], value: u64) -> Result<()> {
        self.set_value(path, Value::Number(Number::from(value)))
    }

    /// Stores a string at `path`
    pub fn set_string(&self, path: &[&str], value: impl Into<String>) -> Result<()> {
        self.set_value(path, Value::String(value.into()))
    }

    // ========================================================================
    // Logger
    // ========================================================================

    impl_bool_config!(
        get_log_enable_console,
        set_log_enable_console,
        &["host", "logger", "enable_console"],
        DEFAULT_LOG_ENABLE_CONSOLE
    );

    /// Minimum log level (`TRACE`, `DEBUG`, `INFO`, `WARN`, `ERROR`)
    pub fn get_log_min_level(&self) -> Result<String> {
        match self.get_value(&["host", "logger", "min_level"])? {
            Value::String(s) => Ok(s),
            _ => Ok(DEFAULT_LOG_MIN_LEVEL.to_string()),
        }
    }

    pub fn set_log_min_level(&self, level: String) -> Result<()> {
        self.set_value(&["host", "logger", "min_level"], Value::String(level))
    }
}

/// Returns the global configuration instance
///
/// The configuration is lazily loaded on first access.
///
/// # Panics
///
/// Panics if the configuration directory cannot be prepared or the YAML is
/// invalid. Use [`Config::load_config`] to handle those errors.
pub fn get_config() -> Arc<Config> {
    CONFIG.clone()
}

fn key(name: &str) -> Value {
    Value::String(name.to_lowercase())
}

fn lookup<'a>(tree: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut node = tree;
    for (depth, name) in path.iter().enumerate() {
        let Value::Mapping(map) = node else {
            bail!("Path {} is not a mapping", path[..depth].join("."));
        };
        node = map
            .get(key(name))
            .ok_or_else(|| anyhow!("Path {} does not exist", path[..=depth].join(".")))?;
    }
    Ok(node)
}

fn insert_at(tree: &mut Value, path: &[&str], value: Value) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        *tree = value;
        return Ok(());
    };

    let mut node = tree;
    for (depth, name) in parents.iter().enumerate() {
        let Value::Mapping(map) = node else {
            bail!("Path {} is not a mapping", path[..depth].join("."));
        };
        node = map
            .entry(key(name))
            .or_insert_with(|| Value::Mapping(Mapping::new()));
    }

    match node {
        Value::Mapping(map) => {
            map.insert(key(last), value);
            Ok(())
        }
        _ => bail!("Path {} is not a mapping", parents.join(".")),
    }
}

/// Applies `ARTXR_CONFIG__A__B=value` pairs to the tree
///
/// Values are parsed as YAML scalars, so `12` and `true` keep their type.
fn apply_env_overrides(tree: &mut Value, vars: impl IntoIterator<Item = (String, String)>) {
    for (name, raw) in vars {
        let Some(suffix) = name.strip_prefix(ENV_PREFIX) else {
            continue;
        };
        let path: Vec<&str> = suffix.split("__").collect();
        debug!(env_var = %name, "Applying environment override");
        if let Err(e) = insert_at(tree, &path, parse_env_value(&raw)) {
            warn!(env_var = %name, "Ignoring environment override: {}", e);
        }
    }
}

fn parse_env_value(raw: &str) -> Value {
    serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Mapping(map) => Value::Mapping(
            map.into_iter()
                .map(|(k, v)| {
                    let k = match k {
                        Value::String(s) => Value::String(s.to_lowercase()),
                        other => other,
                    };
                    (k, lowercase_keys(v))
                })
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

/// Overlays `user` onto `base`
///
/// Mappings merge key by key; any other user value replaces the base one.
fn overlay_yaml(base: &mut Value, user: Value) {
    match (base, user) {
        (Value::Mapping(base_map), Value::Mapping(user_map)) => {
            for (k, v) in user_map {
                match base_map.get_mut(&k) {
                    Some(slot) => overlay_yaml(slot, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (slot, v) => *slot = v,
    }
}
