use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .herbalrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().flatten() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn request_timeout_secs(&self) -> u64 {
        self.get("REQUEST_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(60)
    }
}

fn is_config_key(k: &str) -> bool {
    // Accept known keys or HERBAL_* for forward-compat
    const KEYS: &[&str] = &[
        "GROQ_API_KEY",
        "PEXELS_API_KEY",
        "API_BASE_URL",
        "PEXELS_API_BASE",
        "REQUEST_TIMEOUT",
        "DEFAULT_MODEL",
        "DEFAULT_COLOR",
        "PRETTIFY_MARKDOWN",
    ];

    KEYS.contains(&k) || k.starts_with("HERBAL_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("herbal").join(".herbalrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    // Numbers
    m.insert("REQUEST_TIMEOUT".into(), "60".into());

    // Strings
    m.insert("DEFAULT_MODEL".into(), "llama-3.3-70b-versatile".into());
    m.insert("DEFAULT_COLOR".into(), "green".into());
    m.insert("API_BASE_URL".into(), "default".into());
    m.insert("PEXELS_API_BASE".into(), "https://api.pexels.com".into());

    // Bools as strings
    m.insert("PRETTIFY_MARKDOWN".into(), "true".into());

    m
}
