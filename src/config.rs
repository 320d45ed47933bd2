use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::typewriter::HidePolicy;
use crate::viewport::{TrackingPolicy, DEFAULT_THRESHOLD};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub intro: String,
    pub visibility_threshold: f64,
    pub latch_sections: bool,
    pub clear_intro_on_hide: bool,
    pub resume_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intro: "Hi, I'm Christian! I build apps and website :D".to_string(),
            visibility_threshold: DEFAULT_THRESHOLD,
            latch_sections: false,
            clear_intro_on_hide: false,
            resume_url: "https://example.com/Alejandro_CV.pdf".to_string(),
        }
    }
}

impl Config {
    pub fn tracking_policy(&self) -> TrackingPolicy {
        if self.latch_sections {
            TrackingPolicy::Latch
        } else {
            TrackingPolicy::Bidirectional
        }
    }

    pub fn hide_policy(&self) -> HidePolicy {
        if self.clear_intro_on_hide {
            HidePolicy::Clear
        } else {
            HidePolicy::Keep
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "folio") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("folio_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<Config>(&bytes) {
                return cfg;
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
