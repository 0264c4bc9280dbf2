use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "app.json";

const FEED_URL: &str = "FEED_URL";
const FEED_INTERVAL_SECS: &str = "FEED_INTERVAL_SECS";
const WEB_BIND: &str = "WEB_BIND";

#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    pub feed: Feed,
    pub web: Web,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Feed {
    /// 報價來源的端點
    #[serde(default)]
    pub url: String,
    /// 快照更新間隔(秒)
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    60
}

impl Default for Feed {
    fn default() -> Self {
        Feed {
            url: String::new(),
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Web {
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for Web {
    fn default() -> Self {
        Web {
            bind: default_bind(),
        }
    }
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| App::get().expect("Config error"));

impl App {
    fn get() -> Result<Self> {
        let config_path = PathBuf::from(CONFIG_PATH);
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::default().override_with_env())
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(url) = env::var(FEED_URL) {
            self.feed.url = url;
        }

        if let Ok(secs) = env::var(FEED_INTERVAL_SECS) {
            self.feed.interval_secs =
                u64::from_str(&secs).unwrap_or_else(|_| default_interval_secs());
        }

        if let Ok(bind) = env::var(WEB_BIND) {
            self.web.bind = bind;
        }

        self
    }
}
