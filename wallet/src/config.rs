use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use anyhow::{Context, Result};
use tokenview_common::{
    cache::DEFAULT_MEMO_MAP_CAPACITY,
    models::DEFAULT_TEST_NETWORKS,
    KnownNetworks,
    LogLevel,
    LoggerConfig,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Cấu hình log
    pub log_level: LogLevel,
    pub log_ansi: bool,

    // Hiển thị số dư trên mạng test (mặc định cho snapshot mới)
    pub show_fiat_in_testnets: bool,

    // Các chain id (hex) được coi là mạng test
    pub test_network_chain_ids: Vec<String>,

    // Số entry tối đa của cache single-token-balance
    pub single_token_cache_capacity: usize,
}

impl Config {
    pub fn new() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_ansi: true,
            show_fiat_in_testnets: false,
            test_network_chain_ids: DEFAULT_TEST_NETWORKS
                .iter()
                .map(|chain_id| chain_id.to_string())
                .collect(),
            single_token_cache_capacity: DEFAULT_MEMO_MAP_CAPACITY.get(),
        }
    }

    /// Đọc config từ file; nếu chưa có thì ghi file mặc định
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            let default_config = Self::new();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Không thể đọc file config {}", path))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("File config không hợp lệ: {}", path))?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(path, json)
            .with_context(|| format!("Không thể ghi file config {}", path))?;
        Ok(())
    }

    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            default_level: self.log_level,
            with_ansi: self.log_ansi,
        }
    }

    pub fn network_classifier(&self) -> KnownNetworks {
        KnownNetworks::new(self.test_network_chain_ids.iter().cloned())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
