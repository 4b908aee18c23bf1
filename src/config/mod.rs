pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_file_extension, validate_path, validate_utc_offset, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "togrow")]
#[command(about = "Solar-term calendar and planting guide service")]
pub struct CliConfig {
    #[arg(long, global = true, default_value = "./data/plants.json")]
    pub catalog: String,

    #[arg(long, global = true, default_value = "8", allow_hyphen_values = true)]
    pub utc_offset_hours: i32,

    #[arg(long, global = true, default_value = "6")]
    pub default_limit: usize,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// 查詢某日 (預設今天) 的節氣
    Term {
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
    },
    /// 列出適合某節氣的植物指南
    Guides {
        /// 節氣名稱；省略時使用 --date 或今天所屬的節氣
        #[arg(long)]
        term: Option<String>,

        #[arg(long)]
        date: Option<String>,

        /// 筆數上限，`all` 表示不限
        #[arg(long)]
        limit: Option<String>,
    },
    /// 啟動 HTTP 伺服器
    Serve {
        /// Path to TOML configuration file
        #[arg(short, long, default_value = "togrow.toml")]
        config: String,
    },
    /// 將內建樣本寫入目錄檔 (已存在時略過，除非 --force)
    InitCatalog {
        #[arg(long)]
        force: bool,
    },
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_path(&self) -> &str {
        &self.catalog
    }

    fn utc_offset_hours(&self) -> i32 {
        self.utc_offset_hours
    }

    fn default_guide_limit(&self) -> usize {
        self.default_limit
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("catalog", &self.catalog)?;
        validate_file_extension("catalog", &self.catalog, &["json", "csv"])?;
        validate_utc_offset("utc_offset_hours", self.utc_offset_hours)?;
        Ok(())
    }
}
