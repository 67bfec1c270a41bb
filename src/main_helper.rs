use crate::constants::{DEFAULT_THEME_FILE, TOAST_TTL_MS};
use crate::log_record::HistoricalLogRecord;
use crate::types::*;
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Load a proxied request log into the playground", long_about = None)]
pub struct Args {
    /// Log record JSON file, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub record: String,
    #[arg(long, env = "PROMPTDECK_LOG_DIR", default_value = "logs")]
    pub log_dir: PathBuf,
    #[arg(long, default_value = DEFAULT_THEME_FILE)]
    pub theme_file: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
    #[arg(long)]
    pub temperature: Option<f64>,
    #[arg(long, default_value_t = false)]
    pub no_stream: bool,
    #[arg(long, default_value_t = TOAST_TTL_MS)]
    pub toast_ttl_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Coloured transcript
    Pretty,
    /// Chat-completion request body
    Json,
}

impl Args {
    pub fn read_record(&self) -> Result<HistoricalLogRecord> {
        let raw = if self.record == "-" {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        } else {
            std::fs::read_to_string(&self.record)?
        };

        if raw.trim().is_empty() {
            return Err(DeckError::InvalidRecord(format!("{} is empty", self.record)).into());
        }
        HistoricalLogRecord::from_json(&raw)
    }
}
