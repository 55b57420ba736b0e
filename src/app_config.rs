//! Config file loading and layering for the CLI.
//!
//! Settings resolve as CLI flag, then config file, then built-in default.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use toshi_core::PipelineConfig;

use crate::cli::Args;

/// Values read from `config.toml`; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Catalog search endpoint.
    pub base_url: Option<String>,
    /// Default output directory for downloads.
    pub output_dir: Option<PathBuf>,
    /// Default format filter; `"all"` disables filtering.
    pub format: Option<String>,
    /// Delay between results pages in milliseconds.
    pub page_delay_ms: Option<u64>,
    /// Search time budget in seconds.
    pub search_timeout_secs: Option<u64>,
    /// Download time budget in seconds.
    pub download_timeout_secs: Option<u64>,
    /// User-Agent header.
    pub user_agent: Option<String>,
}

impl FileConfig {
    /// Validates values against the same ranges the CLI enforces.
    pub fn validate(&self) -> Result<()> {
        if let Some(delay) = self.page_delay_ms
            && delay > 60_000
        {
            bail!("Invalid config value for `page_delay_ms`: {delay}. Expected range: 0..=60000");
        }
        validate_timeout_secs("search_timeout_secs", self.search_timeout_secs)?;
        validate_timeout_secs("download_timeout_secs", self.download_timeout_secs)?;
        if let Some(format) = &self.format
            && format.trim().is_empty()
        {
            bail!("Invalid config value for `format`: expected a file extension or \"all\"");
        }
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

/// Resolves the default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/toshi/config.toml`
/// 2. `$HOME/.config/toshi/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(xdg_config_home).join("toshi").join("config.toml"));
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("toshi").join("config.toml"))
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file from the default path, if one exists.
pub fn load_default_file_config() -> Result<Option<FileConfig>> {
    match resolve_default_config_path() {
        Some(path) if path.exists() => load_file_config(&path).map(Some),
        _ => Ok(None),
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let string_value = || {
            parse_string_literal(value)
                .with_context(|| format!("Invalid `{key}` value on line {line_no}"))
        };
        let integer_value = || {
            parse_integer_u64(value)
                .with_context(|| format!("Invalid `{key}` value on line {line_no}"))
        };

        match key {
            "base_url" => cfg.base_url = Some(string_value()?),
            "output_dir" => cfg.output_dir = Some(PathBuf::from(string_value()?)),
            "format" => cfg.format = Some(string_value()?),
            "user_agent" => cfg.user_agent = Some(string_value()?),
            "page_delay_ms" => cfg.page_delay_ms = Some(integer_value()?),
            "search_timeout_secs" => cfg.search_timeout_secs = Some(integer_value()?),
            "download_timeout_secs" => cfg.download_timeout_secs = Some(integer_value()?),
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

/// Merges CLI flags over file values over built-in defaults.
#[must_use]
pub fn merge(args: &Args, file: Option<&FileConfig>) -> PipelineConfig {
    let file = file.cloned().unwrap_or_default();
    let defaults = PipelineConfig::default();

    let format = if args.all_formats {
        None
    } else {
        match args.format.clone().or(file.format) {
            Some(format) if format.trim().eq_ignore_ascii_case("all") => None,
            Some(format) => Some(format.trim().to_string()),
            None => defaults.format,
        }
    };

    PipelineConfig {
        base_url: args.base_url.clone().or(file.base_url).unwrap_or(defaults.base_url),
        page_delay: args
            .page_delay_ms
            .or(file.page_delay_ms)
            .map_or(defaults.page_delay, Duration::from_millis),
        output_dir: args.output_dir.clone().or(file.output_dir).unwrap_or(defaults.output_dir),
        format,
        search_timeout: args
            .search_timeout
            .or(file.search_timeout_secs)
            .map_or(defaults.search_timeout, Duration::from_secs),
        download_timeout: args
            .download_timeout
            .or(file.download_timeout_secs)
            .map_or(defaults.download_timeout, Duration::from_secs),
        user_agent: args.user_agent.clone().or(file.user_agent).unwrap_or(defaults.user_agent),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_parse_config_partial_fields() {
        let cfg = parse_config_str(
            r#"
output_dir = "/srv/books"
page_delay_ms = 250
"#,
        )
        .expect("partial config should parse");
        assert_eq!(cfg.output_dir, Some(PathBuf::from("/srv/books")));
        assert_eq!(cfg.page_delay_ms, Some(250));
        assert!(cfg.base_url.is_none());
    }

    #[test]
    fn test_parse_config_supports_inline_comments() {
        let cfg = parse_config_str(
            r#"
# catalog settings
base_url = "https://books.example/search.php#x" # fragment kept inside quotes
format = "pdf" # preferred format
"#,
        )
        .expect("config with comments should parse");
        assert_eq!(cfg.base_url.as_deref(), Some("https://books.example/search.php#x"));
        assert_eq!(cfg.format.as_deref(), Some("pdf"));
    }

    #[test]
    fn test_parse_config_rejects_unknown_keys() {
        let err = parse_config_str("concurrency = 4").expect_err("unknown key error expected");
        assert!(err.to_string().contains("Unknown configuration key"));
        assert!(err.to_string().contains("concurrency"));
    }

    #[test]
    fn test_parse_config_rejects_missing_equals() {
        let err = parse_config_str("base_url").expect_err("syntax error expected");
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_parse_config_rejects_unquoted_string() {
        let err = parse_config_str("format = epub").expect_err("quoted string expected");
        assert!(err.to_string().contains("format"));
    }

    #[test]
    fn test_parse_config_rejects_page_delay_out_of_range() {
        let err = parse_config_str("page_delay_ms = 60001").expect_err("range error expected");
        assert!(err.to_string().contains("page_delay_ms"));
    }

    #[test]
    fn test_parse_config_rejects_zero_timeout() {
        let err = parse_config_str("download_timeout_secs = 0").expect_err("range error expected");
        assert!(err.to_string().contains("download_timeout_secs"));
    }

    #[test]
    fn test_parse_config_rejects_negative_integer() {
        let err = parse_config_str("search_timeout_secs = -5").expect_err("negative rejected");
        assert!(err.to_string().contains("search_timeout_secs"));
    }

    #[test]
    fn test_merge_uses_defaults_without_file_or_flags() {
        let args = Args::try_parse_from(["toshi", "x"]).unwrap();
        assert_eq!(merge(&args, None), PipelineConfig::default());
    }

    #[test]
    fn test_merge_prefers_flags_over_file() {
        let args =
            Args::try_parse_from(["toshi", "--page-delay-ms", "5", "-o", "cli-out", "x"]).unwrap();
        let file = FileConfig {
            page_delay_ms: Some(500),
            output_dir: Some(PathBuf::from("file-out")),
            search_timeout_secs: Some(12),
            ..FileConfig::default()
        };
        let config = merge(&args, Some(&file));
        assert_eq!(config.page_delay, Duration::from_millis(5));
        assert_eq!(config.output_dir, PathBuf::from("cli-out"));
        assert_eq!(config.search_timeout, Duration::from_secs(12));
    }

    #[test]
    fn test_merge_format_all_disables_filter() {
        let args = Args::try_parse_from(["toshi", "x"]).unwrap();
        let file = FileConfig {
            format: Some("all".to_string()),
            ..FileConfig::default()
        };
        assert_eq!(merge(&args, Some(&file)).format, None);

        let args = Args::try_parse_from(["toshi", "--all-formats", "x"]).unwrap();
        assert_eq!(merge(&args, None).format, None);

        let args = Args::try_parse_from(["toshi", "-f", " PDF ", "x"]).unwrap();
        assert_eq!(merge(&args, None).format.as_deref(), Some("PDF"));
    }
}
