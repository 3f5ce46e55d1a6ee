//! Configuration loading with env-var overrides.
//!
//! Reads TOML files, supports `[meta] base = "..."` inheritance chains,
//! and applies `BASICGEN_BIND` and `BASICGEN_LOG_LEVEL` env overrides.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AppError;

use super::raw::{self, RawConfig};
use super::types::*;

/// Deep-merge two TOML values.
/// Tables are merged recursively — the overlay only needs to specify keys that
/// differ from the base. For every other type (string, integer, array, …)
/// the overlay value replaces the base value wholesale.
fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_tbl), toml::Value::Table(overlay_tbl)) => {
            for (key, ov_val) in overlay_tbl {
                let merged = match base_tbl.remove(&key) {
                    Some(base_val) => merge_toml(base_val, ov_val),
                    None => ov_val,
                };
                base_tbl.insert(key, merged);
            }
            toml::Value::Table(base_tbl)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file, follow any `[meta] base = "..."` chain, and return the
/// fully merged `toml::Value`. `visited` carries canonicalized paths already
/// seen in this chain so circular references are caught early.
fn load_raw_merged(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<toml::Value, AppError> {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical) {
        return Err(AppError::Config(format!(
            "circular base reference detected at: {}",
            path.display()
        )));
    }

    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let overlay_val: toml::Value = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    if let Some(base_str) = overlay_val
        .get("meta")
        .and_then(|m| m.get("base"))
        .and_then(|b| b.as_str())
    {
        let base_path = if Path::new(base_str).is_absolute() {
            PathBuf::from(base_str)
        } else {
            path.parent().unwrap_or(Path::new(".")).join(base_str)
        };
        let base_val = load_raw_merged(&base_path, visited)?;
        Ok(merge_toml(base_val, overlay_val))
    } else {
        Ok(overlay_val)
    }
}

/// Load config from the given path, or `config/default.toml`, then apply env-var overrides.
/// If no path is given and `config/default.toml` does not exist, returns a hardcoded minimal default.
pub fn load(config_path: Option<&str>) -> Result<Config, AppError> {
    let bind_override = env::var("BASICGEN_BIND").ok();
    let log_level_override = env::var("BASICGEN_LOG_LEVEL").ok();

    if let Some(path) = config_path {
        return load_from(
            Path::new(path),
            bind_override.as_deref(),
            log_level_override.as_deref(),
        );
    }

    let default_path = Path::new("config/default.toml");
    if default_path.exists() {
        load_from(
            default_path,
            bind_override.as_deref(),
            log_level_override.as_deref(),
        )
    } else {
        // Hardcoded minimal default
        Ok(Config {
            service_name: "basicgen".to_string(),
            log_level: log_level_override.unwrap_or_else(|| "info".to_string()),
            http: HttpConfig {
                bind: bind_override.unwrap_or_else(raw::default_http_bind),
            },
            generate: GenerateConfig { shortcircuit: true },
            llm: LlmConfig {
                provider: raw::default_llm_provider(),
                anthropic: AnthropicConfig {
                    api_base_url: raw::default_api_base_url(),
                    model: raw::default_model(),
                    max_tokens: raw::default_max_tokens(),
                    temperature: raw::default_temperature(),
                    timeout_seconds: raw::default_timeout_seconds(),
                },
            },
            llm_api_key: env::var("ANTHROPIC_API_KEY").ok(),
        })
    }
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
/// Follows `[meta] base = "..."` inheritance chains before resolving.
pub fn load_from(
    path: &Path,
    bind_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let merged_val = load_raw_merged(path, &mut HashSet::new())?;

    let parsed: RawConfig = Deserialize::deserialize(merged_val).map_err(|e: toml::de::Error| {
        AppError::Config(format!("config error in {}: {e}", path.display()))
    })?;

    let s = parsed.server;
    let log_level = log_level_override.unwrap_or(&s.log_level).to_string();
    let bind = bind_override.unwrap_or(&parsed.http.bind).to_string();

    let a = parsed.llm.anthropic;

    Ok(Config {
        service_name: s.name,
        log_level,
        http: HttpConfig { bind },
        generate: GenerateConfig {
            shortcircuit: parsed.generate.shortcircuit,
        },
        llm: LlmConfig {
            provider: parsed.llm.provider,
            anthropic: AnthropicConfig {
                api_base_url: a.api_base_url,
                model: a.model,
                max_tokens: a.max_tokens,
                temperature: a.temperature,
                timeout_seconds: a.timeout_seconds,
            },
        },
        llm_api_key: env::var("ANTHROPIC_API_KEY").ok(),
    })
}
