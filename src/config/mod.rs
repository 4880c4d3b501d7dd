//! Configuration module for the roster backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use chrono_tz::Tz;
use thiserror::Error;

use crate::roster::GeneratorConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    pub log_format: LogFormat,
    /// Shape of the seed roster
    pub generator: GeneratorConfig,
    /// Fixed RNG seed for reproducible seed data
    pub seed: Option<u64>,
}

/// A configuration variable that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = GeneratorConfig::default();

        let bind_addr = parse_or(
            &lookup,
            "ROSTER_BIND_ADDR",
            SocketAddr::from(([127, 0, 0, 1], 8080)),
        )?;

        let log_level = lookup("ROSTER_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let log_format = match lookup("ROSTER_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError {
                    var: "ROSTER_LOG_FORMAT",
                    message: format!("expected `text` or `json`, got `{}`", other),
                })
            }
        };

        let generator = GeneratorConfig {
            member_count: parse_or(&lookup, "ROSTER_MEMBER_COUNT", defaults.member_count)?,
            project_count: parse_or(&lookup, "ROSTER_PROJECT_COUNT", defaults.project_count)?,
            skills: list_or(&lookup, "ROSTER_SKILLS", defaults.skills),
            manager_skill: lookup("ROSTER_MANAGER_SKILL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.manager_skill),
            timezones: parse_timezones(&lookup, defaults.timezones)?,
            min_workday_hours: parse_or(
                &lookup,
                "ROSTER_MIN_WORKDAY_HOURS",
                defaults.min_workday_hours,
            )?,
            max_workday_hours: parse_or(
                &lookup,
                "ROSTER_MAX_WORKDAY_HOURS",
                defaults.max_workday_hours,
            )?,
            min_start_hour: parse_or(&lookup, "ROSTER_MIN_START_HOUR", defaults.min_start_hour)?,
            max_start_hour: parse_or(&lookup, "ROSTER_MAX_START_HOUR", defaults.max_start_hour)?,
        };

        let seed = parse_optional(&lookup, "ROSTER_SEED")?;

        Ok(Self {
            bind_addr,
            log_level,
            log_format,
            generator,
            seed,
        })
    }
}

/// Parse `var` if set; otherwise use `default`.
fn parse_or<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    Ok(parse_optional(lookup, var)?.unwrap_or(default))
}

/// Parse `var` if set.
fn parse_optional<F, T>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => {
            let raw = raw.trim();
            raw.parse::<T>().map(Some).map_err(|e| ConfigError {
                var,
                message: format!("`{}`: {}", raw, e),
            })
        }
        _ => Ok(None),
    }
}

fn list_or<F>(lookup: &F, var: &str, default: Vec<String>) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        Some(raw) if !raw.trim().is_empty() => split_list(&raw),
        _ => default,
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_timezones<F>(lookup: &F, default: Vec<Tz>) -> Result<Vec<Tz>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup("ROSTER_TIMEZONES").filter(|s| !s.trim().is_empty()) else {
        return Ok(default);
    };
    split_list(&raw)
        .iter()
        .map(|name| {
            name.parse::<Tz>().map_err(|_| ConfigError {
                var: "ROSTER_TIMEZONES",
                message: format!("unknown timezone `{}`", name),
            })
        })
        .collect()
}
