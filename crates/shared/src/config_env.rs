use url::Url;

use crate::config::ConfigError;

/// Key/value source the configuration is read from. The process environment in
/// production, a fixed map in tests.
pub(crate) trait EnvLookup {
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<F> EnvLookup for F
where
    F: Fn(&str) -> Option<String>,
{
    fn lookup(&self, key: &str) -> Option<String> {
        self(key)
    }
}

pub(crate) fn optional_trimmed_env(env: &impl EnvLookup, key: &str) -> Option<String> {
    env.lookup(key).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

pub(crate) fn parse_u64_env(
    env: &impl EnvLookup,
    key: &str,
    default: u64,
) -> Result<u64, ConfigError> {
    match optional_trimmed_env(env, key) {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|_| ConfigError::ParseInt(key.to_string())),
        None => Ok(default),
    }
}

pub(crate) fn parse_usize_env(
    env: &impl EnvLookup,
    key: &str,
    default: usize,
) -> Result<usize, ConfigError> {
    match optional_trimmed_env(env, key) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| ConfigError::ParseInt(key.to_string())),
        None => Ok(default),
    }
}

pub(crate) fn parse_list_env(env: &impl EnvLookup, key: &str, default: &[&str]) -> Vec<String> {
    match optional_trimmed_env(env, key) {
        Some(raw) => raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(ToString::to_string)
            .collect(),
        None => default.iter().map(|item| (*item).to_string()).collect(),
    }
}

pub(crate) fn parse_base_url_env(
    env: &impl EnvLookup,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    let raw = optional_trimmed_env(env, key).unwrap_or_else(|| default.to_string());
    let parsed = Url::parse(&raw)
        .map_err(|_| ConfigError::InvalidConfiguration(format!("{key} must be a valid URL")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidConfiguration(format!(
            "{key} must start with http:// or https://"
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}
