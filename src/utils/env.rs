use std::{env, str::FromStr};

pub fn parse_env<T>(key: &str, default: &str) -> T
where
    T: FromStr + Default,
    <T as FromStr>::Err: std::fmt::Debug,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_default(),
        Err(_) => default.parse().unwrap_or_default(),
    }
}

pub fn parse_env_opt<T>(key: &str) -> Option<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::fmt::Debug,
{
    let raw = env::var(key).ok()?;
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}
