use anyhow::{Context, Result, bail};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub backend_url: String,
    pub backend_key: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; `BACKEND_URL` and
    /// `BACKEND_KEY` are mandatory
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend_url = lookup("BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .context("Cannot load BACKEND_URL env variable")?;
        let backend_key = lookup("BACKEND_KEY")
            .filter(|v| !v.trim().is_empty())
            .context("Cannot load BACKEND_KEY env variable")?;

        let port = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a number")?,
            None => 8080,
        };

        let run_migrations = match lookup("RUN_MIGRATIONS").as_deref() {
            None | Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => bail!("RUN_MIGRATIONS must be true or false, got {other}"),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            backend_url,
            backend_key,
            run_migrations,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("BACKEND_URL", "https://project.supabase.co"),
            ("BACKEND_KEY", "anon-key"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert!(config.run_migrations);
        assert_eq!(config.backend_key, "anon-key");
    }

    #[test]
    fn test_missing_backend_url_is_fatal() {
        let err = Config::from_lookup(lookup(&[("BACKEND_KEY", "anon-key")])).unwrap_err();
        assert!(err.to_string().contains("BACKEND_URL"));
    }

    #[test]
    fn test_missing_backend_key_is_fatal() {
        let err = Config::from_lookup(lookup(&[
            ("BACKEND_URL", "https://project.supabase.co"),
            ("BACKEND_KEY", "  "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("BACKEND_KEY"));
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup(&[
            ("BACKEND_URL", "postgres://db/merdeka"),
            ("BACKEND_KEY", "secret"),
            ("PORT", "eighty"),
        ]));
        assert!(result.is_err());
    }
}
