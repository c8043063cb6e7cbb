use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    // bearer token forwarded to the hosting API
    pub token: String,

    // repository, eg: octocat/hello-world
    pub repo: String,

    // branch whose tip is tracked
    pub branch: String,

    // pause between the end of one poll cycle and the start of the next
    pub update_interval: Duration,

    // timeout applied to every outbound request
    pub client_timeout: Duration,

    // listen port of the badge server
    pub port: String,

    // API base url, without trailing slash
    pub api_url: String,

    // directory holding {success,failure,pending,error}.svg
    pub badge_dir: PathBuf,

    // drop contexts that disappeared from the latest upstream report
    pub purge_stale: bool,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is not set
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl std::error::Error for ConfigError {}

impl fmt::Display for ConfigError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Missing(var) => write!(fmt, "{} not set", var),
            ConfigError::Invalid { var, value, reason } => {
                write!(fmt, "{} has invalid value '{}': {}", var, value, reason)
            }
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("GITHUB_TOKEN").ok_or(ConfigError::Missing("GITHUB_TOKEN"))?;
        let repo = lookup("GITHUB_REPO").ok_or(ConfigError::Missing("GITHUB_REPO"))?;

        let branch = lookup("GIT_BRANCH").unwrap_or_else(|| "master".to_string());
        let update_interval = parse_seconds(&lookup, "GITHUB_STATUS_UPDATE_INTERVAL", 30)?;
        let client_timeout = parse_seconds(&lookup, "CLIENT_TIMEOUT", 30)?;
        let port = lookup("PORT").unwrap_or_else(|| "8080".to_string());
        let api_url = lookup("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        if !matches!(url::Url::parse(&api_url), Ok(ref base) if !base.cannot_be_a_base()) {
            return Err(ConfigError::Invalid {
                var: "GITHUB_API_URL",
                value: api_url,
                reason: "should be an absolute http(s) url".to_string(),
            });
        }
        let badge_dir = PathBuf::from(lookup("BADGE_DIR").unwrap_or_else(|| "images".to_string()));
        let purge_stale = match lookup("PURGE_STALE_CONTEXTS") {
            Some(value) => parse_bool("PURGE_STALE_CONTEXTS", value)?,
            None => false,
        };

        Ok(Config {
            token,
            repo,
            branch,
            update_interval,
            client_timeout,
            port,
            api_url,
            badge_dir,
            purge_stale,
        })
    }
}

fn parse_seconds<F>(lookup: &F, var: &'static str, default: u64) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = match lookup(var) {
        Some(value) => value,
        None => return Ok(Duration::from_secs(default)),
    };
    match value.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            value,
            reason: "should be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            value,
            reason: format!("should be an integer: {}", e),
        }),
    }
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value,
            reason: "should be a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = load(&[("GITHUB_TOKEN", "t0k3n"), ("GITHUB_REPO", "octo/hello")]).unwrap();
        assert_eq!(cfg.token, "t0k3n");
        assert_eq!(cfg.repo, "octo/hello");
        assert_eq!(cfg.branch, "master");
        assert_eq!(cfg.update_interval, Duration::from_secs(30));
        assert_eq!(cfg.client_timeout, Duration::from_secs(30));
        assert_eq!(cfg.port, "8080");
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.badge_dir, PathBuf::from("images"));
        assert!(!cfg.purge_stale);
    }

    #[test]
    fn test_overrides() {
        let cfg = load(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_REPO", "octo/hello"),
            ("GIT_BRANCH", "main"),
            ("GITHUB_STATUS_UPDATE_INTERVAL", "5"),
            ("CLIENT_TIMEOUT", "2"),
            ("PORT", "9000"),
            ("GITHUB_API_URL", "http://127.0.0.1:4000/"),
            ("BADGE_DIR", "/srv/badges"),
            ("PURGE_STALE_CONTEXTS", "true"),
        ])
        .unwrap();
        assert_eq!(cfg.branch, "main");
        assert_eq!(cfg.update_interval, Duration::from_secs(5));
        assert_eq!(cfg.client_timeout, Duration::from_secs(2));
        assert_eq!(cfg.port, "9000");
        assert_eq!(cfg.api_url, "http://127.0.0.1:4000");
        assert_eq!(cfg.badge_dir, PathBuf::from("/srv/badges"));
        assert!(cfg.purge_stale);
    }

    #[test]
    fn test_missing_required() {
        assert_eq!(
            load(&[("GITHUB_REPO", "octo/hello")]).unwrap_err(),
            ConfigError::Missing("GITHUB_TOKEN")
        );
        assert_eq!(
            load(&[("GITHUB_TOKEN", "t")]).unwrap_err(),
            ConfigError::Missing("GITHUB_REPO")
        );
        assert!(load(&[]).is_err());
    }

    #[test]
    fn test_invalid_interval() {
        let err = load(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_REPO", "octo/hello"),
            ("GITHUB_STATUS_UPDATE_INTERVAL", "soon"),
        ])
        .unwrap_err();
        match err {
            ConfigError::Invalid { var, value, .. } => {
                assert_eq!(var, "GITHUB_STATUS_UPDATE_INTERVAL");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_timeout_and_purge_flag() {
        assert!(load(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_REPO", "octo/hello"),
            ("CLIENT_TIMEOUT", "-1"),
        ])
        .is_err());
        assert!(load(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_REPO", "octo/hello"),
            ("GITHUB_STATUS_UPDATE_INTERVAL", "0"),
        ])
        .is_err());
        assert!(load(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_REPO", "octo/hello"),
            ("PURGE_STALE_CONTEXTS", "maybe"),
        ])
        .is_err());
    }

    #[test]
    fn test_invalid_api_url() {
        for bad in ["api.github.com", "mailto:ops@example.com"] {
            let err = load(&[
                ("GITHUB_TOKEN", "t"),
                ("GITHUB_REPO", "octo/hello"),
                ("GITHUB_API_URL", bad),
            ])
            .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { var: "GITHUB_API_URL", .. }));
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ConfigError::Missing("GITHUB_TOKEN").to_string(), "GITHUB_TOKEN not set");
    }
}
