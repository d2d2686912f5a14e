use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub data_file: PathBuf,
    pub static_dir: PathBuf,
    pub upload_dir: PathBuf,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
    pub max_upload_bytes: usize,

    // Presentation
    pub site_title: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; unset or empty values fall back to defaults
    /// that match running the board from its checkout directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let static_dir = PathBuf::from(env_or_default("STATIC_DIR", "./static"));
        let upload_dir = optional_env("UPLOAD_DIR")
            .map_or_else(|| static_dir.join("uploads"), PathBuf::from);

        Ok(Self {
            // Storage
            data_file: PathBuf::from(env_or_default("DATA_FILE", "./questions.json")),
            static_dir,
            upload_dir,

            // Web Server
            web_host: env_or_default("WEB_HOST", "127.0.0.1"),
            web_port: parse_env_u16("WEB_PORT", 5000)?,
            max_upload_bytes: parse_env_usize("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,

            // Presentation
            site_title: env_or_default("SITE_TITLE", "Answerious"),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_UPLOAD_BYTES".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "SITE_TITLE".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if self.data_file.as_os_str().is_empty() || self.data_file.file_name().is_none() {
            return Err(ConfigError::InvalidValue {
                name: "DATA_FILE".to_string(),
                message: "must name a file".to_string(),
            });
        }
        Ok(())
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    optional_env(name).unwrap_or_else(|| default.to_string())
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_usize(name: &str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 7] = [
        "DATA_FILE",
        "STATIC_DIR",
        "UPLOAD_DIR",
        "WEB_HOST",
        "WEB_PORT",
        "MAX_UPLOAD_BYTES",
        "SITE_TITLE",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.data_file, PathBuf::from("./questions.json"));
        assert_eq!(config.static_dir, PathBuf::from("./static"));
        assert_eq!(config.upload_dir, PathBuf::from("./static").join("uploads"));
        assert_eq!(config.web_host, "127.0.0.1");
        assert_eq!(config.web_port, 5000);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.site_title, "Answerious");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_upload_dir_follows_static_dir() {
        clear_env();
        std::env::set_var("STATIC_DIR", "/srv/board/static");
        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.upload_dir, PathBuf::from("/srv/board/static/uploads"));
    }

    #[test]
    #[serial]
    fn test_explicit_upload_dir() {
        clear_env();
        std::env::set_var("UPLOAD_DIR", "/var/uploads");
        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.upload_dir, PathBuf::from("/var/uploads"));
    }

    #[test]
    #[serial]
    fn test_invalid_port() {
        clear_env();
        std::env::set_var("WEB_PORT", "not-a-port");
        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::ParseInt { ref name, .. }) if name == "WEB_PORT"));
    }

    #[test]
    #[serial]
    fn test_validate_rejects_zero_upload_limit() {
        clear_env();
        std::env::set_var("MAX_UPLOAD_BYTES", "0");
        let config = Config::from_env().unwrap();
        clear_env();

        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_validate_rejects_blank_title() {
        clear_env();
        let mut config = Config::from_env().unwrap();
        config.site_title = "   ".to_string();

        assert!(config.validate().is_err());
    }
}
