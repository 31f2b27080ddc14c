use anyhow::Context;
use chrono::FixedOffset;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage_dir: PathBuf,
    pub currency: String,
    pub utc_offset: String,
    pub log_level: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".cart"),
            currency: "₹".to_string(),
            utc_offset: "+05:30".to_string(),
            log_level: "info".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();
        let config = Config {
            storage_dir: env::var("CART_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            currency: env::var("CART_CURRENCY").unwrap_or(defaults.currency),
            utc_offset: env::var("CART_UTC_OFFSET").unwrap_or(defaults.utc_offset),
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            environment: env::var("APP_ENV").unwrap_or(defaults.environment),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.storage_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("CART_STORAGE_DIR must not be empty"));
        }

        if self.currency.trim().is_empty() {
            return Err(anyhow::anyhow!("CART_CURRENCY must not be empty"));
        }

        self.offset()?;
        Ok(())
    }

    /// The project time zone as a fixed UTC offset.
    pub fn offset(&self) -> anyhow::Result<FixedOffset> {
        parse_offset(&self.utc_offset)
            .with_context(|| format!("CART_UTC_OFFSET {:?} is not a valid offset like +05:30", self.utc_offset))
    }
}

fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    let (sign, rest) = match raw.chars().next()? {
        '+' => (1, &raw[1..]),
        '-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..24).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.offset().unwrap().local_minus_utc(), 5 * 3600 + 30 * 60);
    }

    #[test]
    fn parses_signed_offsets() {
        assert_eq!(parse_offset("-08:00").unwrap().local_minus_utc(), -8 * 3600);
        assert_eq!(parse_offset("+00:00").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_offset("+9").unwrap().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn rejects_bad_offsets_and_currency() {
        assert!(parse_offset("05:30").is_none());
        assert!(parse_offset("+25:00").is_none());
        assert!(parse_offset("+aa:bb").is_none());

        let config = Config {
            currency: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            utc_offset: "IST".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
