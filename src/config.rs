use anyhow::{Context, Result, anyhow};
use lettre::message::Mailbox;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone)]
pub struct Config {
    pub server_addr: String,
    pub log_dir: String,
    pub store: StoreConfig,
    pub mail: MailConfig,
    pub upload: UploadConfig,
}

#[derive(Clone)]
pub struct StoreConfig {
    pub mongo_url: String,
    /// Overrides the database named in the connection string.
    pub database: Option<String>,
    pub collection: String,
}

#[derive(Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: Option<u16>,
    pub smtp_starttls: bool,
    pub smtp_username: String,
    pub smtp_password: String,
    pub sender: Mailbox,
    pub recipient: Mailbox,
}

#[derive(Clone)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_file_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| lookup(key).ok_or_else(|| anyhow!("{} must be set", key));
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let smtp_username = required("SMTP_USERNAME")?;
        let sender = lookup("MAIL_FROM").unwrap_or_else(|| smtp_username.clone());

        Ok(Self {
            server_addr: or_default("SERVER_ADDR", "0.0.0.0:3000"),
            log_dir: or_default("LOG_DIR", "logs"),
            store: StoreConfig {
                mongo_url: required("MONGO_URL")?,
                database: lookup("MONGO_DB"),
                collection: or_default("MONGO_COLLECTION", "users"),
            },
            mail: MailConfig {
                smtp_host: or_default("SMTP_HOST", "smtp.gmail.com"),
                smtp_port: lookup("SMTP_PORT")
                    .map(|v| parse("SMTP_PORT", &v))
                    .transpose()?,
                smtp_starttls: parse("SMTP_STARTTLS", &or_default("SMTP_STARTTLS", "false"))?,
                smtp_password: required("SMTP_PASSWORD")?,
                sender: parse_mailbox("MAIL_FROM", &sender)?,
                recipient: parse_mailbox("MAIL_TO", &or_default("MAIL_TO", "hr@cordrila.com"))?,
                smtp_username,
            },
            upload: UploadConfig {
                dir: lookup("UPLOAD_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(env::temp_dir),
                max_file_bytes: parse(
                    "MAX_UPLOAD_BYTES",
                    &or_default("MAX_UPLOAD_BYTES", "10485760"),
                )?,
            },
        })
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .parse()
        .with_context(|| format!("{} has an invalid value `{}`", key, value))
}

fn parse_mailbox(key: &str, value: &str) -> Result<Mailbox> {
    parse(key, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("MONGO_URL", "mongodb://localhost:27017"),
        ("SMTP_USERNAME", "sender@example.com"),
        ("SMTP_PASSWORD", "app-password"),
    ];

    #[test]
    fn defaults_fill_optional_values() {
        let config = Config::from_lookup(lookup_from(MINIMAL)).unwrap();

        assert_eq!(config.server_addr, "0.0.0.0:3000");
        assert_eq!(config.store.collection, "users");
        assert!(config.store.database.is_none());
        assert_eq!(config.mail.smtp_host, "smtp.gmail.com");
        assert_eq!(config.mail.smtp_port, None);
        assert!(!config.mail.smtp_starttls);
        assert_eq!(config.mail.sender.email.to_string(), "sender@example.com");
        assert_eq!(config.mail.recipient.email.to_string(), "hr@cordrila.com");
        assert_eq!(config.upload.max_file_bytes, 10 * 1024 * 1024);
        assert_eq!(config.upload.dir, env::temp_dir());
    }

    #[test]
    fn missing_required_value_is_an_error() {
        let err = Config::from_lookup(lookup_from(&MINIMAL[1..]))
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "MONGO_URL must be set");
    }

    #[test]
    fn overrides_are_parsed() {
        let mut pairs = MINIMAL.to_vec();
        pairs.extend_from_slice(&[
            ("SMTP_PORT", "587"),
            ("SMTP_STARTTLS", "true"),
            ("MAIL_FROM", "Careers <careers@example.com>"),
            ("MAIL_TO", "jobs@example.com"),
            ("UPLOAD_DIR", "/var/tmp/uploads"),
            ("MAX_UPLOAD_BYTES", "2048"),
        ]);
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();

        assert_eq!(config.mail.smtp_port, Some(587));
        assert!(config.mail.smtp_starttls);
        assert_eq!(config.mail.sender.name.as_deref(), Some("Careers"));
        assert_eq!(config.mail.recipient.email.to_string(), "jobs@example.com");
        assert_eq!(config.upload.dir, PathBuf::from("/var/tmp/uploads"));
        assert_eq!(config.upload.max_file_bytes, 2048);
    }

    #[test]
    fn malformed_values_are_rejected() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("MAIL_TO", "not an address"));
        assert!(Config::from_lookup(lookup_from(&pairs)).is_err());

        let mut pairs = MINIMAL.to_vec();
        pairs.push(("SMTP_PORT", "eighty"));
        let err = Config::from_lookup(lookup_from(&pairs)).err().unwrap();
        assert!(err.to_string().contains("SMTP_PORT"));
    }
}
