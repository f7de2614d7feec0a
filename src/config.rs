use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Environment keys recognised by [`Config::load`]; each maps to the field of the same name.
const ENV_KEYS: &[&str] = &[
    "database_url",
    "listen_addr",
    "loglevel",
    "email_user",
    "email_password",
    "smtp_host",
    "smtp_timeout_secs",
    "mail_from_name",
    "company_name",
    "admin_username",
    "admin_password",
];

pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,

    /// Outbound mail account. Notification is disabled when either half is missing.
    pub email_user: Option<String>,
    pub email_password: Option<String>,
    pub smtp_host: String,
    pub smtp_timeout_secs: u64,
    pub mail_from_name: String,
    pub company_name: String,

    /// Seeded once at startup when no row with this username exists.
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:application1.db".to_string(),
            listen_addr: "0.0.0.0:5000".to_string(),
            loglevel: "info".to_string(),
            email_user: None,
            email_password: None,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_timeout_secs: 10,
            mail_from_name: "Hiring Brightloom".to_string(),
            company_name: "Brightloom".to_string(),
            admin_username: "admin".to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl Config {
    /// Defaults overlaid with raw (unprefixed) environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::raw().only(ENV_KEYS))
    }

    /// Mail account credentials, if both halves are configured and non-empty.
    pub fn mail_account(&self) -> Option<(&str, &str)> {
        let user = self.email_user.as_deref().filter(|s| !s.is_empty())?;
        let pass = self.email_password.as_deref().filter(|s| !s.is_empty())?;
        Some((user, pass))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_legacy_deployment() {
        let cfg = Config::default();
        assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
        assert_eq!(cfg.admin_username, "admin");
        assert_eq!(cfg.smtp_host, "smtp.gmail.com");
        assert!(cfg.mail_account().is_none());
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("EMAIL_USER", "hiring@example.com");
            jail.set_env("EMAIL_PASSWORD", "app-password");
            jail.set_env("SMTP_TIMEOUT_SECS", "3");
            let cfg = Config::load()?;
            assert_eq!(
                cfg.mail_account(),
                Some(("hiring@example.com", "app-password"))
            );
            assert_eq!(cfg.smtp_timeout_secs, 3);
            assert_eq!(cfg.database_url, "sqlite:application1.db");
            Ok(())
        });
    }

    #[test]
    fn empty_mail_password_disables_account() {
        let cfg = Config {
            email_user: Some("hiring@example.com".into()),
            email_password: Some(String::new()),
            ..Config::default()
        };
        assert!(cfg.mail_account().is_none());
    }
}
