//! Application configuration loaded from environment variables.

use std::env;

use uuid::Uuid;

use posts_infra::database::DatabaseConfig;

/// Discussion category every post topic is filed under, unless overridden.
pub const DEFAULT_DISCOURSE_POST_CATEGORY: Uuid =
    Uuid::from_u128(0x6d1f3c2e_8b4a_4f6e_9c1d_2a7b5e9f0c13);

/// Base URLs of the remote services.
#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub discussion: String,
    pub identity: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub services: ServiceUrls,
    pub discussion_category: Uuid,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            if let Some(max) = env::var("DB_MAX_CONNECTIONS").ok().and_then(|s| s.parse().ok()) {
                config.max_connections = max;
            }
            if let Some(min) = env::var("DB_MIN_CONNECTIONS").ok().and_then(|s| s.parse().ok()) {
                config.min_connections = min;
            }
            config
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            services: ServiceUrls {
                discussion: env::var("DISCUSSION_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:8081".to_string()),
                identity: env::var("AUTH_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:8082".to_string()),
            },
            discussion_category: Self::parse_discussion_category(
                env::var("DISCOURSE_POST_CATEGORY_UUID").ok(),
            ),
        }
    }

    fn parse_discussion_category(raw: Option<String>) -> Uuid {
        match raw {
            None => DEFAULT_DISCOURSE_POST_CATEGORY,
            Some(value) => value.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(
                    %value,
                    "DISCOURSE_POST_CATEGORY_UUID is not a UUID, using the default category"
                );
                DEFAULT_DISCOURSE_POST_CATEGORY
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discussion_category_parsing() {
        assert_eq!(
            AppConfig::parse_discussion_category(None),
            DEFAULT_DISCOURSE_POST_CATEGORY
        );

        let id = Uuid::new_v4();
        assert_eq!(
            AppConfig::parse_discussion_category(Some(format!(" {} ", id))),
            id
        );

        assert_eq!(
            AppConfig::parse_discussion_category(Some("not-a-uuid".into())),
            DEFAULT_DISCOURSE_POST_CATEGORY
        );
    }
}
