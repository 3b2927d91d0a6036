use serde::Deserialize;

const PLACEHOLDER_SECRET: &str = "CHANGE_ME_DEV_ONLY_SECRET";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// HS256 signing secret for access and refresh tokens.
    pub jwt_secret: String,
    /// Access-token lifetime in seconds. Default: 900 (15 minutes).
    pub access_ttl_secs: i64,
    /// Refresh-token lifetime in seconds. Default: 2592000 (30 days).
    pub refresh_ttl_secs: i64,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let jwt_secret =
        std::env::var("STOCKROOM_JWT_SECRET").unwrap_or_else(|_| PLACEHOLDER_SECRET.into());

    if jwt_secret == PLACEHOLDER_SECRET {
        let env_mode = std::env::var("STOCKROOM_ENV")
            .or_else(|_| std::env::var("RUST_ENV"))
            .unwrap_or_default();
        if env_mode == "production" {
            anyhow::bail!(
                "STOCKROOM_JWT_SECRET is still the insecure placeholder. \
                 Set a proper random secret before running in production."
            );
        }
        eprintln!("⚠️  STOCKROOM_JWT_SECRET is not set — using insecure placeholder. Set a random secret for production.");
    }

    Ok(Config {
        port: std::env::var("STOCKROOM_PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .unwrap_or(5000),
        database_url: std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/stockroom".into()),
        jwt_secret,
        access_ttl_secs: std::env::var("STOCKROOM_ACCESS_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(900),
        refresh_ttl_secs: std::env::var("STOCKROOM_REFRESH_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2_592_000),
    })
}
