use anyhow::Result;
use std::env;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub notifier: NotifierConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: env::var("DATABASE_HOST")?,
            port: env::var("DATABASE_PORT")?.parse()?,
            username: env::var("DATABASE_USERNAME")?,
            password: env::var("DATABASE_PASSWORD")?,
            database: env::var("DATABASE_NAME")?,
        };
        // 通知ゲートウェイは未設定でも起動できる（ログ出力のみになる）
        let notifier = NotifierConfig {
            gateway_url: env::var("NOTIFIER_GATEWAY_URL").ok(),
        };
        Ok(Self { database, notifier })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

#[derive(Clone)]
pub struct NotifierConfig {
    pub gateway_url: Option<String>,
}
