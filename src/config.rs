// src/config.rs
use std::env;

use tracing::info;

/// Runtime configuration, read from the environment once at startup.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub client_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_port(env::var("PORT").ok()),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            client_url: env::var("CLIENT_URL").expect("CLIENT_URL must be set"),
        }
    }
}

fn parse_port(raw: Option<String>) -> u16 {
    match raw {
        Some(value) => value.parse().expect("PORT must be a valid number"),
        None => {
            info!("PORT not set, using default: 3001");
            3001
        }
    }
}
