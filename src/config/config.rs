use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::store::StoreConfig;

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0, containing store, JWT settings, etc.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
pub struct ConfigV1 {
    pub store: StoreConfig,
    pub bind_address: String,
    pub jwt: JwtConfig,
    pub logging: LoggingConfig,
}

/// Load config from "config.yaml" in the current directory, with
/// CRICHUB_-prefixed environment variables taking precedence
/// (e.g. CRICHUB_JWT__SECRET overrides jwt.secret).
pub fn load_config() -> ConfigV1 {
    let figment = Figment::new()
        .merge(Yaml::file("./config.yaml"))
        .merge(Env::prefixed("CRICHUB_").split("__"));
    let config = match figment.extract::<Config>() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }
    };
    match config {
        Config::ConfigV1(c) => c,
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    println!("{}", serde_json::to_string_pretty(&schema).unwrap());
}

/// Settings for the tokens minted at login.
///
/// The signing secret lives here so the issuer is built from injected
/// configuration; rotating it invalidates every outstanding token.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct JwtConfig {
    pub iss: String,
    /// Validity window in seconds from issuance.
    pub exp: i64,
    pub secret: String,
}
