use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::store::mongodb_store::MongoDBConfig;

/// The available store backends, differentiated via a "type" tag in the YAML.
///
/// "mongo" is the deployment backend; "memory" keeps everything in-process
/// and is used for local runs and the integration tests.
#[derive(Deserialize, Serialize, Debug, JsonSchema)]
#[serde(tag = "type")]
pub enum StoreConfig {
    #[serde(rename = "mongo")]
    MongoDB(MongoDBConfig),
    #[serde(rename = "memory")]
    Memory,
}
