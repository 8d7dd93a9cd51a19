use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Configuration {
    pub table_name: String,
    pub region: Option<String>,
    // Points the SDK at e.g. LocalStack instead of the regional endpoint.
    pub endpoint_url: Option<String>,
}

impl Configuration {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::raw().only(&["TABLE_NAME", "REGION", "ENDPOINT_URL"]))
            .extract()
    }
}
