//! Process-wide AWS clients.
//!
//! Each Lambda execution environment builds its SDK configuration and clients
//! once, on first use, and every later invocation borrows the same handles.
//! The clients are cheap to clone and never mutated after construction.

use crate::configuration::Configuration;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use tokio::sync::OnceCell;

static SDK_CONFIG: OnceCell<SdkConfig> = OnceCell::const_new();
static DYNAMODB_CLIENT: OnceCell<aws_sdk_dynamodb::Client> = OnceCell::const_new();
static TRANSLATE_CLIENT: OnceCell<aws_sdk_translate::Client> = OnceCell::const_new();

/// Shared SDK configuration. Region and endpoint are taken from the first
/// configuration passed in; later calls return the cached value.
pub async fn sdk_config(config: &Configuration) -> &'static SdkConfig {
    SDK_CONFIG
        .get_or_init(|| async {
            let mut loader = aws_config::defaults(BehaviorVersion::latest());
            if let Some(region) = &config.region {
                loader = loader.region(Region::new(region.clone()));
            }
            if let Some(endpoint_url) = &config.endpoint_url {
                loader = loader.endpoint_url(endpoint_url);
            }
            loader.load().await
        })
        .await
}

pub async fn dynamodb_client(config: &Configuration) -> &'static aws_sdk_dynamodb::Client {
    DYNAMODB_CLIENT
        .get_or_init(|| async { aws_sdk_dynamodb::Client::new(sdk_config(config).await) })
        .await
}

pub async fn translate_client(config: &Configuration) -> &'static aws_sdk_translate::Client {
    TRANSLATE_CLIENT
        .get_or_init(|| async { aws_sdk_translate::Client::new(sdk_config(config).await) })
        .await
}
