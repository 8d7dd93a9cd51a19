use crate::http_handler::{function_handler, HandlerDeps};
use lambda_http::{run, service_fn, tracing, Error};
use shared::adapters::DynamoDbReviewRepository;
use shared::clients::dynamodb_client;
use shared::configuration::Configuration;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = Configuration::load()?;
    let dynamodb_client = dynamodb_client(&config).await;
    let review_repo = DynamoDbReviewRepository::new(config.table_name, dynamodb_client.clone());
    let deps = HandlerDeps { review_repo };

    run(service_fn(|event| function_handler(&deps, event))).await
}
