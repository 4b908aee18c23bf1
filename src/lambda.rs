#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_s3::config::Region;
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use std::sync::Arc;
#[cfg(feature = "lambda")]
use togrow::adapters::gateway::{self, GatewayRequest, GatewayResponse, Route};
#[cfg(feature = "lambda")]
use togrow::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use togrow::{GuideService, LambdaConfig, S3Storage, StorageCatalog};

#[cfg(feature = "lambda")]
async fn function_handler(
    service: &GuideService,
    fixed_route: Option<Route>,
    event: LambdaEvent<GatewayRequest>,
) -> Result<GatewayResponse, Error> {
    tracing::info!("Handling request {}", event.context.request_id);
    Ok(gateway::handle(service, &event.payload, fixed_route).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後的呼叫共用
    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;
    let fixed_route = lambda_config.fixed_route()?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let region = Region::new(lambda_config.s3_region.clone());
    let config = aws_sdk_s3::config::Builder::from(&config)
        .region(region)
        .force_path_style(true)
        .build();
    let s3_client = S3Client::from_conf(config);

    let storage = S3Storage::new(s3_client, lambda_config.catalog_bucket.clone());
    let catalog = StorageCatalog::from_path(storage, lambda_config.catalog_key.clone())?;
    let service = Arc::new(GuideService::from_config(Arc::new(catalog), &lambda_config)?);

    tracing::info!(
        "Plant catalog: s3://{}/{}",
        lambda_config.catalog_bucket,
        lambda_config.catalog_key
    );

    run(service_fn(move |event: LambdaEvent<GatewayRequest>| {
        let service = Arc::clone(&service);
        async move { function_handler(&service, fixed_route, event).await }
    }))
    .await
}
