use std::sync::Arc;

use labelbox::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    let validator = StaticTokenValidator::from_config(&config.auth)?;
    info!(
        service = %config.service.name,
        environment = %config.service.environment,
        tokens = validator.len(),
        "Starting labelbox"
    );

    let repo = Arc::new(InMemoryLabelRepository::new());

    ServiceBuilder::new()
        .with_config(config)
        .with_routes(labels::versioned_routes(repo))
        .with_auth(TokenAuth::new(validator))
        .build()
        .serve()
        .await
}
