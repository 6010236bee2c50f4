use std::time::Duration;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "morelife={level},server={level},advisor={level},gateway={level}",
            level = settings.app.level
        ))
        .init();

    let completion = settings.completion;
    let gateway = match gateway::builder()
        .provider(completion.provider)
        .model(completion.model)
        .api_key(completion.api_key)
        .base_url(completion.base_url)
        .timeout(Duration::from_secs(completion.timeout_secs))
        .build()
    {
        Ok(gateway) => gateway,
        Err(err) => {
            tracing::error!("failed to initialize completion gateway: {err}");
            return Err(err.into());
        }
    };

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener on {addr}: {err}");
            return Err(err.into());
        }
    };

    server::run_with_listener(gateway, listener).await?;
    Ok(())
}
