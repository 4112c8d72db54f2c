#[tokio::main]
async fn main() -> tonebot::error::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("tonebot=info,serenity=warn"),
    )
    .init();
    log::info!("Starting tonebot Discord bot");

    match tonebot::run().await {
        Ok(()) => {
            log::info!("Bot shut down successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Bot encountered an error: {e}");
            Err(e)
        }
    }
}
