use std::net::TcpListener;

use anyhow::Context;

use sqlx::PgPool;

use promopulse::app;
use promopulse::settings::Settings;
use promopulse::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().context("Failed to load settings")?;
    let cipher = settings.crypto.cipher()?;

    let pool = PgPool::connect_with(settings.database.with_db()).await?;

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, pool, cipher)?.await.context("Failed to run app")
}
