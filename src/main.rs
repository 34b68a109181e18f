mod telemetry;

use reminder_api::Application;
use reminder_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        // A missing .env file is fine, the environment is used as is
        if !e.not_found() {
            eprintln!("Unable to load .env file: {}", e);
        }
    }
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("reminder_server".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await;

    let app = Application::new(context).await?;
    app.start().await
}
