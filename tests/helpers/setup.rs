use super::fakes::{FakeExtractionService, RecordingGateway};
use reminder_api::Application;
use reminder_domain::ID;
use reminder_infra::{Config, ReminderContext};
use reminder_sdk::ReminderSDK;
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub config: Config,
    pub gateway: Arc<RecordingGateway>,
}

// Launch the application as a background task.
// `extraction_content` is what the extraction service answers with, `None` makes it fail.
pub async fn spawn_app(extraction_content: Option<&str>) -> (TestApp, ReminderSDK, String) {
    let mut ctx = ReminderContext::create_inmemory();
    ctx.config.port = 0; // Random port
    ctx.config.upload_dir = std::env::temp_dir().join(format!("reminder-uploads-{}", ID::new()));
    ctx.config.reminder_check_interval = Duration::from_millis(50);
    ctx.config.notifications.default_recipient = Some("whatsapp:+10000000000".into());

    let gateway = Arc::new(RecordingGateway::default());
    ctx.services.notifications = gateway.clone();
    ctx.services.extraction = Arc::new(FakeExtractionService {
        content: extraction_content.map(String::from),
    });

    let config = ctx.config.clone();
    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp { config, gateway };
    let sdk = ReminderSDK::new(address.clone());
    (app, sdk, address)
}
