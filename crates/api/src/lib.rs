mod error;
mod job_schedulers;
mod reminder;
mod shared;
mod status;
#[cfg(test)]
mod test_utils;
mod user;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use job_schedulers::{start_due_reminders_job, JobHandle};
use reminder_infra::ReminderContext;
use std::net::TcpListener;
use tracing::info;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    reminder::configure_routes(cfg);
    status::configure_routes(cfg);
    user::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    due_reminders_job: JobHandle,
}

impl Application {
    pub async fn new(context: ReminderContext) -> Result<Self, std::io::Error> {
        tokio::fs::create_dir_all(&context.config.upload_dir).await?;
        let (server, port) = Application::configure_server(context.clone()).await?;
        let due_reminders_job = start_due_reminders_job(context);

        Ok(Self {
            server,
            port,
            due_reminders_job,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: ReminderContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();
            let upload_dir = ctx.config.upload_dir.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(Files::new("/uploads", upload_dir))
                .configure(configure_server_api)
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Runs the server until it is shut down and then stops the background jobs
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        info!("Server stopped, stopping background jobs");
        self.due_reminders_job.stop().await;
        res
    }
}
