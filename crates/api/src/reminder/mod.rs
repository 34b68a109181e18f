mod add_reminder;
mod delete_reminder;
mod generate_reminder;
mod get_reminders;
pub mod send_due_reminders;
mod upload;

use actix_web::web;
use add_reminder::add_reminder_controller;
use delete_reminder::delete_reminder_controller;
use generate_reminder::generate_reminder_controller;
use get_reminders::get_reminders_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/getAllReminder", web::get().to(get_reminders_controller));
    cfg.route("/addReminder", web::post().to(add_reminder_controller));
    cfg.route(
        "/generateReminder",
        web::post().to(generate_reminder_controller),
    );
    cfg.route("/deleteReminder", web::post().to(delete_reminder_controller));
}
