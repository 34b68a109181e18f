mod login;
mod signup;

use actix_web::web;
use login::login_controller;
use signup::signup_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/signup", web::post().to(signup_controller));
    cfg.route("/login", web::post().to(login_controller));
}
