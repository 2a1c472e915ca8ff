pub mod get_routes;
pub mod post_routes;
pub mod routes_utils;
pub mod validators;
pub mod auth;

use super::ODM;
use super::config;
use super::html_format;
use super::services;

use rocket::http::{CookieJar, Cookie};

use rocket::Route;
pub use routes_utils::*;
use rocket::http::Status;

use rocket::response::content;
use rocket::State;

use mongodb::Database;

use log::{error, info};

use get_routes::get_routes;
use post_routes::post_routes;

pub fn routes() -> Vec<Route> {
    let mut routes = get_routes();
    routes.append(&mut post_routes());
    routes
}
