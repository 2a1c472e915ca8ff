//!
//! #  PackTravel
//!
//! PackTravel is a web application, built to help students share rides
//! to wherever the pack is headed.
//!
//! It keeps the whole trip in one place:
//!
//! * Publishing routes with start, destination and departure time
//! * Joining (and leaving) routes with one click
//! * Searching every upcoming ride
//! * The pack's favorite destinations
//! * A forum to talk a trip over before it happens
//!


#![allow(dead_code)]
#![allow(unused_variables)]
#![allow(unused_imports)]
#![allow(non_snake_case)]
#[macro_use] extern crate rocket;

mod routes;
mod html_format;
mod ODM;
mod config;
mod services;

use routes::{MongoState, Config, MapsState};
use services::google_maps::MapsService;
use log::{debug, error, info, trace, warn};

#[cfg(test)] mod tests;

/// The main functions, runs w/ cargo run
#[rocket::main]
async fn main() -> Result<(), ()> {
    let config = config::config::init().await;
    let config = match config {
        Err(e) => {
            println!("{}", format!("CONFIG failed to launch {}", e));
            return Ok(());
        },
        Ok(value) => value,
    };
    let _ = config::config::setup_logger(&config).await;
    let db = match ODM::odm::init(&config).await {
        Err(val) =>  {
            return Ok(());
        },
        Ok(value) => value,
    };
    let maps = MapsService::new(config.routes_hostname.clone(), config.gmaps_api_key.clone());
    warn!("PACKTRAVEL IS LAUNCHING");

    let lift = rocket::build()
    .mount("/", routes::routes())
    .manage(MongoState { db })
    .manage(MapsState { maps })
    .manage(Config { config } )
    .launch()
    .await;

    warn!("PACKTRAVEL OVER");
    match lift {
        Ok(value) => return Ok(()),
        Err(value) => {
            error!("Rocket could not run, error {}", value);
            return Ok(());
        }
    }
}
