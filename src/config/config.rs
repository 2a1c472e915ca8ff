//!
//! Documentation of the config module.
//! Sets up the 'config' and 'logger'.
//!



extern crate confy;

use serde::{Serialize, Deserialize};
use std::default::Default;

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfyConfig {
    pub print_log: bool,
    pub log_file: String,
    pub database: String,
    pub database_ip: String,
    pub timeout: u64,
    pub routes_hostname: String,
    pub gmaps_api_key: String,
    pub file_home: String,
    pub file_register: String,
    pub file_login: String,
    pub file_publish: String,
    pub file_route: String,
    pub file_search: String,
    pub file_favorites: String,
    pub file_my_rides: String,
    pub file_profile: String,
    pub file_edit_user: String,
    pub file_forum: String,
    pub file_topics: String,
    pub file_topic_details: String,
    pub file_create_topic: String,
    pub file_not_found: String,
}

///Config check
impl Default for ConfyConfig {
    fn default() -> Self {
        ConfyConfig {
            print_log: false,
            log_file: "output.log".to_string(),
            database: "SEProject".to_string(),
            database_ip: "mongodb://localhost:27017/".to_string(),
            timeout: 2,
            routes_hostname: "routes.googleapis.com".to_string(),
            gmaps_api_key: "".to_string(),
            file_home: "home.html".to_string(),
            file_register: "register.html".to_string(),
            file_login: "login.html".to_string(),
            file_publish: "publish.html".to_string(),
            file_route: "route.html".to_string(),
            file_search: "search.html".to_string(),
            file_favorites: "favorites.html".to_string(),
            file_my_rides: "myride.html".to_string(),
            file_profile: "profile.html".to_string(),
            file_edit_user: "edit-user.html".to_string(),
            file_forum: "forum.html".to_string(),
            file_topics: "topics.html".to_string(),
            file_topic_details: "topic-details.html".to_string(),
            file_create_topic: "create-topic.html".to_string(),
            file_not_found: "not-found.html".to_string(),
        }
    }
}

/// Initialize config and load
pub async fn init() -> Result<ConfyConfig, confy::ConfyError> {
    let cfg: ConfyConfig = confy::load_path("packtravel.toml").unwrap_or_default();
    Ok(cfg)
}

/// Sets up logger
pub async fn setup_logger(file: &ConfyConfig) -> Result<(), fern::InitError> {
    if file.print_log {
        fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(std::io::stdout())
        .chain(fern::log_file(&file.log_file)?)
        .apply()?;
    }

    else {
        fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&file.log_file)?)
        .apply()?;
    }

    Ok(())
}
