#![allow(dead_code)]

use super::*;
use rocket::response::content::RawHtml;
use std::collections::HashSet;
use std::result::Result;
use tera::{Context, Tera};
use config::config::ConfyConfig;
use mongodb::Database;
use bson::oid::ObjectId;
use ODM::models::*;
use ODM::odm;
use ODM::odm_utils::*;

/*
Format files

INPUT:  template to render + parameters to put
OUTPUT: the rendered template
*/
pub fn format_file(template: String, params: Context) -> Result<String, tera::Error> {
    let mut tera = Tera::new("resources/**/*").unwrap();

    //Get File name (e.g. memo.exe => memo)
    let template_stem: Vec<&str> = template.split(".").collect();
    let template_stem: String = template_stem[0].into();
    let template = template_stem + "/" + &template[..];

    // disable HTML autoescape
    tera.autoescape_on(vec![]);

    tera.render(&template, &params)
}

/// The home page, with or without a logged-in user
pub async fn format_home(config: &ConfyConfig, username: Option<String>) -> anyhow::Result<RawHtml<String>> {
    let mut ctx = Context::new();
    ctx.insert("username", &username);

    Ok(RawHtml(format_file(config.file_home.clone(), ctx)?))
}

/// The registration form, with an optional validation error to show
pub async fn format_register(config: &ConfyConfig, error: Option<String>) -> anyhow::Result<RawHtml<String>> {
    let mut ctx = Context::new();
    ctx.insert("error", &error);

    Ok(RawHtml(format_file(config.file_register.clone(), ctx)?))
}

/// The login form, with an optional error to show
pub async fn format_login(config: &ConfyConfig, error: Option<String>) -> anyhow::Result<RawHtml<String>> {
    let mut ctx = Context::new();
    ctx.insert("error", &error);

    Ok(RawHtml(format_file(config.file_login.clone(), ctx)?))
}

/// The ride publishing form
pub async fn format_publish(config: &ConfyConfig, username: &str) -> anyhow::Result<RawHtml<String>> {
    let mut ctx = Context::new();
    ctx.insert("username", username);
    ctx.insert("alert", &true);
    ctx.insert("gmap_api_key", &config.gmaps_api_key);

    Ok(RawHtml(format_file(config.file_publish.clone(), ctx)?))
}

/// The ride display page: the ride, its still-active routes and the route
/// the viewing user has already joined (if any)
pub async fn format_ride(
    config: &ConfyConfig,
    username: Option<String>,
    ride_id: String,
    db: &Database,
) -> anyhow::Result<RawHtml<String>> {
    let ride = odm::get_ride(&db, ride_id).await?;

    let mut routes: Vec<RouteView> = vec![];
    let mut selected: Option<String> = None;
    let ride = match ride {
        Some(value) => {
            routes = odm::get_ride_routes(&db, &value).await?;
            selected = odm::route_select(&db, username.clone(), &routes).await?;
            Some(doc_to_ride(&value))
        },
        None => None,
    };

    let mut ctx = Context::new();
    ctx.insert("username", &username);
    ctx.insert("ride", &ride);
    ctx.insert("routes", &routes);
    ctx.insert("selected_route", &selected);

    Ok(RawHtml(format_file(config.file_route.clone(), ctx)?))
}

/// The search page: every ride with its active route count
pub async fn format_search(config: &ConfyConfig, username: &str, db: &Database) -> anyhow::Result<RawHtml<String>> {
    let rides = odm::get_rides_with_counts(&db).await?;

    let mut ctx = Context::new();
    ctx.insert("username", username);
    ctx.insert("rides", &rides);
    ctx.insert("gmap_api_key", &config.gmaps_api_key);

    Ok(RawHtml(format_file(config.file_search.clone(), ctx)?))
}

/// The pack's favorite destinations
pub async fn format_favorites(config: &ConfyConfig, db: &Database) -> anyhow::Result<RawHtml<String>> {
    let top_picks = odm::favorite_destinations(&db).await?;

    let mut ctx = Context::new();
    ctx.insert("top_picks", &top_picks);

    Ok(RawHtml(format_file(config.file_favorites.clone(), ctx)?))
}

/// The routes the user has joined. A route joined more than once shows up
/// as many times as the rides list holds it.
pub async fn format_my_rides(config: &ConfyConfig, username: &str, db: &Database) -> anyhow::Result<RawHtml<String>> {
    let all_routes = odm::get_all_routes(&db).await?;
    let user = odm::get_user_doc(&db, username.to_string()).await?;

    let user_routes = match user {
        Some(value) => value.rides,
        None => vec![],
    };

    let mut processed: Vec<Route> = vec![];
    for route in &all_routes {
        for user_route in &user_routes {
            if user_route == &route._id {
                processed.push(doc_to_route(&route));
            }
        }
    }

    let mut ctx = Context::new();
    ctx.insert("username", username);
    ctx.insert("rides", &processed);

    Ok(RawHtml(format_file(config.file_my_rides.clone(), ctx)?))
}

/// A user's profile page with their created routes, split into past and
/// upcoming by the route date
pub async fn format_profile(
    config: &ConfyConfig,
    username: Option<String>,
    userid: String,
    db: &Database,
) -> anyhow::Result<RawHtml<String>> {
    let creator_id = match ObjectId::parse_str(&userid) {
        Ok(value) => value,
        Err(_) => return format_not_found(&config, username).await,
    };

    let profile = odm::get_user_by_id(&db, creator_id).await?;
    let profile = match profile {
        Some(value) => value,
        None => return format_not_found(&config, username).await,
    };

    let user_routes = odm::get_routes_by_creator(&db, creator_id).await?;

    let mut past_rides: Vec<Route> = vec![];
    let mut current_rides: Vec<Route> = vec![];
    for route in &user_routes {
        if has_date_passed(&route.date) {
            past_rides.push(doc_to_route(&route));
        } else {
            current_rides.push(doc_to_route(&route));
        }
    }

    let mut ctx = Context::new();
    ctx.insert("username", &username);
    ctx.insert("user", &profile);
    ctx.insert("pastrides", &past_rides);
    ctx.insert("currentrides", &current_rides);

    Ok(RawHtml(format_file(config.file_profile.clone(), ctx)?))
}

/// The profile edit form, preloaded with the current values
pub async fn format_edit_user(config: &ConfyConfig, username: &str, db: &Database) -> anyhow::Result<RawHtml<String>> {
    let user = odm::get_user_by_username(&db, username.to_string()).await?;

    let mut ctx = Context::new();
    ctx.insert("username", username);
    ctx.insert("user", &user);

    Ok(RawHtml(format_file(config.file_edit_user.clone(), ctx)?))
}

/// The forum overview: one entry per destination with its topics
pub async fn format_forum(config: &ConfyConfig, db: &Database) -> anyhow::Result<RawHtml<String>> {
    let routes = odm::get_all_routes(&db).await?;

    let mut rides_with_topics: Vec<RideTopics> = vec![];
    let mut visited: HashSet<String> = HashSet::new();
    for route in &routes {
        if !visited.contains(&route.destination) {
            visited.insert(route.destination.clone());
            let topics = odm::get_topics_for_ride(&db, route.destination.clone()).await?;
            rides_with_topics.push(RideTopics {
                ride: doc_to_route(&route),
                topics,
            });
        }
    }

    let mut ctx = Context::new();
    ctx.insert("rides_with_topics", &rides_with_topics);

    Ok(RawHtml(format_file(config.file_forum.clone(), ctx)?))
}

/// The topics opened on one destination
pub async fn format_topics(config: &ConfyConfig, ride_id: String, db: &Database) -> anyhow::Result<RawHtml<String>> {
    let topics = odm::get_topics_for_ride(&db, ride_id.clone()).await?;

    let mut ctx = Context::new();
    ctx.insert("ride_id", &ride_id);
    ctx.insert("topics", &topics);

    Ok(RawHtml(format_file(config.file_topics.clone(), ctx)?))
}

/// A topic with its comments
pub async fn format_topic_details(
    config: &ConfyConfig,
    topic_id: ObjectId,
    db: &Database,
) -> anyhow::Result<RawHtml<String>> {
    let topic = odm::get_topic(&db, topic_id).await?;
    let topic = match topic {
        Some(value) => value,
        None => return format_not_found(&config, None).await,
    };

    let comments = odm::get_comments_for_topic(&db, topic_id).await?;

    let mut ctx = Context::new();
    ctx.insert("topic", &topic);
    ctx.insert("comments", &comments);

    Ok(RawHtml(format_file(config.file_topic_details.clone(), ctx)?))
}

/// The topic creation form, with one ride entry per destination
pub async fn format_create_topic(
    config: &ConfyConfig,
    username: Option<String>,
    error: Option<String>,
    db: &Database,
) -> anyhow::Result<RawHtml<String>> {
    let routes = odm::get_all_routes(&db).await?;

    let mut final_rides: Vec<Route> = vec![];
    let mut visited: HashSet<String> = HashSet::new();
    for route in &routes {
        if !visited.contains(&route.destination) {
            visited.insert(route.destination.clone());
            final_rides.push(doc_to_route(&route));
        }
    }

    let mut ctx = Context::new();
    ctx.insert("username", &username);
    ctx.insert("rides", &final_rides);
    ctx.insert("error", &error);

    Ok(RawHtml(format_file(config.file_create_topic.clone(), ctx)?))
}

/// The 404 page
pub async fn format_not_found(config: &ConfyConfig, username: Option<String>) -> anyhow::Result<RawHtml<String>> {
    let mut ctx = Context::new();
    ctx.insert("username", &username);

    Ok(RawHtml(format_file(config.file_not_found.clone(), ctx)?))
}
