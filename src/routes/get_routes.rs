use super::{*};
use routes_utils::*;
use rocket::response::Redirect;
use rocket::response::content::RawHtml;
use bson::oid::ObjectId;

use log::{error, info};

///
///Home screen route
///
///INPUT:  optional user verification, internal config
///OUTPUT: the rendered page
///
#[get("/")]
async fn index(user: Option<SessionUser>, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let username = user.map(|value| value.username);

    let format = html_format::html_format::format_home(&file.config, username.clone()).await;
    let format = match format {
        Err(_) => return Err(Status::InternalServerError),
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {} for {}", &route, username.unwrap_or_default()));
            value
        },
    };

    Ok(format)
}

// A connected user has no business registering again
#[get("/register")]
async fn register_redirect(_user: SessionUser) -> Redirect {
    Redirect::to("/")
}

///
///Registration form route
///
///INPUT:  internal config
///OUTPUT: the rendered page
///
#[get("/register", rank = 2)]
async fn register_page(file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_register(&file.config, None).await;
    let format = match format {
        Err(_) => return Err(Status::InternalServerError),
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {}", &route));
            value
        },
    };

    Ok(format)
}

#[get("/login")]
async fn login_redirect(_user: SessionUser) -> Redirect {
    Redirect::to("/")
}

///
///Login form route
///
///INPUT:  internal config
///OUTPUT: the rendered page
///
#[get("/login", rank = 2)]
async fn login_page(file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_login(&file.config, None).await;
    let format = match format {
        Err(_) => return Err(Status::InternalServerError),
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {}", &route));
            value
        },
    };

    Ok(format)
}

///
///Logout
///
///INPUT:  user's cookies
///OUTPUT: redirect to home page
///
#[get("/logout")]
async fn logout(cookies: &CookieJar<'_>) -> Redirect {

    if cookies.get_private("userid").is_some() {
        cookies.remove_private("userid");
    }
    if cookies.get_private("username").is_some() {
        cookies.remove_private("username");
    }
    if cookies.get_private("email").is_some() {
        cookies.remove_private("email");
    }

    Redirect::to("/")
}

///
///Ride publishing form route
///
///INPUT:  user verification, internal config
///OUTPUT: the rendered page
///
#[get("/publish")]
async fn publish_index(user: SessionUser, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_publish(&file.config, &user.username).await;
    let format = match format {
        Err(_) => return Err(Status::InternalServerError),
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {} for {}", &route, &user.username));
            value
        },
    };

    Ok(format)
}

///
///Ride display route, shows the still-active routes of a destination
///
///INPUT:  optional user verification, internal config, ride ID and DB access
///OUTPUT: the rendered page
///
#[get("/ride/<ride_id>")]
async fn display_ride(user: Option<SessionUser>, db: &State<MongoState>, file: &State<Config>, ride_id: String, route: &Route) -> Result<RawHtml<String>, Status> {
    let username = user.map(|value| value.username);

    let format = html_format::html_format::format_ride(&file.config, username.clone(), ride_id, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, username.unwrap_or_default()));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {} for {}", &route, username.unwrap_or_default()));
            value
        },
    };

    Ok(format)
}

///
///Search screen route, all rides with their active route counts
///
///INPUT:  user verification, internal config and DB access
///OUTPUT: the rendered page
///
#[get("/search")]
async fn search_index(user: SessionUser, db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_search(&file.config, &user.username, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {} for {}", &route, &user.username));
            value
        },
    };

    Ok(format)
}

///
///The pack's favorite destinations route
///
///INPUT:  internal config and DB access
///OUTPUT: the rendered page
///
#[get("/favorites")]
async fn packs_favorite(db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_favorites(&file.config, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {}", route));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {}", &route));
            value
        },
    };

    Ok(format)
}

///
///My rides route, the routes the user has joined
///
///INPUT:  user verification, internal config and DB access
///OUTPUT: the rendered page
///
#[get("/myrides")]
async fn my_rides(user: SessionUser, db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_my_rides(&file.config, &user.username, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {} for {}", &route, &user.username));
            value
        },
    };

    Ok(format)
}

///
///Profile route, a user's details and created routes
///
///INPUT:  optional user verification, internal config, user ID and DB access
///OUTPUT: the rendered page
///
#[get("/profile/<userid>")]
async fn user_profile(user: Option<SessionUser>, db: &State<MongoState>, file: &State<Config>, userid: String, route: &Route) -> Result<RawHtml<String>, Status> {
    let username = user.map(|value| value.username);

    let format = html_format::html_format::format_profile(&file.config, username.clone(), userid, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, username.unwrap_or_default()));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {} for {}", &route, username.unwrap_or_default()));
            value
        },
    };

    Ok(format)
}

///
///Profile edit form route
///
///INPUT:  user verification, internal config and DB access
///OUTPUT: the rendered page
///
#[get("/editUser")]
async fn edit_user_page(user: SessionUser, db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_edit_user(&file.config, &user.username, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {} for {}", &route, &user.username));
            value
        },
    };

    Ok(format)
}

///
///Forum overview route, every destination with its topics
///
///INPUT:  internal config and DB access
///OUTPUT: the rendered page
///
#[get("/forum")]
async fn rides_with_topics(db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_forum(&file.config, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {}", route));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {}", &route));
            value
        },
    };

    Ok(format)
}

///
///Topic creation form route
///
///INPUT:  optional user verification, internal config and DB access
///OUTPUT: the rendered page
///
#[get("/forum/create")]
async fn create_topic_page(user: Option<SessionUser>, db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<RawHtml<String>, Status> {
    let username = user.map(|value| value.username);

    let format = html_format::html_format::format_create_topic(&file.config, username, None, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {}", route));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {}", &route));
            value
        },
    };

    Ok(format)
}

///
///Topic listing route for one destination
///
///INPUT:  internal config, ride ID and DB access
///OUTPUT: the rendered page
///
#[get("/forum/<ride_id>", rank = 2)]
async fn forum_topics(db: &State<MongoState>, file: &State<Config>, ride_id: String, route: &Route) -> Result<RawHtml<String>, Status> {
    let format = html_format::html_format::format_topics(&file.config, ride_id, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {}", route));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {}", &route));
            value
        },
    };

    Ok(format)
}

///
///Topic details route, the topic and its comments
///
///INPUT:  internal config, topic ID and DB access
///OUTPUT: the rendered page
///
#[get("/forum/topic/<topic_id>")]
async fn forum_topic_details(db: &State<MongoState>, file: &State<Config>, topic_id: String, route: &Route) -> Result<RawHtml<String>, Status> {
    let topic_id = match ObjectId::parse_str(&topic_id) {
        Ok(value) => value,
        Err(_) => return Err(Status::NotFound),
    };

    let format = html_format::html_format::format_topic_details(&file.config, topic_id, &db.db).await;
    let format = match format {
        Err(_) => {
            error!("{}", format!("Database failed while getting {}", route));
            return Err(Status::InternalServerError);
        },
        Ok(value) => {
            info!("{}", format!("Server>>Client:\tSending formatted {}", &route));
            value
        },
    };

    Ok(format)
}

// Everything else, including pages that need a login the visitor
// does not have, lands back on the home screen
#[get("/<temp..>", rank = 3)]
async fn panel_redirect(temp: std::path::PathBuf) -> Redirect {
    Redirect::to("/")
}

pub fn get_routes() -> Vec<Route> {
    return routes![
        index, register_redirect, register_page, login_redirect, login_page,
        logout, publish_index, display_ride, search_index, packs_favorite,
        my_rides, user_profile, edit_user_page, rides_with_topics,
        create_topic_page, forum_topics, forum_topic_details, panel_redirect];
}
