use super::{*};

use rocket::form::Form;
use rocket::response::Redirect;
use rocket::response::status;
use rocket::response::content::RawHtml;
use bson::oid::ObjectId;

use ODM::models::{RouteDocument, RouteKey};
use ODM::odm::*;
use html_format::html_format::*;
use super::auth;
use super::validators;

use log::{error, info};

// A form error re-renders the page, a database error turns into a plain 500
fn error_page(format: anyhow::Result<RawHtml<String>>, code: Status) -> status::Custom<RawHtml<String>> {
    match format {
        Ok(value) => status::Custom(code, value),
        Err(_) => server_error(),
    }
}

fn server_error() -> status::Custom<RawHtml<String>> {
    status::Custom(Status::InternalServerError, RawHtml(String::from("Something went wrong")))
}

///
///Registration route, validates and stores a new user
///
///INPUT:  form data, cookies and DB access
///OUTPUT: redirect home / re-rendered form with the error
///
#[post("/register", data = "<form>")]
async fn post_register(form: Form<RegisterForm>, cookies: &CookieJar<'_>, db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<Redirect, status::Custom<RawHtml<String>>> {
    let form = form.into_inner();

    if let Err(value) = validators::validate_email_domain(&form.email) {
        return Err(error_page(format_register(&file.config, Some(value)).await, Status::Ok));
    }
    if let Err(value) = validators::validate_password(&form.password1) {
        return Err(error_page(format_register(&file.config, Some(value)).await, Status::Ok));
    }
    if form.password1 != form.password2 {
        return Err(error_page(format_register(&file.config, Some(String::from("Passwords do not match"))).await, Status::Ok));
    }

    let taken = validators::validate_unique_username(&db.db, form.username.clone()).await;
    match taken {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &form.username));
            return Err(server_error());
        },
        Ok(Some(value)) => return Err(error_page(format_register(&file.config, Some(value)).await, Status::Ok)),
        Ok(None) => {},
    }

    let taken = validators::validate_unique_unityid(&db.db, form.unityid.clone()).await;
    match taken {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &form.username));
            return Err(server_error());
        },
        Ok(Some(value)) => return Err(error_page(format_register(&file.config, Some(value)).await, Status::Ok)),
        Ok(None) => {},
    }

    let password = match auth::hash_password(&form.password1) {
        Err(_) => return Err(server_error()),
        Ok(value) => value,
    };

    let userid = insert_user(
        &db.db,
        form.username.clone(),
        form.unityid.clone(),
        form.first_name.clone(),
        form.last_name.clone(),
        form.email.clone(),
        password,
        form.phone_number.clone(),
        form.profile_picture.clone().unwrap_or_default(),
    )
    .await;
    let userid = match userid {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &form.username));
            return Err(server_error());
        },
        Ok(value) => value,
    };

    cookies.add_private(Cookie::new("userid", userid));
    cookies.add_private(Cookie::new("username", form.username.clone()));
    cookies.add_private(Cookie::new("email", form.email.clone()));

    info!("{}", format!("Server>>Client:\tApproving action {} for {}", &route, &form.username));
    Ok(Redirect::to("/"))
}

///
///Login route
///
///INPUT:  form data, cookies and DB access
///OUTPUT: redirect home / re-rendered form with the error
///
#[post("/login", data = "<form>")]
async fn post_login(form: Form<LoginForm>, cookies: &CookieJar<'_>, db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<Redirect, status::Custom<RawHtml<String>>> {
    let form = form.into_inner();

    let user = get_user_doc(&db.db, form.username.clone()).await;
    let user = match user {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &form.username));
            return Err(server_error());
        },
        Ok(value) => value,
    };

    let user = match user {
        Some(value) => value,
        None => return Err(error_page(format_login(&file.config, Some(String::from("Invalid username or password"))).await, Status::Ok)),
    };

    if !auth::verify_password(&form.password, &user.password).unwrap_or(false) {
        return Err(error_page(format_login(&file.config, Some(String::from("Invalid username or password"))).await, Status::Ok));
    }

    cookies.add_private(Cookie::new("userid", user._id.unwrap_or_default().to_hex()));
    cookies.add_private(Cookie::new("username", user.username.clone()));
    cookies.add_private(Cookie::new("email", user.email.clone()));

    info!("{}", format!("Server>>Client:\tApproving action {} for {}", &route, &user.username));
    Ok(Redirect::to("/"))
}

///
///Profile edit route
///
///INPUT:  user verification, form data and DB access
///OUTPUT: redirect to the profile page
///
#[post("/editUser", data = "<form>")]
async fn post_edit_user(user: SessionUser, form: Form<EditUserForm>, db: &State<MongoState>, route: &Route) -> Result<Redirect, Status> {
    let form = form.into_inner();

    let current = get_user_by_username(&db.db, user.username.clone()).await;
    let current = match current {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
            return Err(Status::InternalServerError);
        },
        Ok(value) => value,
    };
    let current = match current {
        Some(value) => value,
        None => return Ok(Redirect::to("/")),
    };

    // the stored picture survives unless the form brings a new one
    let pfp = non_empty(&form.profile_picture).unwrap_or(current.pfp);

    let updated = update_user_profile(
        &db.db,
        user.username.clone(),
        form.first_name,
        form.last_name,
        form.phone_number,
        pfp,
    )
    .await;
    if updated.is_err() {
        error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
        return Err(Status::InternalServerError);
    }

    info!("{}", format!("Server>>Client:\tApproving action {} for {}", &route, &user.username));
    Ok(Redirect::to(format!("/profile/{}", current._id)))
}

///
///Route creation.
///
///Builds the composite id, attaches the creator (a duplicate submission
///therefore toggles the membership on the stored route), asks the maps
///service for distance and fuel when both coordinate pairs came in, and
///inserts the route and its ride. An already-stored id skips the inserts
///silently and redirects all the same.
///
#[post("/publish", data = "<form>")]
async fn create_route(user: SessionUser, form: Form<RouteForm>, db: &State<MongoState>, maps: &State<MapsState>, route: &Route) -> Result<Redirect, Status> {
    let form = form.into_inner();

    let key = RouteKey {
        purpose: form.purpose.clone(),
        s_point: form.s_point.clone(),
        destination: form.destination.clone(),
        date: form.date.clone(),
        hour: form.hour.clone(),
        minute: form.minute.clone(),
        ampm: form.ampm.clone(),
    };
    let route_id = key.compose();
    let ride_id = form.destination.clone();

    let creator = attach_user_to_route(&db.db, user.username.clone(), route_id.clone()).await;
    let creator = match creator {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
            return Err(Status::InternalServerError);
        },
        Ok(value) => value,
    };
    let creator = match creator {
        Some(value) => value,
        None => return Ok(Redirect::to("/")),
    };

    let s_lat = non_empty(&form.slat);
    let s_long = non_empty(&form.slong);
    let d_lat = non_empty(&form.dlat);
    let d_long = non_empty(&form.dlong);

    let mut new_route = RouteDocument {
        _id: route_id.clone(),
        purpose: form.purpose,
        s_point: form.s_point,
        destination: form.destination,
        route_type: form.route_type,
        date: form.date,
        hour: form.hour,
        minute: form.minute,
        ampm: form.ampm,
        details: form.details,
        creator: Some(creator),
        users: vec![],
        s_lat: s_lat.clone(),
        s_long: s_long.clone(),
        d_lat: d_lat.clone(),
        d_long: d_long.clone(),
        distance: 0.0,
        fuel: 0.0,
    };

    if let (Some(slat), Some(slong), Some(dlat), Some(dlong)) = (s_lat, s_long, d_lat, d_long) {
        let res = maps.maps.get_route_details(slat, slong, dlat, dlong);
        new_route.distance = res.distance;
        new_route.fuel = res.fuel;
    }

    let exists = route_exists(&db.db, route_id.clone()).await;
    let exists = match exists {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
            return Err(Status::InternalServerError);
        },
        Ok(value) => value,
    };

    if !exists {
        if insert_route(&db.db, &new_route).await.is_err() {
            error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
            return Err(Status::InternalServerError);
        }
        info!("Route added");

        let ride = get_ride(&db.db, ride_id.clone()).await;
        let ride = match ride {
            Err(_) => {
                error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
                return Err(Status::InternalServerError);
            },
            Ok(value) => value,
        };

        match ride {
            None => {
                if insert_ride(&db.db, ride_id.clone(), route_id.clone()).await.is_err() {
                    error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
                    return Err(Status::InternalServerError);
                }
                info!("Ride Added");
            },
            Some(_) => {
                if append_ride_route(&db.db, ride_id.clone(), route_id.clone()).await.is_err() {
                    error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
                    return Err(Status::InternalServerError);
                }
                info!("Ride Updated");
            },
        }
    }

    Ok(Redirect::to(format!("/ride/{}", urlencoding::encode(&ride_id))))
}

///
///Route selection, joins (or leaves) the chosen route
///
///INPUT:  user verification, the hidden form fields and DB access
///OUTPUT: redirect back to the ride display
///
#[post("/selectRoute", data = "<form>")]
async fn select_route(_user: SessionUser, form: Form<SelectRouteForm>, db: &State<MongoState>, route: &Route) -> Result<Redirect, Status> {
    let form = form.into_inner();

    if form.route_id.is_empty() || form.username.is_empty() || form.ride_id.is_empty() {
        return Err(Status::BadRequest);
    }

    match attach_user_to_route(&db.db, form.username.clone(), form.route_id.clone()).await {
        Err(_) => {
            error!("{}", format!("Database failed while getting {} for {}", route, &form.username));
            return Err(Status::InternalServerError);
        },
        Ok(_) => {},
    }

    info!("{}", format!("Server>>Client:\tApproving action {} for {}", &route, &form.username));
    Ok(Redirect::to(format!("/ride/{}", urlencoding::encode(&form.ride_id))))
}

///
///Delete a route the user no longer wants listed
///
///INPUT:  user verification, route ID and DB access
///OUTPUT: redirect to the my-rides page
///
#[post("/deleteRide/<ride_id>")]
async fn delete_ride(user: SessionUser, db: &State<MongoState>, ride_id: String, route: &Route) -> Result<Redirect, Status> {
    if delete_route(&db.db, ride_id).await.is_err() {
        error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
        return Err(Status::InternalServerError);
    }

    info!("{}", format!("Server>>Client:\tApproving action {} for {}", &route, &user.username));
    Ok(Redirect::to("/myrides"))
}

///
///Topic creation route
///
///INPUT:  user verification, form data and DB access
///OUTPUT: redirect to the forum / re-rendered form with the error
///
#[post("/forum/create", data = "<form>")]
async fn post_create_topic(user: SessionUser, form: Form<TopicForm>, db: &State<MongoState>, file: &State<Config>, route: &Route) -> Result<Redirect, status::Custom<RawHtml<String>>> {
    let form = form.into_inner();

    if form.ride_id.is_empty() || form.title.is_empty() || form.content.is_empty() {
        let format = format_create_topic(
            &file.config,
            Some(user.username.clone()),
            Some(String::from("All fields are required!")),
            &db.db,
        )
        .await;
        return Err(error_page(format, Status::Ok));
    }

    let inserted = insert_topic(&db.db, form.ride_id, form.title, form.content, user.username.clone()).await;
    if inserted.is_err() {
        error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
        return Err(server_error());
    }

    info!("{}", format!("Server>>Client:\tApproving action {} for {}", &route, &user.username));
    Ok(Redirect::to("/forum"))
}

///
///Comment creation route
///
///INPUT:  user verification, topic ID, form data and DB access
///OUTPUT: redirect back to the topic details
///
#[post("/forum/topic/<topic_id>/comment", data = "<form>")]
async fn post_add_comment(user: SessionUser, form: Form<CommentForm>, db: &State<MongoState>, topic_id: String, route: &Route) -> Result<Redirect, Status> {
    let oid = match ObjectId::parse_str(&topic_id) {
        Ok(value) => value,
        Err(_) => return Err(Status::NotFound),
    };

    let form = form.into_inner();
    if insert_comment(&db.db, oid, form.content, user.username.clone()).await.is_err() {
        error!("{}", format!("Database failed while getting {} for {}", route, &user.username));
        return Err(Status::InternalServerError);
    }

    info!("{}", format!("Server>>Client:\tApproving action {} for {}", &route, &user.username));
    Ok(Redirect::to(format!("/forum/topic/{}", topic_id)))
}

pub fn post_routes() -> Vec<Route> {
    return routes![
        post_register, post_login, post_edit_user, create_route,
        select_route, delete_ride, post_create_topic, post_add_comment];
}
