use super::*;
use config::config::ConfyConfig;
use services::google_maps::MapsService;
use rocket::form::FromForm;
use rocket::request::{Request, FromRequest, Outcome};

// Checking that a user is connected
#[rocket::async_trait]
impl<'r> FromRequest<'r> for SessionUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<SessionUser, ()> {
        let cookies = request.cookies();

        let route = match request.route() {
            None => format!("Unknown Route"),
            Some(value) => format!("{}", value),
        };
        let method = request.method();
        if let Some(userid_cookie) = cookies.get_private("userid") {

            if let Some(name_cookie) = cookies.get_private("username") {

                if let Some(email_cookie) = cookies.get_private("email") {
                    log::info!("{}", format!("Client>>Server:\t{} is trying to access route: {} as {}", name_cookie.value(), route, method));

                    return Outcome::Success(SessionUser {
                        userid: userid_cookie.value().to_string(),
                        username: name_cookie.value().to_string(),
                        email: email_cookie.value().to_string(),
                    });

                }
            }
        }

        Outcome::Forward(Status::Unauthorized)
    }
}

/// The logged-in user, read back from the private session cookies
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub userid: String,
    pub username: String,
    pub email: String,
}

/// Empty form values count as missing
pub fn non_empty(value: &Option<String>) -> Option<String> {
    match value {
        Some(inner) if !inner.is_empty() => Some(inner.to_string()),
        _ => None,
    }
}

// Models for Input Check and Login Check
#[derive(FromForm, Debug)]
pub struct RegisterForm {
    pub username: String,
    pub unityid: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
    pub phone_number: String,
    pub profile_picture: Option<String>,
}

#[derive(FromForm, Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(FromForm, Debug)]
pub struct EditUserForm {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub profile_picture: Option<String>,
}

#[derive(FromForm, Debug)]
pub struct RouteForm {
    pub purpose: String,
    pub s_point: String,
    pub destination: String,
    #[field(name = "type")]
    pub route_type: String,
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub ampm: String,
    pub details: String,
    pub slat: Option<String>,
    pub slong: Option<String>,
    pub dlat: Option<String>,
    pub dlong: Option<String>,
}

#[derive(FromForm, Debug)]
pub struct SelectRouteForm {
    pub route_id: String,
    pub username: String,
    pub ride_id: String,
}

#[derive(FromForm, Debug)]
pub struct TopicForm {
    pub ride_id: String,
    pub title: String,
    pub content: String,
}

#[derive(FromForm, Debug)]
pub struct CommentForm {
    pub content: String,
}

// Utils struct for rocket::manage
pub struct MongoState {
    pub db: Database,
}

pub struct Config {
    pub config: ConfyConfig,
}

pub struct MapsState {
    pub maps: MapsService,
}
