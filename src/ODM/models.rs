//!
//! Documentation of the Models module.
//! Contains all the models needed for a PackTravel connection.
//!



use serde::{Serialize, Deserialize};
use bson::{oid::ObjectId, DateTime};

/*
Models for the MongoDB operations
*/
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserDocument {
    /// The ID of the model.
    pub _id: Option<ObjectId>,
    /// The username, unique across the userData collection
    pub username: String,
    /// The campus unity ID, unique as well
    pub unityid: String,
    /// First name
    pub fname: String,
    /// Last name
    pub lname: String,
    /// The user's email address (ncsu.edu only)
    pub email: String,
    /// The argon2 hash of the password
    pub password: String,
    /// Phone number
    pub phone: String,
    /// Route ids the user has joined, in join order.
    /// Repeated joins append again, so duplicates are possible.
    #[serde(default)]
    pub rides: Vec<String>,
    /// Profile picture URL
    #[serde(default)]
    pub pfp: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    /// The ID of the model, as a hex string
    pub _id: String,
    /// The username
    pub username: String,
    /// The campus unity ID
    pub unityid: String,
    pub fname: String,
    pub lname: String,
    pub email: String,
    pub phone: String,
    /// Route ids the user has joined
    pub rides: Vec<String>,
    /// Profile picture URL
    pub pfp: String,
}

/// The composite key of a route.
///
/// The stored `_id` stays the joined string so that documents written by
/// earlier deployments keep resolving, and so the ride aggregation can read
/// the date token off raw ids without fetching the route. The positional
/// split lives here and nowhere else.
#[derive(Debug, Clone)]
pub struct RouteKey {
    pub purpose: String,
    pub s_point: String,
    pub destination: String,
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub ampm: String,
}

impl RouteKey {
    /// The stored identifier: all seven parts joined with '_'
    pub fn compose(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}_{}_{}",
            self.purpose, self.s_point, self.destination,
            self.date, self.hour, self.minute, self.ampm
        )
    }

    /// The date part of a composed id. Index 3 of the split, so an
    /// underscore inside purpose/start/destination shifts the token.
    pub fn date_token(id: &str) -> &str {
        id.split('_').nth(3).unwrap_or_default()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RouteDocument {
    /// The composite id, see RouteKey
    pub _id: String,
    /// Why the trip happens (the first key part)
    pub purpose: String,
    /// Starting point
    pub s_point: String,
    /// Destination, doubles as the owning ride id
    pub destination: String,
    /// Travel type (carpool, rental, ...)
    #[serde(rename = "type", default)]
    pub route_type: String,
    /// Trip date, strict YYYY-MM-DD
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub ampm: String,
    #[serde(default)]
    pub details: String,
    /// The creating user's id
    pub creator: Option<ObjectId>,
    /// Joined users. Toggled by scan-and-remove, kept duplicate-free there.
    #[serde(default)]
    pub users: Vec<ObjectId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_lat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s_long: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d_lat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub d_long: Option<String>,
    /// Kilometers, 0 when the directions call failed or never ran
    #[serde(default)]
    pub distance: f64,
    /// Liters, same contract as distance
    #[serde(default)]
    pub fuel: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Route {
    /// The composite id
    pub id: String,
    pub purpose: String,
    pub s_point: String,
    pub destination: String,
    pub route_type: String,
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub ampm: String,
    pub details: String,
    /// How many users have joined
    pub user_count: usize,
    pub distance: f64,
    pub fuel: f64,
}

/// A route prepared for the ride display page: creator inlined,
/// distance rounded to one decimal.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RouteView {
    pub id: String,
    pub purpose: String,
    pub s_point: String,
    pub destination: String,
    pub route_type: String,
    pub date: String,
    pub hour: String,
    pub minute: String,
    pub ampm: String,
    pub details: String,
    pub creator: Option<User>,
    pub user_count: usize,
    pub distance: f64,
    pub fuel: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RideDocument {
    /// The destination string doubles as the id, so two different trips
    /// to the same destination land in the same ride.
    pub _id: String,
    pub destination: String,
    /// Ids of the routes grouped under this destination
    #[serde(default)]
    pub route_id: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Ride {
    pub id: String,
    pub destination: String,
    pub route_id: Vec<String>,
}

/// A ride annotated with its not-yet-passed route count, for the search page
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RideSummary {
    pub id: String,
    pub destination: String,
    pub route_id: Vec<String>,
    pub count: usize,
}

/// One destination bucket of the favorites ranking
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FavoriteBucket {
    pub destination_slug: String,
    pub destination: String,
    pub user_count: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TopicDocument {
    pub _id: Option<ObjectId>,
    /// The destination string of the ride the topic belongs to
    pub ride_id: String,
    pub title: String,
    pub content: String,
    /// Username of the author
    pub creator: String,
    pub created_at: DateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Topic {
    pub id: String,
    pub ride_id: String,
    pub title: String,
    pub content: String,
    pub creator: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CommentDocument {
    pub _id: Option<ObjectId>,
    pub topic_id: ObjectId,
    pub content: String,
    pub creator: String,
    pub created_at: DateTime,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Comment {
    pub id: String,
    pub topic_id: String,
    pub content: String,
    pub creator: String,
    pub created_at: String,
}

/// A ride paired with its forum topics, for the forum overview
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RideTopics {
    pub ride: Route,
    pub topics: Vec<Topic>,
}
