//!
//! Documentation of the Database Utilities module.
//! Converters and the pure pieces of the ride/route logic.
//!

use super::*;
use models::*;
use chrono::NaiveDate;

/// Favorites page shows the top picks at most
pub const TOP_PICKS: usize = 20;

/// Converts a UserDocument to User
pub fn doc_to_user(document: &UserDocument) -> User {
    let _id =      &document._id;
    let username = &document.username;
    let unityid =  &document.unityid;
    let email =    &document.email;

    // transform ObjectId to String
    let user_json = User {
        _id:      _id.unwrap_or_default().to_hex(),
        username: username.to_string(),
        unityid:  unityid.to_string(),
        fname:    document.fname.to_string(),
        lname:    document.lname.to_string(),
        email:    email.to_string(),
        phone:    document.phone.to_string(),
        rides:    document.rides.clone(),
        pfp:      document.pfp.to_string(),
    };
    user_json
}

/// Converts a RouteDocument to Route
pub fn doc_to_route(document: &RouteDocument) -> Route {
    Route {
        id:          document._id.to_string(),
        purpose:     document.purpose.to_string(),
        s_point:     document.s_point.to_string(),
        destination: document.destination.to_string(),
        route_type:  document.route_type.to_string(),
        date:        document.date.to_string(),
        hour:        document.hour.to_string(),
        minute:      document.minute.to_string(),
        ampm:        document.ampm.to_string(),
        details:     document.details.to_string(),
        user_count:  document.users.len(),
        distance:    document.distance,
        fuel:        document.fuel,
    }
}

/// Converts a RouteDocument to the ride display form, with the creator
/// resolved by the caller and the distance rounded to one decimal
pub fn route_to_view(document: &RouteDocument, creator: Option<User>) -> RouteView {
    RouteView {
        id:          document._id.to_string(),
        purpose:     document.purpose.to_string(),
        s_point:     document.s_point.to_string(),
        destination: document.destination.to_string(),
        route_type:  document.route_type.to_string(),
        date:        document.date.to_string(),
        hour:        document.hour.to_string(),
        minute:      document.minute.to_string(),
        ampm:        document.ampm.to_string(),
        details:     document.details.to_string(),
        creator,
        user_count:  document.users.len(),
        distance:    round_one(document.distance),
        fuel:        document.fuel,
    }
}

/// Converts a RideDocument to Ride
pub fn doc_to_ride(document: &RideDocument) -> Ride {
    Ride {
        id:          document._id.to_string(),
        destination: document.destination.to_string(),
        route_id:    document.route_id.clone(),
    }
}

/// Converts a TopicDocument to Topic
pub fn doc_to_topic(document: &TopicDocument) -> Topic {
    Topic {
        id:         document._id.unwrap_or_default().to_hex(),
        ride_id:    document.ride_id.to_string(),
        title:      document.title.to_string(),
        content:    document.content.to_string(),
        creator:    document.creator.to_string(),
        created_at: document.created_at.to_chrono().format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Converts a CommentDocument to Comment
pub fn doc_to_comment(document: &CommentDocument) -> Comment {
    Comment {
        id:         document._id.unwrap_or_default().to_hex(),
        topic_id:   document.topic_id.to_hex(),
        content:    document.content.to_string(),
        creator:    document.creator.to_string(),
        created_at: document.created_at.to_chrono().format("%Y-%m-%d %H:%M").to_string(),
    }
}

/// Rounds to one decimal place, for the distance column
pub fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Whether the given date lies strictly before today. Strict YYYY-MM-DD only.
pub fn has_date_passed(date: &str) -> bool {
    date_passed(date, chrono::Local::now().date_naive())
}

/// The comparison behind has_date_passed. Today's date is a parameter so
/// the filter can be exercised without the wall clock.
pub fn date_passed(date: &str, today: NaiveDate) -> bool {
    let given = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    given < today
}

/// Join-if-absent / leave-if-present membership toggle for a route's users
pub fn toggle_membership(users: Vec<bson::oid::ObjectId>, user_id: bson::oid::ObjectId) -> Vec<bson::oid::ObjectId> {
    let mut users = users;
    let before = users.len();
    users.retain(|x| x != &user_id);
    if users.len() == before {
        users.push(user_id);
    }
    users
}

/// Counts the route ids whose embedded date token has not passed yet.
/// Works on the raw ids, no route fetch involved.
pub fn active_route_count(route_ids: &[String], today: NaiveDate) -> usize {
    let mut route_count = 0;
    for route in route_ids {
        let route_date = RouteKey::date_token(route);
        if !date_passed(route_date, today) {
            route_count += 1;
        }
    }
    route_count
}

/// The route out of `routes` that the user has already joined, if any
pub fn select_route_id(user_rides: &[String], routes: &[RouteView]) -> Option<String> {
    for route in routes {
        if user_rides.contains(&route.id) {
            return Some(route.id.clone());
        }
    }
    None
}

/// Buckets routes by URL-encoded destination, sums the joined users per
/// bucket and returns the biggest TOP_PICKS of them. Ties keep the order
/// the routes came in (the sort is stable).
pub fn rank_destinations(routes: &[RouteDocument]) -> Vec<FavoriteBucket> {
    let mut buckets: Vec<FavoriteBucket> = Vec::new();
    for route in routes {
        let destination_slug = urlencoding::encode(&route.destination).into_owned();
        match buckets.iter_mut().find(|x| x.destination_slug == destination_slug) {
            Some(bucket) => bucket.user_count += route.users.len(),
            None => buckets.push(FavoriteBucket {
                destination_slug,
                destination: route.destination.clone(),
                user_count: route.users.len(),
            }),
        }
    }

    buckets.sort_by(|a, b| b.user_count.cmp(&a.user_count));
    buckets.truncate(TOP_PICKS);
    buckets
}
