//!
//! Documentation of the odm module.
//! Used to connect to the PackTravel database.
//!




use super::*;
use models::*;
use odm_utils::*;
use config::config::ConfyConfig;
use std::time::Duration;

use mongodb::bson::{doc, Document};
use mongodb::Database;

// The async ODM for the MongoDB database connection and queries

use futures::stream::TryStreamExt;
use mongodb::options::FindOneAndUpdateOptions;
use mongodb::options::FindOptions;
use mongodb::options::ReturnDocument;

use mongodb::options::ClientOptions;
use mongodb::Client;
use mongodb::options::ListDatabasesOptions;
use bson::oid::ObjectId;
use log::{error, info};

///
/// Initiate DB connection
///
///
/// # Arguments
///
/// * `config` - A config object containing 'database' and 'database_ip'
///
///
/// # Log
///
/// * `info` - "Database Connected!", indicating success
/// * `error` - "Could not connect to MongoDB {error}", indicating error
///
pub async fn init(config: &ConfyConfig) -> mongodb::error::Result<Database> {
    connect(&config).await
}

/// basic connection, isn't available out of the "odm.rs" module
async fn connect(config: &ConfyConfig) -> mongodb::error::Result<Database> {

    let mut client_options = ClientOptions::parse(&config.database_ip).await?;
    client_options.connect_timeout = Some(Duration::from_secs(config.timeout));
    client_options.heartbeat_freq = Some(Duration::from_secs(config.timeout));
    client_options.server_selection_timeout = Some(Duration::from_secs(config.timeout));
    let client = Client::with_options(client_options)?;

    match client.list_database_names(Document::new(), ListDatabasesOptions::builder().build()).await {
        Ok(_) => {
            info!("Database Connected!");
        },
        Err(value) => {
            error!("{}", format!("Could not connect to MongoDB {}", value));
            return Err(value);
        },
    }

    let database = client.database(&config.database[..]);

    Ok(database)
}

//
// USER ACTIONS
//


///
/// Get user by username, raw document form
///
/// # Arguments
///
/// * `database` - Refrence to a database object
/// * `username` - The username
///
/// # Output
///
/// * Err(_) - indicates DB error
/// * Ok(None) - user has not been found
/// * Ok(Some(value)) - user has been found
///
pub async fn get_user_doc(
    db: &Database,
    username: String,
) -> mongodb::error::Result<Option<UserDocument>> {
    let collection = db.collection::<UserDocument>("userData");

    let user_doc = collection.find_one(doc! {"username": username }, None).await?;

    Ok(user_doc)
}

/// Get user by username
pub async fn get_user_by_username(
    db: &Database,
    username: String,
) -> mongodb::error::Result<Option<User>> {
    let user_doc = get_user_doc(&db, username).await?;
    if user_doc.is_none() {
        return Ok(None);
    }

    let unwrapped_doc = user_doc.unwrap();
    // transform ObjectId to String
    let user_json = doc_to_user(&unwrapped_doc);

    Ok(Some(user_json))
}

/// Get user by id
pub async fn get_user_by_id(
    db: &Database,
    id: ObjectId,
) -> mongodb::error::Result<Option<User>> {
    let collection = db.collection::<UserDocument>("userData");

    let user_doc = collection.find_one(doc! {"_id": id }, None).await?;
    if user_doc.is_none() {
        return Ok(None);
    }

    let unwrapped_doc = user_doc.unwrap();
    // transform ObjectId to String
    let user_json = doc_to_user(&unwrapped_doc);

    Ok(Some(user_json))
}

/// Checks if a user exists (via username)
pub async fn user_exists(db: &Database, username: String) -> mongodb::error::Result<bool> {
    match get_user_doc(&db, username).await {
        Err(value) => Err(value),
        Ok(value) => {
            match value {
                None => return Ok(false),
                Some(_) => return Ok(true),
            }
        }
    }
}

/// Checks if a unity id is already taken
pub async fn unityid_exists(db: &Database, unityid: String) -> mongodb::error::Result<bool> {
    let collection = db.collection::<UserDocument>("userData");
    let user_doc = collection.find_one(doc! {"unityid": unityid }, None).await?;

    Ok(user_doc.is_some())
}

/// Creates an inserts a new user, with an empty rides list.
/// The password arrives hashed already.
pub async fn insert_user(
    db: &Database,
    username: String,
    unityid: String,
    fname: String,
    lname: String,
    email: String,
    password: String,
    phone: String,
    pfp: String,
) -> mongodb::error::Result<String> {
    let collection = db.collection::<Document>("userData");

    let insert_one_result = collection
        .insert_one(
            doc! {
                  "username": username.clone(),
                  "unityid":  unityid,
                  "fname":    fname,
                  "lname":    lname,
                  "email":    email,
                  "password": password,
                  "phone":    phone,
                  "rides":    Vec::<String>::new(),
                  "pfp":      pfp,
        },
            None,
        )
        .await?;

    match insert_one_result.inserted_id.as_object_id() {
        Some(value) => Ok(value.to_hex()),
        None => Ok(String::new()),
    }
}

/// Replace the rides list of a user
pub async fn update_user_rides(
    db: &Database,
    username: String,
    rides: Vec<String>,
) -> mongodb::error::Result<Option<User>> {
    let collection = db.collection::<UserDocument>("userData");
    let find_one_and_update_options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let user_doc = collection
        .find_one_and_update(
            doc! {"username":  username   },
            doc! {"$set": doc! { "rides": rides} },
            find_one_and_update_options,
        )
        .await?;

    if user_doc.is_none() {
        return Ok(None);
    }

    let unwrapped_doc = user_doc.unwrap();
    // transform ObjectId to String
    let user_json = doc_to_user(&unwrapped_doc);

    Ok(Some(user_json))
}

/// Update the editable profile fields of a user
pub async fn update_user_profile(
    db: &Database,
    username: String,
    fname: String,
    lname: String,
    phone: String,
    pfp: String,
) -> mongodb::error::Result<Option<User>> {
    let collection = db.collection::<UserDocument>("userData");
    let find_one_and_update_options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let user_doc = collection
        .find_one_and_update(
            doc! {"username":  username   },
            doc! {"$set": doc! {
                  "fname": fname,
                  "lname": lname,
                  "phone": phone,
                  "pfp":   pfp } },
            find_one_and_update_options,
        )
        .await?;

    if user_doc.is_none() {
        return Ok(None);
    }

    let unwrapped_doc = user_doc.unwrap();
    let user_json = doc_to_user(&unwrapped_doc);

    Ok(Some(user_json))
}

//
// ROUTE actions
//

/// Get route by it's ID
pub async fn get_route(db: &Database, id: String) -> mongodb::error::Result<Option<RouteDocument>> {
    let collection = db.collection::<RouteDocument>("routes");

    let route_doc = collection.find_one(doc! {"_id": id }, None).await?;

    Ok(route_doc)
}

/// Checks whether a route with this id is stored already
pub async fn route_exists(db: &Database, id: String) -> mongodb::error::Result<bool> {
    let route = get_route(&db, id).await?;

    Ok(route.is_some())
}

/// Insert a given route to the database
pub async fn insert_route(
    db: &Database,
    route: &RouteDocument,
) -> mongodb::error::Result<String> {
    let collection = db.collection::<RouteDocument>("routes");

    let insert_one_result = collection.insert_one(route, None).await?;

    Ok(insert_one_result.inserted_id.to_string())
}

/// Update a route's users list
pub async fn update_route_users(
    db: &Database,
    route_id: String,
    users: Vec<ObjectId>,
) -> mongodb::error::Result<Option<RouteDocument>> {
    let collection = db.collection::<RouteDocument>("routes");
    let find_one_and_update_options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let route_doc = collection
        .find_one_and_update(
            doc! {"_id":  route_id   },
            doc! {"$set": doc! { "users": users } },
            find_one_and_update_options,
        )
        .await?;

    Ok(route_doc)
}

/// Gets all the routes
pub async fn get_all_routes(db: &Database) -> mongodb::error::Result<Vec<RouteDocument>> {
    let collection = db.collection::<RouteDocument>("routes");
    let find_options = FindOptions::builder().build();

    let mut cursor = collection.find(None, find_options).await?;

    let mut routes: Vec<RouteDocument> = vec![];
    while let Some(result) = cursor.try_next().await? {
        routes.push(result);
    }
    Ok(routes)
}

/// Gets the routes whose id is in the given set
pub async fn get_routes_by_ids(
    db: &Database,
    ids: Vec<String>,
) -> mongodb::error::Result<Vec<RouteDocument>> {
    let collection = db.collection::<RouteDocument>("routes");

    let mut cursor = collection.find(doc! {"_id": doc! {"$in": ids} }, None).await?;

    let mut routes: Vec<RouteDocument> = vec![];
    while let Some(result) = cursor.try_next().await? {
        routes.push(result);
    }
    Ok(routes)
}

/// Gets the routes at least one user has joined
pub async fn get_routes_with_users(db: &Database) -> mongodb::error::Result<Vec<RouteDocument>> {
    let collection = db.collection::<RouteDocument>("routes");

    let mut cursor = collection
        .find(doc! {"users": doc! {"$ne": Vec::<ObjectId>::new()} }, None)
        .await?;

    let mut routes: Vec<RouteDocument> = vec![];
    while let Some(result) = cursor.try_next().await? {
        routes.push(result);
    }
    Ok(routes)
}

/// Gets the routes a given user has created
pub async fn get_routes_by_creator(
    db: &Database,
    creator: ObjectId,
) -> mongodb::error::Result<Vec<RouteDocument>> {
    let collection = db.collection::<RouteDocument>("routes");

    let mut cursor = collection.find(doc! {"creator": creator }, None).await?;

    let mut routes: Vec<RouteDocument> = vec![];
    while let Some(result) = cursor.try_next().await? {
        routes.push(result);
    }
    Ok(routes)
}

/// Deletes a route
pub async fn delete_route(db: &Database, id: String) -> mongodb::error::Result<()> {
    let collection = db.collection::<RouteDocument>("routes");

    let _ = collection.delete_one(doc! {"_id": id }, None).await?;

    Ok(())
}

//
// RIDE actions
//

/// Get ride (destination aggregation) by it's ID
pub async fn get_ride(db: &Database, id: String) -> mongodb::error::Result<Option<RideDocument>> {
    let collection = db.collection::<RideDocument>("rides");

    let ride_doc = collection.find_one(doc! {"_id": id }, None).await?;

    Ok(ride_doc)
}

/// Gets all the rides
pub async fn get_all_rides(db: &Database) -> mongodb::error::Result<Vec<RideDocument>> {
    let collection = db.collection::<RideDocument>("rides");
    let find_options = FindOptions::builder().build();

    let mut cursor = collection.find(None, find_options).await?;

    let mut rides: Vec<RideDocument> = vec![];
    while let Some(result) = cursor.try_next().await? {
        rides.push(result);
    }
    Ok(rides)
}

/// Creates the ride for a destination with its first route
pub async fn insert_ride(
    db: &Database,
    destination: String,
    route_id: String,
) -> mongodb::error::Result<String> {
    let collection = db.collection::<Document>("rides");

    let insert_one_result = collection
        .insert_one(
            doc! {
                  "_id":         destination.clone(),
                  "destination": destination,
                  "route_id":    vec![route_id],
        },
            None,
        )
        .await?;

    Ok(insert_one_result.inserted_id.to_string())
}

/// Appends a route id to an existing ride. Read-modify-write, two
/// concurrent appends can lose one of the ids.
pub async fn append_ride_route(
    db: &Database,
    ride_id: String,
    route_id: String,
) -> mongodb::error::Result<Option<RideDocument>> {
    let collection = db.collection::<RideDocument>("rides");
    let find_one_and_update_options = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let ride = get_ride(&db, ride_id.clone()).await?;
    let mut ride = match ride {
        Some(value) => value,
        None => return Ok(None),
    };

    ride.route_id.push(route_id);

    let ride_doc = collection
        .find_one_and_update(
            doc! {"_id":  ride_id   },
            doc! {"$set": doc! { "route_id": ride.route_id } },
            find_one_and_update_options,
        )
        .await?;

    Ok(ride_doc)
}

//
// RIDE / ROUTE core logic
//

///
/// Attaches a route to a user, toggling the membership on the route side.
///
/// The user's rides list is appended unconditionally, while the route's
/// users list is scanned first: a user already present is removed (leave),
/// one that is absent is appended (join). The two sides drift apart on
/// purpose, stored documents depend on the growing user list.
///
/// # Output
///
/// * Err(_) - indicates DB error
/// * Ok(None) - the user does not exist
/// * Ok(Some(id)) - the user's id; when the route does not exist only the
///   user side was updated
///
pub async fn attach_user_to_route(
    db: &Database,
    username: String,
    route_id: String,
) -> mongodb::error::Result<Option<ObjectId>> {
    let user = get_user_doc(&db, username.clone()).await?;
    let user = match user {
        Some(value) => value,
        None => return Ok(None),
    };
    let user_id = user._id.unwrap_or_default();

    let mut rides = user.rides.clone();
    rides.push(route_id.clone());
    let _ = update_user_rides(&db, username, rides).await?;

    let route = get_route(&db, route_id.clone()).await?;
    let route = match route {
        Some(value) => value,
        None => return Ok(Some(user_id)),
    };

    let users = toggle_membership(route.users, user_id.clone());
    let _ = update_route_users(&db, route_id, users).await?;

    Ok(Some(user_id))
}

///
/// The routes of a ride, prepared for display.
///
/// Fetches every route in the ride's route_id set, resolves the creator,
/// rounds the distance and drops the routes whose id date token lies in
/// the past. Today's routes stay in.
///
pub async fn get_ride_routes(
    db: &Database,
    ride: &RideDocument,
) -> mongodb::error::Result<Vec<RouteView>> {
    let documents = get_routes_by_ids(&db, ride.route_id.clone()).await?;

    let mut docs: Vec<RouteView> = vec![];
    for document in documents {
        let route_date = RouteKey::date_token(&document._id).to_string();
        let creator = match document.creator {
            Some(value) => get_user_by_id(&db, value).await?,
            None => None,
        };
        if !has_date_passed(&route_date) {
            docs.push(route_to_view(&document, creator));
        }
    }
    Ok(docs)
}

/// The route of the given list the user has already joined.
///
/// # Output
///
/// * Ok(None) - no username, unknown user, or none of the routes joined
/// * Ok(Some(id)) - the joined route
pub async fn route_select(
    db: &Database,
    username: Option<String>,
    routes: &[RouteView],
) -> mongodb::error::Result<Option<String>> {
    let username = match username {
        Some(value) => value,
        None => return Ok(None),
    };
    let user = get_user_doc(&db, username).await?;
    let user = match user {
        Some(value) => value,
        None => return Ok(None),
    };

    Ok(select_route_id(&user.rides, routes))
}

/// Every ride annotated with its count of not-yet-passed routes.
/// The dates come off the raw route ids, no route documents are fetched.
pub async fn get_rides_with_counts(db: &Database) -> mongodb::error::Result<Vec<RideSummary>> {
    let all_rides = get_all_rides(&db).await?;
    let today = chrono::Local::now().date_naive();

    let mut processed: Vec<RideSummary> = vec![];
    for ride in all_rides {
        let count = active_route_count(&ride.route_id, today);
        processed.push(RideSummary {
            id:          ride._id,
            destination: ride.destination,
            route_id:    ride.route_id,
            count,
        });
    }
    Ok(processed)
}

/// The favorite destinations ranking: joined-user counts per destination
/// bucket, biggest first, top 20 at most
pub async fn favorite_destinations(db: &Database) -> mongodb::error::Result<Vec<FavoriteBucket>> {
    let routes = get_routes_with_users(&db).await?;

    Ok(rank_destinations(&routes))
}

//
// TOPIC / COMMENT actions
//

/// Gets the forum topics opened for a ride destination
pub async fn get_topics_for_ride(
    db: &Database,
    ride_id: String,
) -> mongodb::error::Result<Vec<Topic>> {
    let collection = db.collection::<TopicDocument>("topics");

    let mut cursor = collection.find(doc! {"ride_id": ride_id }, None).await?;

    let mut topics: Vec<Topic> = vec![];
    while let Some(result) = cursor.try_next().await? {
        topics.push(doc_to_topic(&result));
    }
    Ok(topics)
}

/// Get a topic by it's ID
pub async fn get_topic(db: &Database, id: ObjectId) -> mongodb::error::Result<Option<Topic>> {
    let collection = db.collection::<TopicDocument>("topics");

    let topic_doc = collection.find_one(doc! {"_id": id }, None).await?;
    if topic_doc.is_none() {
        return Ok(None);
    }

    let unwrapped_doc = topic_doc.unwrap();
    // transform ObjectId to String
    let topic_json = doc_to_topic(&unwrapped_doc);

    Ok(Some(topic_json))
}

/// Opens a topic on a ride destination
pub async fn insert_topic(
    db: &Database,
    ride_id: String,
    title: String,
    content: String,
    creator: String,
) -> mongodb::error::Result<String> {
    let collection = db.collection::<Document>("topics");

    let insert_one_result = collection
        .insert_one(
            doc! {
                  "ride_id":    ride_id,
                  "title":      title,
                  "content":    content,
                  "creator":    creator,
                  "created_at": bson::DateTime::now(),
        },
            None,
        )
        .await?;

    Ok(insert_one_result.inserted_id.to_string())
}

/// Gets the comments under a topic
pub async fn get_comments_for_topic(
    db: &Database,
    topic_id: ObjectId,
) -> mongodb::error::Result<Vec<Comment>> {
    let collection = db.collection::<CommentDocument>("comments");

    let mut cursor = collection.find(doc! {"topic_id": topic_id }, None).await?;

    let mut comments: Vec<Comment> = vec![];
    while let Some(result) = cursor.try_next().await? {
        comments.push(doc_to_comment(&result));
    }
    Ok(comments)
}

/// Adds a comment under a topic
pub async fn insert_comment(
    db: &Database,
    topic_id: ObjectId,
    content: String,
    creator: String,
) -> mongodb::error::Result<String> {
    let collection = db.collection::<Document>("comments");

    let insert_one_result = collection
        .insert_one(
            doc! {
                  "topic_id":   topic_id,
                  "content":    content,
                  "creator":    creator,
                  "created_at": bson::DateTime::now(),
        },
            None,
        )
        .await?;

    Ok(insert_one_result.inserted_id.to_string())
}
