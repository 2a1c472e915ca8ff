
use super::*;
use ODM::models::*;
use ODM::odm_utils::*;
use routes::validators;
use services::google_maps::RouteDetails;
use bson::oid::ObjectId;
use chrono::NaiveDate;

const TODAY: &str = "2026-08-06";

fn today() -> NaiveDate {
    NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap()
}

fn route_doc(id: &str, destination: &str, user_count: usize) -> RouteDocument {
    let mut users = vec![];
    for _ in 0..user_count {
        users.push(ObjectId::new());
    }
    RouteDocument {
        _id: id.to_string(),
        purpose: "Class".to_string(),
        s_point: "Hunt Library".to_string(),
        destination: destination.to_string(),
        route_type: "Carpool".to_string(),
        date: TODAY.to_string(),
        hour: "10".to_string(),
        minute: "30".to_string(),
        ampm: "AM".to_string(),
        details: "".to_string(),
        creator: Some(ObjectId::new()),
        users,
        s_lat: None,
        s_long: None,
        d_lat: None,
        d_long: None,
        distance: 0.0,
        fuel: 0.0,
    }
}

fn route_view(id: &str) -> RouteView {
    route_to_view(&route_doc(id, "Asheville", 0), None)
}

#[test]
fn test_route_key_compose() {
    let key = RouteKey {
        purpose: "Class".to_string(),
        s_point: "Hunt Library".to_string(),
        destination: "Carmichael Gym".to_string(),
        date: "2026-11-02".to_string(),
        hour: "10".to_string(),
        minute: "30".to_string(),
        ampm: "AM".to_string(),
    };
    assert_eq!(
        key.compose(),
        "Class_Hunt Library_Carmichael Gym_2026-11-02_10_30_AM"
    );
}

#[test]
fn test_route_key_date_token() {
    let id = "Class_Hunt Library_Carmichael Gym_2026-11-02_10_30_AM";
    assert_eq!(RouteKey::date_token(id), "2026-11-02");
}

#[test]
fn test_date_passed_strictly_before_today() {
    assert!(date_passed("2026-08-05", today()));
    assert!(!date_passed("2026-08-06", today()));
    assert!(!date_passed("2026-08-07", today()));
}

#[test]
fn test_active_route_count_excludes_passed_dates() {
    let ids = vec![
        "Class_A_B_2026-08-05_9_00_AM".to_string(),
        "Class_A_B_2026-08-06_9_00_AM".to_string(),
        "Class_A_B_2026-08-07_9_00_AM".to_string(),
    ];
    // yesterday out, today and tomorrow in
    assert_eq!(active_route_count(&ids, today()), 2);
}

#[test]
fn test_toggle_joins_then_leaves() {
    let user = ObjectId::new();
    let other = ObjectId::new();

    let users = toggle_membership(vec![other], user);
    assert_eq!(users, vec![other, user]);

    // the second toggle undoes the first
    let users = toggle_membership(users, user);
    assert_eq!(users, vec![other]);
}

#[test]
fn test_toggle_never_duplicates_route_side() {
    let user = ObjectId::new();

    let mut users = vec![];
    let mut rides: Vec<String> = vec![];
    for _ in 0..3 {
        rides.push("R1".to_string());
        users = toggle_membership(users, user);
    }

    // the user side keeps every join, the route side toggles
    assert_eq!(rides.len(), 3);
    assert_eq!(users, vec![user]);
}

#[test]
fn test_select_route_id_finds_joined_route() {
    let routes = vec![route_view("R1"), route_view("R2")];

    let rides = vec!["R2".to_string()];
    assert_eq!(select_route_id(&rides, &routes), Some("R2".to_string()));

    assert_eq!(select_route_id(&[], &routes), None);
    assert_eq!(select_route_id(&["R9".to_string()], &routes), None);
}

#[test]
fn test_route_view_rounds_distance() {
    let mut doc = route_doc("R1", "Asheville", 0);
    doc.distance = 20.54;
    let view = route_to_view(&doc, None);
    assert_eq!(view.distance, 20.5);

    doc.distance = 3.16;
    let view = route_to_view(&doc, None);
    assert_eq!(view.distance, 3.2);
}

#[test]
fn test_rank_destinations_orders_by_user_count() {
    let routes = vec![
        route_doc("R1", "Asheville", 5),
        route_doc("R2", "Boone", 5),
        route_doc("R3", "Charlotte", 10),
    ];

    let ranking = rank_destinations(&routes);
    assert_eq!(ranking.len(), 3);
    assert_eq!(ranking[0].destination, "Charlotte");
    assert_eq!(ranking[0].user_count, 10);
    // equal counts keep their incoming order
    assert_eq!(ranking[1].destination, "Asheville");
    assert_eq!(ranking[2].destination, "Boone");
}

#[test]
fn test_rank_destinations_merges_same_destination() {
    let routes = vec![
        route_doc("R1", "New York", 3),
        route_doc("R2", "New York", 4),
    ];

    let ranking = rank_destinations(&routes);
    assert_eq!(ranking.len(), 1);
    assert_eq!(ranking[0].user_count, 7);
    // the slug is the URL-encoded destination
    assert_eq!(ranking[0].destination_slug, "New%20York");
}

#[test]
fn test_rank_destinations_truncates_to_top_picks() {
    let mut routes = vec![];
    for i in 0..25 {
        routes.push(route_doc(&format!("R{}", i), &format!("Stop {}", i), i));
    }

    let ranking = rank_destinations(&routes);
    assert_eq!(ranking.len(), TOP_PICKS);
    assert_eq!(ranking[0].user_count, 24);
    assert_eq!(ranking[ranking.len() - 1].user_count, 5);
}

#[test]
fn test_route_details_defaults_to_zeros() {
    let details = RouteDetails::default();
    assert_eq!(details.distance, 0.0);
    assert_eq!(details.fuel, 0.0);
}

#[test]
fn test_validate_email_domain() {
    assert!(validators::validate_email_domain("jdoe42@ncsu.edu").is_ok());

    assert!(validators::validate_email_domain("jdoe42@gmail.com").is_err());
    assert!(validators::validate_email_domain("j.doe@ncsu.edu").is_err());
    assert!(validators::validate_email_domain("jdoe@42@ncsu.edu").is_err());
    assert!(validators::validate_email_domain("ncsu.edu").is_err());
}

#[test]
fn test_validate_password_accepts_strong_password() {
    assert!(validators::validate_password("Secur3P@ss").is_ok());
}

#[test]
fn test_validate_password_rejects_weak_passwords() {
    // too short / too long
    assert!(validators::validate_password("Ab1!").is_err());
    assert!(validators::validate_password("Abcdefgh1!Abcdefgh1!").is_err());
    // missing character classes
    assert!(validators::validate_password("secur3p@ss").is_err());
    assert!(validators::validate_password("SECUR3P@SS").is_err());
    assert!(validators::validate_password("SecurePas!").is_err());
    assert!(validators::validate_password("Secur3Pass").is_err());
    // too common
    assert!(validators::validate_password("Password!123456").is_err());
    // repeated run
    assert!(validators::validate_password("Saaa3P@ss").is_err());
}

#[test]
fn test_hash_and_verify_password() {
    let hash = routes::auth::hash_password("Secur3P@ss").unwrap();
    assert!(routes::auth::verify_password("Secur3P@ss", &hash).unwrap());
    assert!(!routes::auth::verify_password("WrongP@ss1", &hash).unwrap());
}
