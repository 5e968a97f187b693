use crate::errors::ModelError;
use crate::{drink, question, show, venue};

#[test]
fn genres_join_and_split() {
    let genres = vec!["Jazz".to_string(), "Reggae".to_string(), "Swing".to_string()];
    let stored = venue::join_genres(&genres);
    assert_eq!(stored.as_deref(), Some("Jazz,Reggae,Swing"));
    assert_eq!(venue::split_genres(stored.as_deref()), genres);
    assert!(venue::split_genres(None).is_empty());
    assert!(venue::split_genres(Some("")).is_empty());
    assert_eq!(venue::join_genres(&[]), None);
}

#[test]
fn venue_requires_name_city_state() {
    assert!(venue::validate("The Musical Hop", "San Francisco", "CA").is_ok());
    assert_eq!(venue::validate("  ", "San Francisco", "CA"), Err(ModelError::required("name")));
    assert_eq!(venue::validate("Hop", "", "CA"), Err(ModelError::required("city")));
}

#[test]
fn start_time_accepts_form_formats() {
    assert_eq!(show::normalize_start_time("2035-04-01 20:00:00").unwrap(), "2035-04-01 20:00:00");
    assert_eq!(show::normalize_start_time("2035-04-01T20:00:00").unwrap(), "2035-04-01 20:00:00");
    assert_eq!(show::normalize_start_time("2035-04-01T20:00").unwrap(), "2035-04-01 20:00:00");
    assert!(show::normalize_start_time("next tuesday").is_err());
    assert!(show::parse_start_time("2019-05-21 21:30:00").is_some());
}

#[test]
fn question_difficulty_bounds() {
    assert!(question::validate("Q?", "A", 1).is_ok());
    assert!(question::validate("Q?", "A", 5).is_ok());
    assert!(question::validate("Q?", "A", 0).is_err());
    assert!(question::validate("Q?", "A", 6).is_err());
    assert_eq!(question::validate("", "A", 3), Err(ModelError::required("question")));
}

#[test]
fn drink_title_rules() {
    assert!(drink::validate_title("Water").is_ok());
    assert!(drink::validate_title("").is_err());
    assert!(drink::validate_title(&"x".repeat(drink::MAX_TITLE_LEN + 1)).is_err());
}
