use super::*;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

const FEED: &str = r#"{
  "Soccer": [
    { "Arsenal vs Chelsea:": {
        "strHomeTeamBadge": "https://img/ars.png",
        "strAwayTeamBadge": "",
        "Venue": "Emirates Stadium",
        "UTC": "15:30:00",
        "dateEvent": "2024-09-01",
        "Sources": "United Kingdom:Sky Sports F1 HD, United States: ESPN, Spain:DAZN",
        "league_banner": null,
        "strLeague": "English Premier League"
    } },
    { "Bad entry": { "Venue": 12 } }
  ],
  "Basketball": [
    { "Lakers/Celtics": { "Sources": "" } }
  ]
}"#;

#[test]
fn match_info_treats_empty_and_null_as_absent() {
    let info: MatchInfo = serde_json::from_str(
        r#"{ "Venue": "", "UTC": null, "dateEvent": "2024-01-02", "extra": 1 }"#,
    )
    .unwrap();
    assert_eq!(info.venue, None);
    assert_eq!(info.utc, None);
    assert_eq!(info.date_event.as_deref(), Some("2024-01-02"));
    assert_eq!(info.home_badge, None);
}

#[test]
fn split_sources_trims_pieces_and_drops_empty_ones() {
    assert_eq!(
        split_sources("United Kingdom:Sky Sports F1 HD, United States: ESPN , Spain:DAZN,,"),
        vec!["United Kingdom:Sky Sports F1 HD", "United States: ESPN", "Spain:DAZN"]
    );
    assert_eq!(split_sources("Canada : TSN ,France:Canal+"), vec!["Canada : TSN", "France:Canal+"]);
    assert!(split_sources(" , ").is_empty());
}

#[test]
fn split_then_parse_normalises_colon_spacing() {
    let entries: Vec<String> = split_sources("United States: ESPN , Canada :TSN")
        .iter()
        .map(|s| crate::layout::sources::format_source(s))
        .collect();
    assert_eq!(entries, vec!["United States:  ESPN", "Canada:  TSN"]);
}

#[test]
fn listing_normalises_name_date_and_league() {
    let info = MatchInfo {
        date_event: Some("2024-09-01".into()),
        ..Default::default()
    };
    let listing = EventListing::from_match("PSG: Lyon/Nice::", &info).unwrap();
    assert_eq!(listing.name, "PSG- Lyon-Nice");
    assert_eq!(listing.date.as_deref(), Some("2024/09/01"));
    assert_eq!(listing.league, DEFAULT_LEAGUE);
    assert_eq!(listing.sources, vec![NO_SOURCES_SENTINEL.to_string()]);
}

#[test]
fn empty_match_name_is_rejected() {
    let err = EventListing::from_match(":::", &MatchInfo::default()).unwrap_err();
    assert!(matches!(err, PosterError::Validation(_)));
}

#[test]
fn feed_is_sport_ordered_and_isolates_bad_matches() {
    let schedule = DailySchedule::from_json(FEED, as_of()).unwrap();
    assert_eq!(schedule.len(), 3);
    let sports: Vec<&str> = schedule.events().iter().map(|e| e.sport.as_str()).collect();
    assert_eq!(sports, vec!["Basketball", "Soccer", "Soccer"]);

    let lakers = schedule.events()[0].listing.as_ref().unwrap();
    assert_eq!(lakers.name, "Lakers-Celtics");
    assert_eq!(lakers.sources, vec![NO_SOURCES_SENTINEL.to_string()]);

    let arsenal = schedule.events()[1].listing.as_ref().unwrap();
    assert_eq!(arsenal.name, "Arsenal vs Chelsea");
    assert_eq!(arsenal.home_logo_url.as_deref(), Some("https://img/ars.png"));
    assert_eq!(arsenal.away_logo_url, None);
    assert_eq!(arsenal.banner_url, None);
    assert_eq!(arsenal.league, "English Premier League");
    assert_eq!(arsenal.sources.len(), 3);

    let bad = &schedule.events()[2];
    assert_eq!(bad.match_name, "Bad entry");
    assert!(matches!(bad.listing, Err(PosterError::Feed(_))));
}

#[test]
fn malformed_document_is_a_feed_error() {
    let err = DailySchedule::from_json("[1, 2]", as_of()).unwrap_err();
    assert!(matches!(err, PosterError::Feed(_)));
}

#[test]
fn load_reads_the_dated_file() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = DailySchedule::load(tmp.path(), as_of()).unwrap_err();
    assert!(matches!(missing, PosterError::Feed(_)));
    assert!(missing.to_string().contains("2024-09-01.json"));

    std::fs::write(tmp.path().join("2024-09-01.json"), FEED).unwrap();
    let schedule = DailySchedule::load(tmp.path(), as_of()).unwrap();
    assert_eq!(schedule.as_of(), as_of());
    assert!(!schedule.is_empty());
}
