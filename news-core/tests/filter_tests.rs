mod common;

use chrono::{DateTime, Duration, FixedOffset, SecondsFormat, TimeZone, Utc};
use common::{article, titles};
use news_core::filter::{date_cutoff, filter_by_date, filter_by_keyword, filter_by_source};
use news_core::{apply_filters, Article, DateWindow, FilterCriteria};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 5, 15, 30, 0).unwrap()
}

#[test]
fn keyword_terms_are_and_combined_across_fields() {
    let mut matching = article("Quarterly update", "Reuters", "2024-11-01T10:00:00Z");
    matching.description = Some("Tesla shares rose".into());
    matching.content = Some("New battery chemistry announced".into());

    let mut only_tesla = article("Tesla recall", "CNBC", "2024-11-01T10:00:00Z");
    only_tesla.description = Some("Steering issue".into());

    let articles = vec![matching, only_tesla];
    let filtered = filter_by_keyword(&articles, "tesla battery");
    assert_eq!(titles(&filtered), vec!["Quarterly update"]);
}

#[test]
fn keyword_is_case_insensitive_substring_match() {
    let mut a = article("Cybertruck deliveries", "Bloomberg", "2024-11-01T10:00:00Z");
    a.author = Some("Jane Doe".into());
    let articles = vec![a];

    assert_eq!(filter_by_keyword(&articles, "TRUCK").len(), 1);
    assert_eq!(filter_by_keyword(&articles, "doe").len(), 1);
    assert_eq!(filter_by_keyword(&articles, "bloom").len(), 1);
    assert!(filter_by_keyword(&articles, "truck model").is_empty());
}

#[test]
fn blank_keyword_keeps_everything() {
    let articles = vec![
        article("one", "Reuters", "2024-11-01T10:00:00Z"),
        article("two", "CNBC", "2024-11-02T10:00:00Z"),
    ];
    assert_eq!(filter_by_keyword(&articles, ""), articles);
    assert_eq!(filter_by_keyword(&articles, "   \t "), articles);
}

#[test]
fn keyword_filter_is_idempotent() {
    let articles = vec![
        article("Tesla robotaxi", "Reuters", "2024-11-01T10:00:00Z"),
        article("Ford earnings", "CNBC", "2024-11-01T10:00:00Z"),
        article("tesla cybercab", "The Verge", "2024-11-01T10:00:00Z"),
    ];
    for keyword in ["tesla", "robotaxi", "reuters tesla", "zzz"] {
        let once = filter_by_keyword(&articles, keyword);
        let twice = filter_by_keyword(&once, keyword);
        assert_eq!(once, twice, "keyword {keyword:?}");
    }
}

#[test]
fn missing_fields_are_searched_as_empty_text() {
    let bare = Article {
        title: Some("Tesla".into()),
        ..Default::default()
    };
    let articles = vec![bare];
    assert_eq!(filter_by_keyword(&articles, "tesla").len(), 1);
    assert!(filter_by_keyword(&articles, "reuters").is_empty());
}

#[test]
fn source_filter_is_exact_and_keeps_order() {
    let articles = vec![
        article("r1", "Reuters", "2024-11-01T10:00:00Z"),
        article("c1", "CNBC", "2024-11-01T10:00:00Z"),
        article("r2", "Reuters", "2024-11-01T10:00:00Z"),
        article("c2", "CNBC", "2024-11-01T10:00:00Z"),
    ];
    assert_eq!(titles(&filter_by_source(&articles, "Reuters")), vec!["r1", "r2"]);
    assert!(filter_by_source(&articles, "reuters").is_empty());
    assert_eq!(filter_by_source(&articles, "All").len(), 4);
    assert_eq!(filter_by_source(&articles, "").len(), 4);
}

#[test]
fn article_without_source_only_passes_inactive_source_filter() {
    let orphan = Article {
        title: Some("orphan".into()),
        published_at: Some("2024-11-01T10:00:00Z".into()),
        ..Default::default()
    };
    let articles = vec![orphan];
    assert!(filter_by_source(&articles, "Reuters").is_empty());
    assert_eq!(filter_by_source(&articles, "All").len(), 1);
}

#[test]
fn date_cutoffs() {
    let now = now();
    assert_eq!(date_cutoff(DateWindow::AllTime, &now), None);
    assert_eq!(
        date_cutoff(DateWindow::Today, &now),
        Some(Utc.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap())
    );
    assert_eq!(date_cutoff(DateWindow::Last7Days, &now), Some(now - Duration::days(7)));
    assert_eq!(date_cutoff(DateWindow::Last30Days, &now), Some(now - Duration::days(30)));
}

#[test]
fn today_starts_at_local_midnight_of_the_given_offset() {
    let tz = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2024, 11, 5, 8, 0, 0).unwrap();
    let cutoff = date_cutoff(DateWindow::Today, &now).unwrap();
    assert_eq!(cutoff, tz.with_ymd_and_hms(2024, 11, 5, 0, 0, 0).unwrap());
    assert_eq!(cutoff.with_timezone(&Utc), Utc.with_ymd_and_hms(2024, 11, 4, 15, 0, 0).unwrap());
}

#[test]
fn date_window_boundary_is_inclusive() {
    let now = now();
    for window in [DateWindow::Today, DateWindow::Last7Days, DateWindow::Last30Days] {
        let cutoff = date_cutoff(window, &now).unwrap();
        let just_before = cutoff - Duration::milliseconds(1);
        let articles = vec![
            article("at", "Reuters", &cutoff.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            article("before", "Reuters", &just_before.to_rfc3339_opts(SecondsFormat::Millis, true)),
        ];
        assert_eq!(titles(&filter_by_date(&articles, window, &now)), vec!["at"], "{window}");
    }
}

#[test]
fn date_window_compares_instants_across_offsets() {
    let now = now();
    // 2024-11-05T00:30:00+02:00 is 2024-11-04T22:30Z, before today's UTC midnight.
    let articles = vec![
        article("offset", "Reuters", "2024-11-05T00:30:00+02:00"),
        article("utc", "Reuters", "2024-11-05T00:30:00Z"),
    ];
    assert_eq!(titles(&filter_by_date(&articles, DateWindow::Today, &now)), vec!["utc"]);
}

#[test]
fn unparsable_dates_fail_closed() {
    let now = now();
    let mut undated = article("undated", "Reuters", "");
    undated.published_at = None;
    let articles = vec![
        article("garbage", "Reuters", "yesterday-ish"),
        undated,
        article("recent", "Reuters", "2024-11-04T12:00:00Z"),
    ];
    assert_eq!(
        titles(&filter_by_date(&articles, DateWindow::Last7Days, &now)),
        vec!["recent"]
    );
    assert_eq!(filter_by_date(&articles, DateWindow::AllTime, &now).len(), 3);
}

#[test]
fn bare_dates_are_read_as_utc_midnight() {
    let now = now();
    let articles = vec![
        article("day-only", "Reuters", "2024-11-05"),
        article("older", "Reuters", "2024-11-04"),
    ];
    assert_eq!(
        titles(&filter_by_date(&articles, DateWindow::Today, &now)),
        vec!["day-only"]
    );
}

#[test]
fn filters_compose_with_and() {
    let now = now();
    let mut articles = vec![
        article("Tesla in Berlin", "Reuters", "2024-11-04T09:00:00Z"),
        article("Tesla in Austin", "CNBC", "2024-11-04T09:00:00Z"),
        article("Tesla in Shanghai", "Reuters", "2024-09-01T09:00:00Z"),
        article("Rivian news", "Reuters", "2024-11-04T09:00:00Z"),
        article("Tesla in Fremont", "Reuters", "2024-11-05T01:00:00Z"),
    ];
    articles[0].description = Some("Gigafactory expansion".into());

    let criteria = FilterCriteria {
        keyword: "tesla".into(),
        source: "Reuters".into(),
        date_window: DateWindow::Last7Days,
    };
    assert_eq!(
        titles(&apply_filters(&articles, &criteria, &now)),
        vec!["Tesla in Berlin", "Tesla in Fremont"]
    );

    let unfiltered = FilterCriteria::default();
    assert!(unfiltered.is_unfiltered());
    assert_eq!(apply_filters(&articles, &unfiltered, &now), articles);
}

#[test]
fn date_window_serializes_with_wire_names() {
    assert_eq!(serde_json::to_string(&DateWindow::Last7Days).unwrap(), "\"7-days\"");
    assert_eq!(
        serde_json::from_str::<DateWindow>("\"all-time\"").unwrap(),
        DateWindow::AllTime
    );
    assert_eq!(DateWindow::Last30Days.to_string(), "Last 30 Days");
}
