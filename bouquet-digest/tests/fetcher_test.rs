use bouquet_digest::types::*;
use bouquet_digest::{FeedConfig, HttpDigestSource, WeeklyDigest};
use chrono::{NaiveDate, TimeZone, Utc};
use mockito::Matcher;
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config_for(api_base_url: String) -> FeedConfig {
    FeedConfig {
        api_base_url,
        site_url: "https://bouquet.example".to_string(),
        fetch_timeout_seconds: 5,
        ..FeedConfig::default()
    }
}

fn week_query(user: &str, start: &str, end: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("user".into(), user.into()),
        Matcher::UrlEncoded("startDate".into(), start.into()),
        Matcher::UrlEncoded("endDate".into(), end.into()),
    ])
}

#[tokio::test]
async fn test_fetch_digest_success() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/getWeeklyDigest")
        .match_query(week_query("alice", "2023-03-04T00:00:00.000Z", "2023-03-10T00:00:00.000Z"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"emoji":"🌷","description":"tulips"},{"emoji":"🎉","description":"party"}]"#)
        .create_async()
        .await;

    let source = HttpDigestSource::new(&config_for(server.url()))?;
    let records = source.fetch_digest("alice", date(2023, 3, 4), date(2023, 3, 10)).await?;

    assert_eq!(
        records,
        vec![
            DigestRecord {
                emoji: "🌷".to_string(),
                description: "tulips".to_string(),
            },
            DigestRecord {
                emoji: "🎉".to_string(),
                description: "party".to_string(),
            },
        ]
    );
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn test_fetch_digest_error_status() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/getWeeklyDigest")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let source = HttpDigestSource::new(&config_for(server.url()))?;
    let result = source.fetch_digest("alice", date(2023, 3, 4), date(2023, 3, 10)).await;

    assert!(matches!(result, Err(DigestError::RemoteStatus { status: 500, .. })));
    Ok(())
}

#[tokio::test]
async fn test_fetch_digest_malformed_body() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/getWeeklyDigest")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"message":"not a list"}"#)
        .create_async()
        .await;

    let source = HttpDigestSource::new(&config_for(server.url()))?;
    let result = source.fetch_digest("alice", date(2023, 3, 4), date(2023, 3, 10)).await;

    assert!(matches!(result, Err(DigestError::RemoteFormat(_))));
    Ok(())
}

#[test]
fn test_digest_url_keeps_base_path() -> Result<()> {
    let source = HttpDigestSource::new(&config_for("https://api.example/bouquet/".to_string()))?;
    let url = source.digest_url("alice", date(2023, 3, 4), date(2023, 3, 10))?;

    assert_eq!(url.path(), "/bouquet/api/getWeeklyDigest");
    let pairs: Vec<(String, String)> = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    assert_eq!(
        pairs,
        vec![
            ("user".to_string(), "alice".to_string()),
            ("startDate".to_string(), "2023-03-04T00:00:00.000Z".to_string()),
            ("endDate".to_string(), "2023-03-10T00:00:00.000Z".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_feed_survives_one_failing_week() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("GET", "/api/getWeeklyDigest")
        .match_query(week_query("alice", "2023-03-04T00:00:00.000Z", "2023-03-10T00:00:00.000Z"))
        .with_status(502)
        .create_async()
        .await;
    let working = server
        .mock("GET", "/api/getWeeklyDigest")
        .match_query(week_query("alice", "2023-03-11T00:00:00.000Z", "2023-03-17T00:00:00.000Z"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"emoji":"🔥","description":"second week"}]"#)
        .create_async()
        .await;

    let config = config_for(server.url());
    let source = HttpDigestSource::new(&config)?;
    let digest = WeeklyDigest::new(config, Arc::new(source));

    let feed = digest
        .build_feed("alice", Utc.with_ymd_and_hms(2023, 3, 18, 6, 0, 0).unwrap())
        .await?;

    assert_eq!(feed.entries.len(), 1);
    assert_eq!(feed.entries[0].description_html, "🔥 second week");
    assert_eq!(feed.entries[0].url, "https://bouquet.example/user/alice/2023-03-17T00:00:00.000Z");

    failing.assert_async().await;
    working.assert_async().await;
    Ok(())
}
