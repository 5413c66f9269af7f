use anyhow::Result;
use chrono::NaiveDate;
use httpmock::prelude::*;
use serde_json::{json, Value};
use spoofer_client::{
    CollectionQuery, HttpSpooferApi, LocalStorage, OutputFormat, SpoofedPossibilities, Spoofer,
    SpooferError, TransportError,
};
use std::time::Duration;
use tempfile::TempDir;

fn session(id: i64) -> Value {
    json!({
        "@id": format!("/sessions/{}", id),
        "session": id,
        "country": "nzl",
        "timestamp": "2024-05-01T08:15:00+00:00",
        "asn4": 9500,
        "client4": "122.56.0.0/24",
        "nat4": true,
        "privatespoof": "blocked",
        "routedspoof": "received",
        "asn6": 9500,
        "client6": "2406:e000::/40",
        "nat6": false,
        "privatespoof6": "blocked",
        "routedspoof6": "blocked"
    })
}

fn spoofer_for(server: &MockServer, output: &TempDir) -> Spoofer<HttpSpooferApi, LocalStorage> {
    Spoofer::new(
        HttpSpooferApi::new(server.url("/sessions")),
        LocalStorage::new(output.path().to_str().unwrap()),
    )
}

#[tokio::test]
async fn test_write_collection_csv_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sessions")
            .query_param("itemsPerPage", "2")
            .query_param("timestamp[after]", "2024-05-01");
        then.status(200)
            .header("Content-Type", "application/ld+json")
            .json_body(json!({
                "hydra:member": [session(101), session(102)],
                "hydra:totalItems": 2,
                "hydra:view": {"hydra:next": "/sessions?page=2"}
            }));
    });

    let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
    let query = CollectionQuery::recent(2, today);
    let written = spoofer_for(&server, &temp_dir)
        .write_collection("recent", OutputFormat::Csv, &query)
        .await?;

    api_mock.assert();
    assert_eq!(written, temp_dir.path().join("recent.csv"));

    let content = std::fs::read_to_string(&written)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "version,session,country,timestamp,asn,client,nat,privatespoof,routedspoof"
    );
    assert_eq!(
        lines[1],
        "IPv4,101,nzl,2024-05-01T08:15:00+00:00,9500,122.56.0.0/24,true,blocked,received"
    );
    assert_eq!(
        lines[2],
        "IPv6,101,nzl,2024-05-01T08:15:00+00:00,9500,2406:e000::/40,false,blocked,blocked"
    );
    assert!(lines[3].starts_with("IPv4,102,"));
    assert!(lines[4].starts_with("IPv6,102,"));
    Ok(())
}

#[tokio::test]
async fn test_write_collection_json_end_to_end() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let mut sparse = session(201);
    sparse.as_object_mut().unwrap().remove("nat6");

    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sessions")
            .query_param("itemsPerPage", "1")
            .query_param("asn", "9500");
        then.status(200).json_body(json!({ "hydra:member": [sparse] }));
    });

    let written = spoofer_for(&server, &temp_dir)
        .write_collection(
            "by-asn",
            OutputFormat::Json,
            &CollectionQuery::new(1).with_asn(9500),
        )
        .await?;

    api_mock.assert();
    assert_eq!(written, temp_dir.path().join("by-asn.json"));

    let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&written)?)?;
    let results = parsed.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["ipv4"]["session"], 201);
    assert_eq!(results[0]["ipv4"]["nat"], true);
    assert!(results[0]["ipv6"]["nat"].is_null());
    assert_eq!(results[0]["ipv6"]["client"], "2406:e000::/40");
    Ok(())
}

#[tokio::test]
async fn test_collection_server_error_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/sessions");
        then.status(500);
    });

    let result = spoofer_for(&server, &temp_dir)
        .write_collection("failed", OutputFormat::Csv, &CollectionQuery::new(5))
        .await;

    api_mock.assert();
    assert!(matches!(
        result,
        Err(SpooferError::NoData {
            source: TransportError::Status { status: 500 },
            ..
        })
    ));
    assert!(!temp_dir.path().join("failed.csv").exists());
    Ok(())
}

#[tokio::test]
async fn test_zero_page_size_never_reaches_server() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/sessions");
        then.status(200).json_body(json!({ "hydra:member": [] }));
    });

    let result = spoofer_for(&server, &temp_dir)
        .fetch_collection(&CollectionQuery::new(0))
        .await;

    assert!(matches!(result, Err(SpooferError::Argument { .. })));
    api_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_obtain_spoofed_possibilities_over_http() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    let api_mock = server.mock(|when, then| {
        when.method(GET).path("/sessions/301");
        then.status(200).json_body(session(301));
    });

    let spoofer = spoofer_for(&server, &temp_dir);

    let ipv6 = spoofer.obtain_spoofed_possibilities_ipv6(301).await?;
    match &ipv6 {
        SpoofedPossibilities::Single(record) => {
            assert_eq!(record.client.as_deref(), Some("2406:e000::/40"));
            assert_eq!(record.nat, Some(false));
        }
        other => panic!("expected a single record, got {:?}", other),
    }

    let both = serde_json::to_value(spoofer.obtain_spoofed_possibilities(301, 0).await?)?;
    assert_eq!(both["ipv4"]["routedspoof"], "received");
    assert_eq!(both["ipv6"]["routedspoof"], "blocked");

    api_mock.assert_hits(2);
    Ok(())
}

#[tokio::test]
async fn test_fetch_session_timeout_surfaces_no_data() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/sessions/401");
        then.status(200)
            .delay(Duration::from_secs(2))
            .json_body(session(401));
    });

    let spoofer = spoofer_for(&server, &temp_dir).with_timeout(Duration::from_millis(200));
    let result = spoofer.fetch_session(401).await;

    assert!(matches!(
        result,
        Err(SpooferError::NoData {
            source: TransportError::Timeout { .. },
            ..
        })
    ));
    Ok(())
}
