//! Archive acquisition tests
//!
//! Downloads run against an in-process axum server bound to an ephemeral
//! port; gzip handling runs against archives written to temporary directories
//! that are removed when each test ends.

use axum::{
    http::{header::USER_AGENT, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use flate2::{write::GzEncoder, Compression};
use logrank::analytics::AggregationPipeline;
use logrank::models::Dimension;
use logrank::source::{
    extract_gzip, open_log, prepare_log, ArchiveSource, HttpArchive, LocalArchive, SourceError,
};
use std::io::Write;
use std::net::SocketAddr;

const LOG: &str = concat!(
    "199.72.81.55 - - [01/Jul/1995:00:00:01 -0400] \"GET /history/apollo/ HTTP/1.0\" 200 6245\n",
    "unicomp6.unicomp.net - - [01/Jul/1995:00:00:06 -0400] \"GET /shuttle/countdown/ HTTP/1.0\" 200 3985\n",
    "199.72.81.55 - - [01/Jul/1995:00:00:09 -0400] \"GET /shuttle/countdown/ HTTP/1.0\" 200 3985\n",
    "malformed line\n",
    "burger.letters.com - - [02/Jul/1995:00:00:11 -0400] \"GET /shuttle/countdown/liftoff.html HTTP/1.0\" 304 0\n",
);

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Serves the gzipped log only to browser-like user agents, like the NASA mirror
async fn archive_handler(headers: HeaderMap) -> Response {
    let browser = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|ua| ua.starts_with("Mozilla/"));

    if browser {
        (StatusCode::OK, gzip(LOG.as_bytes())).into_response()
    } else {
        (StatusCode::NOT_ACCEPTABLE, "not acceptable").into_response()
    }
}

async fn spawn_server() -> SocketAddr {
    let router = Router::new().route("/traces/NASA_access_log_Jul95.gz", get(archive_handler));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_download_extract_and_rank() {
    let addr = spawn_server().await;
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("data");

    let archive = HttpArchive::new(format!("http://{addr}/traces/NASA_access_log_Jul95.gz"));
    let archive_path = archive.fetch(&dest).await.unwrap();
    assert_eq!(archive_path, dest.join("NASA_access_log_Jul95.gz"));

    let log_path = extract_gzip(&archive_path).unwrap();
    assert_eq!(log_path, dest.join("NASA_access_log_Jul95"));
    assert_eq!(std::fs::read_to_string(&log_path).unwrap(), LOG);

    let (result, stats) = AggregationPipeline::new(Dimension::Requests, 1)
        .run_reader(open_log(&log_path).unwrap())
        .unwrap();

    assert_eq!(stats.lines, 5);
    assert_eq!(stats.malformed, 1);
    assert_eq!(result.len(), 2);
    assert_eq!(result.days[0].entries[0].value, "GET /shuttle/countdown/ HTTP/1.0");
    assert_eq!(result.days[0].entries[0].count, 2);
}

#[tokio::test]
async fn test_download_rejected_user_agent() {
    let addr = spawn_server().await;
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().to_path_buf();

    let archive = HttpArchive::with_user_agent(
        format!("http://{addr}/traces/NASA_access_log_Jul95.gz"),
        "curl/8.0",
    );
    let result = archive.fetch(&dest).await;

    match result {
        Err(SourceError::Status { status, body }) => {
            assert_eq!(status, 406);
            assert_eq!(body, "not acceptable");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_download_not_found() {
    let addr = spawn_server().await;
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().to_path_buf();

    let archive = HttpArchive::new(format!("http://{addr}/missing.gz"));
    let result = archive.fetch(&dest).await;

    assert!(matches!(result, Err(SourceError::Status { status: 404, .. })));
    assert!(!dest.join("missing.gz").exists());
}

#[tokio::test]
async fn test_local_archive_streams_without_extracting() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let backup = dir.join("backup_NASA_access_log_Jul95.gz");
    std::fs::write(&backup, gzip(LOG.as_bytes())).unwrap();

    let archive = LocalArchive::new(&backup);
    let path = archive.fetch(&dir.join("unused")).await.unwrap();
    assert_eq!(path, backup);

    let (result, stats) = AggregationPipeline::new(Dimension::Clients, 2)
        .run_reader(open_log(&path).unwrap())
        .unwrap();

    assert_eq!(stats.parsed, 4);
    let day_one: Vec<(&str, u64)> = result.days[0]
        .entries
        .iter()
        .map(|entry| (entry.value.as_str(), entry.count))
        .collect();
    assert_eq!(day_one, vec![("199.72.81.55", 2), ("unicomp6.unicomp.net", 1)]);
    assert!(!dir.join("backup_NASA_access_log_Jul95").exists());
}

#[test]
fn test_corrupt_archive_is_input_unavailable() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let archive = dir.join("broken.gz");

    let mut bytes = gzip(LOG.as_bytes());
    let len = bytes.len();
    bytes.truncate(len / 2);
    std::fs::write(&archive, &bytes).unwrap();

    assert!(matches!(
        extract_gzip(&archive),
        Err(SourceError::Io { .. })
    ));
    assert!(!dir.join("broken").exists());

    let result = AggregationPipeline::new(Dimension::Clients, 2).run_reader(open_log(&archive).unwrap());
    assert!(matches!(
        result,
        Err(logrank::analytics::PipelineError::InputUnavailable(_))
    ));
}

#[test]
fn test_prepare_log_fails_on_corrupt_download() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("NASA_access_log_Jul95.gz");

    let mut bytes = gzip(LOG.as_bytes());
    bytes.truncate(bytes.len() / 2);
    std::fs::write(&archive, &bytes).unwrap();

    assert!(matches!(
        prepare_log(&archive, true),
        Err(SourceError::Io { .. })
    ));
    assert!(!tmp.path().join("NASA_access_log_Jul95").exists());
}

#[test]
fn test_prepare_log_extract_and_stream_agree() {
    let tmp = tempfile::tempdir().unwrap();
    let archive = tmp.path().join("access.gz");
    std::fs::write(&archive, gzip(LOG.as_bytes())).unwrap();
    let pipeline = AggregationPipeline::new(Dimension::Clients, 2);

    let (streamed, _) = pipeline.run_reader(prepare_log(&archive, false).unwrap()).unwrap();
    assert!(!tmp.path().join("access").exists());

    let (extracted, _) = pipeline.run_reader(prepare_log(&archive, true).unwrap()).unwrap();
    assert!(tmp.path().join("access").exists());

    assert_eq!(streamed, extracted);
}
