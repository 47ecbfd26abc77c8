//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port with its own state,
//! then drives `ApiService` over real HTTP with the default ureq transport.
//! The test keeps a handle on the server state to switch failure modes and
//! count requests between calls.

use std::sync::Arc;
use std::time::Duration;

use challenge_core::{ApiError, ApiService, ChallengeCatalog, ClientConfig, TopCategory};
use mock_server::{fixtures, Challenge, Db, MockState, Mode};
use tokio::sync::RwLock;

/// Start the mock server on a random port and return its base URL and state.
fn start_server() -> (String, Db) {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    let db: Db = Arc::new(RwLock::new(MockState::default()));
    let server_db = db.clone();
    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_state(listener, server_db).await
        })
        .unwrap();
    });

    (format!("http://{addr}"), db)
}

fn service(base_url: &str) -> ApiService {
    ApiService::new(ClientConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..ClientConfig::default()
    })
}

#[test]
fn fetch_lifecycle() {
    let (base_url, db) = start_server();
    let svc = service(&base_url);

    // Step 1: fixtures come back complete and in order.
    let challenges = svc.fetch_challenges().unwrap();
    let expected = fixtures();
    assert_eq!(challenges.len(), expected.len());
    for (got, want) in challenges.iter().zip(&expected) {
        assert_eq!(got.id, want.id);
        assert_eq!(got.name, want.name);
        assert_eq!(got.category, want.category);
        assert_eq!(got.thump_url, want.thump_url);
        assert_eq!(got.thump_filter, want.thump_filter);
    }
    assert_eq!(db.blocking_read().hits, 1, "one request per fetch");

    // Step 2: an unchanged server yields an equal result.
    assert_eq!(svc.fetch_challenges().unwrap(), challenges);
    assert_eq!(db.blocking_read().hits, 2);

    // Step 3: replace the fixtures with the single Zombie challenge.
    db.blocking_write().challenges = vec![Challenge {
        name: "Zombie".to_string(),
        thump_url: Some("https://x/a.jpg".to_string()),
        thump_filter: Some("https://x/b.jpg".to_string()),
        ..Challenge::default()
    }];
    let challenges = svc.fetch_challenges().unwrap();
    assert_eq!(challenges.len(), 1);
    assert_eq!(challenges[0].name, "Zombie");
    assert_eq!(challenges[0].thump_url.as_deref(), Some("https://x/a.jpg"));
    assert_eq!(challenges[0].thump_filter.as_deref(), Some("https://x/b.jpg"));

    // Step 4: an empty list is a valid answer.
    db.blocking_write().challenges.clear();
    assert!(svc.fetch_challenges().unwrap().is_empty());
}

#[test]
fn absent_data_is_no_data() {
    let (base_url, db) = start_server();
    let svc = service(&base_url);

    for mode in [Mode::NullData, Mode::MissingData] {
        db.blocking_write().mode = mode;
        let err = svc.fetch_challenges().unwrap_err();
        assert!(matches!(err, ApiError::NoData), "{mode:?}: {err}");
    }
}

#[test]
fn server_status_is_surfaced() {
    let (base_url, db) = start_server();
    let svc = service(&base_url);

    for status in [404u16, 500, 503] {
        db.blocking_write().mode = Mode::Status(status);
        let err = svc.fetch_challenges().unwrap_err();
        assert_eq!(err.http_status(), Some(status));
        assert_eq!(err.code(), i32::from(status));
    }
}

#[test]
fn non_json_body_is_decoding_error() {
    let (base_url, db) = start_server();
    db.blocking_write().mode = Mode::Garbage;

    let err = service(&base_url).fetch_challenges().unwrap_err();
    assert!(matches!(err, ApiError::Decoding(_)), "{err}");
    assert_eq!(err.code(), 6666);
}

#[test]
fn wrong_sign_is_unauthorized() {
    let (base_url, _db) = start_server();
    let svc = ApiService::new(ClientConfig {
        base_url,
        sign: "forged".to_string(),
        timeout: Duration::from_secs(5),
    });

    let err = svc.fetch_challenges().unwrap_err();
    assert_eq!(err.http_status(), Some(401));
    assert_eq!(err.description(), "Unauthorized");
}

#[test]
fn unreachable_server_is_network_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();

    let err = service(&format!("http://127.0.0.1:{port}")).fetch_challenges().unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }), "{err}");
}

#[test]
fn silent_server_times_out() {
    // Accept connections but never answer.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming() {
            held.push(stream);
        }
    });

    let svc = ApiService::new(ClientConfig {
        base_url: format!("http://{addr}"),
        timeout: Duration::from_secs(1),
        ..ClientConfig::default()
    });
    let err = svc.fetch_challenges().unwrap_err();
    assert!(matches!(err, ApiError::Network { code: -1001, .. }), "{err:?}");
    assert_eq!(err.code(), -1001);
}

#[test]
fn malformed_base_url_is_configuration_error() {
    let err = service("not a url").fetch_challenges().unwrap_err();
    assert!(matches!(err, ApiError::Configuration(_)), "{err}");
}

#[test]
fn catalog_refresh_keeps_previous_contents_on_failure() {
    let (base_url, db) = start_server();
    let svc = service(&base_url);
    let mut catalog = ChallengeCatalog::new();

    let count = catalog.refresh(&svc).unwrap();
    assert_eq!(count, fixtures().len());

    catalog.select(TopCategory::Ranking);
    assert_eq!(catalog.filtered().len(), 3);
    assert_eq!(catalog.audio_items().len(), 1);

    db.blocking_write().mode = Mode::Status(500);
    assert!(catalog.refresh(&svc).is_err());
    assert_eq!(catalog.all().len(), fixtures().len());
    assert_eq!(catalog.filtered().len(), 3);
}
