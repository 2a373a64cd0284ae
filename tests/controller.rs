//! End-to-end behavior of the list controller against fake and HTTP sources.

mod common;

use common::{amoxicillin, medicine, names, serve_once, serve_silence, ScriptedSource};
use medlist::app::filter::apply;
use medlist::{CatalogError, HttpSource, ListController, MatchMode, Medicine, MedicinePatch};
use std::sync::Arc;
use std::time::Duration;

fn controller(source: &Arc<ScriptedSource>) -> ListController<ScriptedSource> {
    ListController::new(
        Arc::clone(source),
        MatchMode::Substring,
        Duration::from_millis(300),
    )
}

fn two_items() -> Vec<Medicine> {
    vec![
        medicine("1", "A", "first"),
        medicine("2", "B", "second"),
    ]
}

fn timeout() -> CatalogError {
    CatalogError::Network("operation timed out".to_string())
}

#[test]
fn test_filter_identity_and_subset_laws() {
    let items = vec![
        amoxicillin(),
        medicine("2", "Paracetamol", "Used to alleviate mild to moderate pain"),
        medicine("3", "Ibuprofen", "Anti-inflammatory PAIN relief"),
        Medicine::new("4", "Antifungal"),
    ];

    assert_eq!(apply(&items, ""), items);
    assert_eq!(apply(&[], ""), Vec::<Medicine>::new());

    for term in ["a", "PAIN", "  infect ", "fung", "xyz", "é"] {
        let needle = term.trim().to_lowercase();
        for item in apply(&items, term) {
            assert!(
                item.name.to_lowercase().contains(&needle)
                    || item.description_text().to_lowercase().contains(&needle),
                "{} should not match {term:?}",
                item.name
            );
        }
        for item in &items {
            let expected = item.name.to_lowercase().contains(&needle)
                || item.description_text().to_lowercase().contains(&needle);
            assert_eq!(apply(&items, term).contains(item), expected, "{term:?} / {}", item.name);
        }
    }
}

#[tokio::test]
async fn test_scenario_successful_load() {
    let source = Arc::new(ScriptedSource::new(vec![amoxicillin()]));
    let controller = controller(&source);

    controller.load().await;

    let snapshot = controller.snapshot();
    assert!(!snapshot.loading);
    assert!(snapshot.error.is_none());
    assert_eq!(names(&snapshot.items), vec!["Amoxicillin"]);
    assert_eq!(snapshot.items[0].id, "1");
}

#[tokio::test]
async fn test_scenario_timeout_on_load() {
    let source = Arc::new(ScriptedSource::new(vec![amoxicillin()]));
    source.fail_next(timeout());
    let controller = controller(&source);

    controller.load().await;

    let snapshot = controller.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error.as_deref(), Some("NetworkError"));
    assert!(snapshot.items.is_empty());
}

#[tokio::test]
async fn test_scenario_search_terms() {
    let source = Arc::new(ScriptedSource::new(vec![amoxicillin()]));
    let controller = controller(&source);
    controller.load().await;

    controller.set_search("amox");
    assert_eq!(names(&controller.snapshot().items), vec!["Amoxicillin"]);

    controller.set_search("xyz");
    let snapshot = controller.snapshot();
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total, 1);
}

#[tokio::test]
async fn test_scenario_remove_then_fetch() {
    let source = Arc::new(ScriptedSource::new(vec![
        amoxicillin(),
        medicine("2", "Paracetamol", "pain"),
    ]));
    let controller = controller(&source);
    controller.load().await;

    controller.remove_item("1").await.unwrap();

    assert!(controller.snapshot().items.iter().all(|m| m.id != "1"));
    let fetched = medlist::DataSource::fetch_all(&*source).await.unwrap();
    assert!(fetched.iter().all(|m| m.id != "1"));
}

#[tokio::test]
async fn test_concurrent_loads_issue_one_request() {
    let source = Arc::new(ScriptedSource::new(two_items()).gated());
    let gate = source.gate();
    let controller = controller(&source);

    tokio::join!(controller.load(), controller.load(), async {
        tokio::task::yield_now().await;
        controller.refresh().await;
        controller.retry().await;
        gate.notify_one();
    });

    assert_eq!(source.fetch_calls(), 1);
    assert_eq!(controller.snapshot().items.len(), 2);
}

#[tokio::test]
async fn test_loading_is_published_while_in_flight() {
    let source = Arc::new(ScriptedSource::new(two_items()).gated());
    let gate = source.gate();
    let controller = controller(&source);
    let rx = controller.subscribe();

    tokio::join!(controller.load(), async {
        tokio::task::yield_now().await;
        let snapshot = rx.borrow().clone();
        assert!(snapshot.loading);
        assert!(!snapshot.refreshing);
        assert!(snapshot.items.is_empty());
        gate.notify_one();
    });

    assert!(!rx.borrow().loading);
}

#[tokio::test]
async fn test_refresh_keeps_items_visible_while_in_flight() {
    let source = Arc::new(ScriptedSource::new(two_items()).gated());
    let gate = source.gate();
    let controller = controller(&source);

    gate.notify_one();
    controller.load().await;

    tokio::join!(controller.refresh(), async {
        tokio::task::yield_now().await;
        let snapshot = controller.snapshot();
        assert!(snapshot.loading);
        assert!(snapshot.refreshing);
        assert_eq!(names(&snapshot.items), vec!["A", "B"]);
        gate.notify_one();
    });
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_items() {
    let source = Arc::new(ScriptedSource::new(two_items()));
    let controller = controller(&source);
    controller.load().await;

    source.fail_next(timeout());
    controller.refresh().await;

    let snapshot = controller.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error.as_deref(), Some("NetworkError"));
    assert_eq!(names(&snapshot.items), vec!["A", "B"]);

    controller.dismiss_error();
    let snapshot = controller.snapshot();
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.items.len(), 2);
}

#[tokio::test]
async fn test_retry_recovers_from_error() {
    let source = Arc::new(ScriptedSource::new(two_items()));
    source.fail_next(CatalogError::Server {
        status: 503,
        message: "unavailable".to_string(),
    });
    let controller = controller(&source);

    controller.load().await;
    assert_eq!(controller.snapshot().error.as_deref(), Some("ServerError"));

    controller.retry().await;
    let snapshot = controller.snapshot();
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(source.fetch_calls(), 2);
}

#[tokio::test]
async fn test_refetch_replaces_collection_wholesale() {
    let source = Arc::new(ScriptedSource::new(two_items()));
    let controller = controller(&source);
    controller.load().await;

    source.set_items(vec![medicine("9", "C", "third")]);
    controller.refresh().await;

    assert_eq!(names(&controller.snapshot().items), vec!["C"]);
}

#[tokio::test]
async fn test_update_round_trip() {
    let source = Arc::new(ScriptedSource::new(two_items()));
    let controller = controller(&source);
    controller.load().await;

    let patch = MedicinePatch {
        name: Some("Renamed".to_string()),
        rating: Some(3.5),
        ..MedicinePatch::default()
    };
    controller.update_item("2", &patch).await.unwrap();

    let fetched = medlist::DataSource::fetch_all(&*source).await.unwrap();
    let updated = fetched.iter().find(|m| m.id == "2").unwrap();
    assert_eq!(updated.name, "Renamed");
    assert!((updated.rating - 3.5).abs() < f64::EPSILON);
    assert_eq!(updated.description.as_deref(), Some("second"));

    let shown = controller.snapshot();
    assert_eq!(names(&shown.items), vec!["A", "Renamed"]);
}

#[tokio::test]
async fn test_invalid_update_is_rejected_without_touching_list() {
    let source = Arc::new(ScriptedSource::new(two_items()));
    let controller = controller(&source);
    controller.load().await;
    let calls = source.fetch_calls();

    let patch = MedicinePatch {
        name: Some("   ".to_string()),
        ..MedicinePatch::default()
    };
    let err = controller.update_item("1", &patch).await.unwrap_err();

    assert_eq!(err.kind(), medlist::ErrorKind::Validation);
    assert_eq!(source.fetch_calls(), calls);
    assert!(controller.snapshot().error.is_none());
}

#[tokio::test]
async fn test_teardown_discards_in_flight_response() {
    let source = Arc::new(ScriptedSource::new(two_items()).gated());
    let gate = source.gate();
    let controller = controller(&source);
    let mut rx = controller.subscribe();

    tokio::join!(controller.load(), async {
        tokio::task::yield_now().await;
        rx.borrow_and_update();
        controller.teardown();
        gate.notify_one();
    });

    let snapshot = controller.snapshot();
    assert!(snapshot.items.is_empty());
    assert!(!snapshot.loading);
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_applies_last_term() {
    let source = Arc::new(ScriptedSource::new(vec![
        amoxicillin(),
        medicine("2", "Paracetamol", "pain"),
    ]));
    let controller = controller(&source);
    controller.load().await;

    let (first, second, third) = tokio::join!(
        controller.search_debounced("a"),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            controller.search_debounced("am").await
        },
        async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            controller.search_debounced("amox").await
        },
    );

    assert!(!first);
    assert!(!second);
    assert!(third);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.search_term, "amox");
    assert_eq!(names(&snapshot.items), vec!["Amoxicillin"]);
}

#[tokio::test]
async fn test_http_source_end_to_end() {
    let url = serve_once(
        "200 OK",
        r#"[{"id":"1","name":"Amoxicillin","price":"199.99","rating":4.9,"description":"infections"},
            {"_id":2,"name":"Paracetamol","price":12,"star":"4.5","desc":"pain"}]"#,
    )
    .await;
    let source = Arc::new(HttpSource::new(url, Duration::from_secs(5)).unwrap());
    let controller = ListController::new(source, MatchMode::Substring, Duration::ZERO);

    controller.load().await;
    controller.set_search("PAIN");

    let snapshot = controller.snapshot();
    assert!(snapshot.error.is_none());
    assert_eq!(snapshot.total, 2);
    assert_eq!(names(&snapshot.items), vec!["Paracetamol"]);
    assert_eq!(snapshot.items[0].id, "2");
}

#[tokio::test]
async fn test_http_timeout_is_network_error() {
    let url = serve_silence().await;
    let source = Arc::new(HttpSource::new(url, Duration::from_millis(100)).unwrap());
    let controller = ListController::new(source, MatchMode::Substring, Duration::ZERO);

    controller.load().await;

    let snapshot = controller.snapshot();
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error.as_deref(), Some("NetworkError"));
    assert!(snapshot.items.is_empty());
}

#[tokio::test]
async fn test_http_malformed_and_invalid_payloads() {
    let url = serve_once("200 OK", "{not json").await;
    let controller = ListController::new(
        Arc::new(HttpSource::new(url, Duration::from_secs(5)).unwrap()),
        MatchMode::Substring,
        Duration::ZERO,
    );
    controller.load().await;
    assert_eq!(controller.snapshot().error.as_deref(), Some("ParseError"));

    let url = serve_once("200 OK", r#"[{"name":"No id"}]"#).await;
    let controller = ListController::new(
        Arc::new(HttpSource::new(url, Duration::from_secs(5)).unwrap()),
        MatchMode::Substring,
        Duration::ZERO,
    );
    controller.load().await;
    assert_eq!(controller.snapshot().error.as_deref(), Some("ValidationError"));
}
