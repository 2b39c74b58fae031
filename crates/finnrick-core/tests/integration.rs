use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use finnrick_core::catalog::{CatalogId, CatalogSource, HttpCatalog};
use finnrick_core::dom::{Container, Document, MemoryContainer, MemoryDocument};
use finnrick_core::rating::grade::Grade;
use finnrick_core::rating::record::RawProduct;
use finnrick_core::widget::{PageScanner, WidgetState, init_widget};
use finnrick_core::{
    FetchError, FinnrickWidget, MARKER_CLASS, PRODUCT_ID_ATTR, PROCESSED_ATTR, RatingFetcher,
    RatingRecord, STATE_ATTR, STYLE_ID,
};
use regex::Regex;
use tokio::runtime::Handle;

/// In-process catalog that records every lookup.
struct MockCatalog {
    calls: AtomicUsize,
    seen: Mutex<Vec<CatalogId>>,
    delay: Duration,
    respond: fn(CatalogId) -> Result<RawProduct, FetchError>,
}

impl MockCatalog {
    fn new(respond: fn(CatalogId) -> Result<RawProduct, FetchError>) -> Arc<Self> {
        Self::slow(respond, Duration::ZERO)
    }

    fn slow(
        respond: fn(CatalogId) -> Result<RawProduct, FetchError>,
        delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            delay,
            respond,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn seen(&self) -> Vec<CatalogId> {
        self.seen.lock().unwrap().clone()
    }
}

impl CatalogSource for MockCatalog {
    fn fetch_product(&self, id: CatalogId) -> Result<RawProduct, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(id);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        (self.respond)(id)
    }
}

fn acme(_: CatalogId) -> Result<RawProduct, FetchError> {
    Ok(RawProduct {
        rating: Some(4.8),
        brand: Some("Acme".into()),
        title: Some("Widget X".into()),
    })
}

fn hostile(_: CatalogId) -> Result<RawProduct, FetchError> {
    Ok(RawProduct {
        rating: Some(1.0),
        brand: Some("</script><script>alert(1)</script>".into()),
        title: Some("<img src=x onerror=alert(2)>".into()),
    })
}

fn unavailable(_: CatalogId) -> Result<RawProduct, FetchError> {
    Err(FetchError::Status(503))
}

fn panics(_: CatalogId) -> Result<RawProduct, FetchError> {
    panic!("catalog exploded")
}

fn broken_clock() -> NaiveDate {
    panic!("clock stopped")
}

fn fetcher_for(source: &Arc<MockCatalog>) -> RatingFetcher {
    let source: Arc<dyn CatalogSource> = source.clone();
    RatingFetcher::new(source, Duration::from_secs(5))
}

/// Serves exactly one HTTP response on a loopback port and returns its base URL.
fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn http_fetcher(base_url: String) -> RatingFetcher {
    let timeout = Duration::from_secs(5);
    RatingFetcher::new(Arc::new(HttpCatalog::new(base_url, timeout)), timeout)
}

fn widget_container(product_id: &str) -> MemoryContainer {
    MemoryContainer::new(&[MARKER_CLASS]).with_attribute(PRODUCT_ID_ATTR, product_id)
}

async fn wait_until_settled(doc: &MemoryDocument) {
    for _ in 0..300 {
        let settled = doc
            .containers_with_class(MARKER_CLASS)
            .iter()
            .all(|c| matches!(c.attribute(STATE_ATTR).as_deref(), Some("rendered" | "error")));
        if settled {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("widgets did not settle");
}

async fn join_all(handles: Vec<tokio::task::JoinHandle<WidgetState>>) -> Vec<WidgetState> {
    let mut states = Vec::new();
    for handle in handles {
        let state = handle.await.expect("widget task");
        assert!(state.is_terminal(), "widget stopped in {state}");
        states.push(state);
    }
    states
}

// ---------------------------------------------------------------------------
// Rating fetcher
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_fetch_maps_product_fields() {
    let source = MockCatalog::new(acme);
    let record = fetcher_for(&source).fetch_rating(Some("product-1")).await;

    assert_eq!(record.grade, Grade::A);
    assert_eq!(record.label, "GREAT");
    assert_eq!(record.company_name, "Acme");
    assert_eq!(record.product_name, "Widget X");
    assert!((3..=12).contains(&record.test_count), "test count {}", record.test_count);

    let date =
        Regex::new(r"^[1-9]\d? (Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec) \d{4}$").unwrap();
    assert!(date.is_match(&record.last_test_date), "date {}", record.last_test_date);
}

#[tokio::test]
async fn injected_clock_drives_last_test_date() {
    let source = MockCatalog::new(acme);
    let fetcher = fetcher_for(&source).with_clock(|| NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());

    let record = fetcher.fetch_rating(Some("product-2")).await;
    assert_eq!(record.last_test_date, "3 Nov 2024");
}

#[tokio::test]
async fn identifiers_resolve_before_fetch() {
    let source = MockCatalog::new(acme);
    let fetcher = fetcher_for(&source);

    fetcher.fetch_rating(Some("product-3")).await;
    fetcher.fetch_rating(Some("unknown-xyz")).await;
    fetcher.fetch_rating(None).await;

    assert_eq!(source.seen(), vec![CatalogId(3), CatalogId(1), CatalogId(1)]);
}

#[tokio::test]
async fn source_error_yields_fallback_record() {
    let source = MockCatalog::new(unavailable);
    let record = fetcher_for(&source).fetch_rating(Some("product-1")).await;

    assert_eq!(record, RatingRecord::fallback());
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn slow_source_times_out_to_fallback() {
    let source = MockCatalog::slow(acme, Duration::from_millis(800));
    let source_dyn: Arc<dyn CatalogSource> = source.clone();
    let fetcher = RatingFetcher::new(source_dyn, Duration::from_millis(50));

    let started = Instant::now();
    let record = fetcher.fetch_rating(Some("product-1")).await;

    assert_eq!(record, RatingRecord::fallback());
    assert!(started.elapsed() < Duration::from_millis(700));
}

#[tokio::test]
async fn panicking_source_yields_fallback_record() {
    let source = MockCatalog::new(panics);
    let record = fetcher_for(&source).fetch_rating(Some("product-1")).await;
    assert_eq!(record, RatingRecord::fallback());
}

#[tokio::test]
async fn http_500_yields_exact_fallback_record() {
    let base = serve_once("500 Internal Server Error", r#"{"message":"boom"}"#);
    let record = http_fetcher(base).fetch_rating(Some("product-1")).await;

    assert_eq!(record.grade, Grade::B);
    assert_eq!(record.label, "GOOD");
    assert_eq!(record.company_name, "Sample Company");
    assert_eq!(record.product_name, "Sample Product");
    assert_eq!(record.test_count, 5);
    assert_eq!(record.last_test_date, "19 Feb 2025");
}

#[tokio::test]
async fn http_malformed_body_yields_fallback_record() {
    let base = serve_once("200 OK", "{not json");
    let record = http_fetcher(base).fetch_rating(Some("product-1")).await;
    assert_eq!(record, RatingRecord::fallback());
}

#[tokio::test]
async fn http_success_is_normalized() {
    let base = serve_once(
        "200 OK",
        r#"{"id":2,"title":"Eyeshadow Palette","rating":3.28,"brand":"Glamour Beauty","price":19.99}"#,
    );
    let record = http_fetcher(base).fetch_rating(Some("product-2")).await;

    assert_eq!(record.grade, Grade::D);
    assert_eq!(record.label, "POOR");
    assert_eq!(record.company_name, "Glamour Beauty");
    assert_eq!(record.product_name, "Eyeshadow Palette");
}

#[tokio::test]
async fn unreachable_catalog_yields_fallback_record() {
    let record = http_fetcher("http://127.0.0.1:1".into())
        .fetch_rating(Some("product-1"))
        .await;
    assert_eq!(record, RatingRecord::fallback());
}

// ---------------------------------------------------------------------------
// Widget controller
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_product_id_renders_error_without_fetching() {
    let source = MockCatalog::new(acme);
    let doc = MemoryDocument::ready();
    let container = MemoryContainer::new(&[MARKER_CLASS]);
    doc.append(container.clone());

    let state = init_widget(&container, &fetcher_for(&source)).await;

    assert_eq!(state, WidgetState::Error);
    assert!(container.inner_html().contains("Product ID is required"));
    assert_eq!(container.attribute(STATE_ATTR).as_deref(), Some("error"));
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn empty_product_id_counts_as_missing() {
    let source = MockCatalog::new(acme);
    let doc = MemoryDocument::ready();
    let container = widget_container("");
    doc.append(container.clone());

    let state = init_widget(&container, &fetcher_for(&source)).await;

    assert_eq!(state, WidgetState::Error);
    assert_eq!(source.calls(), 0);
}

#[tokio::test]
async fn product_id_renders_rating_card() {
    let source = MockCatalog::new(acme);
    let doc = MemoryDocument::ready();
    let container = widget_container("product-1");
    doc.append(container.clone());

    let state = init_widget(&container, &fetcher_for(&source)).await;

    assert_eq!(state, WidgetState::Rendered);
    let html = container.inner_html();
    assert!(html.contains(">Acme</h3>"));
    assert!(html.contains(">Widget X</p>"));
    assert!(html.contains("background-color: #28a745"));
    assert_eq!(container.attribute(STATE_ATTR).as_deref(), Some("rendered"));
}

#[tokio::test]
async fn backend_failure_renders_fallback_card_not_error() {
    let source = MockCatalog::new(unavailable);
    let doc = MemoryDocument::ready();
    let container = widget_container("product-1");
    doc.append(container.clone());

    let state = init_widget(&container, &fetcher_for(&source)).await;

    assert_eq!(state, WidgetState::Rendered);
    assert!(container.inner_html().contains("Sample Company"));
}

#[tokio::test]
async fn internal_failure_renders_generic_error() {
    let source = MockCatalog::new(acme);
    let doc = MemoryDocument::ready();
    let container = widget_container("product-1");
    doc.append(container.clone());

    let fetcher = fetcher_for(&source).with_clock(broken_clock);
    let state = init_widget(&container, &fetcher).await;

    assert_eq!(state, WidgetState::Error);
    assert!(container.inner_html().contains("Failed to load rating"));
    assert!(!container.inner_html().contains("Sample Company"));
    assert_eq!(container.attribute(STATE_ATTR).as_deref(), Some("error"));
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn hostile_catalog_text_is_escaped_in_the_page() {
    let source = MockCatalog::new(hostile);
    let doc = MemoryDocument::ready();
    let container = widget_container("product-1");
    doc.append(container.clone());

    init_widget(&container, &fetcher_for(&source)).await;

    let html = container.inner_html();
    assert!(!html.contains("</script"));
    assert!(!html.contains("<img"));
    assert!(html.contains("&lt;/script&gt;"));
}

#[tokio::test]
async fn detached_container_ignores_late_result() {
    let source = MockCatalog::slow(acme, Duration::from_millis(150));
    let doc = MemoryDocument::ready();
    let container = widget_container("product-1");
    doc.append(container.clone());

    let scanner = PageScanner::new(fetcher_for(&source), Handle::current());
    let handle = scanner.spawn_init(container.clone());

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(container.inner_html().contains("Loading rating..."));
    doc.remove(&container);

    let state = handle.await.expect("widget task");
    assert_eq!(state, WidgetState::Rendered);
    assert!(container.inner_html().contains("Loading rating..."));
}

// ---------------------------------------------------------------------------
// Page scanner and entry point
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repeated_scans_fetch_each_container_once() {
    let source = MockCatalog::new(acme);
    let doc = MemoryDocument::ready();
    doc.append(widget_container("product-1"));
    doc.append(widget_container("product-2"));
    doc.append(MemoryContainer::new(&["unrelated"]).with_attribute(PRODUCT_ID_ATTR, "product-3"));

    let scanner = PageScanner::new(fetcher_for(&source), Handle::current());

    let first = join_all(scanner.auto_init(&doc)).await;
    assert_eq!(first, vec![WidgetState::Rendered, WidgetState::Rendered]);
    assert_eq!(source.calls(), 2);

    let second = scanner.auto_init(&doc);
    assert!(second.is_empty());
    assert_eq!(source.calls(), 2);

    doc.append(widget_container("product-3"));
    let third = join_all(scanner.auto_init(&doc)).await;
    assert_eq!(third.len(), 1);
    assert_eq!(source.calls(), 3);

    for container in doc.containers_with_class(MARKER_CLASS) {
        assert_eq!(container.attribute(PROCESSED_ATTR).as_deref(), Some("true"));
    }
}

#[tokio::test]
async fn styles_are_injected_once() {
    let source = MockCatalog::new(acme);
    let doc = MemoryDocument::ready();
    let scanner = PageScanner::new(fetcher_for(&source), Handle::current());

    scanner.auto_init(&doc);
    scanner.auto_init(&doc);

    let styles = doc.styles();
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].0, STYLE_ID);
}

#[tokio::test]
async fn install_waits_for_document_ready() {
    let source = MockCatalog::new(acme);
    let doc = Arc::new(MemoryDocument::loading());
    doc.append(widget_container("product-1"));
    doc.append(widget_container("semaglutide-001"));

    let widget = FinnrickWidget::install(Arc::clone(&doc), fetcher_for(&source), Handle::current());
    assert_eq!(widget.version(), "1.0.0");

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(source.calls(), 0);
    assert!(doc.styles().is_empty());

    doc.mark_ready();
    wait_until_settled(&doc).await;

    assert_eq!(source.calls(), 2);
    assert_eq!(doc.styles().len(), 1);
}

#[tokio::test]
async fn dropped_widget_releases_pending_document() {
    let source = MockCatalog::new(acme);
    let doc = Arc::new(MemoryDocument::loading());
    doc.append(widget_container("product-1"));

    let widget = FinnrickWidget::install(Arc::clone(&doc), fetcher_for(&source), Handle::current());
    assert_eq!(Arc::strong_count(&doc), 2);

    drop(widget);
    assert_eq!(Arc::strong_count(&doc), 1);

    doc.mark_ready();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(source.calls(), 0);
    assert!(doc.styles().is_empty());
}

#[tokio::test]
async fn install_on_ready_document_scans_immediately() {
    let source = MockCatalog::new(acme);
    let doc = Arc::new(MemoryDocument::ready());
    doc.append(widget_container("product-1"));

    let widget = FinnrickWidget::install(Arc::clone(&doc), fetcher_for(&source), Handle::current());
    wait_until_settled(&doc).await;
    assert_eq!(source.calls(), 1);

    assert!(widget.refresh().is_empty());
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn manual_init_reprocesses_a_container() {
    let source = MockCatalog::new(acme);
    let doc = Arc::new(MemoryDocument::ready());
    let container = widget_container("product-1");
    doc.append(container.clone());

    let widget = FinnrickWidget::install(Arc::clone(&doc), fetcher_for(&source), Handle::current());
    wait_until_settled(&doc).await;

    let state = widget.init(container.clone()).await.expect("widget task");
    assert_eq!(state, WidgetState::Rendered);
    assert_eq!(source.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_refreshes_claim_each_container_once() {
    let source = MockCatalog::new(acme);
    let doc = Arc::new(MemoryDocument::ready());
    for i in 0..20 {
        doc.append(widget_container(&format!("product-{}", i % 3 + 1)));
    }

    let widget = Arc::new(FinnrickWidget::new(
        Arc::clone(&doc),
        PageScanner::new(fetcher_for(&source), Handle::current()),
    ));

    let mut scans = Vec::new();
    for _ in 0..4 {
        let widget = Arc::clone(&widget);
        scans.push(tokio::spawn(async move { widget.refresh() }));
    }

    let mut started = 0;
    for scan in scans {
        let handles = scan.await.expect("scan task");
        started += handles.len();
        join_all(handles).await;
    }

    assert_eq!(started, 20);
    assert_eq!(source.calls(), 20);
    assert_eq!(doc.styles().len(), 1);
}
