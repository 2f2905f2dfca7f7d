//! Common test utilities: fixture documents, runtime data and logging.
use experience::prelude::*;
use serde_json::{Value as JsonValue, json};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Installs a test-friendly tracing subscriber once per test binary.
///
/// Nothing is logged unless `RUST_LOG` is set, e.g. `RUST_LOG=experience=debug`.
#[allow(dead_code)]
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// A two-screen document exercising every relationship kind.
///
/// - `s1` has an ignored `AppBar` child that must disappear.
/// - `c1` lists `missing-slide`, which does not exist.
/// - `p2` points its carousel at `nowhere`.
#[allow(dead_code)]
pub const SAMPLE_EXPERIENCE_JSON: &str = r#"{
    "id": 42,
    "name": "Onboarding",
    "revisionID": "r7",
    "appearance": "dark",
    "initialScreenID": "s1",
    "localization": {
        "en": { "greeting": "Hello" },
        "en-GB": { "colour": "Colour" },
        "fr": { "greeting": "Bonjour" }
    },
    "fonts": [
        { "__typeName": "FontResource", "url": "https://cdn.example.com/brand.ttf", "fontName": "Brand" },
        { "__typeName": "FontCollectionResource", "url": "https://cdn.example.com/brand.ttc", "fontNames": ["BrandA", "BrandB"] }
    ],
    "nodes": [
        {
            "__typeName": "Screen", "id": "s1", "name": "Home", "statusBarStyle": "light",
            "children": [
                { "__typeName": "NavBar", "id": "nav", "title": "Welcome" },
                { "__typeName": "AppBar", "id": "appbar" },
                {
                    "__typeName": "VStack", "id": "stack", "spacing": 8,
                    "children": [
                        {
                            "__typeName": "Text", "id": "title", "text": "Hi {{ user.firstName }}",
                            "action": { "__typeName": "PerformSegue", "screenID": "s2", "style": "modal" }
                        },
                        {
                            "__typeName": "Image", "id": "hero", "url": "https://cdn.example.com/hero.png",
                            "mask": { "__typeName": "Rectangle", "id": "hero-mask", "cornerRadius": 12 }
                        },
                        { "__typeName": "Carousel", "id": "c1", "children": ["slide-2", "missing-slide", "slide-1"] },
                        { "__typeName": "PageControl", "id": "p1", "carouselID": "c1" },
                        { "__typeName": "PageControl", "id": "p2", "carouselID": "nowhere" }
                    ]
                }
            ]
        },
        {
            "__typeName": "Screen", "id": "s2",
            "children": [
                { "__typeName": "Text", "id": "back", "text": "Back", "action": { "__typeName": "Close" } }
            ]
        },
        { "__typeName": "Text", "id": "slide-1", "text": "One" },
        { "__typeName": "Text", "id": "slide-2", "text": "Two" }
    ]
}"#;

/// Wraps `nodes` in a minimal envelope whose initial screen is `s1`.
#[allow(dead_code)]
pub fn document(nodes: JsonValue) -> Vec<u8> {
    let document = json!({ "id": "doc", "initialScreenID": "s1", "nodes": nodes });
    serde_json::to_vec(&document).expect("fixture serializes")
}

/// Decodes and resolves with the default decoder, panicking on decode failure.
#[allow(dead_code)]
pub fn decode_and_resolve(bytes: &[u8]) -> (Experience, ResolutionReport) {
    init_test_logging();
    Decoder::default()
        .decode(bytes)
        .expect("Failed to decode document")
        .resolve()
}

/// Items used by the collection query tests.
#[allow(dead_code)]
pub fn sample_items() -> Vec<JsonValue> {
    vec![
        json!({ "k": 1, "tag": "a" }),
        json!({ "k": 1, "tag": "b" }),
        json!({ "k": 0, "tag": "c" }),
    ]
}

/// A runtime snapshot with data, URL parameters and user info populated.
#[allow(dead_code)]
pub fn sample_runtime() -> RuntimeData {
    RuntimeData::new(json!({
        "name": "Mr. Hogan",
        "age": "21",
        "price": 1234.5,
        "published": "2024-03-05T14:07:09.123Z",
        "present": "X",
        "flags": { "beta": true },
        "articles": [
            { "title": "Old", "rank": 3, "date": "2023-01-01T00:00:00Z", "featured": true },
            { "title": "New", "rank": 1, "date": "2024-06-01T00:00:00Z", "featured": false },
            { "title": "Mid", "rank": 2, "date": "2023-09-01T00:00:00Z", "featured": true }
        ]
    }))
    .with_url_parameter("ref", "newsletter")
    .with_user_info("firstName", json!("Ada"))
    .with_user_info("tier", json!({ "level": 3 }))
}

/// A scratch directory for tests that need files on disk.
#[allow(dead_code)]
pub fn setup_test_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("experience-engine-tests");
    std::fs::create_dir_all(&dir).expect("Failed to create test directory");
    dir
}
