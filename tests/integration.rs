//! Integration tests for the experience engine
//!
//! End-to-end tests that decode a document, resolve it, and evaluate its
//! templates and queries against runtime data.
//!
mod common;
use common::*;
use experience::prelude::*;
use serde_json::json;
use std::fs;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_document_round_trip_through_both_phases() {
        let (experience, report) = decode_and_resolve(SAMPLE_EXPERIENCE_JSON.as_bytes());

        assert_eq!(experience.id, "42");
        assert_eq!(experience.len(), 13);
        assert_eq!(report.unresolved.len(), 2);

        let initial = experience.initial_screen().expect("initial screen resolves");
        assert_eq!(initial.id, "s1");

        let screens: Vec<&str> = experience.screens().map(|s| s.id.as_str()).collect();
        assert_eq!(screens, vec!["s1", "s2"]);

        let descendants: Vec<&str> = experience
            .descendants("s1")
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(
            descendants,
            vec!["nav", "stack", "title", "hero", "c1", "slide-2", "slide-1", "p1", "p2"]
        );
    }

    #[test]
    fn test_from_str_matches_two_phase_api() {
        let experience: Experience = SAMPLE_EXPERIENCE_JSON.parse().expect("Failed to parse");
        let (resolved, _) = decode_and_resolve(SAMPLE_EXPERIENCE_JSON.as_bytes());
        assert_eq!(experience.len(), resolved.len());
        assert_eq!(experience.node("title"), resolved.node("title"));
    }

    #[test]
    fn test_missing_initial_screen_is_soft() {
        let bytes = document(json!([{ "__typeName": "Spacer", "id": "only" }]));
        let (experience, report) = decode_and_resolve(&bytes);
        assert!(experience.initial_screen().is_none());
        assert!(report.is_complete());
        assert_eq!(experience.len(), 1);
    }

    #[test]
    fn test_localization_fallback() {
        let (experience, _) = decode_and_resolve(SAMPLE_EXPERIENCE_JSON.as_bytes());

        assert_eq!(experience.localized("greeting", "fr"), Some("Bonjour"));
        assert_eq!(experience.localized("greeting", "en-US"), Some("Hello"));
        assert_eq!(experience.localized("colour", "en-AU"), Some("Colour"));
        assert_eq!(experience.localized("greeting", "de"), None);
        assert_eq!(experience.localized_or_key("farewell", "en"), "farewell");
    }

    #[test]
    fn test_runtime_data_from_file() {
        let test_dir = setup_test_dir().join("integration");
        fs::create_dir_all(&test_dir).expect("Failed to create test directory");
        let path = test_dir.join("runtime.json");
        fs::write(
            &path,
            r#"{ "data": { "count": 3 }, "urlParameters": { "ref": "push" }, "userInfo": { "vip": true } }"#,
        )
        .expect("Failed to write runtime data");

        let runtime = RuntimeData::from_file(&path).expect("Failed to load runtime data");
        let ctx = runtime.context();
        assert_eq!(
            evaluate("{{ data.count }} {{ url.ref }} {{ user.vip }}", &ctx).as_deref(),
            Some("3 push true")
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_error_handling_integration() {
        let missing = RuntimeData::from_file("definitely/not/here.json");
        assert!(matches!(missing, Err(ConversionError::Io { .. })));

        let invalid = "{ invalid json }".parse::<RuntimeData>();
        assert!(matches!(invalid, Err(ConversionError::Json(_))));

        let result = "{ invalid json }".parse::<Experience>();
        if let Err(error) = result {
            assert!(error.to_string().contains("parse"));
        } else {
            panic!("Invalid document should not decode");
        }
    }

    #[test]
    fn test_rendering_a_screen() {
        let (experience, _) = decode_and_resolve(SAMPLE_EXPERIENCE_JSON.as_bytes());
        let runtime = sample_runtime();
        let ctx = runtime.context();

        let texts: Vec<String> = experience
            .descendants("s1")
            .into_iter()
            .filter_map(|node| match &node.kind {
                NodeKind::Text(text) => text.interpolated(&ctx),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Hi Ada", "Two", "One"]);
    }

    #[test]
    fn test_documents_decode_independently_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(|| {
                    let (experience, report) = Decoder::default()
                        .decode(SAMPLE_EXPERIENCE_JSON.as_bytes())
                        .expect("Failed to decode")
                        .resolve();
                    (experience.len(), report.resolved)
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("thread panicked"), (13, 12));
        }
    }
}
