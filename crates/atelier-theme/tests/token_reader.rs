//! Integration tests for the Token Reader and Color Normalizer.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use atelier_theme::{
    export_tokens, read_tokens, to_css_color_expression, to_hex, Document, ProbeId, ProbeStyle,
    StyleEngine, Stylesheet, ThemeMode,
};
use proptest::prelude::*;

/// Engine whose lookups either return nothing or panic.
#[derive(Default)]
struct FaultyEngine {
    panic_on_read: bool,
    attached: AtomicUsize,
    next: AtomicU64,
}

impl StyleEngine for FaultyEngine {
    fn attach_probe(&self, _style: ProbeStyle) -> Option<ProbeId> {
        self.attached.fetch_add(1, Ordering::SeqCst);
        Some(ProbeId::new(self.next.fetch_add(1, Ordering::SeqCst)))
    }

    fn custom_property(&self, _probe: ProbeId, name: &str) -> String {
        if self.panic_on_read {
            panic!("style computation failed for --{name}");
        }
        String::new()
    }

    fn computed_color(&self, _probe: ProbeId) -> String {
        String::new()
    }

    fn detach_probe(&self, _probe: ProbeId) {
        self.attached.fetch_sub(1, Ordering::SeqCst);
    }
}

#[test]
fn reads_are_deterministic_for_every_token_and_mode() {
    let document = Document::atelier();
    let names = export_tokens();
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        let first = read_tokens(&document, &names, mode);
        let second = read_tokens(&document, &names, mode);
        assert_eq!(first, second);
        assert_eq!(first.len(), names.len());
    }
}

#[test]
fn inactive_mode_is_readable_without_touching_the_page() {
    let document = Document::atelier();
    document.set_root_marker(false);

    let dark = read_tokens(&document, &["background", "--radius"], ThemeMode::Dark);
    let light = read_tokens(&document, &["background"], ThemeMode::Light);

    assert_eq!(dark["background"], "222 47% 11%");
    assert_eq!(dark["radius"], "0.75rem");
    assert_eq!(light["background"], "0 0% 100%");
    assert!(!document.root_is_dark());
    assert_eq!(document.attached_probes(), 0);
}

#[test]
fn no_probe_left_behind_when_every_value_is_empty() {
    let engine = FaultyEngine::default();
    let values = read_tokens(&engine, &["primary", "border"], ThemeMode::Light);

    assert_eq!(values["primary"], "");
    assert_eq!(values["border"], "");
    assert_eq!(engine.attached.load(Ordering::SeqCst), 0);
}

#[test]
fn no_probe_left_behind_when_style_computation_panics() {
    let engine = FaultyEngine {
        panic_on_read: true,
        ..FaultyEngine::default()
    };

    let outcome = catch_unwind(AssertUnwindSafe(|| {
        read_tokens(&engine, &["primary"], ThemeMode::Dark)
    }));

    assert!(outcome.is_err());
    assert_eq!(engine.attached.load(Ordering::SeqCst), 0);
}

#[test]
fn token_values_normalize_to_hex() {
    let document = Document::atelier();
    let light = read_tokens(&document, &["primary"], ThemeMode::Light);

    let expression = to_css_color_expression(&light["primary"]);
    assert_eq!(expression, "hsl(221 83% 53%)");
    assert_eq!(to_hex(&document, &expression), "#2463eb");
    assert_eq!(document.attached_probes(), 0);
}

#[test]
fn hex_of_rgb_triplet() {
    let document = Document::default();
    assert_eq!(to_hex(&document, "rgb(0 123 255)"), "#007bff");
    assert_eq!(to_hex(&document, "rgb(0, 123, 255, 1)"), "#007bff");
    assert_eq!(to_hex(&document, ""), "");
    assert_eq!(to_hex(&document, "hsl(var(--undefined))"), "");
}

proptest! {
    #[test]
    fn values_are_trimmed_and_collapsed(words in prop::collection::vec("[a-z0-9%]{1,6}", 1..5),
                                        gaps in prop::collection::vec("[ \t\n]{1,3}", 5)) {
        let mut raw = String::new();
        for (index, word) in words.iter().enumerate() {
            raw.push_str(&gaps[index]);
            raw.push_str(word);
        }
        raw.push_str(&gaps[4]);

        let mut sheet = Stylesheet::default();
        sheet.define(ThemeMode::Light, "token", &raw);
        let document = Document::new(sheet);

        let values = read_tokens(&document, &["token"], ThemeMode::Light);
        prop_assert_eq!(&values["token"], &words.join(" "));
    }
}
