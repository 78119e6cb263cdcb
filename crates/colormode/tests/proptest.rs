//! Property-based tests for resolution using proptest.

use std::rc::Rc;

use colormode::env::{HostParts, MemoryStorage, MockMedia, RootElement, VirtualRoot};
use colormode::{ColorMode, ColorModeOptions, ColorModeScript, FORCED_ATTRIBUTE};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn mode_strategy() -> impl Strategy<Value = ColorMode> {
    prop_oneof![Just(ColorMode::Dark), Just(ColorMode::Light)]
}

/// Any media state a host can be in.
fn media_strategy() -> impl Strategy<Value = MockMedia> {
    prop_oneof![
        Just(MockMedia::unsupported()),
        Just(MockMedia::scheme_feature_unsupported()),
        mode_strategy().prop_map(|mode| MockMedia::prefers(mode).without_feature_query()),
        Just(MockMedia::new()),
        mode_strategy().prop_map(MockMedia::prefers),
        Just(MockMedia::prefers(ColorMode::Dark).with_match(ColorMode::Light.media_query())),
    ]
}

fn options_strategy() -> impl Strategy<Value = ColorModeOptions> {
    (
        prop_oneof![Just("system".to_string()), "[a-z]{1,8}"],
        "[a-z]{1,8}".prop_filter("fallback must be concrete", |s| s != "system"),
        "[a-z]{0,4}-?",
        "-?[a-z]{0,4}",
        prop_oneof![Just(String::new()), "[a-z]{1,6}"],
    )
        .prop_map(|(preference, fallback, prefix, suffix, data_value)| {
            ColorModeOptions::new()
                .preference(preference)
                .fallback(fallback)
                .class_prefix(prefix)
                .class_suffix(suffix)
                .data_value(data_value)
        })
}

fn script(
    options: ColorModeOptions,
    storage: MemoryStorage,
    media: MockMedia,
    root: Rc<VirtualRoot>,
) -> ColorModeScript {
    ColorModeScript::new(options, HostParts::new(storage, media, root)).unwrap()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A stored concrete scheme is applied as-is, whatever the media state.
    #[test]
    fn stored_scheme_bypasses_detection(
        stored in mode_strategy(),
        media in media_strategy(),
        options in options_strategy(),
    ) {
        let storage = MemoryStorage::new().with_entry(options.storage_key.clone(), stored.as_str());
        let handle = script(options, storage, media, Rc::new(VirtualRoot::new())).resolve();
        prop_assert_eq!(handle.value(), stored.as_str());
        prop_assert_eq!(handle.preference(), stored.as_str());
    }

    /// With nothing stored and a system preference, resolution equals
    /// detection.
    #[test]
    fn system_preference_equals_detection(
        media in media_strategy(),
        options in options_strategy(),
    ) {
        let options = options.preference("system");
        let detected = script(
            options.clone(),
            MemoryStorage::new(),
            media.clone(),
            Rc::new(VirtualRoot::new()),
        )
        .get_color_scheme();
        let handle = script(options, MemoryStorage::new(), media, Rc::new(VirtualRoot::new())).resolve();
        prop_assert_eq!(handle.value(), detected.as_str());
        prop_assert_eq!(handle.preference(), "system");
    }

    /// Detection only ever yields a known scheme or the fallback, never the
    /// sentinel.
    #[test]
    fn detection_is_known_or_fallback(
        media in media_strategy(),
        options in options_strategy(),
    ) {
        let fallback = options.fallback.clone();
        let detected = script(options, MemoryStorage::new(), media, Rc::new(VirtualRoot::new()))
            .get_color_scheme();
        prop_assert!(detected == "dark" || detected == "light" || detected == fallback);
        prop_assert_ne!(detected.as_str(), "system");
    }

    /// An unknown `(prefers-color-scheme)` feature means the fallback, even
    /// when a per-scheme query would match.
    #[test]
    fn unknown_feature_query_yields_fallback(
        mode in mode_strategy(),
        options in options_strategy(),
    ) {
        let fallback = options.fallback.clone();
        let media = MockMedia::prefers(mode).without_feature_query();
        let detected = script(options, MemoryStorage::new(), media, Rc::new(VirtualRoot::new()))
            .get_color_scheme();
        prop_assert_eq!(detected, fallback);
    }

    /// A forced attribute wins over any stored value and media state.
    #[test]
    fn forced_attribute_wins(
        forced in "[a-z]{1,8}",
        stored in prop::option::of(mode_strategy()),
        media in media_strategy(),
        options in options_strategy(),
    ) {
        let mut storage = MemoryStorage::new();
        if let Some(stored) = stored {
            storage = storage.with_entry(options.storage_key.clone(), stored.as_str());
        }
        let root = Rc::new(VirtualRoot::new().with_attribute(FORCED_ATTRIBUTE, forced.clone()));
        let class_name = options.class_name(&forced);
        let handle = script(options, storage, media, Rc::clone(&root)).resolve();
        prop_assert_eq!(handle.value(), forced.as_str());
        prop_assert!(root.has_class(&class_name));
    }

    /// Adding then removing a scheme leaves no trace of it on the root.
    #[test]
    fn add_then_remove_leaves_no_scheme_class(
        mode in mode_strategy(),
        options in options_strategy(),
        class_list_api in any::<bool>(),
    ) {
        let mut root = VirtualRoot::new().with_class("app");
        if !class_list_api {
            root = root.without_class_list();
        }
        let root = Rc::new(root);
        let class_name = options.class_name(mode.as_str());
        let attribute = options.data_attribute();
        let script = script(options, MemoryStorage::new(), MockMedia::unsupported(), Rc::clone(&root));

        script.add_color_scheme(mode.as_str());
        prop_assert!(root.has_class(&class_name));
        script.remove_color_scheme(mode.as_str());

        prop_assert!(!root.has_class(&class_name));
        prop_assert!(root.has_class("app"));
        if let Some(attribute) = attribute {
            prop_assert_eq!(root.get_attribute(&attribute), None);
        }
    }

    /// Any sequence of switches leaves exactly one scheme class applied.
    #[test]
    fn switching_keeps_exactly_one_scheme_class(
        switches in prop::collection::vec(mode_strategy(), 0..12),
        options in options_strategy(),
        class_list_api in any::<bool>(),
    ) {
        let root = if class_list_api {
            VirtualRoot::new()
        } else {
            VirtualRoot::new().without_class_list()
        };
        let root = Rc::new(root);
        let options = options.preference("system");
        let dark = options.class_name("dark");
        let light = options.class_name("light");
        prop_assume!(dark != light);

        let mut handle = script(
            options,
            MemoryStorage::new(),
            MockMedia::prefers(ColorMode::Dark),
            Rc::clone(&root),
        )
        .resolve();
        for mode in switches {
            handle.set_value(mode.as_str());
        }

        let scheme_classes: Vec<String> = root
            .classes()
            .into_iter()
            .filter(|c| *c == dark || *c == light)
            .collect();
        prop_assert_eq!(scheme_classes.len(), 1);
        prop_assert_eq!(&scheme_classes[0], &handle.script().options().class_name(handle.value()));
    }
}
