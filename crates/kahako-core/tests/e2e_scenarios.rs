// Kahako End-to-End Test Scenarios
//
// These tests replay real typing sessions against the engine through the
// headless environment, with every channel combination an editor can offer.
//
// Run with: cargo test --test e2e_scenarios

mod e2e_tests {
    use kahako_core::tables::{APOSTROPHE_EQUIVALENTS, OKINA};
    use kahako_core::{
        ChannelMode, EngineConfig, Simulator, SurfaceDescriptor, Trigger,
    };
    use strum::IntoEnumIterator;

    // =========================================================================
    // Test Helpers
    // =========================================================================

    fn simulator(config: EngineConfig, mode: ChannelMode) -> Simulator {
        Simulator::new(config, SurfaceDescriptor::multiline_input(), mode)
    }

    /// Replay `script` with default settings and return the surface text
    fn typed(mode: ChannelMode, script: &str) -> String {
        let mut sim = simulator(EngineConfig::default(), mode);
        sim.run_script(script).expect("script should parse");
        sim.text()
    }

    fn typed_strict(mode: ChannelMode, script: &str) -> String {
        let config = EngineConfig {
            strict_dead_keys: true,
            ..EngineConfig::default()
        };
        let mut sim = simulator(config, mode);
        sim.run_script(script).expect("script should parse");
        sim.text()
    }

    // =========================================================================
    // Dead-key sequences
    // =========================================================================

    #[test]
    fn e2e_every_lowercase_vowel() {
        for mode in ChannelMode::iter() {
            for (base, out) in [('a', "ā"), ('e', "ē"), ('i', "ī"), ('o', "ō"), ('u', "ū")] {
                assert_eq!(typed(mode, &format!("`{}", base)), out, "{} in {}", base, mode);
            }
        }
    }

    #[test]
    fn e2e_upper_trigger_accepts_either_case() {
        for mode in ChannelMode::iter() {
            for (base, out) in [('a', "Ā"), ('E', "Ē"), ('i', "Ī"), ('O', "Ō"), ('u', "Ū")] {
                assert_eq!(typed(mode, &format!("\\{}", base)), out, "{} in {}", base, mode);
            }
        }
    }

    #[test]
    fn e2e_okina_from_every_apostrophe() {
        for mode in ChannelMode::iter() {
            for ch in APOSTROPHE_EQUIVALENTS {
                assert_eq!(typed(mode, &format!("`{}", ch)), OKINA.to_string(), "{:?} in {}", ch, mode);
            }
        }
    }

    #[test]
    fn e2e_trigger_space_escapes() {
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, "` "), "`");
            assert_eq!(typed(mode, "\\ "), "\\");
        }
        for mode in [ChannelMode::PreCommit, ChannelMode::Both] {
            assert_eq!(typed_strict(mode, "` "), "`");
        }
    }

    #[test]
    fn e2e_literal_fallback() {
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, "`z"), "`z");
            assert_eq!(typed(mode, "`A"), "`A");
            assert_eq!(typed(mode, "\\'"), "\\'");
            assert_eq!(typed(mode, "`\\"), "`\\");
            assert_eq!(typed(mode, "``a"), "``a");
        }
        for mode in [ChannelMode::PreCommit, ChannelMode::Both] {
            assert_eq!(typed_strict(mode, "`z"), "`z");
            assert_eq!(typed_strict(mode, "`\\a"), "`\\a");
        }
    }

    #[test]
    fn e2e_backspace_cancels_trigger() {
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, "`{bs}a"), "a", "{}", mode);
        }
        for mode in [ChannelMode::PreCommit, ChannelMode::Both] {
            assert_eq!(typed_strict(mode, "`{bs}a"), "a", "{}", mode);
        }
    }

    #[test]
    fn e2e_strict_mode_never_shows_trigger() {
        for mode in [ChannelMode::PreCommit, ChannelMode::Both] {
            let config = EngineConfig {
                strict_dead_keys: true,
                ..EngineConfig::default()
            };
            let mut sim = simulator(config, mode);
            sim.run_script("`").unwrap();
            assert_eq!(sim.text(), "");
            assert_eq!(sim.engine().armed_trigger(), Some(Trigger::Lower));
            sim.run_script("a").unwrap();
            assert_eq!(sim.text(), "ā");
        }
    }

    #[test]
    fn e2e_hawaiian_sentence() {
        let script = "Ua mau ke ea o ka `'`aina i ka pono.\n`'O \\Oahu ka mokupuni.";
        for mode in ChannelMode::iter() {
            assert_eq!(
                typed(mode, script),
                "Ua mau ke ea o ka ʻāina i ka pono.\nʻO Ōahu ka mokupuni.",
                "{}",
                mode
            );
        }
    }

    #[test]
    fn e2e_okina_then_macron() {
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, "Hawai`'i"), "Hawaiʻi");
            assert_eq!(typed(mode, "`'`aina"), "ʻāina");
        }
    }

    #[test]
    fn e2e_text_without_triggers_is_untouched() {
        let script = "plain text, with 'quotes' and {enter}new lines";
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, script), "plain text, with 'quotes' and \nnew lines");
        }
    }

    // =========================================================================
    // Chords
    // =========================================================================

    #[test]
    fn e2e_alt_chords() {
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, "k{Alt-a}ne"), "kāne");
            assert_eq!(typed(mode, "{Alt-Shift-o}"), "Ō");
            assert_eq!(typed(mode, "{Alt-'}"), "ʻ");
            assert_eq!(typed(mode, "{Alt-x}"), "");
        }
    }

    #[test]
    fn e2e_chord_while_armed_yields_only_chord_output() {
        for mode in ChannelMode::iter() {
            let mut sim = simulator(EngineConfig::default(), mode);
            sim.run_script("`{Alt-e}").unwrap();
            assert_eq!(sim.text(), "`ē", "{}", mode);
            sim.run_script("a").unwrap();
            assert_eq!(sim.text(), "`ēa", "{}", mode);
        }
    }

    #[test]
    fn e2e_chord_modifier_setting() {
        let config = EngineConfig {
            chord_modifier: kahako_core::ChordModifier::Ctrl,
            ..EngineConfig::default()
        };
        let mut sim = simulator(config, ChannelMode::Both);
        sim.run_script("{Alt-a}{Ctrl-a}{Ctrl-Alt-a}").unwrap();
        assert_eq!(sim.text(), "ā");
    }

    // =========================================================================
    // Composition, focus, eligibility
    // =========================================================================

    #[test]
    fn e2e_composition_is_never_transformed() {
        for mode in ChannelMode::iter() {
            let mut sim = simulator(EngineConfig::default(), mode);
            sim.run_script("{compose}`a{/compose}").unwrap();
            assert_eq!(sim.text(), "`a", "{}", mode);
            assert_eq!(sim.engine().armed_trigger(), None);
            assert!(!sim.engine().is_composing());
            sim.run_script("`e").unwrap();
            assert_eq!(sim.text(), "`aē", "{}", mode);
        }
    }

    #[test]
    fn e2e_composition_start_disarms() {
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, "`{compose}{/compose}a"), "`a", "{}", mode);
        }
    }

    #[test]
    fn e2e_focus_change_disarms() {
        for mode in ChannelMode::iter() {
            assert_eq!(typed(mode, "`{focus}a"), "`a", "{}", mode);
        }
    }

    #[test]
    fn e2e_ineligible_surfaces() {
        for desc in [
            SurfaceDescriptor::line_input("password"),
            SurfaceDescriptor::line_input("email"),
            SurfaceDescriptor::multiline_input().read_only(true),
            SurfaceDescriptor::rich_text().with_class("code"),
        ] {
            let config = EngineConfig {
                exclusion_rule: Some(".code".into()),
                ..EngineConfig::default()
            };
            let mut sim = Simulator::new(config, desc.clone(), ChannelMode::Both);
            sim.run_script("`a{Alt-e}").unwrap();
            assert_eq!(sim.text(), "`a", "{:?}", desc);
        }
    }

    #[test]
    fn e2e_search_field_is_eligible() {
        let mut sim = Simulator::new(
            EngineConfig::default(),
            SurfaceDescriptor::line_input("search"),
            ChannelMode::PreCommit,
        );
        sim.run_script("Hawai`'i").unwrap();
        assert_eq!(sim.text(), "Hawaiʻi");
    }

    // =========================================================================
    // Editing in the middle of text
    // =========================================================================

    #[test]
    fn e2e_insert_before_existing_text() {
        for mode in ChannelMode::iter() {
            let mut sim = simulator(EngineConfig::default(), mode);
            sim.run_script("kne{left}{left}").unwrap();
            sim.run_script("`a").unwrap();
            assert_eq!(sim.text(), "kāne", "{}", mode);
            assert_eq!(sim.surface().cursor(), Some(2));
        }
    }

    #[test]
    fn e2e_forward_delete_disarms() {
        for mode in ChannelMode::iter() {
            let mut sim = simulator(EngineConfig::default(), mode);
            sim.run_script("xy{left}`{del}a").unwrap();
            assert_eq!(sim.text(), "x`a", "{}", mode);
        }
    }
}
