// Kahako Settings File Tests
//
// Loading, saving and reloading settings files on disk.
//
// Run with: cargo test --test settings_files

#[cfg(feature = "settings-file")]
mod settings_file_tests {
    use std::fs;

    use kahako_core::{
        default_settings_content, ChordModifier, Engine, EngineConfig, Settings, SettingsError,
        SurfaceDescriptor, TextBuffer,
    };
    use kahako_core::{ChannelMode, Simulator};
    use tempfile::TempDir;

    fn write_settings(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("settings.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_file_records_path() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(&dir, "[dead_keys]\nstrict = true\n");
        let settings = Settings::from_file(&path).unwrap();
        assert!(settings.config().strict_dead_keys);
        assert_eq!(settings.source_path(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Settings::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_default_content_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(&dir, default_settings_content());
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.to_engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(&dir, "[chord]\nmodifier = \"alt\"\n");
        let mut settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.config().chord_modifier, ChordModifier::Alt);

        fs::write(&path, "[chord]\nmodifier = \"ctrl\"\n").unwrap();
        settings.reload().unwrap();
        assert_eq!(settings.config().chord_modifier, ChordModifier::Ctrl);
        assert_eq!(settings.source_path(), Some(path.as_path()));
    }

    #[test]
    fn test_reload_keeps_old_values_on_error() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(&dir, "[dead_keys]\nstrict = true\n");
        let mut settings = Settings::from_file(&path).unwrap();

        fs::write(&path, "[dead_keys\n").unwrap();
        assert!(matches!(settings.reload(), Err(SettingsError::TomlParse(_))));
        assert!(settings.config().strict_dead_keys);
    }

    #[test]
    fn test_save_creates_directories_and_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("kahako").join("settings.toml");

        let mut settings = Settings::from_config(EngineConfig {
            strict_dead_keys: true,
            enable_rich_text: false,
            exclusion_rule: Some("#title, .code".into()),
            chord_modifier: ChordModifier::CtrlAlt,
            ..EngineConfig::default()
        });
        settings.save(&path).unwrap();
        assert_eq!(settings.source_path(), Some(path.as_path()));

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.config(), settings.config());
    }

    #[test]
    fn test_file_settings_drive_the_engine() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(
            &dir,
            r#"
[dead_keys]
strict = "on"

[surfaces]
exclude = "class =~ '^code'"
"#,
        );
        let config = Settings::from_file(&path).unwrap().to_engine_config();

        let mut sim = Simulator::new(config.clone(), SurfaceDescriptor::multiline_input(), ChannelMode::Both);
        sim.run_script("`").unwrap();
        assert_eq!(sim.text(), "");
        sim.run_script("o").unwrap();
        assert_eq!(sim.text(), "ō");

        let engine = Engine::new(config);
        let excluded = TextBuffer::new(SurfaceDescriptor::rich_text().with_class("code-block"));
        let mut sim = Simulator::with_parts(engine, excluded, ChannelMode::Both);
        sim.run_script("`o").unwrap();
        assert_eq!(sim.text(), "`o");
    }

    #[test]
    fn test_malformed_rule_in_file_fails_open() {
        let dir = TempDir::new().unwrap();
        let path = write_settings(&dir, "[surfaces]\nexclude = \"[unterminated\"\n");
        let config = Settings::from_file(&path).unwrap().to_engine_config();
        let engine = Engine::new(config);
        assert!(engine.eligibility().rule_error().is_some());

        let mut sim = Simulator::with_parts(
            engine,
            TextBuffer::new(SurfaceDescriptor::multiline_input()),
            ChannelMode::PreCommit,
        );
        sim.run_script("`a").unwrap();
        assert_eq!(sim.text(), "ā");
    }
}
