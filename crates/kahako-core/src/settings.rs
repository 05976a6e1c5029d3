// Kahako Settings Module
// Loads the engine configuration from a TOML file

#![cfg(feature = "settings-file")]

use std::path::{Path, PathBuf};

use crate::modifier::ChordModifier;
use crate::transform::EngineConfig;

/// User settings, loaded from `~/.config/kahako/settings.toml` by default
///
/// ```toml
/// [dead_keys]
/// strict = false
///
/// [surfaces]
/// line_inputs = true
/// multiline_inputs = true
/// rich_text = true
/// exclude = ".code, [data-no-hawaiian]"
///
/// [chord]
/// modifier = "alt"
///
/// [debug]
/// logging = false
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    config: EngineConfig,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML write error: {0}")]
    TomlWrite(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    dead_keys: Option<DeadKeySection>,

    #[serde(default)]
    surfaces: Option<SurfaceSection>,

    #[serde(default)]
    chord: Option<ChordSection>,

    #[serde(default)]
    debug: Option<DebugSection>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DeadKeySection {
    #[serde(default)]
    strict: Option<toml::Value>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SurfaceSection {
    #[serde(default)]
    line_inputs: Option<toml::Value>,
    #[serde(default)]
    multiline_inputs: Option<toml::Value>,
    #[serde(default)]
    rich_text: Option<toml::Value>,
    #[serde(default)]
    exclude: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ChordSection {
    #[serde(default)]
    modifier: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct DebugSection {
    #[serde(default)]
    logging: Option<toml::Value>,
}

/// Serialized form written by `Settings::to_toml_string`
#[derive(serde::Serialize)]
struct SettingsOut<'a> {
    dead_keys: DeadKeysOut,
    surfaces: SurfacesOut<'a>,
    chord: ChordOut,
    debug: DebugOut,
}

#[derive(serde::Serialize)]
struct DeadKeysOut {
    strict: bool,
}

#[derive(serde::Serialize)]
struct SurfacesOut<'a> {
    line_inputs: bool,
    multiline_inputs: bool,
    rich_text: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    exclude: Option<&'a str>,
}

#[derive(serde::Serialize)]
struct ChordOut {
    modifier: ChordModifier,
}

#[derive(serde::Serialize)]
struct DebugOut {
    logging: bool,
}

impl Settings {
    /// Settings holding the default engine configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut config = EngineConfig::default();

        if let Some(dead_keys) = toml_settings.dead_keys {
            apply_bool(&mut config.strict_dead_keys, dead_keys.strict.as_ref(), "dead_keys.strict")?;
        }

        if let Some(surfaces) = toml_settings.surfaces {
            apply_bool(
                &mut config.enable_line_inputs,
                surfaces.line_inputs.as_ref(),
                "surfaces.line_inputs",
            )?;
            apply_bool(
                &mut config.enable_multiline_inputs,
                surfaces.multiline_inputs.as_ref(),
                "surfaces.multiline_inputs",
            )?;
            apply_bool(
                &mut config.enable_rich_text,
                surfaces.rich_text.as_ref(),
                "surfaces.rich_text",
            )?;
            // The rule itself is checked by the engine, which fails open.
            config.exclusion_rule = surfaces.exclude.filter(|r| !r.trim().is_empty());
        }

        if let Some(chord) = toml_settings.chord {
            if let Some(modifier) = chord.modifier {
                config.chord_modifier = ChordModifier::parse(&modifier)
                    .map_err(|e| SettingsError::InvalidValue(format!("chord.modifier: {}", e)))?;
            }
        }

        if let Some(debug) = toml_settings.debug {
            apply_bool(&mut config.debug_logging, debug.logging.as_ref(), "debug.logging")?;
        }

        Ok(Self::from_config(config))
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kahako").join("settings.toml"))
    }

    /// Load from default location (~/.config/kahako/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the file they were loaded from
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn to_engine_config(&self) -> EngineConfig {
        self.config.clone()
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// Render the current values as a settings file
    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        let out = SettingsOut {
            dead_keys: DeadKeysOut {
                strict: self.config.strict_dead_keys,
            },
            surfaces: SurfacesOut {
                line_inputs: self.config.enable_line_inputs,
                multiline_inputs: self.config.enable_multiline_inputs,
                rich_text: self.config.enable_rich_text,
                exclude: self.config.exclusion_rule.as_deref(),
            },
            chord: ChordOut {
                modifier: self.config.chord_modifier,
            },
            debug: DebugOut {
                logging: self.config.debug_logging,
            },
        };
        toml::to_string_pretty(&out).map_err(|e| SettingsError::TomlWrite(e.to_string()))
    }

    /// Write the current values to `path`, creating parent directories
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml_string()?)?;
        self.source_path = Some(path.to_path_buf());
        Ok(())
    }
}

fn apply_bool(target: &mut bool, value: Option<&toml::Value>, name: &str) -> Result<(), SettingsError> {
    if let Some(value) = value {
        *target = parse_bool_value(value)
            .map_err(|e| SettingsError::InvalidValue(format!("{}: {}", name, e)))?;
    }
    Ok(())
}

/// Parse a TOML value as a boolean
fn parse_bool_value(value: &toml::Value) -> Result<bool, String> {
    match value {
        toml::Value::Boolean(b) => Ok(*b),
        toml::Value::Integer(1) => Ok(true),
        toml::Value::Integer(0) => Ok(false),
        toml::Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(format!("Cannot convert '{}' to boolean", s)),
        },
        _ => Err(format!("Cannot convert {} to boolean", value)),
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Kahako Settings
# Place this file at: ~/.config/kahako/settings.toml

[dead_keys]
# Hide the trigger character (` or \) until the next key resolves it
strict = false

[surfaces]
# Which kinds of editable surfaces the engine acts on
line_inputs = true
multiline_inputs = true
rich_text = true

# Skip matching surfaces. Selectors (#id, .class, [attr], [attr=value])
# or conditions (class =~ 'code', type == search, readonly), combined
# with "and", "or", "not" and ",".
# exclude = ".code, [data-no-hawaiian]"

[chord]
# Modifier for direct chords (Alt+a gives ā): "alt", "ctrl", "ctrl+alt" or "any"
modifier = "alt"

[debug]
# Log every engine decision
logging = false
"#
}
