use std::path::PathBuf;
use std::sync::Arc;

use kahako_core::{
    ChannelMode, ChannelOutcome, Engine, Keystroke, Settings, Simulator, Surface,
    SurfaceDescriptor, SurfaceKind, TextBuffer, Trigger,
};

use crate::tui::logger::LogBuffer;

const MAX_OUTPUT_LINES: usize = 800;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Pane {
    Typing,
    Settings,
    Output,
}

#[derive(Clone, Copy, Debug)]
pub enum PendingAction {
    ClearText,
    ResetSettings,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SettingEntry {
    StrictMode,
    ChordModifier,
    Channels,
    Surface,
    DebugLogging,
    LineInputs,
    MultilineInputs,
    RichText,
}

impl SettingEntry {
    pub const ALL: [SettingEntry; 8] = [
        SettingEntry::StrictMode,
        SettingEntry::ChordModifier,
        SettingEntry::Channels,
        SettingEntry::Surface,
        SettingEntry::DebugLogging,
        SettingEntry::LineInputs,
        SettingEntry::MultilineInputs,
        SettingEntry::RichText,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SettingEntry::StrictMode => "Strict",
            SettingEntry::ChordModifier => "Chord",
            SettingEntry::Channels => "Channels",
            SettingEntry::Surface => "Surface",
            SettingEntry::DebugLogging => "Debug log",
            SettingEntry::LineInputs => "Line inputs",
            SettingEntry::MultilineInputs => "Multiline",
            SettingEntry::RichText => "Rich text",
        }
    }

    /// Boolean entries render as checkboxes, the rest as cycled values
    pub fn is_toggle(&self) -> bool {
        !matches!(
            self,
            SettingEntry::ChordModifier | SettingEntry::Channels | SettingEntry::Surface
        )
    }
}

/// Engine state as shown in the header badge
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EngineState {
    Idle,
    Armed(Trigger),
    Composing,
    Ineligible,
}

impl EngineState {
    pub fn label(&self) -> &'static str {
        match self {
            EngineState::Idle => "IDLE",
            EngineState::Armed(Trigger::Lower) => "ARMED `",
            EngineState::Armed(Trigger::Upper) => "ARMED \\",
            EngineState::Composing => "COMPOSING",
            EngineState::Ineligible => "INELIGIBLE",
        }
    }
}

pub struct App {
    pub focused_pane: Pane,
    pub setting_index: usize,
    pub settings: Settings,
    pub settings_path: Option<PathBuf>,
    pub simulator: Simulator,
    pub surface_kind: SurfaceKind,
    pub status: String,
    pub output: Vec<String>,
    pub output_scroll: usize,
    pub confirm_prompt: Option<String>,
    pub pending_action: Option<PendingAction>,
    log: Arc<LogBuffer>,
}

impl App {
    pub fn new(settings: Settings, log: Arc<LogBuffer>) -> Self {
        let settings_path = settings
            .source_path()
            .map(|p| p.to_path_buf())
            .or_else(Settings::default_path);
        let surface_kind = SurfaceKind::MultilineInput;
        let simulator = Simulator::with_parts(
            Engine::new(settings.to_engine_config()),
            TextBuffer::new(SurfaceDescriptor::new(surface_kind)),
            ChannelMode::Both,
        );

        let mut app = Self {
            focused_pane: Pane::Typing,
            setting_index: 0,
            settings,
            settings_path,
            simulator,
            surface_kind,
            status: "Ready".to_string(),
            output: vec![],
            output_scroll: 0,
            confirm_prompt: None,
            pending_action: None,
            log,
        };
        app.sync_log_level();
        app
    }

    pub fn selected_setting(&self) -> Option<SettingEntry> {
        SettingEntry::ALL.get(self.setting_index).copied()
    }

    pub fn set_status<S: Into<String>>(&mut self, msg: S) {
        self.status = msg.into();
    }

    pub fn push_output<S: AsRef<str>>(&mut self, msg: S) {
        for line in msg.as_ref().lines() {
            self.output.push(line.to_string());
        }
        if self.output.len() > MAX_OUTPUT_LINES {
            let overflow = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(0..overflow);
        }
        // Auto-scroll to bottom on new output
        self.output_scroll = self.output.len().saturating_sub(1);
    }

    /// Move captured log records into the output pane
    pub fn drain_log(&mut self) {
        let lines = self.log.drain();
        if !lines.is_empty() {
            self.push_output(lines.join("\n"));
        }
    }

    pub fn start_confirm<S: Into<String>>(&mut self, prompt: S, action: PendingAction) {
        self.confirm_prompt = Some(prompt.into());
        self.pending_action = Some(action);
    }

    pub fn clear_confirm(&mut self) {
        self.confirm_prompt = None;
        self.pending_action = None;
    }

    pub fn text(&self) -> String {
        self.simulator.text()
    }

    pub fn cursor(&self) -> usize {
        self.simulator.surface().cursor().unwrap_or(0)
    }

    pub fn engine_state(&self) -> EngineState {
        let engine = self.simulator.engine();
        if !engine
            .eligibility()
            .is_eligible(self.simulator.surface().descriptor())
        {
            EngineState::Ineligible
        } else if engine.is_composing() {
            EngineState::Composing
        } else if let Some(trigger) = engine.armed_trigger() {
            EngineState::Armed(trigger)
        } else {
            EngineState::Idle
        }
    }

    /// Send one keystroke through the simulated editor
    pub fn press(&mut self, key: Keystroke) {
        let outcomes = self.simulator.press(&key);
        self.record(&key, &outcomes);
    }

    pub fn toggle_composition(&mut self) {
        let key = if self.simulator.engine().is_composing() {
            Keystroke::CompositionEnd
        } else {
            Keystroke::CompositionStart
        };
        self.press(key);
    }

    fn record(&mut self, key: &Keystroke, outcomes: &[ChannelOutcome]) {
        let consumed: Vec<String> = outcomes
            .iter()
            .filter(|o| o.result.is_consumed())
            .map(|o| format!("  {}", o))
            .collect();
        if !consumed.is_empty() {
            self.push_output(format!("$ {}", key));
            self.push_output(consumed.join("\n"));
        }
        self.set_status(format!("{} ~ {}", key, self.engine_state().label()));
    }

    pub fn clear_text(&mut self) {
        self.simulator.clear();
        self.set_status("Text cleared");
    }

    pub fn change_selected_setting(&mut self) {
        let Some(entry) = self.selected_setting() else {
            return;
        };
        match entry {
            SettingEntry::Channels => {
                let next = self.simulator.mode().cycle();
                self.simulator.set_mode(next);
                self.set_status(format!("channels = {}", next));
                return;
            }
            SettingEntry::Surface => {
                self.cycle_surface();
                return;
            }
            _ => {}
        }

        let config = self.settings.config_mut();
        let message = match entry {
            SettingEntry::StrictMode => {
                config.strict_dead_keys = !config.strict_dead_keys;
                format!("dead_keys.strict = {}", config.strict_dead_keys)
            }
            SettingEntry::ChordModifier => {
                config.chord_modifier = config.chord_modifier.cycle();
                format!("chord.modifier = {}", config.chord_modifier)
            }
            SettingEntry::DebugLogging => {
                config.debug_logging = !config.debug_logging;
                format!("debug.logging = {}", config.debug_logging)
            }
            SettingEntry::LineInputs => {
                config.enable_line_inputs = !config.enable_line_inputs;
                format!("surfaces.line_inputs = {}", config.enable_line_inputs)
            }
            SettingEntry::MultilineInputs => {
                config.enable_multiline_inputs = !config.enable_multiline_inputs;
                format!("surfaces.multiline_inputs = {}", config.enable_multiline_inputs)
            }
            SettingEntry::RichText => {
                config.enable_rich_text = !config.enable_rich_text;
                format!("surfaces.rich_text = {}", config.enable_rich_text)
            }
            SettingEntry::Channels | SettingEntry::Surface => return,
        };
        self.apply_settings();
        self.set_status(message);
    }

    pub fn setting_value(&self, entry: SettingEntry) -> String {
        let config = self.settings.config();
        let flag = |on: bool| String::from(if on { "on" } else { "off" });
        match entry {
            SettingEntry::StrictMode => flag(config.strict_dead_keys),
            SettingEntry::ChordModifier => config.chord_modifier.to_string(),
            SettingEntry::Channels => self.simulator.mode().to_string(),
            SettingEntry::Surface => self.surface_kind.to_string(),
            SettingEntry::DebugLogging => flag(config.debug_logging),
            SettingEntry::LineInputs => flag(config.enable_line_inputs),
            SettingEntry::MultilineInputs => flag(config.enable_multiline_inputs),
            SettingEntry::RichText => flag(config.enable_rich_text),
        }
    }

    pub fn setting_enabled(&self, entry: SettingEntry) -> bool {
        let config = self.settings.config();
        match entry {
            SettingEntry::StrictMode => config.strict_dead_keys,
            SettingEntry::DebugLogging => config.debug_logging,
            SettingEntry::LineInputs => config.enable_line_inputs,
            SettingEntry::MultilineInputs => config.enable_multiline_inputs,
            SettingEntry::RichText => config.enable_rich_text,
            SettingEntry::ChordModifier | SettingEntry::Channels | SettingEntry::Surface => true,
        }
    }

    fn cycle_surface(&mut self) {
        self.surface_kind = match self.surface_kind {
            SurfaceKind::MultilineInput => SurfaceKind::LineInput,
            SurfaceKind::LineInput => SurfaceKind::RichText,
            SurfaceKind::RichText => SurfaceKind::MultilineInput,
        };
        *self.simulator.surface_mut().descriptor_mut() = SurfaceDescriptor::new(self.surface_kind);
        self.simulator.engine_mut().on_focus_or_context_change();
        self.set_status(format!("surface = {}", self.surface_kind));
    }

    /// Push the edited settings into the running engine
    fn apply_settings(&mut self) {
        self.simulator
            .engine_mut()
            .set_config(self.settings.to_engine_config());
        if let Some(err) = self.simulator.engine().eligibility().rule_error() {
            self.push_output(format!("Exclusion rule ignored: {}", err));
        }
        self.sync_log_level();
    }

    fn sync_log_level(&self) {
        let level = if self.settings.config().debug_logging {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        };
        log::set_max_level(level);
    }

    pub fn reset_settings(&mut self) {
        *self.settings.config_mut() = Default::default();
        self.apply_settings();
        self.set_status("Settings reset to defaults (not saved)");
    }

    pub fn save_settings(&mut self) {
        let Some(path) = self.settings_path.clone() else {
            self.set_status("Save failed");
            self.push_output("Save error: no configuration directory");
            return;
        };
        match self.settings.save(&path) {
            Ok(()) => {
                self.set_status("settings.toml saved");
                self.push_output(format!("Saved {}", path.display()));
            }
            Err(err) => {
                self.set_status("Save failed");
                self.push_output(format!("Save error: {}", err));
            }
        }
    }

    pub fn run_pending(&mut self) {
        if let Some(action) = self.pending_action.take() {
            self.clear_confirm();
            match action {
                PendingAction::ClearText => self.clear_text(),
                PendingAction::ResetSettings => self.reset_settings(),
            }
        }
    }

    pub fn cycle_pane_forward(&mut self) {
        self.focused_pane = match self.focused_pane {
            Pane::Typing => Pane::Settings,
            Pane::Settings => Pane::Output,
            Pane::Output => Pane::Typing,
        };
    }

    pub fn cycle_pane_backward(&mut self) {
        self.focused_pane = match self.focused_pane {
            Pane::Typing => Pane::Output,
            Pane::Settings => Pane::Typing,
            Pane::Output => Pane::Settings,
        };
    }
}
