//! User configuration: control tuning, colors, keybindings and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/flip-tabs/config.toml` (default `~/.config/flip-tabs/config.toml`).
//! Unknown keys and malformed values fall back to the defaults.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::feedback::FeedbackPolicy;
use crate::core::host::TabColor;
use crate::core::navigation::{NavigationPolicy, DEFAULT_STEP_DELAY};
use crate::core::offset::{DEFAULT_BASELINE, DEFAULT_EPSILON};
use crate::core::options::ControlOptions;

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    SwipePrev,
    SwipeNext,
    FirstTab,
    LastTab,
    JumpBack,
    JumpForward,
    CancelWalk,
    TogglePolicy,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the help line and the file).
    pub const ALL: &[Action] = &[
        Action::SwipePrev,
        Action::SwipeNext,
        Action::FirstTab,
        Action::LastTab,
        Action::JumpBack,
        Action::JumpForward,
        Action::CancelWalk,
        Action::TogglePolicy,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::SwipePrev => "Swipe Left",
            Action::SwipeNext => "Swipe Right",
            Action::FirstTab => "First Tab",
            Action::LastTab => "Last Tab",
            Action::JumpBack => "Jump Back",
            Action::JumpForward => "Jump Forward",
            Action::CancelWalk => "Cancel Walk",
            Action::TogglePolicy => "Toggle Feedback",
            Action::Quit => "Quit",
        }
    }

    fn config_key(self) -> &'static str {
        match self {
            Action::SwipePrev => "swipe_prev",
            Action::SwipeNext => "swipe_next",
            Action::FirstTab => "first_tab",
            Action::LastTab => "last_tab",
            Action::JumpBack => "jump_back",
            Action::JumpForward => "jump_forward",
            Action::CancelWalk => "cancel_walk",
            Action::TogglePolicy => "toggle_policy",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT modifiers
    /// are compared, and SHIFT not at all for characters since the case
    /// already carries it.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mut mask = KeyModifiers::CONTROL | KeyModifiers::ALT;
        if !matches!(self.code, KeyCode::Char(_)) {
            mask |= KeyModifiers::SHIFT;
        }
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// User-friendly display string (e.g. `"Alt+←"`, `"q"`).
    pub fn display(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    /// Serialise to config-file format (e.g. `"Alt+Left"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = modifier_prefix(self.modifiers);
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            other => key_name(other),
        });
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Left"`, `"q"`, `"Home"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            _ => {
                // Keep the case so capitals bind without `Shift+`.
                let mut chars = key_part.chars();
                let c = chars.next()?;
                if chars.next().is_some() {
                    return None;
                }
                KeyCode::Char(c)
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

fn modifier_prefix(modifiers: KeyModifiers) -> String {
    let mut s = String::new();
    if modifiers.contains(KeyModifiers::CONTROL) {
        s.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        s.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        s.push_str("Shift+");
    }
    s
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Left => "Left".into(),
        KeyCode::Right => "Right".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Tab => "Tab".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub feedback: FeedbackPolicy,
    pub navigation: NavigationPolicy,
    /// Pause between walk steps, in milliseconds.
    pub step_delay_ms: u64,
    pub offset_baseline: f64,
    pub offset_epsilon: f64,
    pub selected_tab_color: TabColor,
    pub inactive_tab_color: TabColor,
    pub indicator_color: TabColor,
    /// Pages skipped by the jump actions.
    pub jump_stride: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let control = ControlOptions::default();
        Self {
            bindings: Self::default_bindings(),
            feedback: FeedbackPolicy::DirectPaint,
            navigation: control.navigation,
            step_delay_ms: DEFAULT_STEP_DELAY.as_millis() as u64,
            offset_baseline: DEFAULT_BASELINE,
            offset_epsilon: DEFAULT_EPSILON,
            selected_tab_color: control.selected_tab_color,
            inactive_tab_color: control.inactive_tab_color,
            indicator_color: control.indicator_color,
            jump_stride: 5,
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(SwipePrev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(SwipeNext, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(FirstTab, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(LastTab, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), n)]);
        m.insert(JumpBack, vec![KeyBind::new(Char('['), n), KeyBind::new(PageUp, n)]);
        m.insert(JumpForward, vec![KeyBind::new(Char(']'), n), KeyBind::new(PageDown, n)]);
        m.insert(CancelWalk, vec![KeyBind::new(Esc, n)]);
        m.insert(TogglePolicy, vec![KeyBind::new(Char('p'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: swipe | {}/{}: jump {} | 0-9 Enter: go to tab | {}: stop | {}: feedback | {}: quit",
            self.short_binding(Action::SwipePrev),
            self.short_binding(Action::SwipeNext),
            self.short_binding(Action::JumpBack),
            self.short_binding(Action::JumpForward),
            self.jump_stride,
            self.short_binding(Action::CancelWalk),
            self.short_binding(Action::TogglePolicy),
            self.short_binding(Action::Quit),
        )
    }

    /// Options for the tab control derived from this config.
    pub fn control_options(&self, initial_index: usize) -> ControlOptions {
        ControlOptions {
            feedback: self.feedback,
            navigation: self.navigation,
            step_delay: Duration::from_millis(self.step_delay_ms),
            offset_baseline: self.offset_baseline,
            offset_epsilon: self.offset_epsilon,
            selected_tab_color: self.selected_tab_color,
            inactive_tab_color: self.inactive_tab_color,
            indicator_color: self.indicator_color,
            initial_index,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) => {
                tracing::debug!("no config at {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "feedback" => {
                    if let Ok(v) = value.parse() {
                        config.feedback = v;
                    }
                    continue;
                }
                "navigation" => {
                    if let Ok(v) = value.parse() {
                        config.navigation = v;
                    }
                    continue;
                }
                "step_delay_ms" => {
                    if let Ok(v) = value.parse::<u64>() {
                        // Keep walks perceptible but never sluggish.
                        config.step_delay_ms = v.clamp(1, 1000);
                    }
                    continue;
                }
                "offset_baseline" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.offset_baseline = v;
                    }
                    continue;
                }
                "offset_epsilon" => {
                    if let Ok(v) = value.parse::<f64>() {
                        config.offset_epsilon = v;
                    }
                    continue;
                }
                "selected_tab_color" | "inactive_tab_color" | "indicator_color" => {
                    if let Some(color) = TabColor::parse_hex(value) {
                        match key {
                            "selected_tab_color" => config.selected_tab_color = color,
                            "inactive_tab_color" => config.inactive_tab_color = color,
                            _ => config.indicator_color = color,
                        }
                    }
                    continue;
                }
                "jump_stride" => {
                    if let Ok(v) = value.parse::<usize>() {
                        config.jump_stride = v.max(1);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!("unknown config key `{key}`");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# flip-tabs configuration".to_string(),
            String::new(),
            "# Tab control".to_string(),
            format!("feedback = {}", self.feedback),
            format!("navigation = {}", self.navigation),
            format!("step_delay_ms = {}", self.step_delay_ms),
            format!("offset_baseline = {}", self.offset_baseline),
            format!("offset_epsilon = {}", self.offset_epsilon),
            format!("selected_tab_color = {}", self.selected_tab_color.to_hex()),
            format!("inactive_tab_color = {}", self.inactive_tab_color.to_hex()),
            format!("indicator_color = {}", self.indicator_color.to_hex()),
            format!("jump_stride = {}", self.jump_stride),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/flip-tabs/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("flip-tabs").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialised_config_parses_back() {
        let mut config = AppConfig::default();
        config.feedback = FeedbackPolicy::Notify;
        config.navigation = NavigationPolicy::AnimateFar;
        config.step_delay_ms = 15;
        config.selected_tab_color = TabColor::rgb(1, 2, 3);
        config
            .bindings
            .insert(Action::Quit, vec![KeyBind::new(KeyCode::Char('x'), KeyModifiers::CONTROL)]);

        assert_eq!(AppConfig::parse(&config.serialise()), config);
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let config = AppConfig::parse(
            "feedback = sparkle\nstep_delay_ms = soon\nindicator_color = red\nnot a line\nquit = Hyper+q\n",
        );
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn step_delay_is_clamped() {
        let config = AppConfig::parse("step_delay_ms = 0\n");
        assert_eq!(config.step_delay_ms, 1);
    }

    #[test]
    fn uppercase_char_binding_survives() {
        let config = AppConfig::parse("last_tab = G\n");
        let key = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(config.match_key(key), Some(Action::LastTab));
    }

    #[test]
    fn control_options_carry_tuning() {
        let config = AppConfig::parse("navigation = near:2\nstep_delay_ms = 25\n");
        let options = config.control_options(7);
        assert_eq!(options.navigation, NavigationPolicy::AnimateNear { max_distance: 2 });
        assert_eq!(options.step_delay, Duration::from_millis(25));
        assert_eq!(options.initial_index, 7);
    }
}
