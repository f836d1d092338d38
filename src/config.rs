//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--nodes`, `--theme`, etc.)
//! 2. `$TREE_VIEW_CONFIG` environment variable (path to config file)
//! 3. Project-local `.tree-view.toml` in the current working directory
//! 4. Global `~/.config/tree-view/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable mouse support (click, hover, wheel).
    pub mouse: Option<bool>,
}

/// Tree view geometry and behaviour.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ViewConfig {
    /// Height of a row in terminal lines.
    pub row_height: Option<u32>,
    /// Width of one column cell in terminal columns.
    pub cell_width: Option<u32>,
    /// Indent per depth level in terminal columns.
    pub indent: Option<u32>,
    /// Scroll keyboard-selected rows into view.
    pub follow_selection: Option<bool>,
    /// Make every n-th node taller (0 = all rows equal).
    pub tall_every: Option<usize>,
    /// Height of the taller rows in terminal lines.
    pub tall_height: Option<u32>,
}

/// Demo model settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DemoConfig {
    /// Number of leaves in the flat model, or of groups in the nested one.
    pub nodes: Option<usize>,
    /// Use the nested arena model instead of the flat fixture.
    pub nested: Option<bool>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub row_bg: Option<String>,
    pub row_alt_bg: Option<String>,
    pub row_fg: Option<String>,
    pub hover_bg: Option<String>,
    pub selected_bg: Option<String>,
    pub selected_fg: Option<String>,
    pub focus_fg: Option<String>,
    pub edited_fg: Option<String>,
    pub border_fg: Option<String>,
    pub status_bg: Option<String>,
    pub status_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

impl ThemeConfig {
    /// Scheme name with the default applied.
    pub fn scheme_name(&self) -> &str {
        self.scheme.as_deref().unwrap_or("dark")
    }
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path. Logging is off when unset.
    pub file: Option<String>,
    /// Filter directive, e.g. "info" or "tree_view_tui=trace".
    pub level: Option<String>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub view: ViewConfig,
    pub demo: DemoConfig,
    pub theme: ThemeConfig,
    pub log: LogConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default row height in lines.
pub const DEFAULT_ROW_HEIGHT: u32 = 1;
/// Default cell width in columns.
pub const DEFAULT_CELL_WIDTH: u32 = 14;
/// Default indent per level in columns.
pub const DEFAULT_INDENT: u32 = 2;
/// Default height of the taller rows.
pub const DEFAULT_TALL_HEIGHT: u32 = 3;
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("TREE_VIEW_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".tree-view.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("tree-view").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
///
/// Runs before logging and the terminal are set up, hence stderr.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`. Wherever `other` has `Some`, it wins.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                mouse: other.general.mouse.or(self.general.mouse),
            },
            view: ViewConfig {
                row_height: other.view.row_height.or(self.view.row_height),
                cell_width: other.view.cell_width.or(self.view.cell_width),
                indent: other.view.indent.or(self.view.indent),
                follow_selection: other.view.follow_selection.or(self.view.follow_selection),
                tall_every: other.view.tall_every.or(self.view.tall_every),
                tall_height: other.view.tall_height.or(self.view.tall_height),
            },
            demo: DemoConfig {
                nodes: other.demo.nodes.or(self.demo.nodes),
                nested: other.demo.nested.or(self.demo.nested),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
            log: LogConfig {
                file: other.log.file.clone().or(self.log.file),
                level: other.log.level.clone().or(self.log.level),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that the highest-priority candidate is merged last.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Whether mouse support is enabled.
    pub fn mouse_enabled(&self) -> bool {
        self.general.mouse.unwrap_or(true)
    }

    /// Row height in lines, never below 1.
    pub fn row_height(&self) -> u32 {
        self.view.row_height.unwrap_or(DEFAULT_ROW_HEIGHT).max(1)
    }

    /// Cell width in columns, never below 1.
    pub fn cell_width(&self) -> u32 {
        self.view.cell_width.unwrap_or(DEFAULT_CELL_WIDTH).max(1)
    }

    pub fn indent(&self) -> u32 {
        self.view.indent.unwrap_or(DEFAULT_INDENT)
    }

    /// Whether keyboard selection scrolls the view. Off unless asked for.
    pub fn follow_selection(&self) -> bool {
        self.view.follow_selection.unwrap_or(false)
    }

    /// Every n-th node is tall; 0 disables.
    pub fn tall_every(&self) -> usize {
        self.view.tall_every.unwrap_or(0)
    }

    pub fn tall_height(&self) -> u32 {
        self.view.tall_height.unwrap_or(DEFAULT_TALL_HEIGHT).max(1)
    }

    /// Number of demo nodes (flat leaves or nested groups).
    pub fn demo_nodes(&self) -> usize {
        self.demo.nodes.unwrap_or(crate::model::flat::DEFAULT_NODE_COUNT)
    }

    pub fn demo_nested(&self) -> bool {
        self.demo.nested.unwrap_or(false)
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log.file.as_deref().map(Path::new)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
