//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--endpoint`, `--light`, `--no-mouse`, ...)
//! 2. `--config <file>`
//! 3. `$EB_TUI_CONFIG` environment variable (path to config file)
//! 4. Project-local `.eb-tui.toml` in the current working directory
//! 5. Global `~/.config/eb-tui/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::listing::request::{FilterState, KindFilter, DEFAULT_SIZE_GT, DEFAULT_SIZE_LT};

// ── Section configs ──────────────────────────────────────────────────────────

/// Remote listing service settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// GraphQL endpoint URL.
    pub endpoint: Option<String>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

/// Listing table settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListingConfig {
    /// Rows per server page. Only used for the paginator range display.
    pub rows_per_page: Option<usize>,
    /// Enable mouse support.
    pub mouse: Option<bool>,
}

/// Initial filter values for a new session.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct FiltersConfig {
    pub size_gt: Option<i64>,
    pub size_lt: Option<i64>,
    pub name_contains: Option<String>,
    /// "File", "Directory" or "" for any.
    pub type_eq: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark" or "light".
    pub scheme: Option<String>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub listing: ListingConfig,
    pub filters: FiltersConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";
/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default rows per page (matches the server's page size).
pub const DEFAULT_ROWS_PER_PAGE: usize = 25;

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("EB_TUI_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".eb-tui.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("eb-tui").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a logged warning).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config file");
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            service: ServiceConfig {
                endpoint: other
                    .service
                    .endpoint
                    .clone()
                    .or(self.service.endpoint),
                timeout_ms: other.service.timeout_ms.or(self.service.timeout_ms),
            },
            listing: ListingConfig {
                rows_per_page: other.listing.rows_per_page.or(self.listing.rows_per_page),
                mouse: other.listing.mouse.or(self.listing.mouse),
            },
            filters: FiltersConfig {
                size_gt: other.filters.size_gt.or(self.filters.size_gt),
                size_lt: other.filters.size_lt.or(self.filters.size_lt),
                name_contains: other
                    .filters
                    .name_contains
                    .clone()
                    .or(self.filters.name_contains),
                type_eq: other.filters.type_eq.clone().or(self.filters.type_eq),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
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

    pub fn endpoint(&self) -> &str {
        self.service.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.service.timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS))
    }

    /// Rows per page, never zero.
    pub fn rows_per_page(&self) -> usize {
        self.listing
            .rows_per_page
            .filter(|&n| n > 0)
            .unwrap_or(DEFAULT_ROWS_PER_PAGE)
    }

    pub fn mouse_enabled(&self) -> bool {
        self.listing.mouse.unwrap_or(true)
    }

    /// Theme scheme: "dark" or "light".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }

    /// Filter state a new session starts with.
    pub fn initial_filters(&self) -> FilterState {
        FilterState {
            size_greater_than: self.filters.size_gt.unwrap_or(DEFAULT_SIZE_GT),
            size_less_than: self.filters.size_lt.unwrap_or(DEFAULT_SIZE_LT),
            name_contains: self.filters.name_contains.clone().unwrap_or_default(),
            kind_equals: self
                .filters
                .type_eq
                .as_deref()
                .map(KindFilter::parse)
                .unwrap_or(KindFilter::File),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
