use serde::{Deserialize, Serialize};

/// Embedded default configuration.
const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

// ── Final (merged) config types ──

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub secrets: SecretsConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    /// Log level for the file logger: off, error, warn, info, debug, trace.
    #[serde(default)]
    pub log_level: String,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct GitConfig {
    /// Branch types accepted in `<type>/<description>` names.
    #[serde(default)]
    pub valid_branch_types: Vec<String>,
    /// Branches exempt from name validation.
    #[serde(default)]
    pub protected_branches: Vec<String>,
    /// Path prefixes that must not be staged with `git add`.
    #[serde(default)]
    pub blocked_add_prefixes: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct SecretsConfig {
    /// Extra secret patterns on top of the built-in set.
    #[serde(default)]
    pub patterns: Vec<PatternConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PatternConfig {
    pub name: String,
    pub description: String,
    pub regex: String,
}

// ── Overlay types (user config that merges with defaults) ──

#[derive(Debug, Deserialize, Default)]
struct ConfigOverlay {
    #[serde(default)]
    settings: SettingsOverlay,
    #[serde(default)]
    git: GitOverlay,
    #[serde(default)]
    secrets: SecretsOverlay,
}

#[derive(Debug, Deserialize, Default)]
struct SettingsOverlay {
    log_level: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct GitOverlay {
    /// When true, overlay lists replace the defaults instead of extending them.
    #[serde(default)]
    replace: bool,
    #[serde(default)]
    valid_branch_types: Vec<String>,
    #[serde(default)]
    protected_branches: Vec<String>,
    #[serde(default)]
    blocked_add_prefixes: Vec<String>,
    #[serde(default)]
    remove_valid_branch_types: Vec<String>,
    #[serde(default)]
    remove_protected_branches: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct SecretsOverlay {
    #[serde(default)]
    patterns: Vec<PatternConfig>,
}

// ── Loading and merge ──

impl Config {
    /// The embedded default configuration. Panics only if the embedded TOML
    /// is itself malformed, which is a build defect, not a runtime input.
    pub fn default_config() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded default config must parse")
    }

    /// Defaults merged with the user overlay at
    /// `~/.config/cc-hookcheck/config.toml`, when present. An unreadable or
    /// invalid overlay is ignored with a log line — the hook fails open.
    pub fn load() -> Self {
        let mut config = Self::default_config();

        let path = shellexpand::tilde("~/.config/cc-hookcheck/config.toml").into_owned();
        if let Ok(text) = std::fs::read_to_string(&path) {
            match toml::from_str::<ConfigOverlay>(&text) {
                Ok(overlay) => config.apply_overlay(overlay),
                Err(err) => log::warn!("ignoring invalid user config {path}: {err}"),
            }
        }

        config
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(level) = overlay.settings.log_level {
            self.settings.log_level = level;
        }

        let git = overlay.git;
        if git.replace {
            if !git.valid_branch_types.is_empty() {
                self.git.valid_branch_types = git.valid_branch_types;
            }
            if !git.protected_branches.is_empty() {
                self.git.protected_branches = git.protected_branches;
            }
            if !git.blocked_add_prefixes.is_empty() {
                self.git.blocked_add_prefixes = git.blocked_add_prefixes;
            }
        } else {
            merge_unique(&mut self.git.valid_branch_types, git.valid_branch_types);
            merge_unique(&mut self.git.protected_branches, git.protected_branches);
            merge_unique(&mut self.git.blocked_add_prefixes, git.blocked_add_prefixes);
        }
        self.git
            .valid_branch_types
            .retain(|t| !git.remove_valid_branch_types.contains(t));
        self.git
            .protected_branches
            .retain(|b| !git.remove_protected_branches.contains(b));

        self.secrets.patterns.extend(overlay.secrets.patterns);
    }
}

fn merge_unique(base: &mut Vec<String>, extra: Vec<String>) {
    for item in extra {
        if !base.contains(&item) {
            base.push(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let config = Config::default_config();
        assert!(config.git.valid_branch_types.iter().any(|t| t == "feat"));
        assert!(config.git.protected_branches.iter().any(|b| b == "main"));
        assert!(config.git.blocked_add_prefixes.iter().any(|p| p == "tmp/"));
    }

    #[test]
    fn overlay_extends_lists() {
        let mut config = Config::default_config();
        let overlay: ConfigOverlay = toml::from_str(
            r#"
            [git]
            valid_branch_types = ["spike"]
            protected_branches = ["develop"]
            "#,
        )
        .unwrap();
        config.apply_overlay(overlay);
        assert!(config.git.valid_branch_types.iter().any(|t| t == "spike"));
        assert!(config.git.valid_branch_types.iter().any(|t| t == "feat"));
        assert!(config.git.protected_branches.iter().any(|b| b == "develop"));
    }

    #[test]
    fn overlay_replace_swaps_lists() {
        let mut config = Config::default_config();
        let overlay: ConfigOverlay = toml::from_str(
            r#"
            [git]
            replace = true
            valid_branch_types = ["only"]
            "#,
        )
        .unwrap();
        config.apply_overlay(overlay);
        assert_eq!(config.git.valid_branch_types, vec!["only"]);
        // Untouched lists keep their defaults
        assert!(config.git.protected_branches.iter().any(|b| b == "main"));
    }

    #[test]
    fn overlay_remove_entries() {
        let mut config = Config::default_config();
        let overlay: ConfigOverlay = toml::from_str(
            r#"
            [git]
            remove_valid_branch_types = ["chore"]
            "#,
        )
        .unwrap();
        config.apply_overlay(overlay);
        assert!(!config.git.valid_branch_types.iter().any(|t| t == "chore"));
    }

    #[test]
    fn overlay_adds_secret_patterns() {
        let mut config = Config::default_config();
        let overlay: ConfigOverlay = toml::from_str(
            r#"
            [[secrets.patterns]]
            name = "custom-key"
            description = "Custom API Key"
            regex = "CUSTOM_[A-Z0-9]{16}"
            "#,
        )
        .unwrap();
        config.apply_overlay(overlay);
        assert!(config.secrets.patterns.iter().any(|p| p.name == "custom-key"));
    }

    #[test]
    fn overlay_merge_deduplicates() {
        let mut config = Config::default_config();
        let overlay: ConfigOverlay = toml::from_str(
            r#"
            [git]
            valid_branch_types = ["feat"]
            "#,
        )
        .unwrap();
        let before = config.git.valid_branch_types.len();
        config.apply_overlay(overlay);
        assert_eq!(config.git.valid_branch_types.len(), before);
    }
}
