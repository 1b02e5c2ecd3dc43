/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// A `variant` preset supplies every value; explicit keys override it.
/// Missing file or missing keys fall back to the preset.

use log::warn;
use serde::Deserialize;
use std::path::PathBuf;

/// Largest accepted board width or height. Keeps the free-cell scan small
/// and every screen row addressable by the renderer.
pub const MAX_BOARD_SIDE: usize = 200;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub variant: Variant,
    pub seed: Option<u64>,
    pub board: BoardConfig,
    pub abilities: AbilityConfig,
    pub level: LevelConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// 24×24, compact cells, teleport only.
    Classic,
    /// 25×25, spaced cells, teleport and zap.
    Zap,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellSpacing {
    Compact,
    Spaced,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChargePolicy {
    /// After a level up, every enabled ability gets `level` charges.
    Level,
    /// After a level up, charges reset to the start values.
    Fixed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub spacing: CellSpacing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AbilityConfig {
    pub teleport: bool,
    pub zap: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelConfig {
    pub start_baddies: usize,
    pub start_traps: usize,
    pub add_baddies: usize,
    pub add_traps: usize,
    pub start_teleports: u32,
    pub start_zaps: u32,
    pub charge_policy: ChargePolicy,
}

impl LevelConfig {
    /// Charges granted when entering `level` (1-based).
    pub fn charges_for(&self, level: u32, abilities: &AbilityConfig) -> (u32, u32) {
        let (teleports, zaps) = match (level, self.charge_policy) {
            (1, _) | (_, ChargePolicy::Fixed) => (self.start_teleports, self.start_zaps),
            (n, ChargePolicy::Level) => (n, n),
        };
        (
            if abilities.teleport { teleports } else { 0 },
            if abilities.zap { zaps } else { 0 },
        )
    }
}

// ── Presets ──

impl Variant {
    pub fn preset(self) -> GameConfig {
        let level = LevelConfig {
            start_baddies: 3,
            start_traps: 4,
            add_baddies: 2,
            add_traps: 2,
            start_teleports: 2,
            start_zaps: 0,
            charge_policy: ChargePolicy::Level,
        };
        match self {
            Variant::Classic => GameConfig {
                variant: self,
                seed: None,
                board: BoardConfig { width: 24, height: 24, spacing: CellSpacing::Compact },
                abilities: AbilityConfig { teleport: true, zap: false },
                level,
            },
            Variant::Zap => GameConfig {
                variant: self,
                seed: None,
                board: BoardConfig { width: 25, height: 25, spacing: CellSpacing::Spaced },
                abilities: AbilityConfig { teleport: true, zap: true },
                level: LevelConfig { start_zaps: 1, ..level },
            },
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Variant::Classic.preset()
    }
}

// ── TOML Schema (every key optional, preset fills the gaps) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    board: TomlBoard,
    #[serde(default)]
    abilities: TomlAbilities,
    #[serde(default)]
    level: TomlLevel,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGame {
    variant: Option<Variant>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlBoard {
    width: Option<usize>,
    height: Option<usize>,
    spacing: Option<CellSpacing>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlAbilities {
    teleport: Option<bool>,
    zap: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlLevel {
    start_baddies: Option<usize>,
    start_traps: Option<usize>,
    add_baddies: Option<usize>,
    add_traps: Option<usize>,
    start_teleports: Option<u32>,
    start_zaps: Option<u32>,
    charge_policy: Option<ChargePolicy>,
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    pub fn load() -> Self {
        match find_toml(&candidate_dirs()) {
            Some(text) => Self::from_toml_str(&text),
            None => Self::default(),
        }
    }

    /// Parse a TOML document directly. Parse errors fall back to defaults.
    pub fn from_toml_str(text: &str) -> Self {
        match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => Self::resolve(cfg),
            Err(e) => {
                warn!("config.toml parse error: {e}; using default settings");
                Self::default()
            }
        }
    }

    /// Overlay explicit keys on the chosen preset, then validate.
    fn resolve(t: TomlConfig) -> Self {
        let mut cfg = t.game.variant.unwrap_or(Variant::Classic).preset();
        let preset = cfg.clone();
        cfg.seed = t.game.seed;

        cfg.board.width = t.board.width.unwrap_or(cfg.board.width);
        cfg.board.height = t.board.height.unwrap_or(cfg.board.height);
        cfg.board.spacing = t.board.spacing.unwrap_or(cfg.board.spacing);

        cfg.abilities.teleport = t.abilities.teleport.unwrap_or(cfg.abilities.teleport);
        cfg.abilities.zap = t.abilities.zap.unwrap_or(cfg.abilities.zap);

        let lv = &mut cfg.level;
        lv.start_baddies = t.level.start_baddies.unwrap_or(lv.start_baddies);
        lv.start_traps = t.level.start_traps.unwrap_or(lv.start_traps);
        lv.add_baddies = t.level.add_baddies.unwrap_or(lv.add_baddies);
        lv.add_traps = t.level.add_traps.unwrap_or(lv.add_traps);
        lv.start_teleports = t.level.start_teleports.unwrap_or(lv.start_teleports);
        lv.start_zaps = t.level.start_zaps.unwrap_or(lv.start_zaps);
        lv.charge_policy = t.level.charge_policy.unwrap_or(lv.charge_policy);

        let side_ok = |n: usize| (1..=MAX_BOARD_SIDE).contains(&n);
        if !side_ok(cfg.board.width) || !side_ok(cfg.board.height) {
            warn!(
                "board size {}x{} is outside 1..={MAX_BOARD_SIDE}; using {}x{}",
                cfg.board.width, cfg.board.height, preset.board.width, preset.board.height,
            );
            cfg.board.width = preset.board.width;
            cfg.board.height = preset.board.height;
        }

        // Player + first level must fit on the board.
        let cells = cfg.board.width * cfg.board.height;
        let needed = cfg
            .level
            .start_baddies
            .checked_add(cfg.level.start_traps)
            .and_then(|n| n.checked_add(1));
        if needed.map_or(true, |n| n > cells) {
            warn!(
                "{} baddies and {} traps do not fit on a {}x{} board; using preset counts",
                cfg.level.start_baddies, cfg.level.start_traps, cfg.board.width, cfg.board.height,
            );
            cfg.level.start_baddies = preset.level.start_baddies.min(cells.saturating_sub(1));
            cfg.level.start_traps = preset
                .level
                .start_traps
                .min(cells.saturating_sub(1 + cfg.level.start_baddies));
        }

        cfg
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Read the first config.toml found in the candidate directories.
fn find_toml(search_dirs: &[PathBuf]) -> Option<String> {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => return Some(text),
                Err(e) => warn!("could not read {}: {e}", path.display()),
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_classic() {
        let cfg = GameConfig::from_toml_str("");
        assert_eq!(cfg, Variant::Classic.preset());
        assert_eq!(cfg.board.width, 24);
        assert_eq!(cfg.board.spacing, CellSpacing::Compact);
        assert!(!cfg.abilities.zap);
    }

    #[test]
    fn zap_variant_preset() {
        let cfg = GameConfig::from_toml_str("[game]\nvariant = \"zap\"\n");
        assert_eq!(cfg.variant, Variant::Zap);
        assert_eq!((cfg.board.width, cfg.board.height), (25, 25));
        assert_eq!(cfg.board.spacing, CellSpacing::Spaced);
        assert!(cfg.abilities.teleport && cfg.abilities.zap);
        assert_eq!(cfg.level.start_zaps, 1);
    }

    #[test]
    fn explicit_keys_override_preset() {
        let cfg = GameConfig::from_toml_str(
            r#"
            [game]
            variant = "zap"
            seed = 7

            [board]
            width = 10
            spacing = "compact"

            [level]
            add_baddies = 5
            charge_policy = "fixed"
            "#,
        );
        assert_eq!(cfg.seed, Some(7));
        assert_eq!((cfg.board.width, cfg.board.height), (10, 25));
        assert_eq!(cfg.board.spacing, CellSpacing::Compact);
        assert_eq!(cfg.level.add_baddies, 5);
        assert_eq!(cfg.level.add_traps, 2);
        assert_eq!(cfg.level.charge_policy, ChargePolicy::Fixed);
    }

    #[test]
    fn parse_error_falls_back_to_defaults() {
        let cfg = GameConfig::from_toml_str("[board]\nwidth = \"wide\"\n");
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn zero_board_falls_back_to_preset_size() {
        let cfg = GameConfig::from_toml_str("[board]\nwidth = 0\nheight = 3\n");
        assert_eq!((cfg.board.width, cfg.board.height), (24, 24));
    }

    #[test]
    fn huge_board_falls_back_to_preset_size() {
        let cfg = GameConfig::from_toml_str("[board]\nwidth = 9223372036854775807\nheight = 4\n");
        assert_eq!((cfg.board.width, cfg.board.height), (24, 24));

        let cfg = GameConfig::from_toml_str(
            "[game]\nvariant = \"zap\"\n[board]\nwidth = 100000\nheight = 100000\n",
        );
        assert_eq!((cfg.board.width, cfg.board.height), (25, 25));
    }

    #[test]
    fn largest_board_is_accepted() {
        let cfg = GameConfig::from_toml_str("[board]\nwidth = 200\nheight = 200\n");
        assert_eq!((cfg.board.width, cfg.board.height), (MAX_BOARD_SIDE, MAX_BOARD_SIDE));
    }

    #[test]
    fn huge_entity_counts_fall_back_to_preset() {
        let cfg = GameConfig::from_toml_str(
            "[level]\nstart_baddies = 9223372036854775807\nstart_traps = 9223372036854775807\n",
        );
        assert_eq!((cfg.level.start_baddies, cfg.level.start_traps), (3, 4));
    }

    #[test]
    fn overfull_first_level_is_clamped() {
        let cfg = GameConfig::from_toml_str(
            "[board]\nwidth = 2\nheight = 2\n[level]\nstart_baddies = 9\n",
        );
        let lv = &cfg.level;
        assert!(lv.start_baddies + lv.start_traps + 1 <= 4);
    }

    #[test]
    fn charges_level_policy() {
        let cfg = Variant::Zap.preset();
        assert_eq!(cfg.level.charges_for(1, &cfg.abilities), (2, 1));
        assert_eq!(cfg.level.charges_for(4, &cfg.abilities), (4, 4));
    }

    #[test]
    fn charges_fixed_policy_and_disabled_abilities() {
        let mut cfg = Variant::Classic.preset();
        cfg.level.charge_policy = ChargePolicy::Fixed;
        // Zap disabled: always zero zaps.
        assert_eq!(cfg.level.charges_for(1, &cfg.abilities), (2, 0));
        assert_eq!(cfg.level.charges_for(6, &cfg.abilities), (2, 0));
    }
}
