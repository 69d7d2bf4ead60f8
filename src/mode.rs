use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Playable ruleset and assist-variant combination.
///
/// Values 0-3 are the vanilla rulesets, 4-6 their relax variants and 7 the
/// autopilot variant of osu. `Unknown` is the soft-failure value returned for
/// any token that does not name a mode.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[repr(i8)]
pub enum GameMode {
    #[strum(serialize = "unknown")]
    Unknown = -1,
    #[strum(serialize = "osu")]
    Osu = 0,
    #[strum(serialize = "taiko")]
    Taiko = 1,
    #[strum(serialize = "fruits")]
    Fruits = 2,
    #[strum(serialize = "mania")]
    Mania = 3,
    #[strum(to_string = "osu_relax", serialize = "osuRX")]
    OsuRelax = 4,
    #[strum(to_string = "taiko_relax", serialize = "taikoRX")]
    TaikoRelax = 5,
    #[strum(to_string = "fruits_relax", serialize = "fruitsRX")]
    FruitsRelax = 6,
    #[strum(to_string = "osu_autopilot", serialize = "osuAP")]
    OsuAutopilot = 7,
}

/// Which family of score storage a mode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageCategory {
    Vanilla,
    Relax,
    Autopilot,
}

impl StorageCategory {
    /// Table holding this category's scores when the split-table layout is used.
    pub fn scores_table(self) -> &'static str {
        match self {
            StorageCategory::Vanilla => "scores_vn",
            StorageCategory::Relax => "scores_rx",
            StorageCategory::Autopilot => "scores_ap",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ModeProperties {
    vanilla: GameMode,
    category: StorageCategory,
}

const MODE_COUNT: usize = 9;

// Indexed by `value + 1` so that `Unknown` (-1) lands on slot 0.
const PROPERTIES: [ModeProperties; MODE_COUNT] = {
    let mut table = [ModeProperties {
        vanilla: GameMode::Unknown,
        category: StorageCategory::Vanilla,
    }; MODE_COUNT];

    let mut index = 0;
    while index < MODE_COUNT {
        table[index] = derive_properties(index as i8 - 1);
        index += 1;
    }
    table
};

const fn derive_properties(value: i8) -> ModeProperties {
    let vanilla = if value == GameMode::OsuAutopilot as i8 {
        GameMode::Osu
    } else if value < 0 {
        GameMode::Unknown
    } else {
        match GameMode::from_value(value % 4) {
            Some(mode) => mode,
            None => GameMode::Unknown,
        }
    };

    let category = if value < GameMode::OsuRelax as i8 {
        StorageCategory::Vanilla
    } else if value < GameMode::OsuAutopilot as i8 {
        StorageCategory::Relax
    } else {
        StorageCategory::Autopilot
    };

    ModeProperties { vanilla, category }
}

impl GameMode {
    pub const fn from_value(value: i8) -> Option<Self> {
        match value {
            -1 => Some(GameMode::Unknown),
            0 => Some(GameMode::Osu),
            1 => Some(GameMode::Taiko),
            2 => Some(GameMode::Fruits),
            3 => Some(GameMode::Mania),
            4 => Some(GameMode::OsuRelax),
            5 => Some(GameMode::TaikoRelax),
            6 => Some(GameMode::FruitsRelax),
            7 => Some(GameMode::OsuAutopilot),
            _ => None,
        }
    }

    /// Parses a free-form mode token, failing soft to `Unknown`.
    pub fn resolve(token: &str) -> Self {
        GameMode::from_str(token).unwrap_or(GameMode::Unknown)
    }

    /// Parses a mode token, substituting `fallback` when the token does not
    /// resolve to a concrete mode.
    pub fn resolve_or(token: &str, fallback: GameMode) -> Self {
        match GameMode::resolve(token) {
            GameMode::Unknown => fallback,
            mode => mode,
        }
    }

    pub const fn value(self) -> i8 {
        self as i8
    }

    pub fn is_known(self) -> bool {
        self != GameMode::Unknown
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    fn properties(self) -> ModeProperties {
        PROPERTIES[(self.value() + 1) as usize]
    }

    pub fn storage_category(self) -> StorageCategory {
        self.properties().category
    }

    /// Base ruleset with the relax/autopilot variant stripped.
    pub fn vanilla_form(self) -> GameMode {
        self.properties().vanilla
    }

    pub fn vanilla_value(self) -> i8 {
        self.vanilla_form().value()
    }

    /// Name of the vanilla form, used to report a user's primary playstyle.
    pub fn vanilla_name(self) -> &'static str {
        self.vanilla_form().name()
    }
}

impl TryFrom<i8> for GameMode {
    type Error = i8;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        GameMode::from_value(value).ok_or(value)
    }
}
