use bitflags::bitflags;

bitflags! {
    /// Mod bitmask as stored alongside each score.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Mods: u32 {
        const NO_FAIL      = 1 << 0;
        const EASY         = 1 << 1;
        const TOUCHSCREEN  = 1 << 2;
        const HIDDEN       = 1 << 3;
        const HARD_ROCK    = 1 << 4;
        const SUDDEN_DEATH = 1 << 5;
        const DOUBLE_TIME  = 1 << 6;
        const RELAX        = 1 << 7;
        const HALF_TIME    = 1 << 8;
        const NIGHTCORE    = 1 << 9;
        const FLASHLIGHT   = 1 << 10;
        const AUTOPLAY     = 1 << 11;
        const SPUN_OUT     = 1 << 12;
        const AUTOPILOT    = 1 << 13;
        const PERFECT      = 1 << 14;
        const KEY4         = 1 << 15;
        const KEY5         = 1 << 16;
        const KEY6         = 1 << 17;
        const KEY7         = 1 << 18;
        const KEY8         = 1 << 19;
        const FADE_IN      = 1 << 20;
        const RANDOM       = 1 << 21;
        const CINEMA       = 1 << 22;
        const TARGET       = 1 << 23;
        const KEY9         = 1 << 24;
        const KEY_COOP     = 1 << 25;
        const KEY1         = 1 << 26;
        const KEY3         = 1 << 27;
        const KEY2         = 1 << 28;
        const SCORE_V2     = 1 << 29;
        const MIRROR       = 1 << 30;
    }
}

const ACRONYMS: &[(Mods, &str)] = &[
    (Mods::NO_FAIL, "NF"),
    (Mods::EASY, "EZ"),
    (Mods::TOUCHSCREEN, "TD"),
    (Mods::HIDDEN, "HD"),
    (Mods::HARD_ROCK, "HR"),
    (Mods::SUDDEN_DEATH, "SD"),
    (Mods::DOUBLE_TIME, "DT"),
    (Mods::RELAX, "RX"),
    (Mods::HALF_TIME, "HT"),
    (Mods::NIGHTCORE, "NC"),
    (Mods::FLASHLIGHT, "FL"),
    (Mods::AUTOPLAY, "AT"),
    (Mods::SPUN_OUT, "SO"),
    (Mods::AUTOPILOT, "AP"),
    (Mods::PERFECT, "PF"),
    (Mods::KEY4, "4K"),
    (Mods::KEY5, "5K"),
    (Mods::KEY6, "6K"),
    (Mods::KEY7, "7K"),
    (Mods::KEY8, "8K"),
    (Mods::FADE_IN, "FI"),
    (Mods::RANDOM, "RD"),
    (Mods::CINEMA, "CN"),
    (Mods::TARGET, "TP"),
    (Mods::KEY9, "9K"),
    (Mods::KEY_COOP, "CO"),
    (Mods::KEY1, "1K"),
    (Mods::KEY3, "3K"),
    (Mods::KEY2, "2K"),
    (Mods::SCORE_V2, "V2"),
    (Mods::MIRROR, "MR"),
];

impl Mods {
    /// Decodes a raw stored bitmask, ignoring unassigned bits.
    pub fn from_raw(raw: i64) -> Self {
        Mods::from_bits_truncate(raw as u32)
    }

    /// Acronyms of the applied mods in bit order.
    ///
    /// NC is always stored together with DT and PF together with SD; the
    /// implied mod is left out of the list.
    pub fn as_list(self) -> Vec<String> {
        let mut mods = self;
        if mods.contains(Mods::NIGHTCORE) {
            mods.remove(Mods::DOUBLE_TIME);
        }
        if mods.contains(Mods::PERFECT) {
            mods.remove(Mods::SUDDEN_DEATH);
        }

        ACRONYMS
            .iter()
            .filter(|(flag, _)| mods.contains(*flag))
            .map(|(_, acronym)| acronym.to_string())
            .collect()
    }
}
