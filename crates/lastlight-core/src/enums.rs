//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level game phase. Exactly one is active at a time, owned by the
/// phase machine in the sim crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    MainMenu,
    /// Daylight preparation window before a night begins.
    Day,
    /// Cosmetic dusk window between Day and Night.
    Transition,
    /// Active wave combat.
    Night,
    /// A night has been survived; awaiting the continue command.
    Dawn,
    /// Terminal: the player died.
    GameOver,
    /// Terminal: the final night was survived.
    Victory,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainMenu => "MainMenu",
            Self::Day => "Day",
            Self::Transition => "Transition",
            Self::Night => "Night",
            Self::Dawn => "Dawn",
            Self::GameOver => "GameOver",
            Self::Victory => "Victory",
        }
    }

    /// Whether the run has ended. Terminal phases only leave via restart.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::GameOver | Self::Victory)
    }
}

/// Difficulty preset selected once per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "normal" => Some(Self::Normal),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

/// Letter grade summarizing one night's performance.
///
/// Declaration order defines the ordering: `D < C < B < A < S`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[default]
    D,
    C,
    B,
    A,
    S,
}

impl Grade {
    /// Bonus-points multiplier attached to this grade.
    pub fn multiplier(&self) -> f32 {
        match self {
            Self::D => 0.9,
            Self::C => 1.0,
            Self::B => 1.1,
            Self::A => 1.2,
            Self::S => 1.35,
        }
    }

    /// Flat bonus points attached to this grade.
    pub fn bonus_points(&self) -> u32 {
        match self {
            Self::D => 0,
            Self::C => 20,
            Self::B => 45,
            Self::A => 80,
            Self::S => 120,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::D => "D",
            Self::C => "C",
            Self::B => "B",
            Self::A => "A",
            Self::S => "S",
        }
    }
}

/// Run-long multiplier bundle, rolled once at run start from a fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunModifierKind {
    /// Tougher enemies that drop a little more ammo.
    Ironhide,
    /// Fast but frail enemies.
    Rabid,
    /// Slow, hard-hitting enemies.
    Bruisers,
    /// Scarce ammo drops, baseline enemies.
    Famine,
    /// Tough, dangerous enemies with generous ammo.
    Bounty,
    /// Frail, quick, spiteful enemies.
    Brittle,
    /// Everything heavier, everything slower.
    Juggernaut,
    /// A small push on every enemy stat.
    Gloom,
}

impl RunModifierKind {
    /// The full catalog, in roll order.
    pub const ALL: [Self; 8] = [
        Self::Ironhide,
        Self::Rabid,
        Self::Bruisers,
        Self::Famine,
        Self::Bounty,
        Self::Brittle,
        Self::Juggernaut,
        Self::Gloom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ironhide => "Ironhide",
            Self::Rabid => "Rabid",
            Self::Bruisers => "Bruisers",
            Self::Famine => "Famine",
            Self::Bounty => "Bounty",
            Self::Brittle => "Brittle",
            Self::Juggernaut => "Juggernaut",
            Self::Gloom => "Gloom",
        }
    }
}

/// Per-night environmental mutation. Night 1 is always `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MutationKind {
    #[default]
    None,
    /// Dense fog; spawns press in at a slightly faster cadence.
    ThickFog,
    /// Enemies move 20% faster.
    FullMoon,
    /// Enemies carry 25% more health and hit a little harder.
    Contamination,
    /// Half again as many waves.
    Reinforcements,
}

impl MutationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::ThickFog => "ThickFog",
            Self::FullMoon => "FullMoon",
            Self::Contamination => "Contamination",
            Self::Reinforcements => "Reinforcements",
        }
    }
}

/// Daytime objective category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveKind {
    /// Hold marked zones until secured.
    SecureZone,
    /// Find and power beacons scattered around the map.
    ActivateBeacon,
    /// Haul supply caches back to the shelter.
    RecoverSupplyCache,
}

impl ObjectiveKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecureZone => "SecureZone",
            Self::ActivateBeacon => "ActivateBeacon",
            Self::RecoverSupplyCache => "RecoverSupplyCache",
        }
    }
}
