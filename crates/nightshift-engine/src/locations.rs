//! Environmental profiles for each location.
//!
//! The tick processor reads the active location's profile every tick:
//! noise maps to a fixed exposure and per-second effects, fatigue maps to a
//! flat accumulation rate, and felt temperature eases toward the target.
//! Everything here is data; the tick step is a short sequence of lookups.

use nightshift_types::{Inventory, LocationId};

/// Ambient noise band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseLevel {
    /// Offices and archives.
    Low,
    /// Background machinery.
    Moderate,
    /// Rivet guns and APUs.
    High,
    /// Running engines on the apron.
    Extreme,
}

/// Per-second effects of a noise band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseEffects {
    /// Exposure in dB written to `hfStats.noiseExposure`.
    pub exposure_db: f64,
    /// Suspicion gained per second (quiet rooms make idle hands visible).
    pub suspicion_per_sec: f64,
    /// Social stress gained per second.
    pub stress_per_sec: f64,
    /// Focus lost per second.
    pub focus_drain_per_sec: f64,
}

impl NoiseLevel {
    /// Look up the effects of this band.
    #[allow(clippy::match_same_arms)]
    pub const fn effects(self) -> NoiseEffects {
        match self {
            Self::Low => NoiseEffects {
                exposure_db: 35.0,
                suspicion_per_sec: 0.01,
                stress_per_sec: 0.0,
                focus_drain_per_sec: 0.0,
            },
            Self::Moderate => NoiseEffects {
                exposure_db: 60.0,
                suspicion_per_sec: 0.0,
                stress_per_sec: 0.0,
                focus_drain_per_sec: 0.0,
            },
            Self::High => NoiseEffects {
                exposure_db: 85.0,
                suspicion_per_sec: 0.0,
                stress_per_sec: 0.05,
                focus_drain_per_sec: 0.05,
            },
            Self::Extreme => NoiseEffects {
                exposure_db: 105.0,
                suspicion_per_sec: 0.0,
                stress_per_sec: 0.15,
                focus_drain_per_sec: 0.15,
            },
        }
    }

    /// Whether ear defenders blunt this band.
    pub const fn is_loud(self) -> bool {
        matches!(self, Self::High | Self::Extreme)
    }
}

/// Fatigue accumulation band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatigueLevel {
    /// Desk work.
    Low,
    /// Hangar floor.
    Medium,
    /// Outdoors on the apron.
    High,
}

impl FatigueLevel {
    /// Fatigue gained per second.
    pub const fn per_sec(self) -> f64 {
        match self {
            Self::Low => 0.002,
            Self::Medium => 0.005,
            Self::High => 0.01,
        }
    }
}

/// Personal protective equipment a location may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ppe {
    /// Hearing protection.
    EarDefenders,
    /// High-visibility vest.
    HiVisVest,
    /// Half-face respirator.
    Respirator,
}

impl Ppe {
    /// Whether the inventory holds this item.
    pub const fn owned(self, inventory: &Inventory) -> bool {
        match self {
            Self::EarDefenders => inventory.has_ear_defenders,
            Self::HiVisVest => inventory.has_hi_vis_vest,
            Self::Respirator => inventory.has_respirator,
        }
    }

    /// Label used in advisory notifications.
    pub const fn label(self) -> &'static str {
        match self {
            Self::EarDefenders => "ear defenders",
            Self::HiVisVest => "hi-vis vest",
            Self::Respirator => "respirator",
        }
    }
}

/// Static environmental profile of one location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationProfile {
    /// Noise band.
    pub noise: NoiseLevel,
    /// Fatigue band.
    pub fatigue: FatigueLevel,
    /// Temperature the player eases toward, in °C.
    pub target_temp: f64,
    /// PPE the advisory check expects.
    pub required_ppe: &'static [Ppe],
}

/// Degrees per second felt temperature moves toward the target.
pub const TEMPERATURE_EASE_PER_SEC: f64 = 0.05;

/// Look up the profile for a location.
pub const fn profile(location: LocationId) -> LocationProfile {
    match location {
        LocationId::Hangar => LocationProfile {
            noise: NoiseLevel::High,
            fatigue: FatigueLevel::Medium,
            target_temp: 14.0,
            required_ppe: &[Ppe::EarDefenders],
        },
        LocationId::Apron => LocationProfile {
            noise: NoiseLevel::Extreme,
            fatigue: FatigueLevel::High,
            target_temp: 6.0,
            required_ppe: &[Ppe::EarDefenders, Ppe::HiVisVest],
        },
        LocationId::Office => LocationProfile {
            noise: NoiseLevel::Low,
            fatigue: FatigueLevel::Low,
            target_temp: 22.0,
            required_ppe: &[],
        },
        LocationId::BreakRoom => LocationProfile {
            noise: NoiseLevel::Moderate,
            fatigue: FatigueLevel::Low,
            target_temp: 21.0,
            required_ppe: &[],
        },
        LocationId::Toolroom => LocationProfile {
            noise: NoiseLevel::Moderate,
            fatigue: FatigueLevel::Low,
            target_temp: 18.0,
            required_ppe: &[],
        },
        LocationId::Backshop => LocationProfile {
            noise: NoiseLevel::Moderate,
            fatigue: FatigueLevel::Medium,
            target_temp: 17.0,
            required_ppe: &[Ppe::Respirator],
        },
        LocationId::Archive => LocationProfile {
            noise: NoiseLevel::Low,
            fatigue: FatigueLevel::Low,
            target_temp: 16.0,
            required_ppe: &[],
        },
    }
}

/// PPE the location requires that the inventory lacks.
pub fn missing_ppe(location: LocationId, inventory: &Inventory) -> Vec<Ppe> {
    profile(location)
        .required_ppe
        .iter()
        .copied()
        .filter(|ppe| !ppe.owned(inventory))
        .collect()
}

/// Move `current` toward `target` by at most `step`, snapping exactly onto
/// the target when the remaining gap is smaller than one step.
pub fn ease_toward(current: f64, target: f64, step: f64) -> f64 {
    let gap = target - current;
    if gap.abs() <= step {
        target
    } else {
        current + step.copysign(gap)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn easing_snaps_onto_target() {
        assert_eq!(ease_toward(18.0, 14.0, 0.5), 17.5);
        assert_eq!(ease_toward(14.25, 14.0, 0.5), 14.0);
        assert_eq!(ease_toward(5.0, 6.0, 0.5), 5.5);
    }

    #[test]
    fn apron_requires_two_items() {
        let inv = Inventory::default();
        let missing = missing_ppe(LocationId::Apron, &inv);
        assert_eq!(missing, vec![Ppe::EarDefenders, Ppe::HiVisVest]);

        let inv = Inventory {
            has_ear_defenders: true,
            ..Inventory::default()
        };
        assert_eq!(missing_ppe(LocationId::Apron, &inv), vec![Ppe::HiVisVest]);
        assert!(missing_ppe(LocationId::Office, &inv).is_empty());
    }

    #[test]
    fn loud_bands_drain_focus() {
        assert!(NoiseLevel::Extreme.effects().focus_drain_per_sec > 0.0);
        assert!(NoiseLevel::Low.effects().suspicion_per_sec > 0.0);
        assert_eq!(NoiseLevel::Moderate.effects().exposure_db, 60.0);
    }
}
