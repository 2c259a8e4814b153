//! Constrained palette randomization.
//!
//! Each role samples hue, saturation and lightness from its own window so
//! that a random palette still reads as brand / status / neutral colors.
//! Neutral roles pick their window from the current mode.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{hsl_to_hex, ColorRole};
use crate::tokens::Palette;

/// Per-role lock flags. Absent roles are unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockSet(BTreeMap<ColorRole, bool>);

impl LockSet {
    pub fn is_locked(&self, role: ColorRole) -> bool {
        self.0.get(&role).copied().unwrap_or(false)
    }

    /// Flip a role's lock and return the new state.
    pub fn toggle(&mut self, role: ColorRole) -> bool {
        let entry = self.0.entry(role).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn set(&mut self, role: ColorRole, locked: bool) {
        self.0.insert(role, locked);
    }

    /// Roles currently locked, in role order.
    pub fn locked(&self) -> impl Iterator<Item = ColorRole> + '_ {
        self.0.iter().filter(|(_, locked)| **locked).map(|(role, _)| *role)
    }
}

/// HSL sampling window for one role.
#[derive(Debug, Clone, PartialEq)]
pub struct HslWindow {
    pub hue: RangeInclusive<f64>,
    pub saturation: RangeInclusive<f64>,
    pub lightness: RangeInclusive<f64>,
}

fn window(hue: (f64, f64), sat: (f64, f64), light: (f64, f64)) -> HslWindow {
    HslWindow {
        hue: hue.0..=hue.1,
        saturation: sat.0..=sat.1,
        lightness: light.0..=light.1,
    }
}

const ANY_HUE: (f64, f64) = (0.0, 360.0);

/// Sampling window for `role` in the given mode.
pub fn window_for(role: ColorRole, dark: bool) -> HslWindow {
    match (role, dark) {
        (ColorRole::Primary | ColorRole::Secondary | ColorRole::Accent, _) => {
            window(ANY_HUE, (60.0, 90.0), (45.0, 60.0))
        }
        (ColorRole::Success, _) => window((100.0, 150.0), (60.0, 85.0), (45.0, 60.0)),
        (ColorRole::Error, _) => window((0.0, 20.0), (60.0, 85.0), (45.0, 60.0)),
        (ColorRole::Warning, _) => window((35.0, 55.0), (60.0, 85.0), (45.0, 60.0)),
        (ColorRole::Background, false) => window(ANY_HUE, (0.0, 15.0), (95.0, 98.0)),
        (ColorRole::Background, true) => window(ANY_HUE, (10.0, 30.0), (8.0, 16.0)),
        (ColorRole::Surface, false) => window(ANY_HUE, (0.0, 10.0), (98.0, 100.0)),
        (ColorRole::Surface, true) => window(ANY_HUE, (10.0, 25.0), (14.0, 22.0)),
        (ColorRole::Text, false) => window(ANY_HUE, (0.0, 20.0), (8.0, 20.0)),
        (ColorRole::Text, true) => window(ANY_HUE, (0.0, 10.0), (88.0, 98.0)),
        (ColorRole::MutedText, false) => window(ANY_HUE, (0.0, 15.0), (40.0, 60.0)),
        (ColorRole::MutedText, true) => window(ANY_HUE, (0.0, 15.0), (55.0, 70.0)),
    }
}

/// Re-sample every unlocked role of `palette`. Returns the roles rewritten.
pub fn randomize<R: Rng + ?Sized>(
    palette: &mut Palette,
    locks: &LockSet,
    dark: bool,
    rng: &mut R,
) -> Vec<ColorRole> {
    let mut changed = Vec::new();
    for &role in ColorRole::ALL {
        if locks.is_locked(role) {
            continue;
        }
        let w = window_for(role, dark);
        // 360 is the same hue as 0; keep the sample half-open.
        let hue = if *w.hue.end() >= 360.0 {
            rng.gen_range(*w.hue.start()..360.0)
        } else {
            rng.gen_range(w.hue.clone())
        };
        let color = hsl_to_hex(hue, rng.gen_range(w.saturation), rng.gen_range(w.lightness));
        palette.set(role, color);
        changed.push(role);
    }
    tracing::debug!(roles = changed.len(), dark, "randomized palette");
    changed
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::tokens::DesignTokenSet;

    fn all_locked() -> LockSet {
        let mut locks = LockSet::default();
        for role in ColorRole::ALL {
            locks.set(*role, true);
        }
        locks
    }

    #[test]
    fn locked_roles_never_change() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut locks = LockSet::default();
        locks.set(ColorRole::Primary, true);
        locks.set(ColorRole::Text, true);
        let original = DesignTokenSet::default().colors;
        for _ in 0..200 {
            let mut palette = original.clone();
            randomize(&mut palette, &locks, false, &mut rng);
            assert_eq!(palette.primary, original.primary);
            assert_eq!(palette.text, original.text);
        }
    }

    #[test]
    fn unlocked_role_changes() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut locks = all_locked();
        locks.set(ColorRole::Accent, false);
        let original = DesignTokenSet::default().colors;
        let changed = (0..50).any(|_| {
            let mut palette = original.clone();
            randomize(&mut palette, &locks, false, &mut rng);
            palette.accent != original.accent
        });
        assert!(changed);
    }

    #[test]
    fn all_locked_is_identity() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut palette = DesignTokenSet::default().colors;
        let before = palette.clone();
        let changed = randomize(&mut palette, &all_locked(), true, &mut rng);
        assert!(changed.is_empty());
        assert_eq!(palette, before);
    }

    #[test]
    fn dark_backgrounds_stay_dark() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let mut palette = DesignTokenSet::default().colors;
            randomize(&mut palette, &LockSet::default(), true, &mut rng);
            let bg = palette.background;
            // l <= 16% and s <= 30% cap every channel near 53.
            assert!(bg.r.max(bg.g).max(bg.b) < 90, "{bg}");
            let text = palette.text;
            assert!(text.r.min(text.g).min(text.b) > 190, "{text}");
        }
    }

    #[test]
    fn lock_toggle_flips_and_defaults_unlocked() {
        let mut locks = LockSet::default();
        assert!(!locks.is_locked(ColorRole::Warning));
        assert!(locks.toggle(ColorRole::Warning));
        assert!(locks.is_locked(ColorRole::Warning));
        assert!(!locks.toggle(ColorRole::Warning));
        assert_eq!(locks.locked().count(), 0);
    }
}
