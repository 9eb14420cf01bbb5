//! Target selection helpers shared by the archetypes.
//!
//! Every helper ignores dead units and breaks ties by slice order.

use crate::state::Unit;

pub fn first_living<'a>(units: &[&'a Unit]) -> Option<&'a Unit> {
    units.iter().copied().find(|unit| unit.is_alive())
}

/// Living unit with the lowest current hp.
pub fn weakest<'a>(units: &[&'a Unit]) -> Option<&'a Unit> {
    units
        .iter()
        .copied()
        .filter(|unit| unit.is_alive())
        .fold(None, |best: Option<&'a Unit>, unit| match best {
            Some(current) if current.hp <= unit.hp => Some(current),
            _ => Some(unit),
        })
}

/// Living unit with the lowest hp fraction among those matching `filter`.
pub fn most_wounded<'a>(units: &[&'a Unit], filter: impl Fn(&Unit) -> bool) -> Option<&'a Unit> {
    units
        .iter()
        .copied()
        .filter(|unit| unit.is_alive() && filter(unit))
        .fold(None, |best: Option<&'a Unit>, unit| match best {
            Some(current) if !lower_fraction(unit, current) => Some(current),
            _ => Some(unit),
        })
}

/// `a.hp / a.max_hp < b.hp / b.max_hp`, without division.
fn lower_fraction(a: &Unit, b: &Unit) -> bool {
    u64::from(a.hp) * u64::from(b.max_hp) < u64::from(b.hp) * u64::from(a.max_hp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{UnitId, UnitStats};

    fn hero(id: u32, hp: u32, max_hp: u32) -> Unit {
        Unit::hero(UnitId(id), "h", UnitStats::new(max_hp, 1, 0), Vec::new()).with_hp(hp)
    }

    #[test]
    fn weakest_prefers_first_on_ties() {
        let (a, b, c) = (hero(1, 12, 40), hero(2, 9, 40), hero(3, 9, 20));
        assert_eq!(weakest(&[&a, &b, &c]).map(|u| u.id), Some(UnitId(2)));
    }

    #[test]
    fn weakest_skips_dead() {
        let (a, b) = (hero(1, 0, 40), hero(2, 30, 40));
        assert_eq!(weakest(&[&a, &b]).map(|u| u.id), Some(UnitId(2)));
    }

    #[test]
    fn most_wounded_compares_fractions() {
        // 10/20 = 50% vs 15/40 = 37.5%
        let (a, b) = (hero(1, 10, 20), hero(2, 15, 40));
        assert_eq!(most_wounded(&[&a, &b], |_| true).map(|u| u.id), Some(UnitId(2)));
    }
}
