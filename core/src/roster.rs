//! Provider roster — who can be assigned to a shift, and at what rate.
//!
//! RULE: the capacity projection only ever borrows the roster.
//! All mutation goes through the engine, which owns the roster.

use crate::{
    config::HouseProviderConfig,
    error::{DeskError, DeskResult},
    types::ProviderId,
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Names that are scrubbed from restored rosters.
const PLACEHOLDER_NAMES: [&str; 1] = ["test"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderOrigin {
    /// Preloaded from configuration, stable display order.
    House,
    /// Added during a session, newest first.
    AdHoc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id:                ProviderId,
    pub name:              String,
    pub patients_per_hour: f64,
    pub locked:            bool,
    pub origin:            ProviderOrigin,
}

impl Provider {
    fn blank_ad_hoc(id: ProviderId) -> Self {
        Self {
            id,
            name: String::new(),
            patients_per_hour: 0.0,
            locked: false,
            origin: ProviderOrigin::AdHoc,
        }
    }

    fn from_house(house: &HouseProviderConfig) -> Self {
        Self {
            id: house.id,
            name: house.name.trim().to_string(),
            patients_per_hour: house.patients_per_hour,
            locked: true,
            origin: ProviderOrigin::House,
        }
    }

    /// Name for lists; blank names render as a placeholder.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { "Unnamed Provider" } else { &self.name }
    }

    pub fn is_house(&self) -> bool {
        self.origin == ProviderOrigin::House
    }

    fn is_placeholder(&self) -> bool {
        let name = self.name.trim().to_lowercase();
        PLACEHOLDER_NAMES.contains(&name.as_str())
    }

    /// Bring a provider loaded from outside back within the edit rules:
    /// trimmed name, finite non-negative rate, and locked only if lockable.
    fn sanitize(&mut self) {
        self.name = self.name.trim().to_string();
        if !self.patients_per_hour.is_finite() || self.patients_per_hour < 0.0 {
            log::warn!(
                "provider {} restored with invalid rate {}, reset to 0",
                self.id,
                self.patients_per_hour
            );
            self.patients_per_hour = 0.0;
        }
        if self.locked && self.lock_blocker().is_some() {
            self.locked = false;
        }
    }

    /// Lock precondition: a non-empty name and a positive rate.
    fn lock_blocker(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("name is empty")
        } else if !(self.patients_per_hour > 0.0) {
            Some("patients per hour must be greater than zero")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    providers:  Vec<Provider>,
    /// Lower-cased house names in configured order.
    house_order: Vec<String>,
    last_issued: ProviderId,
}

impl Roster {
    /// A roster holding only the configured house providers, all locked.
    pub fn new(house: &[HouseProviderConfig]) -> Self {
        let providers = house.iter().map(Provider::from_house).collect::<Vec<_>>();
        let last_issued = providers.iter().map(|p| p.id).max().unwrap_or(0);
        Self {
            providers,
            house_order: house.iter().map(|h| h.name.trim().to_lowercase()).collect(),
            last_issued,
        }
    }

    /// Rebuild a roster from saved providers layered over the house list.
    ///
    /// A saved provider whose id matches a house id replaces that house entry
    /// but stays `House`. Any other saved provider is kept as ad-hoc.
    /// Placeholder names are dropped wherever they appear.
    pub fn restore(house: &[HouseProviderConfig], saved: Vec<Provider>) -> Self {
        let mut roster = Self::new(house);

        for mut provider in saved {
            if provider.is_placeholder() {
                log::warn!("dropping placeholder provider {} on restore", provider.id);
                continue;
            }
            provider.sanitize();
            match roster.position(provider.id).filter(|&i| roster.providers[i].is_house()) {
                Some(index) => {
                    provider.origin = ProviderOrigin::House;
                    roster.providers[index] = provider;
                }
                None if roster.contains(provider.id) => {
                    log::warn!("dropping duplicate provider {} on restore", provider.id);
                }
                None => {
                    provider.origin = ProviderOrigin::AdHoc;
                    roster.last_issued = roster.last_issued.max(provider.id);
                    roster.providers.push(provider);
                }
            }
        }

        roster.providers.retain(|p| !p.is_placeholder());
        roster
    }

    pub fn len(&self) -> usize { self.providers.len() }
    pub fn is_empty(&self) -> bool { self.providers.is_empty() }

    /// Providers in storage order (newest ad-hoc first, then the rest).
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn get(&self, id: ProviderId) -> Option<&Provider> {
        self.providers.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProviderId) -> bool {
        self.get(id).is_some()
    }

    fn position(&self, id: ProviderId) -> Option<usize> {
        self.providers.iter().position(|p| p.id == id)
    }

    fn get_mut(&mut self, id: ProviderId) -> DeskResult<&mut Provider> {
        self.providers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DeskError::ProviderNotFound { id })
    }

    fn editable(&mut self, id: ProviderId) -> DeskResult<&mut Provider> {
        let provider = self.get_mut(id)?;
        if provider.locked {
            return Err(DeskError::ProviderLocked { id });
        }
        Ok(provider)
    }

    /// Add a blank, unlocked ad-hoc provider and return its id.
    ///
    /// `stamp_ms` is a wall-clock millisecond stamp; ids are forced strictly
    /// increasing so two additions in the same millisecond never collide.
    pub fn add_ad_hoc(&mut self, stamp_ms: i64) -> DeskResult<ProviderId> {
        let highest = self.providers.iter().map(|p| p.id).max().unwrap_or(0).max(self.last_issued);
        let next = highest
            .checked_add(1)
            .ok_or(DeskError::ProviderIdsExhausted { highest })?;
        let id = stamp_ms.max(next);
        self.last_issued = id;
        self.providers.insert(0, Provider::blank_ad_hoc(id));
        log::info!("roster: added ad-hoc provider {id}");
        Ok(id)
    }

    pub fn rename(&mut self, id: ProviderId, name: &str) -> DeskResult<()> {
        let provider = self.editable(id)?;
        provider.name = name.trim().to_string();
        Ok(())
    }

    pub fn set_rate(&mut self, id: ProviderId, patients_per_hour: f64) -> DeskResult<()> {
        if !patients_per_hour.is_finite() || patients_per_hour < 0.0 {
            return Err(DeskError::InvalidRate { id, rate: patients_per_hour });
        }
        let provider = self.editable(id)?;
        provider.patients_per_hour = patients_per_hour;
        Ok(())
    }

    pub fn lock(&mut self, id: ProviderId) -> DeskResult<()> {
        let provider = self.get_mut(id)?;
        if let Some(reason) = provider.lock_blocker() {
            return Err(DeskError::InvalidLock { id, reason: reason.to_string() });
        }
        provider.locked = true;
        log::info!("roster: locked provider {id} ({})", provider.name);
        Ok(())
    }

    pub fn unlock(&mut self, id: ProviderId) -> DeskResult<()> {
        self.get_mut(id)?.locked = false;
        log::info!("roster: unlocked provider {id}");
        Ok(())
    }

    /// Remove a provider from the roster. Callers must also purge it from
    /// every shift assignment.
    pub fn remove(&mut self, id: ProviderId) -> DeskResult<Provider> {
        let index = self.position(id).ok_or(DeskError::ProviderNotFound { id })?;
        let removed = self.providers.remove(index);
        log::info!("roster: removed provider {id} ({})", removed.display_name());
        Ok(removed)
    }

    /// Display order: house providers in configured order, then ad-hoc
    /// providers newest first.
    pub fn display_order(&self) -> Vec<&Provider> {
        let mut sorted: Vec<&Provider> = self.providers.iter().collect();
        sorted.sort_by(|a, b| self.compare_for_display(a, b));
        sorted
    }

    fn house_rank(&self, provider: &Provider) -> usize {
        let name = provider.name.to_lowercase();
        self.house_order
            .iter()
            .position(|n| *n == name)
            .unwrap_or(usize::MAX)
    }

    fn compare_for_display(&self, a: &Provider, b: &Provider) -> Ordering {
        match (a.is_house(), b.is_house()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (true, true) => self.house_rank(a).cmp(&self.house_rank(b)),
            (false, false) => b.id.cmp(&a.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> Vec<HouseProviderConfig> {
        vec![
            HouseProviderConfig { id: 1, name: "Ryan".into(), patients_per_hour: 2.0 },
            HouseProviderConfig { id: 2, name: "Kristy".into(), patients_per_hour: 1.8 },
        ]
    }

    #[test]
    fn house_providers_start_locked() {
        let roster = Roster::new(&house());
        assert_eq!(roster.len(), 2);
        assert!(roster.providers().iter().all(|p| p.locked && p.is_house()));
    }

    #[test]
    fn ad_hoc_ids_strictly_increase_within_one_millisecond() {
        let mut roster = Roster::new(&house());
        let a = roster.add_ad_hoc(1_700_000_000_000).unwrap();
        let b = roster.add_ad_hoc(1_700_000_000_000).unwrap();
        assert!(b > a);
        // a stale clock never reissues an id
        let c = roster.add_ad_hoc(5).unwrap();
        assert!(c > b);
    }

    #[test]
    fn id_space_exhaustion_is_an_error() {
        let house = [HouseProviderConfig { id: i64::MAX, name: "Edge".into(), patients_per_hour: 2.0 }];
        let mut roster = Roster::new(&house);
        let err = roster.add_ad_hoc(10).unwrap_err();
        assert!(matches!(err, DeskError::ProviderIdsExhausted { highest: i64::MAX }));
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn blank_name_reads_as_unnamed() {
        let mut roster = Roster::new(&[]);
        let id = roster.add_ad_hoc(10).unwrap();
        assert_eq!(roster.get(id).unwrap().display_name(), "Unnamed Provider");
    }
}
