//! Dependent area field
//!
//! The area list depends on the selected location. Each location change
//! bumps a generation counter and clears the area value *before* the new
//! list is requested; responses carrying an older generation are dropped.
//!
//! ```text
//! Idle ──change_location──► Loading ──complete(Ok)──► Ready(list)
//!   ▲                          │    └─complete(Err)─► Error (empty, disabled)
//!   └──── location cleared ────┘
//! ```

use crate::{ClientResult, PropertyApi};
use shared::{AreaItem, Locale};

/// Area list state for the current location
#[derive(Debug, Clone, PartialEq)]
pub enum AreaState {
    Idle,
    Loading,
    Ready(Vec<AreaItem>),
    Error(String),
}

/// An area fetch issued for one location change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaRequest {
    pub location: String,
    generation: u64,
}

impl AreaRequest {
    /// Fetch the area list this request stands for
    pub async fn fetch(&self, api: &dyn PropertyApi, locale: Locale) -> ClientResult<Vec<AreaItem>> {
        api.fetch_areas(&self.location, locale).await
    }
}

#[derive(Debug, Clone)]
pub struct AreaResolver {
    location: String,
    generation: u64,
    state: AreaState,
}

impl Default for AreaResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AreaResolver {
    pub fn new() -> Self {
        Self {
            location: String::new(),
            generation: 0,
            state: AreaState::Idle,
        }
    }

    /// Populate from an existing record or the initial mount.
    ///
    /// Not a location change: the stored area value is left alone.
    pub fn initialize(&mut self, location: &str) -> Option<AreaRequest> {
        self.start(location)
    }

    /// The user picked a different location.
    ///
    /// Clears `area` before anything is requested. Re-selecting the current
    /// location is a no-op while its list is loading or loaded; after a
    /// failed fetch it retries.
    pub fn change_location(&mut self, location: &str, area: &mut String) -> Option<AreaRequest> {
        if location == self.location
            && matches!(self.state, AreaState::Loading | AreaState::Ready(_))
        {
            return None;
        }
        if location != self.location {
            tracing::debug!(from = %self.location, to = %location, "Location changed, clearing area");
            area.clear();
        }
        self.start(location)
    }

    fn start(&mut self, location: &str) -> Option<AreaRequest> {
        self.generation += 1;
        self.location = location.to_string();
        if location.is_empty() {
            self.state = AreaState::Idle;
            return None;
        }
        self.state = AreaState::Loading;
        Some(AreaRequest {
            location: self.location.clone(),
            generation: self.generation,
        })
    }

    /// Apply a finished fetch. Returns `false` when the response was stale.
    ///
    /// A failed fetch degrades to an empty, disabled list.
    pub fn complete(&mut self, request: &AreaRequest, result: ClientResult<Vec<AreaItem>>) -> bool {
        if request.generation != self.generation {
            tracing::debug!(location = %request.location, "Discarding stale area response");
            return false;
        }
        self.state = match result {
            Ok(areas) => AreaState::Ready(areas),
            Err(err) => {
                tracing::warn!(location = %request.location, error = %err, "Area fetch failed");
                AreaState::Error(err.to_string())
            }
        };
        true
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn state(&self) -> &AreaState {
        &self.state
    }

    /// Selectable areas (empty unless loaded)
    pub fn areas(&self) -> &[AreaItem] {
        match &self.state {
            AreaState::Ready(areas) => areas,
            _ => &[],
        }
    }

    /// Whether the area field accepts input
    pub fn is_disabled(&self) -> bool {
        !matches!(self.state, AreaState::Ready(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;

    fn area(id: i64, key: &str) -> AreaItem {
        AreaItem::new(id, key, Some(key))
    }

    #[test]
    fn test_initialize_keeps_area() {
        let mut resolver = AreaResolver::new();
        let req = resolver.initialize("kadikoy").unwrap();
        assert_eq!(req.location, "kadikoy");
        assert_eq!(resolver.state(), &AreaState::Loading);
        assert!(resolver.is_disabled());
    }

    #[test]
    fn test_change_clears_area_before_fetch() {
        let mut resolver = AreaResolver::new();
        let mut area_value = "center".to_string();
        let first = resolver.initialize("kadikoy").unwrap();
        resolver.complete(&first, Ok(vec![area(1, "center")]));

        let req = resolver.change_location("besiktas", &mut area_value).unwrap();
        assert_eq!(area_value, "");
        assert_eq!(req.location, "besiktas");
        assert!(resolver.areas().is_empty());
    }

    #[test]
    fn test_same_location_is_noop() {
        let mut resolver = AreaResolver::new();
        let mut area_value = "center".to_string();
        resolver.initialize("kadikoy");
        assert!(resolver.change_location("kadikoy", &mut area_value).is_none());
        assert_eq!(area_value, "center");
    }

    #[test]
    fn test_empty_location_forces_empty_disabled() {
        let mut resolver = AreaResolver::new();
        let mut area_value = "center".to_string();
        resolver.initialize("kadikoy");
        assert!(resolver.change_location("", &mut area_value).is_none());
        assert_eq!(area_value, "");
        assert_eq!(resolver.state(), &AreaState::Idle);
        assert!(resolver.is_disabled());
        assert!(resolver.areas().is_empty());
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut resolver = AreaResolver::new();
        let mut area_value = String::new();
        let old = resolver.change_location("kadikoy", &mut area_value).unwrap();
        let new = resolver.change_location("besiktas", &mut area_value).unwrap();

        assert!(!resolver.complete(&old, Ok(vec![area(1, "moda")])));
        assert_eq!(resolver.state(), &AreaState::Loading);

        assert!(resolver.complete(&new, Ok(vec![area(2, "levent")])));
        assert_eq!(resolver.areas()[0].value_key(), "levent");
        assert!(!resolver.is_disabled());
    }

    #[test]
    fn test_reselecting_after_failure_retries() {
        let mut resolver = AreaResolver::new();
        let mut area_value = "moda".to_string();
        let req = resolver.initialize("kadikoy").unwrap();
        resolver.complete(&req, Err(ClientError::Internal("boom".into())));

        let retry = resolver.change_location("kadikoy", &mut area_value).unwrap();
        assert_eq!(retry.location, "kadikoy");
        assert_eq!(area_value, "moda");
        assert_eq!(resolver.state(), &AreaState::Loading);

        assert!(!resolver.complete(&req, Ok(vec![area(1, "stale")])));
        assert!(resolver.complete(&retry, Ok(vec![area(2, "moda")])));
        assert!(!resolver.is_disabled());
    }

    #[test]
    fn test_failed_fetch_degrades() {
        let mut resolver = AreaResolver::new();
        let req = resolver.initialize("kadikoy").unwrap();
        assert!(resolver.complete(&req, Err(ClientError::Internal("boom".into()))));
        assert!(resolver.areas().is_empty());
        assert!(resolver.is_disabled());
        assert!(matches!(resolver.state(), AreaState::Error(_)));
    }
}
