use super::Slice;
use crate::endpoints::safety::{
    self, DisciplineIncident, DisciplineIncidentType, SafetyRecord, SafetyType,
};
use crate::queries::{DistrictYearQuery, SchoolYearQuery, YearQuery};
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{CatalogStore, KeyedStore, Store};
use std::sync::Arc;

pub struct SafetySlice {
    client: Arc<ApiClient>,
    safety_types: CatalogStore<SafetyType>,
    discipline_incident_types: CatalogStore<DisciplineIncidentType>,
    school: KeyedStore<SafetyRecord>,
    district: KeyedStore<SafetyRecord>,
    state: KeyedStore<SafetyRecord>,
    discipline_incidents: KeyedStore<DisciplineIncident>,
}

impl SafetySlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            safety_types: CatalogStore::new("safety.safety_types", signals.clone()),
            discipline_incident_types: CatalogStore::new("safety.discipline_incident_types", signals.clone()),
            school: KeyedStore::new("safety.school", signals.clone()),
            district: KeyedStore::new("safety.district", signals.clone()),
            state: KeyedStore::new("safety.state", signals.clone()),
            discipline_incidents: KeyedStore::new("safety.discipline_incidents", signals),
        }
    }

    catalog_loader! {
        ensure_safety_types_loaded, safety_types, safety_types_status
            => safety_types: SafetyType, safety::get_safety_types
    }

    catalog_loader! {
        ensure_discipline_incident_types_loaded, discipline_incident_types, discipline_incident_types_status
            => discipline_incident_types: DisciplineIncidentType, safety::get_discipline_incident_types
    }

    keyed_fetch! {
        fetch_school_safety, select_school_safety, school_safety_status
            => school: SchoolYearQuery => SafetyRecord, safety::get_school_safety
    }

    keyed_fetch! {
        fetch_district_safety, select_district_safety, district_safety_status
            => district: DistrictYearQuery => SafetyRecord, safety::get_district_safety
    }

    keyed_fetch! {
        fetch_state_safety, select_state_safety, state_safety_status
            => state: YearQuery => SafetyRecord, safety::get_state_safety
    }

    keyed_fetch! {
        fetch_district_discipline_incidents, select_district_discipline_incidents, district_discipline_incidents_status
            => discipline_incidents: DistrictYearQuery => DisciplineIncident, safety::get_district_discipline_incidents
    }
}

impl Slice for SafetySlice {
    fn name(&self) -> &'static str {
        "safety"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![
            &self.safety_types,
            &self.discipline_incident_types,
            &self.school,
            &self.district,
            &self.state,
            &self.discipline_incidents,
        ]
    }
}
