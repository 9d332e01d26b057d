use super::Slice;
use crate::endpoints::location::{self, District, School, Town};
use crate::queries::LocationQuery;
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{KeyedStore, Store};
use std::sync::Arc;

pub struct LocationSlice {
    client: Arc<ApiClient>,
    districts: KeyedStore<District>,
    schools: KeyedStore<School>,
    towns: KeyedStore<Town>,
}

impl LocationSlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            districts: KeyedStore::new("location.districts", signals.clone()),
            schools: KeyedStore::new("location.schools", signals.clone()),
            towns: KeyedStore::new("location.towns", signals),
        }
    }

    keyed_fetch! {
        fetch_districts, select_districts, districts_status
            => districts: LocationQuery => District, location::get_districts
    }

    keyed_fetch! {
        fetch_schools, select_schools, schools_status
            => schools: LocationQuery => School, location::get_schools
    }

    keyed_fetch! {
        fetch_towns, select_towns, towns_status
            => towns: LocationQuery => Town, location::get_towns
    }

    /// Look a district up in any cached listing
    pub fn find_district(&self, district_id: i64) -> Option<District> {
        self.districts
            .keys()
            .into_iter()
            .filter_map(|key| self.districts.get(&key))
            .find_map(|rows| rows.iter().find(|d| d.id == district_id).cloned())
    }

    pub fn revision(&self) -> u64 {
        self.districts.revision()
    }
}

impl Slice for LocationSlice {
    fn name(&self) -> &'static str {
        "location"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![&self.districts, &self.schools, &self.towns]
    }
}
