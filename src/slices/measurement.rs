use super::Slice;
use crate::endpoints::measurement::{self, Measurement, MeasurementType};
use crate::queries::{DistrictYearQuery, SchoolYearQuery};
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{CatalogStore, KeyedStore, Store};
use std::sync::Arc;

pub struct MeasurementSlice {
    client: Arc<ApiClient>,
    measurement_types: CatalogStore<MeasurementType>,
    school: KeyedStore<Measurement>,
    district: KeyedStore<Measurement>,
}

impl MeasurementSlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            measurement_types: CatalogStore::new("measurement.measurement_types", signals.clone()),
            school: KeyedStore::new("measurement.school", signals.clone()),
            district: KeyedStore::new("measurement.district", signals),
        }
    }

    catalog_loader! {
        ensure_measurement_types_loaded, measurement_types, measurement_types_status
            => measurement_types: MeasurementType, measurement::get_measurement_types
    }

    keyed_fetch! {
        fetch_school_measurements, select_school_measurements, school_measurements_status
            => school: SchoolYearQuery => Measurement, measurement::get_school_measurements
    }

    keyed_fetch! {
        fetch_district_measurements, select_district_measurements, district_measurements_status
            => district: DistrictYearQuery => Measurement, measurement::get_district_measurements
    }
}

impl Slice for MeasurementSlice {
    fn name(&self) -> &'static str {
        "measurement"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![&self.measurement_types, &self.school, &self.district]
    }
}
