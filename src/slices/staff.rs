//! Staffing slice

use super::{memo_key, Slice};
use crate::endpoints::staff::{
    self, StaffRecord, StaffType, TeacherEducation, TeacherEducationType,
};
use crate::queries::{DistrictYearQuery, SchoolYearQuery, YearQuery};
use crate::selectors::staff::{
    teacher_education_shares, totals_by_staff_type, EducationShare, StaffTotal,
};
use api_client::ApiClient;
use signal_system::SignalManager;
use slice_store::{CatalogStore, KeyedStore, Memo, Store};
use std::sync::Arc;

pub struct StaffSlice {
    client: Arc<ApiClient>,
    staff_types: CatalogStore<StaffType>,
    teacher_education_types: CatalogStore<TeacherEducationType>,
    district_staff: KeyedStore<StaffRecord>,
    school_staff: KeyedStore<StaffRecord>,
    state_staff: KeyedStore<StaffRecord>,
    district_teacher_education: KeyedStore<TeacherEducation>,
    state_teacher_education: KeyedStore<TeacherEducation>,
    district_totals: Memo<Vec<StaffTotal>>,
    district_education: Memo<Vec<EducationShare>>,
}

impl StaffSlice {
    pub fn new(client: Arc<ApiClient>, signals: Option<Arc<SignalManager>>) -> Self {
        Self {
            client,
            staff_types: CatalogStore::new("staff.staff_types", signals.clone()),
            teacher_education_types: CatalogStore::new("staff.teacher_education_types", signals.clone()),
            district_staff: KeyedStore::new("staff.district_staff", signals.clone()),
            school_staff: KeyedStore::new("staff.school_staff", signals.clone()),
            state_staff: KeyedStore::new("staff.state_staff", signals.clone()),
            district_teacher_education: KeyedStore::new("staff.district_teacher_education", signals.clone()),
            state_teacher_education: KeyedStore::new("staff.state_teacher_education", signals),
            district_totals: Memo::new(),
            district_education: Memo::new(),
        }
    }

    catalog_loader! {
        ensure_staff_types_loaded, staff_types, staff_types_status
            => staff_types: StaffType, staff::get_staff_types
    }

    catalog_loader! {
        ensure_teacher_education_types_loaded, teacher_education_types, teacher_education_types_status
            => teacher_education_types: TeacherEducationType, staff::get_teacher_education_types
    }

    keyed_fetch! {
        /// Staff FTE counts for one district
        fetch_district_staff_data, select_district_staff_data, district_staff_data_status
            => district_staff: DistrictYearQuery => StaffRecord, staff::get_district_staff
    }

    keyed_fetch! {
        fetch_school_staff_data, select_school_staff_data, school_staff_data_status
            => school_staff: SchoolYearQuery => StaffRecord, staff::get_school_staff
    }

    keyed_fetch! {
        fetch_state_staff_data, select_state_staff_data, state_staff_data_status
            => state_staff: YearQuery => StaffRecord, staff::get_state_staff
    }

    keyed_fetch! {
        fetch_district_teacher_education, select_district_teacher_education, district_teacher_education_status
            => district_teacher_education: DistrictYearQuery => TeacherEducation, staff::get_district_teacher_education
    }

    keyed_fetch! {
        fetch_state_teacher_education, select_state_teacher_education, state_teacher_education_status
            => state_teacher_education: YearQuery => TeacherEducation, staff::get_state_teacher_education
    }

    /// District staff summed per staff type, labelled from the type catalog
    pub fn select_district_staff_totals(&self, query: &DistrictYearQuery) -> Arc<Vec<StaffTotal>> {
        self.district_totals.get_or_compute(
            &memo_key(query),
            &[self.district_staff.revision(), self.staff_types.revision()],
            || totals_by_staff_type(&self.district_staff.select(query), &self.staff_types.items()),
        )
    }

    pub fn select_district_education_shares(&self, query: &DistrictYearQuery) -> Arc<Vec<EducationShare>> {
        self.district_education.get_or_compute(
            &memo_key(query),
            &[
                self.district_teacher_education.revision(),
                self.teacher_education_types.revision(),
            ],
            || {
                teacher_education_shares(
                    &self.district_teacher_education.select(query),
                    &self.teacher_education_types.items(),
                )
            },
        )
    }

    pub fn district_staff_error(&self, query: &DistrictYearQuery) -> Option<String> {
        self.district_staff.error(query)
    }
}

impl Slice for StaffSlice {
    fn name(&self) -> &'static str {
        "staff"
    }

    fn stores(&self) -> Vec<&dyn Store> {
        vec![
            &self.staff_types,
            &self.teacher_education_types,
            &self.district_staff,
            &self.school_staff,
            &self.state_staff,
            &self.district_teacher_education,
            &self.state_teacher_education,
        ]
    }
}
