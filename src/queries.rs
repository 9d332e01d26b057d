//! Typed query parameters
//!
//! Every fetch is described by one of these structs. The struct itself is
//! canonicalized into the store key; [`ToParams`] turns it into the request
//! query string. `force_refresh` is never part of a query.

use serde::{Deserialize, Serialize};
use type_mapping::ParamMap;

/// Conversion into request parameters. Absent fields are left out.
pub trait ToParams {
    fn to_params(&self) -> ParamMap;
}

impl ToParams for () {
    fn to_params(&self) -> ParamMap {
        ParamMap::new()
    }
}

/// State-wide data for one year (or all years when `year` is absent)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

impl YearQuery {
    pub fn new(year: i32) -> Self {
        Self { year: Some(year) }
    }

    pub fn all_years() -> Self {
        Self { year: None }
    }
}

impl ToParams for YearQuery {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new();
        params.insert_opt("year", self.year);
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DistrictYearQuery {
    pub district_id: i64,
    pub year: Option<i32>,
}

impl DistrictYearQuery {
    pub fn new(district_id: i64, year: i32) -> Self {
        Self {
            district_id,
            year: Some(year),
        }
    }

    pub fn all_years(district_id: i64) -> Self {
        Self {
            district_id,
            year: None,
        }
    }
}

impl ToParams for DistrictYearQuery {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new();
        params
            .insert("district_id", self.district_id)
            .insert_opt("year", self.year);
        params
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchoolYearQuery {
    pub school_id: i64,
    pub year: Option<i32>,
}

impl SchoolYearQuery {
    pub fn new(school_id: i64, year: i32) -> Self {
        Self {
            school_id,
            year: Some(year),
        }
    }
}

impl ToParams for SchoolYearQuery {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new();
        params
            .insert("school_id", self.school_id)
            .insert_opt("year", self.year);
        params
    }
}

/// Location listing filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationQuery {
    pub year: Option<i32>,
    pub district_id: Option<i64>,
    pub is_public: Option<bool>,
}

impl ToParams for LocationQuery {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new();
        params
            .insert_opt("year", self.year)
            .insert_opt("district_id", self.district_id)
            .insert_opt("is_public", self.is_public);
        params
    }
}

/// Assessment filters; the entity is picked by the endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentQuery {
    pub district_id: Option<i64>,
    pub school_id: Option<i64>,
    pub year: Option<i32>,
    pub subject: Option<String>,
    pub grade: Option<String>,
    pub subgroup: Option<String>,
}

impl AssessmentQuery {
    pub fn district(district_id: i64, year: i32) -> Self {
        Self {
            district_id: Some(district_id),
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn school(school_id: i64, year: i32) -> Self {
        Self {
            school_id: Some(school_id),
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn state(year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::default()
        }
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    /// Same filters without the entity ids, for the state-level counterpart
    pub fn state_counterpart(&self) -> Self {
        Self {
            district_id: None,
            school_id: None,
            ..self.clone()
        }
    }
}

impl ToParams for AssessmentQuery {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new();
        params
            .insert_opt("district_id", self.district_id)
            .insert_opt("school_id", self.school_id)
            .insert_opt("year", self.year)
            .insert_opt("subject", self.subject.clone())
            .insert_opt("grade", self.grade.clone())
            .insert_opt("subgroup", self.subgroup.clone());
        params
    }
}

/// Graduation outcome filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomeQuery {
    pub district_id: Option<i64>,
    pub school_id: Option<i64>,
    pub year: Option<i32>,
    pub grade: Option<String>,
}

impl ToParams for OutcomeQuery {
    fn to_params(&self) -> ParamMap {
        let mut params = ParamMap::new();
        params
            .insert_opt("district_id", self.district_id)
            .insert_opt("school_id", self.school_id)
            .insert_opt("year", self.year)
            .insert_opt("grade", self.grade.clone());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slice_store::QueryKey;

    #[test]
    fn test_query_key_matches_request_params() {
        let query = AssessmentQuery::district(5, 2023).with_subject("Math");
        assert_eq!(
            QueryKey::from_params(&query).unwrap(),
            QueryKey::from_param_map(&query.to_params())
        );
        assert_eq!(
            QueryKey::from_params(&query).unwrap().as_str(),
            "district_id=5&subject=Math&year=2023"
        );
    }

    #[test]
    fn test_district_year_key() {
        let key = QueryKey::from_params(&DistrictYearQuery::new(5, 2023)).unwrap();
        assert_eq!(key.as_str(), "district_id=5&year=2023");
    }

    #[test]
    fn test_state_counterpart_drops_entity() {
        let query = AssessmentQuery::district(5, 2023).with_grade("3");
        let state = query.state_counterpart();
        assert_eq!(state.district_id, None);
        assert_eq!(state.grade.as_deref(), Some("3"));
    }
}
