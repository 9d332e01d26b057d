use super::{round2, sum_by};
use crate::endpoints::staff::{StaffRecord, StaffType, TeacherEducation, TeacherEducationType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StaffTotal {
    pub staff_type_id: i64,
    pub name: String,
    pub total: f64,
}

pub fn totals_by_staff_type(records: &[StaffRecord], types: &[StaffType]) -> Vec<StaffTotal> {
    sum_by(records, |r| r.staff_type_id, |r| r.value)
        .into_iter()
        .map(|(staff_type_id, total)| StaffTotal {
            staff_type_id,
            name: types
                .iter()
                .find(|t| t.id == staff_type_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| format!("Staff type {}", staff_type_id)),
            total: round2(total),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationShare {
    pub name: String,
    pub value: f64,
    pub percentage: f64,
}

/// Teacher counts per education level with their share of the total
pub fn teacher_education_shares(
    records: &[TeacherEducation],
    types: &[TeacherEducationType],
) -> Vec<EducationShare> {
    let sums = sum_by(records, |r| r.education_type_id, |r| r.value);
    let total: f64 = sums.iter().map(|(_, value)| value).sum();

    sums.into_iter()
        .map(|(id, value)| EducationShare {
            name: types
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| format!("Education type {}", id)),
            value,
            percentage: if total > 0.0 { round2(value / total * 100.0) } else { 0.0 },
        })
        .collect()
}
