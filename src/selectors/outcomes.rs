use crate::endpoints::outcomes::GraduationOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// Graduation rate by year, ascending. Years without a reported rate are skipped.
pub fn graduation_series(rows: &[GraduationOutcome]) -> Vec<SeriesPoint> {
    let mut points: Vec<SeriesPoint> = rows
        .iter()
        .filter_map(|row| {
            row.graduation_rate.map(|value| SeriesPoint {
                year: row.year,
                value,
            })
        })
        .collect();
    points.sort_by_key(|point| point.year);
    points.dedup_by_key(|point| point.year);
    points
}
