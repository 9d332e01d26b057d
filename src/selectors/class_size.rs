use super::round2;
use crate::endpoints::class_size::ClassSize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSizeComparison {
    pub grade: String,
    pub local: Option<f64>,
    pub state: Option<f64>,
}

/// Mean of the per-grade averages, `None` for no rows
pub fn overall_average(rows: &[ClassSize]) -> Option<f64> {
    if rows.is_empty() {
        return None;
    }
    let sum: f64 = rows.iter().map(|row| row.average_class_size).sum();
    Some(round2(sum / rows.len() as f64))
}

/// Grade-by-grade local and state averages, in local row order followed by
/// any grades only the state reports
pub fn compare_class_sizes(local: &[ClassSize], state: &[ClassSize]) -> Vec<ClassSizeComparison> {
    let find = |rows: &[ClassSize], grade: &str| {
        rows.iter()
            .find(|row| row.grade == grade)
            .map(|row| row.average_class_size)
    };

    let mut comparison: Vec<ClassSizeComparison> = local
        .iter()
        .map(|row| ClassSizeComparison {
            grade: row.grade.clone(),
            local: Some(row.average_class_size),
            state: find(state, &row.grade),
        })
        .collect();

    for row in state {
        if !comparison.iter().any(|c| c.grade == row.grade) {
            comparison.push(ClassSizeComparison {
                grade: row.grade.clone(),
                local: None,
                state: Some(row.average_class_size),
            });
        }
    }
    comparison
}
