//! Local-versus-state proficiency comparison

use crate::endpoints::assessments::AssessmentResult;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProficiencyComparison {
    pub subject: String,
    pub grade: Option<String>,
    pub local: Option<f64>,
    pub state: Option<f64>,
    /// `local - state`, only when both are reported
    pub difference: Option<f64>,
}

/// Pair each local row with the state row of the same subject and grade.
/// Only the all-students rows (no subgroup) take part.
pub fn compare_proficiency(local: &[AssessmentResult], state: &[AssessmentResult]) -> Vec<ProficiencyComparison> {
    let mut comparisons: Vec<ProficiencyComparison> = local
        .iter()
        .filter(|row| is_all_students(row))
        .map(|row| {
            let state_value = state
                .iter()
                .filter(|s| is_all_students(s))
                .find(|s| s.subject == row.subject && s.grade == row.grade)
                .and_then(|s| s.above_proficient_percentage);
            let local_value = row.above_proficient_percentage;
            ProficiencyComparison {
                subject: row.subject.clone(),
                grade: row.grade.clone(),
                local: local_value,
                state: state_value,
                difference: local_value
                    .zip(state_value)
                    .map(|(l, s)| super::round2(l - s)),
            }
        })
        .collect();

    comparisons.sort_by(|a, b| a.subject.cmp(&b.subject).then_with(|| a.grade.cmp(&b.grade)));
    comparisons
}

fn is_all_students(row: &AssessmentResult) -> bool {
    match row.subgroup.as_deref() {
        None => true,
        Some(subgroup) => subgroup.eq_ignore_ascii_case("all students"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(subject: &str, grade: &str, pct: Option<f64>, subgroup: Option<&str>) -> AssessmentResult {
        serde_json::from_value(json!({
            "year": 2023,
            "subject": subject,
            "grade": grade,
            "subgroup": subgroup,
            "above_proficient_percentage": pct,
        }))
        .unwrap()
    }

    #[test]
    fn test_compare_with_state() {
        let local = vec![
            row("Math", "3", Some(55.5), None),
            row("ELA", "3", None, None),
            row("Math", "3", Some(10.0), Some("Economically Disadvantaged")),
        ];
        let state = vec![row("Math", "3", Some(50.0), Some("All Students")), row("ELA", "3", Some(52.0), None)];

        let comparison = compare_proficiency(&local, &state);
        assert_eq!(comparison.len(), 2);
        assert_eq!(comparison[0].subject, "ELA");
        assert_eq!(comparison[0].difference, None);
        assert_eq!(comparison[1].difference, Some(5.5));
    }
}
