//! Finance totals and per-pupil expenditure ranking

use super::sum_by;
use crate::endpoints::finance::{EntryType, FinanceEntry, PerPupilExpenditure};
use crate::endpoints::location::District;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryTotal {
    pub entry_type_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub total: f64,
}

/// Report entries summed per entry type, ordered by category then name.
/// Entries whose type is missing from the catalog are labelled by id.
pub fn totals_by_entry_type(entries: &[FinanceEntry], types: &[EntryType]) -> Vec<EntryTotal> {
    let mut totals: Vec<EntryTotal> = sum_by(entries, |e| e.entry_type_id, |e| e.value)
        .into_iter()
        .map(|(entry_type_id, total)| {
            let entry_type = types.iter().find(|t| t.id == entry_type_id);
            EntryTotal {
                entry_type_id,
                name: entry_type
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| format!("Entry type {}", entry_type_id)),
                category: entry_type.and_then(|t| t.category.clone()),
                total,
            }
        })
        .collect();

    totals.sort_by(|a, b| a.category.cmp(&b.category).then_with(|| a.name.cmp(&b.name)));
    totals
}

/// Sum of all totals in one category
pub fn category_total(totals: &[EntryTotal], category: &str) -> f64 {
    totals
        .iter()
        .filter(|t| t.category.as_deref() == Some(category))
        .map(|t| t.total)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDistrict {
    pub rank: usize,
    pub district_id: i64,
    pub name: String,
    pub amount: f64,
}

/// Districts ordered by per-pupil expenditure, highest first.
/// Equal amounts share a rank and the next rank is skipped (1, 1, 3).
pub fn rank_per_pupil(rows: &[PerPupilExpenditure], districts: &[District]) -> Vec<RankedDistrict> {
    let mut ranked: Vec<RankedDistrict> = rows
        .iter()
        .filter_map(|row| {
            let district_id = row.district_id?;
            let name = districts
                .iter()
                .find(|d| d.id == district_id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| format!("District {}", district_id));
            Some(RankedDistrict {
                rank: 0,
                district_id,
                name,
                amount: row.amount,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.amount.total_cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));

    let mut previous: Option<f64> = None;
    let mut rank = 0;
    for (index, district) in ranked.iter_mut().enumerate() {
        if previous != Some(district.amount) {
            rank = index + 1;
            previous = Some(district.amount);
        }
        district.rank = rank;
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn entry_type(id: i64, name: &str, category: &str) -> EntryType {
        EntryType {
            id,
            name: name.to_string(),
            category: Some(category.to_string()),
            section: None,
            extra: Map::new(),
        }
    }

    fn entry(entry_type_id: i64, value: f64) -> FinanceEntry {
        FinanceEntry {
            entry_type_id,
            fund_type_id: None,
            value,
            year: Some(2023),
            district_id: Some(5),
            extra: Map::new(),
        }
    }

    fn spending(district_id: i64, amount: f64) -> PerPupilExpenditure {
        PerPupilExpenditure {
            district_id: Some(district_id),
            year: 2023,
            amount,
            extra: Map::new(),
        }
    }

    fn district(id: i64, name: &str) -> District {
        District {
            id,
            name: name.to_string(),
            sau: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_totals_by_entry_type() {
        let types = vec![
            entry_type(1, "Local Taxes", "Revenue"),
            entry_type(2, "Salaries", "Expenditure"),
        ];
        let entries = vec![entry(1, 100.0), entry(2, 40.0), entry(1, 50.0), entry(9, 5.0)];

        let totals = totals_by_entry_type(&entries, &types);
        assert_eq!(totals.len(), 3);
        // uncategorized first, then Expenditure, then Revenue
        assert_eq!(totals[0].name, "Entry type 9");
        assert_eq!(totals[1].name, "Salaries");
        assert_eq!(totals[2].total, 150.0);
        assert_eq!(category_total(&totals, "Revenue"), 150.0);
    }

    #[test]
    fn test_rank_per_pupil_shares_ties() {
        let districts = vec![district(1, "Concord"), district(2, "Bow"), district(3, "Keene")];
        let rows = vec![
            spending(1, 18000.0),
            spending(2, 21000.0),
            spending(3, 18000.0),
            PerPupilExpenditure {
                district_id: None,
                year: 2023,
                amount: 19000.0,
                extra: Map::new(),
            },
        ];

        let ranked = rank_per_pupil(&rows, &districts);
        let summary: Vec<(usize, &str)> = ranked.iter().map(|d| (d.rank, d.name.as_str())).collect();
        assert_eq!(summary, vec![(1, "Bow"), (2, "Concord"), (2, "Keene")]);
    }
}
