//! Weighted variation selection
//!
//! A direct simulation of weighted-bucket sampling over the ordered record
//! sequence. The caller supplies the uniform draw, so selection itself is
//! deterministic and trivially testable; randomness lives at the API and CLI
//! boundaries.

use super::entity::{ChosenVariation, VariationRecord};

/// Pick a variation for a uniform `draw` in `[0, 1)`.
///
/// Scans records in their original order, skipping disabled ones. The first
/// eligible record whose weight covers the remaining draw wins; a record with
/// no variation id resolves to [`ChosenVariation::NOT_PARTICIPATING`].
/// Weights need not sum to 1; leftover probability mass falls through to
/// [`ChosenVariation::ORIGINAL`], mirroring the reference client.
pub fn select(records: &[VariationRecord], draw: f64) -> ChosenVariation {
    let mut remaining = draw;

    for record in records {
        if record.disabled {
            continue;
        }

        if remaining < record.weight {
            return match record.variation_id {
                Some(id) => ChosenVariation::variation(id),
                None => ChosenVariation::NOT_PARTICIPATING,
            };
        }

        remaining -= record.weight;
    }

    ChosenVariation::ORIGINAL
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(rows: &[(Option<i32>, f64)]) -> Vec<VariationRecord> {
        rows.iter()
            .map(|&(id, weight)| VariationRecord::new(id, weight))
            .collect()
    }

    #[test]
    fn draw_below_first_weight_selects_first_record() {
        let records = records(&[(Some(1), 0.5), (Some(2), 0.5)]);

        assert_eq!(select(&records, 0.0), ChosenVariation::variation(1));
        assert_eq!(select(&records, 0.49), ChosenVariation::variation(1));
    }

    #[test]
    fn draw_in_second_bucket_selects_second_record() {
        let records = records(&[(Some(1), 0.5), (Some(2), 0.5)]);

        assert_eq!(select(&records, 0.5), ChosenVariation::variation(2));
        assert_eq!(select(&records, 0.99), ChosenVariation::variation(2));
    }

    #[test]
    fn draw_beyond_total_weight_falls_through_to_original() {
        let records = records(&[(Some(1), 0.25), (Some(2), 0.25)]);

        assert_eq!(select(&records, 0.5), ChosenVariation::ORIGINAL);
        assert_eq!(select(&records, 0.9999), ChosenVariation::ORIGINAL);
    }

    #[test]
    fn empty_record_list_selects_original() {
        assert_eq!(select(&[], 0.0), ChosenVariation::ORIGINAL);
    }

    #[test]
    fn null_variation_id_means_not_participating() {
        let records = records(&[(None, 0.5), (Some(5), 0.5)]);

        assert_eq!(select(&records, 0.1), ChosenVariation::NOT_PARTICIPATING);
    }

    #[test]
    fn excluded_bucket_then_variation_bucket() {
        // Concrete scenario: [{id: null, weight: 0.5}, {id: 5, weight: 0.5}]
        // with draw 0.7 returns 5.
        let records = records(&[(None, 0.5), (Some(5), 0.5)]);

        assert_eq!(select(&records, 0.7), ChosenVariation::variation(5));
    }

    #[test]
    fn disabled_records_are_never_selected() {
        let records = vec![
            VariationRecord::new(1, 1.0).with_disabled(true),
            VariationRecord::new(2, 0.5),
        ];

        // The disabled record's weight is ignored outright; it neither wins
        // nor consumes probability mass.
        assert_eq!(select(&records, 0.0), ChosenVariation::variation(2));
        assert_eq!(select(&records, 0.49), ChosenVariation::variation(2));
        assert_eq!(select(&records, 0.5), ChosenVariation::ORIGINAL);
    }

    #[test]
    fn all_records_disabled_selects_original() {
        let records = vec![
            VariationRecord::new(1, 0.5).with_disabled(true),
            VariationRecord::new(2, 0.5).with_disabled(true),
        ];

        assert_eq!(select(&records, 0.1), ChosenVariation::ORIGINAL);
    }

    #[test]
    fn order_decides_ties_under_cumulative_scan() {
        let forward = records(&[(Some(1), 0.5), (Some(2), 0.5)]);
        let reversed = records(&[(Some(2), 0.5), (Some(1), 0.5)]);

        assert_eq!(select(&forward, 0.2), ChosenVariation::variation(1));
        assert_eq!(select(&reversed, 0.2), ChosenVariation::variation(2));
    }
}
