//! Encoder/resolver agreement and normalization invariants over generated datasets.
//!
//! Every marker the encoder emits must resolve back to the record it was
//! drawn for, for any mix of categories, duplicate identifiers and revenue
//! values.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

use truckscout_core::{BusinessCategory, DisplayCategory};
use truckscout_data::{encode_layers, resolve, Dataset, MapClick};

const INDICATORS: &[&str] = &[
    "Logistic Company (fleet includes Mercedes trucks)",
    "Logistic Company (fleet likely does not include Mercedes trucks)",
    "Logistic Company (no brand information of fleet)",
    "",
    "unexpected label",
];

fn random_revenue(rng: &mut StdRng) -> Value {
    match rng.gen_range(0..6) {
        0 => Value::Null,
        1 => json!(0),
        2 => {
            let negative: f64 = -rng.gen_range(1.0..100.0);
            json!(negative)
        }
        3 => json!(rng.gen_range(1e6..1e12)),
        _ => json!(rng.gen_range(0.5..60.0)),
    }
}

fn random_dataset(seed: u64, rows: usize) -> Vec<Value> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..rows)
        .map(|i| {
            let category = match rng.gen_range(0..5) {
                0 => json!("dealer"),
                1 => Value::Null,
                _ => json!("client"),
            };
            json!({
                "category": category,
                // small id space forces duplicates
                "place_id": rng.gen_range(0..(rows as i64 / 2 + 1)),
                "lat": rng.gen_range(47.0..50.5),
                "long": rng.gen_range(9.0..13.8),
                "Latest Revenue Number": random_revenue(&mut rng),
                "competitor_indicator_text": INDICATORS[rng.gen_range(0..INDICATORS.len())],
                "name": format!("Company {}", i),
                "vicinity": format!("Street {}", i),
                "website": format!("https://c{}.example", i),
                "phone": Value::Null,
                "mail": format!("info@c{}.example", i),
                "short_description": "",
                "company_info_processed_summary": "",
                "financials_description": "",
                "financials": "{}",
                "financials_source": "",
                "fleet_content": "",
                "fleet_images": []
            })
        })
        .collect()
}

#[test]
fn every_marker_resolves_to_its_record() {
    for seed in 0..50 {
        let dataset = Dataset::from_rows(random_dataset(seed, 80)).unwrap();
        let layers = encode_layers(&dataset);
        assert_eq!(layers.len(), 4, "seed {}", seed);

        let mut seen = 0;
        for layer in &layers {
            for (position, point) in layer.points.iter().enumerate() {
                let selection =
                    resolve(&dataset, MapClick::new(layer.layer_index, position)).unwrap();
                assert_eq!(selection.place_id, point.place_id, "seed {}", seed);
                assert_eq!(selection.record.lat, point.lat);
                assert_eq!(selection.category, layer.category);
                seen += 1;
            }
            // one past the end is always a loud error
            assert!(resolve(&dataset, MapClick::new(layer.layer_index, layer.points.len()))
                .unwrap_err()
                .is_selection_defect());
        }
        assert_eq!(seen, dataset.len(), "every row is drawn exactly once");
    }
}

#[test]
fn place_ids_are_unique_after_normalization() {
    for seed in 100..130 {
        let dataset = Dataset::from_rows(random_dataset(seed, 60)).unwrap();
        let ids: HashSet<i64> = dataset.records().iter().map(|r| r.place_id).collect();
        assert_eq!(ids.len(), dataset.len(), "seed {}", seed);
    }
}

#[test]
fn capped_revenue_stays_in_range() {
    for seed in 200..230 {
        let dataset = Dataset::from_rows(random_dataset(seed, 60)).unwrap();
        for record in dataset.records() {
            match record.category {
                BusinessCategory::Dealership => assert_eq!(record.capped_revenue, 12.0),
                BusinessCategory::LogisticsCompany => {
                    assert!((5.0..=30.0).contains(&record.capped_revenue));
                    if record.revenue.unwrap_or(0.0) == 0.0 {
                        assert_eq!(record.formatted_revenue, "N/A");
                    } else {
                        assert!(record.formatted_revenue.ends_with(" Million €"));
                    }
                }
            }
        }
    }
}

#[test]
fn every_row_lands_in_exactly_one_layer() {
    let dataset = Dataset::from_rows(random_dataset(7, 120)).unwrap();
    let partition = dataset.partition();
    assert_eq!(partition.total(), dataset.len());
    for category in DisplayCategory::ORDERED {
        for row in partition.rows(category) {
            assert_eq!(dataset.get(*row).unwrap().display_category(), category);
        }
    }
}
