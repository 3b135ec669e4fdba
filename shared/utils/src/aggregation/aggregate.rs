//! Grouping and totalling of normalized order items.

use std::collections::HashMap;

use leadform_models::{AggregatedProduct, NormalizedItem, RegionTally};

use super::canonical::{core_product_name, with_vendor_suffix};

/// Group normalized items by (vendor type, canonical product) and sub-group
/// by region, summing quantities and amounts.
///
/// Structured rows are re-canonicalized here; legacy rows pass through
/// unchanged since the summary parser already emits core names. Output order
/// is first-seen insertion order for both product groups and their regions —
/// the admin dashboard renders the report as-is, so no sorting happens here.
///
/// Pure function of its input; unit price plays no part in the grouping key,
/// so one product/region pair sold at two unit prices merges into one tally.
pub fn aggregate_items(items: &[NormalizedItem]) -> Vec<AggregatedProduct> {
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<ProductGroup> = Vec::new();

    for item in items {
        let suffixed = with_vendor_suffix(&item.db_type);
        let core_name = core_product_name(&item.product_name, &item.region, &item.db_type);
        let key = format!("{suffixed}__{core_name}");

        let group_pos = match group_index.get(&key) {
            Some(pos) => *pos,
            None => {
                let label = if core_name.is_empty() {
                    suffixed
                } else {
                    format!("{suffixed} - {core_name}")
                };
                groups.push(ProductGroup {
                    label,
                    region_index: HashMap::new(),
                    regions: Vec::new(),
                });
                group_index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };

        groups[group_pos].add(&item.region, item.quantity, item.total_price);
    }

    groups.into_iter().map(ProductGroup::finish).collect()
}

struct ProductGroup {
    label: String,
    region_index: HashMap<String, usize>,
    regions: Vec<RegionTally>,
}

impl ProductGroup {
    fn add(&mut self, region: &str, quantity: i64, amount: i64) {
        let pos = match self.region_index.get(region) {
            Some(pos) => *pos,
            None => {
                self.regions.push(RegionTally {
                    region_name: region.to_string(),
                    quantity: 0,
                    amount: 0,
                });
                self.region_index
                    .insert(region.to_string(), self.regions.len() - 1);
                self.regions.len() - 1
            }
        };

        self.regions[pos].quantity += quantity;
        self.regions[pos].amount += amount;
    }

    fn finish(self) -> AggregatedProduct {
        let total_quantity = self.regions.iter().map(|r| r.quantity).sum();
        let total_amount = self.regions.iter().map(|r| r.amount).sum();
        AggregatedProduct {
            product_name: self.label,
            regions: self.regions,
            total_quantity,
            total_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(db_type: &str, product: &str, region: &str, qty: i64, price: i64) -> NormalizedItem {
        NormalizedItem {
            db_type: db_type.to_string(),
            product_name: product.to_string(),
            region: region.to_string(),
            quantity: qty,
            total_price: price,
        }
    }

    #[test]
    fn same_product_different_regions_share_one_group() {
        let items = vec![
            item("A", "보장분석", "서울/인천/경기", 3, 240_000),
            item("A", "보장분석", "제주", 2, 100_000),
        ];
        let aggregated = aggregate_items(&items);

        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].product_name, "A업체 - 보장분석");
        assert_eq!(aggregated[0].regions.len(), 2);
        assert_eq!(aggregated[0].total_quantity, 5);
        assert_eq!(aggregated[0].total_amount, 340_000);
    }

    #[test]
    fn different_products_never_merge_even_with_matching_regions() {
        let items = vec![
            item("A", "보장분석", "제주", 1, 80_000),
            item("A", "실버", "제주", 1, 50_000),
        ];
        let aggregated = aggregate_items(&items);
        assert_eq!(aggregated.len(), 2);
    }

    #[test]
    fn suffixed_and_unsuffixed_vendor_forms_merge() {
        let items = vec![
            item("A", "보장분석", "제주", 1, 80_000),
            item("A업체", "보장분석", "제주", 2, 160_000),
        ];
        let aggregated = aggregate_items(&items);

        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].regions.len(), 1);
        assert_eq!(aggregated[0].regions[0].quantity, 3);
    }

    #[test]
    fn raw_structured_names_are_canonicalized_before_grouping() {
        let items = vec![
            item("A", "A업체 - 보장분석 (서울/인천/경기)", "서울/인천/경기", 3, 240_000),
            item("A", "보장분석", "서울/인천/경기", 1, 80_000),
        ];
        let aggregated = aggregate_items(&items);

        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].product_name, "A업체 - 보장분석");
        assert_eq!(aggregated[0].regions[0].quantity, 4);
        assert_eq!(aggregated[0].regions[0].amount, 320_000);
    }

    #[test]
    fn empty_core_name_falls_back_to_vendor_label() {
        let items = vec![item("A", "A업체", "제주", 1, 10_000)];
        let aggregated = aggregate_items(&items);
        assert_eq!(aggregated[0].product_name, "A업체");
    }

    #[test]
    fn output_preserves_first_seen_order() {
        let items = vec![
            item("B", "실버", "제주", 1, 1),
            item("A", "보장분석", "서울/인천/경기", 1, 1),
            item("B", "실버", "부산/경남", 1, 1),
        ];
        let aggregated = aggregate_items(&items);

        assert_eq!(aggregated[0].product_name, "B업체 - 실버");
        assert_eq!(aggregated[1].product_name, "A업체 - 보장분석");
        assert_eq!(aggregated[0].regions[0].region_name, "제주");
        assert_eq!(aggregated[0].regions[1].region_name, "부산/경남");
    }

    #[test]
    fn totals_match_input_sums() {
        let items = vec![
            item("A", "보장분석", "서울/인천/경기", 3, 240_000),
            item("B", "실버", "제주", 2, 100_000),
            item("A", "보장분석", "제주", 1, 80_000),
            item("C", "테마", "부산/경남", 5, 500_000),
        ];
        let aggregated = aggregate_items(&items);

        let input_quantity: i64 = items.iter().map(|i| i.quantity).sum();
        let input_amount: i64 = items.iter().map(|i| i.total_price).sum();
        let output_quantity: i64 = aggregated.iter().map(|p| p.total_quantity).sum();
        let output_amount: i64 = aggregated.iter().map(|p| p.total_amount).sum();

        assert_eq!(input_quantity, output_quantity);
        assert_eq!(input_amount, output_amount);
    }

    #[test]
    fn unit_price_is_invisible_to_grouping() {
        // Same product and region at two different unit prices: one tally.
        let items = vec![
            item("A", "보장분석", "제주", 1, 80_000),
            item("A", "보장분석", "제주", 1, 90_000),
        ];
        let aggregated = aggregate_items(&items);
        assert_eq!(aggregated.len(), 1);
        assert_eq!(aggregated[0].regions.len(), 1);
        assert_eq!(aggregated[0].regions[0].amount, 170_000);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(aggregate_items(&[]).is_empty());
    }
}
