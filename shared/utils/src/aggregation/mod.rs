//! The monthly aggregation engine.
//!
//! Confirmed submissions come in two historical shapes: newer ones carry
//! structured `order_items` rows, older ones only a legacy `items_summary`
//! display string. Both are reduced to [`NormalizedItem`]s — structured rows
//! via the canonicalizer, legacy strings via the summary parser — and then
//! grouped into per-product, per-region tallies.
//!
//! Everything in this module is pure: the caller fetches the rows, this
//! module only reconciles and counts them.

pub mod aggregate;
pub mod canonical;
pub mod parser;
pub mod period;

pub use aggregate::aggregate_items;
pub use canonical::{core_product_name, strip_vendor_prefix, with_vendor_suffix};
pub use parser::parse_items_summary;
pub use period::{resolve_period, resolve_period_from, ResolvedPeriod};

use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use leadform_models::{
    AggregationReport, NormalizedItem, OrderItem, ReportSummary, Submission,
};

/// The two historical encodings of one submission's line items. Every
/// confirmed submission resolves to exactly one variant, never both — that
/// is what keeps a line from being counted twice.
#[derive(Debug)]
pub enum ItemSource<'a> {
    /// Structured order rows (newer submissions).
    Structured(Vec<&'a OrderItem>),
    /// The pseudo-HTML display summary (older submissions).
    LegacySummary(&'a str),
}

impl ItemSource<'_> {
    /// Reduce this source to the common normalized form.
    pub fn normalize(&self) -> Vec<NormalizedItem> {
        match self {
            Self::Structured(rows) => rows
                .iter()
                .map(|item| NormalizedItem {
                    db_type: item.db_type.clone(),
                    product_name: core_product_name(
                        &item.product_name,
                        &item.region,
                        &item.db_type,
                    ),
                    region: item.region.clone(),
                    quantity: i64::from(item.quantity),
                    total_price: item.total_price,
                })
                .collect(),
            Self::LegacySummary(summary) => parse_items_summary(summary),
        }
    }

    fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }
}

/// Build the aggregation report from already-fetched rows.
///
/// Non-confirmed submissions and order items not belonging to a confirmed
/// submission are ignored. Each confirmed submission is classified into one
/// [`ItemSource`] before normalization; structured sources feed the
/// aggregator ahead of legacy ones, so product groups backed by real rows
/// claim their position first.
pub fn build_report(
    submissions: &[Submission],
    order_items: &[OrderItem],
    period: &ResolvedPeriod,
) -> AggregationReport {
    let confirmed: Vec<&Submission> = submissions.iter().filter(|s| s.is_confirmed()).collect();
    let confirmed_ids: HashSet<Uuid> = confirmed.iter().map(|s| s.id).collect();

    let mut rows_by_submission: HashMap<Uuid, Vec<&OrderItem>> = HashMap::new();
    for item in order_items {
        if confirmed_ids.contains(&item.submission_id) {
            rows_by_submission
                .entry(item.submission_id)
                .or_default()
                .push(item);
        }
    }

    let sources: Vec<ItemSource> = confirmed
        .iter()
        .map(|submission| match rows_by_submission.remove(&submission.id) {
            Some(rows) => ItemSource::Structured(rows),
            None => ItemSource::LegacySummary(&submission.items_summary),
        })
        .collect();

    let normalized: Vec<NormalizedItem> = sources
        .iter()
        .filter(|source| source.is_structured())
        .chain(sources.iter().filter(|source| !source.is_structured()))
        .flat_map(ItemSource::normalize)
        .collect();

    let aggregated = aggregate_items(&normalized);

    let summary = ReportSummary {
        total_quantity: aggregated.iter().map(|p| p.total_quantity).sum(),
        total_amount: aggregated.iter().map(|p| p.total_amount).sum(),
    };

    AggregationReport {
        period: period.to_report_period(),
        aggregated,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use leadform_models::SubmissionStatus;

    fn period() -> ResolvedPeriod {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        resolve_period_from(now, None, None).unwrap()
    }

    fn submission(status: SubmissionStatus, items_summary: &str) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            name: "홍길동".to_string(),
            affiliation: "소속".to_string(),
            position: "직급".to_string(),
            phone: "010-0000-0000".to_string(),
            email: "applicant@example.com".to_string(),
            items_summary: items_summary.to_string(),
            total_amount: 0,
            status,
            created_at: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
        }
    }

    fn order_item(
        submission_id: Uuid,
        db_type: &str,
        product_name: &str,
        region: &str,
        quantity: i32,
        total_price: i64,
    ) -> OrderItem {
        OrderItem {
            id: Uuid::new_v4(),
            submission_id,
            db_type: db_type.to_string(),
            product_name: product_name.to_string(),
            region: region.to_string(),
            quantity,
            unit_price: if quantity > 0 {
                total_price / i64::from(quantity)
            } else {
                0
            },
            total_price,
            created_at: Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap(),
        }
    }

    /// Structured and legacy submissions reconcile into one report:
    /// S1 carries two order rows, S2 only a legacy summary whose line
    /// merges into S1's first product group.
    #[test]
    fn reconciles_structured_and_legacy_shapes() {
        let s1 = submission(SubmissionStatus::Confirmed, "");
        let s2 = submission(
            SubmissionStatus::Confirmed,
            "A업체 - [보장분석] 일반 (서울/인천/경기) (수량: 1, 금액: 80000원)",
        );
        let items = vec![
            order_item(
                s1.id,
                "A",
                "A업체 - 보장분석 (서울/인천/경기)",
                "서울/인천/경기",
                3,
                240_000,
            ),
            order_item(s1.id, "B", "B업체 - 실버 (제주)", "제주", 2, 100_000),
        ];

        let report = build_report(&[s1, s2], &items, &period());

        assert_eq!(report.aggregated.len(), 2);

        let first = &report.aggregated[0];
        assert_eq!(first.product_name, "A업체 - 보장분석");
        assert_eq!(first.regions.len(), 1);
        assert_eq!(first.regions[0].region_name, "서울/인천/경기");
        assert_eq!(first.regions[0].quantity, 4);
        assert_eq!(first.regions[0].amount, 320_000);

        let second = &report.aggregated[1];
        assert_eq!(second.product_name, "B업체 - 실버");
        assert_eq!(second.regions[0].region_name, "제주");
        assert_eq!(second.total_quantity, 2);
        assert_eq!(second.total_amount, 100_000);

        assert_eq!(report.summary.total_quantity, 6);
        assert_eq!(report.summary.total_amount, 420_000);
    }

    #[test]
    fn non_confirmed_submissions_are_excluded_entirely() {
        let pending = submission(
            SubmissionStatus::Pending,
            "A업체 - [보장분석] 일반 (서울/인천/경기) (수량: 9, 금액: 720,000원)",
        );
        let completed = submission(SubmissionStatus::Completed, "");
        let completed_items = vec![order_item(
            completed.id,
            "B",
            "B업체 - 실버 (제주)",
            "제주",
            5,
            250_000,
        )];

        let report = build_report(&[pending, completed], &completed_items, &period());

        assert!(report.aggregated.is_empty());
        assert_eq!(report.summary, ReportSummary::default());
    }

    #[test]
    fn a_submission_with_items_never_contributes_its_summary() {
        // The legacy summary duplicates what the structured row already
        // says; classification must keep it out of the count.
        let s1 = submission(
            SubmissionStatus::Confirmed,
            "A업체 - [보장분석] 일반 (서울/인천/경기) (수량: 3, 금액: 240,000원)",
        );
        let items = vec![order_item(
            s1.id,
            "A",
            "A업체 - 보장분석 (서울/인천/경기)",
            "서울/인천/경기",
            3,
            240_000,
        )];

        let report = build_report(&[s1], &items, &period());

        assert_eq!(report.summary.total_quantity, 3);
        assert_eq!(report.summary.total_amount, 240_000);
    }

    #[test]
    fn structured_sources_come_before_legacy_ones() {
        // The legacy-only submission is fetched first, but groups backed by
        // structured rows still claim the leading positions.
        let legacy_only = submission(
            SubmissionStatus::Confirmed,
            "C업체 - [테마] 화재보험 (부산/경남) (수량: 1, 금액: 50,000원)",
        );
        let structured = submission(SubmissionStatus::Confirmed, "");
        let items = vec![order_item(
            structured.id,
            "A",
            "A업체 - 보장분석 (서울/인천/경기)",
            "서울/인천/경기",
            1,
            80_000,
        )];

        let report = build_report(&[legacy_only, structured], &items, &period());

        assert_eq!(report.aggregated.len(), 2);
        assert_eq!(report.aggregated[0].product_name, "A업체 - 보장분석");
        assert_eq!(report.aggregated[1].product_name, "C업체 - 테마");
    }

    #[test]
    fn legacy_only_submissions_with_unparseable_summaries_count_nothing() {
        let s1 = submission(SubmissionStatus::Confirmed, "자유 형식 메모");
        let report = build_report(&[s1], &[], &period());

        assert!(report.aggregated.is_empty());
        assert_eq!(report.summary.total_quantity, 0);
    }

    #[test]
    fn report_carries_the_resolved_period() {
        let report = build_report(&[], &[], &period());
        assert_eq!(report.period.start, "2024-03-01T00:00:00.000Z");
        assert_eq!(report.period.end, "2024-03-31T23:59:59.999Z");
    }
}
