//! # Dashboard Metrics
//!
//! Pure, stateless functions deriving dashboard metrics from a snapshot of
//! catalog records: stock totals, low-stock alerts, expiry buckets and
//! inventory valuation.
//!
//! ## Two Expiry Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Expiry Classification                                   │
//! │                                                                         │
//! │  Dashboard view: expiring_soon(snapshot, today, 30)                    │
//! │    expiry <= today + 30 days   (inclusive, INCLUDES expired items)     │
//! │                                                                         │
//! │  Table view: expiry_status(expiry, today)                              │
//! │    expiry <  today             → Expired                               │
//! │    today <= expiry <= today+30 → ExpiringSoon                          │
//! │    expiry >  today + 30        → Fresh                                 │
//! │                                                                         │
//! │  The two views intentionally disagree about expired items. Both are    │
//! │  kept as-is; do not unify them.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function takes the snapshot (and `today` where relevant) as an
//! explicit argument and is order-independent: any permutation of the input
//! produces the same totals, counts and set membership.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::Medicine;
use crate::{DASHBOARD_PREVIEW_LEN, EXPIRY_HORIZON_DAYS, LOW_STOCK_THRESHOLD};

// =============================================================================
// Totals
// =============================================================================

/// Number of distinct medicine records.
#[inline]
pub fn total_medicines(snapshot: &[Medicine]) -> usize {
    snapshot.len()
}

/// Sum of stock quantities across all records.
pub fn total_stock(snapshot: &[Medicine]) -> i64 {
    snapshot.iter().map(|m| m.quantity).sum()
}

/// Total inventory value: Σ quantity × unit price.
pub fn inventory_value(snapshot: &[Medicine]) -> Money {
    snapshot.iter().map(Medicine::stock_value).sum()
}

// =============================================================================
// Low Stock
// =============================================================================

/// Records whose stock is strictly below `threshold`.
///
/// Returns the full subset; the dashboard count uses its length, the
/// dashboard listing truncates separately (two different queries).
pub fn low_stock(snapshot: &[Medicine], threshold: i64) -> Vec<&Medicine> {
    snapshot.iter().filter(|m| m.quantity < threshold).collect()
}

// =============================================================================
// Expiry
// =============================================================================

/// Records expiring within `horizon_days` of `today`.
///
/// Inclusive, non-strict comparison: `expiry <= today + horizon_days`.
/// Already-expired records are INCLUDED - the dashboard does not exclude
/// past dates. Records without an expiry date never match.
pub fn expiring_soon(snapshot: &[Medicine], today: NaiveDate, horizon_days: i64) -> Vec<&Medicine> {
    let horizon = today + Duration::days(horizon_days);
    snapshot
        .iter()
        .filter(|m| m.expiry_date.is_some_and(|expiry| expiry <= horizon))
        .collect()
}

/// Three-way expiry partition used by the inventory table, plus a bucket
/// for records with no expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// No expiry date on record.
    NoExpiry,
    /// Expiry date is strictly before today.
    Expired,
    /// Expiry date is within the next 30 days (today included).
    ExpiringSoon,
    /// Expiry date is more than 30 days out.
    Fresh,
}

/// Classifies a single expiry date for the table view.
///
/// Unlike [`expiring_soon`], this view separates already-expired records
/// into their own bucket.
pub fn expiry_status(expiry: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    let Some(expiry) = expiry else {
        return ExpiryStatus::NoExpiry;
    };

    if expiry < today {
        ExpiryStatus::Expired
    } else if expiry <= today + Duration::days(EXPIRY_HORIZON_DAYS) {
        ExpiryStatus::ExpiringSoon
    } else {
        ExpiryStatus::Fresh
    }
}

// =============================================================================
// Dashboard Summary
// =============================================================================

/// The dashboard's stat tiles plus its two truncated preview lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_medicines: usize,
    pub total_stock: i64,
    pub low_stock_count: usize,
    pub inventory_value_paise: i64,
    pub expiring_soon_count: usize,

    /// First 5 low-stock records, in snapshot order.
    pub low_stock_preview: Vec<Medicine>,

    /// First 5 expiring-soon records, in snapshot order.
    pub expiring_soon_preview: Vec<Medicine>,
}

/// Derives the full dashboard summary from a catalog snapshot.
///
/// Counts are computed over the full low-stock and expiring-soon sets;
/// the previews are truncated to [`DASHBOARD_PREVIEW_LEN`] entries.
pub fn dashboard_summary(snapshot: &[Medicine], today: NaiveDate) -> DashboardSummary {
    let low = low_stock(snapshot, LOW_STOCK_THRESHOLD);
    let expiring = expiring_soon(snapshot, today, EXPIRY_HORIZON_DAYS);

    DashboardSummary {
        total_medicines: total_medicines(snapshot),
        total_stock: total_stock(snapshot),
        low_stock_count: low.len(),
        inventory_value_paise: inventory_value(snapshot).paise(),
        expiring_soon_count: expiring.len(),
        low_stock_preview: low
            .iter()
            .take(DASHBOARD_PREVIEW_LEN)
            .map(|m| (*m).clone())
            .collect(),
        expiring_soon_preview: expiring
            .iter()
            .take(DASHBOARD_PREVIEW_LEN)
            .map(|m| (*m).clone())
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn medicine(id: &str, quantity: i64, price_paise: i64, expiry: Option<&str>) -> Medicine {
        Medicine {
            id: id.to_string(),
            name: format!("Medicine {}", id),
            brand: None,
            category: None,
            quantity,
            expiry_date: expiry.map(|d| d.parse().unwrap()),
            price_paise,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_totals() {
        let snapshot = vec![
            medicine("1", 5, 1000, None),
            medicine("2", 0, 500, None),
            medicine("3", 20, 250, None),
        ];

        assert_eq!(total_medicines(&snapshot), 3);
        assert_eq!(total_stock(&snapshot), 25);
        // 5×10.00 + 0×5.00 + 20×2.50 = ₹100.00
        assert_eq!(inventory_value(&snapshot).paise(), 10_000);
    }

    #[test]
    fn test_low_stock_threshold_is_strict() {
        let snapshot = vec![
            medicine("1", 9, 100, None),
            medicine("2", 10, 100, None),
            medicine("3", 0, 100, None),
        ];

        let low = low_stock(&snapshot, 10);
        let ids: Vec<&str> = low.iter().map(|m| m.id.as_str()).collect();
        // quantity < 10, so exactly 10 does not count
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_expiring_soon_includes_expired() {
        let today = date("2025-01-01");
        let snapshot = vec![
            medicine("in-window", 1, 100, Some("2025-01-15")),
            medicine("expired", 1, 100, Some("2024-12-01")),
            medicine("boundary", 1, 100, Some("2025-01-31")),
            medicine("fresh", 1, 100, Some("2025-03-01")),
            medicine("no-expiry", 1, 100, None),
        ];

        let expiring = expiring_soon(&snapshot, today, 30);
        let ids: Vec<&str> = expiring.iter().map(|m| m.id.as_str()).collect();
        // Inclusive horizon: the 31st is exactly today + 30 days.
        // Expired items are included - the dashboard does not exclude them.
        assert_eq!(ids, vec!["in-window", "expired", "boundary"]);
    }

    #[test]
    fn test_expiry_status_three_way_partition() {
        let today = date("2025-01-01");

        assert_eq!(expiry_status(None, today), ExpiryStatus::NoExpiry);
        assert_eq!(
            expiry_status(Some(date("2024-12-01")), today),
            ExpiryStatus::Expired
        );
        // Today itself is not expired yet
        assert_eq!(
            expiry_status(Some(date("2025-01-01")), today),
            ExpiryStatus::ExpiringSoon
        );
        assert_eq!(
            expiry_status(Some(date("2025-01-31")), today),
            ExpiryStatus::ExpiringSoon
        );
        assert_eq!(
            expiry_status(Some(date("2025-02-01")), today),
            ExpiryStatus::Fresh
        );
    }

    #[test]
    fn test_expired_item_is_in_both_views() {
        // An expired record shows as "Expired" in the table view but is
        // still counted by the dashboard's expiring-soon tile.
        let today = date("2025-01-01");
        let snapshot = vec![medicine("old", 1, 100, Some("2024-12-01"))];

        assert_eq!(
            expiry_status(snapshot[0].expiry_date, today),
            ExpiryStatus::Expired
        );
        assert_eq!(expiring_soon(&snapshot, today, 30).len(), 1);
    }

    #[test]
    fn test_order_independence() {
        let today = date("2025-01-01");
        let mut snapshot = vec![
            medicine("1", 5, 1000, Some("2025-01-10")),
            medicine("2", 3, 500, None),
            medicine("3", 50, 250, Some("2026-01-01")),
            medicine("4", 0, 9900, Some("2024-06-01")),
        ];

        let value = inventory_value(&snapshot);
        let stock = total_stock(&snapshot);
        let low_count = low_stock(&snapshot, LOW_STOCK_THRESHOLD).len();
        let expiring_count = expiring_soon(&snapshot, today, EXPIRY_HORIZON_DAYS).len();

        // Recomputing on an unchanged snapshot returns identical results
        assert_eq!(inventory_value(&snapshot), value);
        assert_eq!(total_stock(&snapshot), stock);

        snapshot.reverse();
        assert_eq!(inventory_value(&snapshot), value);
        assert_eq!(total_stock(&snapshot), stock);
        assert_eq!(low_stock(&snapshot, LOW_STOCK_THRESHOLD).len(), low_count);
        assert_eq!(
            expiring_soon(&snapshot, today, EXPIRY_HORIZON_DAYS).len(),
            expiring_count
        );
    }

    #[test]
    fn test_dashboard_summary() {
        let today = date("2025-01-01");
        let mut snapshot = Vec::new();
        for i in 0..7 {
            // 7 low-stock records (quantity 2), ₹1.00 each
            snapshot.push(medicine(&format!("low-{}", i), 2, 100, None));
        }
        snapshot.push(medicine("stocked", 100, 100, Some("2025-01-05")));

        let summary = dashboard_summary(&snapshot, today);

        assert_eq!(summary.total_medicines, 8);
        assert_eq!(summary.total_stock, 114);
        assert_eq!(summary.low_stock_count, 7);
        // Preview is truncated to 5, count is not
        assert_eq!(summary.low_stock_preview.len(), 5);
        assert_eq!(summary.expiring_soon_count, 1);
        assert_eq!(summary.expiring_soon_preview.len(), 1);
        assert_eq!(summary.inventory_value_paise, 11_400);
    }

    #[test]
    fn test_empty_snapshot() {
        let summary = dashboard_summary(&[], date("2025-01-01"));
        assert_eq!(summary.total_medicines, 0);
        assert_eq!(summary.total_stock, 0);
        assert_eq!(summary.inventory_value_paise, 0);
        assert!(summary.low_stock_preview.is_empty());
        assert!(summary.expiring_soon_preview.is_empty());
    }
}
