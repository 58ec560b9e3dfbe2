//! Dashboard data fetch collaborator.
//!
//! Fetches run on a background thread and report over an mpsc channel; the
//! UI polls the receiver without blocking. Fetch failures surface as a
//! retryable error state and never touch the layout engine.
//!
//! The concrete data source here is a deterministic local synthesizer
//! standing in for the REST backend, which is outside this crate's scope.

use anyhow::Result;
use std::sync::mpsc::Sender;
use std::thread;
use tracing::{error, info};

use crate::layout::CardId;

/// Reporting period for the fetched metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Period {
    Weekly,
    Monthly,
    Yearly,
}

impl Period {
    pub fn label(&self) -> &'static str {
        match self {
            Period::Weekly => "Weekly",
            Period::Monthly => "Monthly",
            Period::Yearly => "Yearly",
        }
    }

    /// Number of points in a series chart for this period.
    fn series_len(&self) -> usize {
        match self {
            Period::Weekly => 7,
            Period::Monthly => 30,
            Period::Yearly => 12,
        }
    }
}

/// A single KPI card's value plus its change against the previous period.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiValue {
    pub value: f64,
    pub delta_pct: f64,
}

/// Per-card metrics for one branch and period.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub sales: KpiValue,
    pub inventory: KpiValue,
    pub employee: KpiValue,
    pub order: KpiValue,
    pub revenue_series: Vec<f64>,
    pub category_breakdown: Vec<(&'static str, f64)>,
    pub attendance_series: Vec<f64>,
}

impl DashboardData {
    pub fn kpi(&self, card: CardId) -> Option<&KpiValue> {
        match card {
            CardId::Sales => Some(&self.sales),
            CardId::Inventory => Some(&self.inventory),
            CardId::Employee => Some(&self.employee),
            CardId::Order => Some(&self.order),
            _ => None,
        }
    }
}

pub type FetchResult = Result<DashboardData>;

/// Fetch metrics for a branch/period on a background thread, reporting the
/// result over `sender`. The receiver side polls with `try_recv` from the
/// UI loop.
pub fn spawn_fetch(
    branch: String,
    period: Period,
    sender: Sender<FetchResult>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        info!(branch = %branch, period = ?period, "Fetching dashboard data");
        let result = fetch_dashboard_data(&branch, period);
        if let Err(err) = &result {
            error!(branch = %branch, error = %err, "Dashboard data fetch failed");
        }
        // A dropped receiver just means the view went away mid-fetch.
        let _ = sender.send(result);
    })
}

/// Synthesize deterministic metrics for a branch/period pair.
pub fn fetch_dashboard_data(branch: &str, period: Period) -> FetchResult {
    let seed = seed_for(branch, period);
    let kpi = |tag: u64, base: f64, spread: f64| {
        let value = base + spread * unit_noise(seed, tag);
        let delta_pct = 20.0 * unit_noise(seed, tag.wrapping_add(100)) - 10.0;
        KpiValue {
            value: (value * 100.0).round() / 100.0,
            delta_pct: (delta_pct * 10.0).round() / 10.0,
        }
    };
    let series = |tag: u64, base: f64, spread: f64| {
        (0..period.series_len())
            .map(|i| base + spread * unit_noise(seed, tag.wrapping_add(i as u64)))
            .collect::<Vec<_>>()
    };

    Ok(DashboardData {
        sales: kpi(1, 42_000.0, 18_000.0),
        inventory: kpi(2, 1_200.0, 400.0),
        employee: kpi(3, 24.0, 10.0),
        order: kpi(4, 310.0, 120.0),
        revenue_series: series(10, 30_000.0, 15_000.0),
        category_breakdown: vec![
            ("Food", 35.0 + 20.0 * unit_noise(seed, 20)),
            ("Beverage", 20.0 + 10.0 * unit_noise(seed, 21)),
            ("Retail", 15.0 + 10.0 * unit_noise(seed, 22)),
            ("Service", 10.0 + 10.0 * unit_noise(seed, 23)),
        ],
        attendance_series: series(30, 85.0, 12.0),
    })
}

fn seed_for(branch: &str, period: Period) -> u64 {
    // FNV-1a over the branch key, mixed with the period discriminant.
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in branch.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash ^ (period as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Deterministic value in `[0, 1)` derived from a seed and a tag.
fn unit_noise(seed: u64, tag: u64) -> f64 {
    let mut z = seed.wrapping_add(tag.wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_fetch_is_deterministic_per_branch_and_period() {
        let a = fetch_dashboard_data("branch-1", Period::Weekly).unwrap();
        let b = fetch_dashboard_data("branch-1", Period::Weekly).unwrap();
        assert_eq!(a, b);

        let other_branch = fetch_dashboard_data("branch-2", Period::Weekly).unwrap();
        assert_ne!(a, other_branch);
        let other_period = fetch_dashboard_data("branch-1", Period::Monthly).unwrap();
        assert_ne!(a, other_period);
    }

    #[test]
    fn test_series_length_tracks_period() {
        let weekly = fetch_dashboard_data("branch-1", Period::Weekly).unwrap();
        assert_eq!(weekly.revenue_series.len(), 7);
        let yearly = fetch_dashboard_data("branch-1", Period::Yearly).unwrap();
        assert_eq!(yearly.revenue_series.len(), 12);
    }

    #[test]
    fn test_kpi_lookup_covers_kpi_cards_only() {
        let data = fetch_dashboard_data("branch-1", Period::Weekly).unwrap();
        assert!(data.kpi(CardId::Sales).is_some());
        assert!(data.kpi(CardId::Order).is_some());
        assert!(data.kpi(CardId::Revenue).is_none());
    }

    #[test]
    fn test_spawn_fetch_delivers_over_channel() {
        let (tx, rx) = mpsc::channel();
        let handle = spawn_fetch("branch-1".to_string(), Period::Weekly, tx);
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(result.is_ok());
        handle.join().unwrap();
    }
}
