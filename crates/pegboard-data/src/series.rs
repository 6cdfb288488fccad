//! Helpers for quarterly EPS series.

use pegboard_ratios::EpsObservation;

/// Sort observations most-recent-first and drop duplicate quarter ends.
pub fn sort_most_recent_first(mut observations: Vec<EpsObservation>) -> Vec<EpsObservation> {
    observations.retain(|o| o.eps.is_finite());
    observations.sort_by(|a, b| b.period_end.cmp(&a.period_end));
    observations.dedup_by_key(|o| o.period_end);
    observations
}

/// Shortest gap in days between consecutive quarter ends.
const MIN_QUARTER_GAP_DAYS: i64 = 80;

/// Longest gap in days between consecutive quarter ends.
const MAX_QUARTER_GAP_DAYS: i64 = 100;

/// Whether every adjacent pair in a most-recent-first run is one quarter apart.
fn is_contiguous(window: &[EpsObservation]) -> bool {
    window.windows(2).all(|pair| {
        let gap = (pair[0].period_end - pair[1].period_end).num_days();
        (MIN_QUARTER_GAP_DAYS..=MAX_QUARTER_GAP_DAYS).contains(&gap)
    })
}

/// Roll most-recent-first quarterly values into trailing sums over `window` quarters.
///
/// The output is also most-recent-first; each point carries the end date of
/// its latest quarter. Tails shorter than `window` produce no point, and
/// neither does a run that skips a quarter. Output stops at the first break
/// so consecutive points stay one quarter apart.
pub fn rolling_ttm(quarters: &[EpsObservation], window: usize) -> Vec<EpsObservation> {
    if window == 0 || quarters.len() < window {
        return Vec::new();
    }
    let mut ttm: Vec<EpsObservation> = Vec::new();
    for w in quarters.windows(window) {
        if !is_contiguous(w) {
            if ttm.is_empty() {
                continue;
            }
            break;
        }
        ttm.push(EpsObservation::new(w[0].period_end, w.iter().map(|o| o.eps).sum()));
    }
    ttm
}
