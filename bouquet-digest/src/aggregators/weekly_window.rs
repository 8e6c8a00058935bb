use crate::types::{DigestError, Result, Window, WindowMode};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};
use tracing::debug;

pub const WINDOW_DAYS: i64 = 7;

impl Window {
    /// The window `index` weeks after `epoch`. `None` if the dates overflow.
    pub fn at(epoch: NaiveDate, index: i64) -> Option<Self> {
        let start = epoch.checked_add_signed(TimeDelta::try_days(index.checked_mul(WINDOW_DAYS)?)?)?;
        let end = start.checked_add_signed(TimeDelta::try_days(WINDOW_DAYS - 1)?)?;
        Some(Self { index, start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// A window ending today has not fully elapsed.
    pub fn is_elapsed(&self, today: NaiveDate) -> bool {
        self.end < today
    }
}

/// Enumerates fully elapsed weekly windows counted from a fixed epoch.
#[derive(Debug, Clone)]
pub struct WeeklyWindowBuilder {
    epoch: NaiveDate,
    mode: WindowMode,
}

impl WeeklyWindowBuilder {
    pub fn new(epoch: NaiveDate) -> Self {
        Self {
            epoch,
            mode: WindowMode::All,
        }
    }

    /// Only the `count` windows starting at the one `anchor_days_ago` back
    pub fn recent(epoch: NaiveDate, count: u32, anchor_days_ago: u32) -> Self {
        Self {
            epoch,
            mode: WindowMode::RecentWindows { count, anchor_days_ago },
        }
    }

    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn build(&self, now: DateTime<Utc>) -> Result<Vec<Window>> {
        build_windows(self.epoch, now, self.mode)
    }
}

/// Windows selected by `mode` whose end date is strictly before `now`'s date,
/// in ascending index order.
pub fn build_windows(epoch: NaiveDate, now: DateTime<Utc>, mode: WindowMode) -> Result<Vec<Window>> {
    let today = now.date_naive();

    let indices = match mode {
        WindowMode::All => {
            let elapsed = now.signed_duration_since(epoch.and_time(NaiveTime::MIN).and_utc());
            if elapsed < TimeDelta::zero() {
                debug!("Epoch {} is after {}, no windows", epoch, now);
                return Ok(Vec::new());
            }
            let window_secs = WINDOW_DAYS * 24 * 60 * 60;
            let total = (elapsed.num_seconds() + window_secs - 1) / window_secs;
            0..=total
        }
        WindowMode::RecentWindows { count, anchor_days_ago } => {
            if count == 0 {
                return Ok(Vec::new());
            }
            let anchor = today
                .checked_sub_signed(TimeDelta::days(i64::from(anchor_days_ago)))
                .ok_or_else(|| DigestError::General(format!("anchor {} days before {} is out of range", anchor_days_ago, today)))?;
            let start_index = anchor.signed_duration_since(epoch).num_days().div_euclid(WINDOW_DAYS);
            start_index..=start_index + i64::from(count) - 1
        }
    };

    // Indices ascend, so the first window that is unelapsed or past the
    // calendar's end closes the scan.
    let mut windows = Vec::new();
    for index in indices {
        match Window::at(epoch, index) {
            Some(window) if window.is_elapsed(today) => windows.push(window),
            None if index < 0 => continue,
            _ => break,
        }
    }

    debug!(
        "Selected {} elapsed windows from epoch {} as of {} ({:?})",
        windows.len(),
        epoch,
        today,
        mode
    );
    Ok(windows)
}
