use std::fmt::{self, Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Where the election is in its voting lifecycle.
///
/// Derived from `(now, configured bounds)` on every read; never stored,
/// so there is no stale cached phase and no background timer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VotingStatus {
    /// No voting period has been configured.
    NotSet,
    /// Configured, start is still in the future.
    Upcoming,
    /// `now` is within `[start, end]`; votes are accepted.
    Active,
    /// `now` is past `end`. Terminal for this configuration.
    Ended,
}

impl Display for VotingStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::NotSet => "not set",
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Ended => "ended",
        };
        write!(f, "{text}")
    }
}

/// The configured `[start, end]` interval during which votes are accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Voting window configuration; `bounds == None` means not set.
///
/// State machine: NotSet → Upcoming → Active → Ended, with cancellation
/// from Upcoming back to NotSet, and reconfiguration from Ended to a
/// fresh Upcoming window.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingWindow {
    bounds: Option<WindowBounds>,
}

impl VotingWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Option<WindowBounds> {
        self.bounds
    }

    /// Derive the status at `now`. Pure function.
    pub fn status(&self, now: DateTime<Utc>) -> VotingStatus {
        match self.bounds {
            None => VotingStatus::NotSet,
            Some(bounds) if now < bounds.start => VotingStatus::Upcoming,
            Some(bounds) if now <= bounds.end => VotingStatus::Active,
            Some(_) => VotingStatus::Ended,
        }
    }

    /// Configure a fresh window. Only allowed while NotSet or Ended; an
    /// Upcoming window must be cancelled first and an Active one cannot
    /// be touched at all.
    pub(crate) fn set(
        &mut self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        match self.status(now) {
            VotingStatus::NotSet | VotingStatus::Ended => {}
            status => return Err(Error::WindowLocked(status)),
        }
        if start <= now {
            return Err(Error::InvalidWindow(format!(
                "start {start} is not in the future"
            )));
        }
        if end <= start {
            return Err(Error::InvalidWindow(format!(
                "end {end} is not after start {start}"
            )));
        }
        self.bounds = Some(WindowBounds { start, end });
        Ok(())
    }

    /// Cancel an Upcoming window, returning to NotSet.
    pub(crate) fn cancel(&mut self, now: DateTime<Utc>) -> Result<()> {
        match self.status(now) {
            VotingStatus::Upcoming => {
                self.bounds = None;
                Ok(())
            }
            status => Err(Error::WindowLocked(status)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn base() -> DateTime<Utc> {
        "2026-06-01T00:00:00Z".parse().unwrap()
    }

    #[test]
    fn status_derivation() {
        let mut window = VotingWindow::new();
        let now = base();
        assert_eq!(window.status(now), VotingStatus::NotSet);

        let start = now + Duration::hours(1);
        let end = now + Duration::hours(2);
        window.set(start, end, now).unwrap();

        assert_eq!(window.status(now), VotingStatus::Upcoming);
        assert_eq!(window.status(start), VotingStatus::Active); // Inclusive start.
        assert_eq!(window.status(end), VotingStatus::Active); // Inclusive end.
        assert_eq!(
            window.status(end + Duration::seconds(1)),
            VotingStatus::Ended
        );
    }

    #[test]
    fn set_rejects_past_start_and_inverted_bounds() {
        let mut window = VotingWindow::new();
        let now = base();

        assert!(matches!(
            window.set(now, now + Duration::hours(1), now),
            Err(Error::InvalidWindow(_))
        ));
        assert!(matches!(
            window.set(now - Duration::hours(1), now + Duration::hours(1), now),
            Err(Error::InvalidWindow(_))
        ));
        assert!(matches!(
            window.set(now + Duration::hours(2), now + Duration::hours(1), now),
            Err(Error::InvalidWindow(_))
        ));
        assert!(matches!(
            window.set(now + Duration::hours(1), now + Duration::hours(1), now),
            Err(Error::InvalidWindow(_))
        ));
        assert_eq!(window.status(now), VotingStatus::NotSet);
    }

    #[test]
    fn set_locked_while_upcoming_or_active() {
        let mut window = VotingWindow::new();
        let now = base();
        let start = now + Duration::hours(1);
        let end = now + Duration::hours(2);
        window.set(start, end, now).unwrap();

        // Upcoming: locked.
        assert_eq!(
            window.set(start + Duration::days(1), end + Duration::days(1), now),
            Err(Error::WindowLocked(VotingStatus::Upcoming))
        );
        // Active: locked.
        assert_eq!(
            window.set(end + Duration::hours(1), end + Duration::hours(2), start),
            Err(Error::WindowLocked(VotingStatus::Active))
        );
    }

    #[test]
    fn reconfigure_after_ended_yields_fresh_upcoming() {
        let mut window = VotingWindow::new();
        let now = base();
        window
            .set(now + Duration::hours(1), now + Duration::hours(2), now)
            .unwrap();

        let later = now + Duration::hours(3);
        assert_eq!(window.status(later), VotingStatus::Ended);
        window
            .set(later + Duration::hours(1), later + Duration::hours(2), later)
            .unwrap();
        assert_eq!(window.status(later), VotingStatus::Upcoming);
    }

    #[test]
    fn cancel_only_from_upcoming() {
        let mut window = VotingWindow::new();
        let now = base();

        assert_eq!(
            window.cancel(now),
            Err(Error::WindowLocked(VotingStatus::NotSet))
        );

        let start = now + Duration::hours(1);
        let end = now + Duration::hours(2);
        window.set(start, end, now).unwrap();
        assert_eq!(
            window.cancel(start),
            Err(Error::WindowLocked(VotingStatus::Active))
        );
        assert_eq!(
            window.cancel(end + Duration::hours(1)),
            Err(Error::WindowLocked(VotingStatus::Ended))
        );

        window.cancel(now).unwrap();
        assert_eq!(window.status(now), VotingStatus::NotSet);
        assert_eq!(window.bounds(), None);
    }
}
