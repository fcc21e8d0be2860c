// ABOUTME: SLA classification for tickets based on due-date proximity
// ABOUTME: Pure threshold comparison producing on-track / at-risk / breached labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # SLA Classifier
//!
//! Derives an SLA label from a ticket's creation time and due date. The label
//! is computed on every read and never cached on the record, so a ticket that
//! crosses its threshold changes status without any write.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived label summarizing a ticket's proximity to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlaStatus {
    OnTrack,
    AtRisk,
    Breached,
}

/// Fraction of the total SLA window below which a ticket is flagged at-risk.
const AT_RISK_THRESHOLD: f64 = 0.2;

/// Classify a ticket's SLA position at `now`.
///
/// Tickets without a due date are always on track. Otherwise the remaining
/// window is compared against the total window: overdue is breached, under
/// 20% remaining is at-risk. A degenerate window (due date at or before
/// creation) has no meaningful ratio; such tickets are breached once overdue
/// and at-risk before that.
#[must_use]
pub fn classify(
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> SlaStatus {
    let Some(due) = due_date else {
        return SlaStatus::OnTrack;
    };

    let remaining = due - now;
    if remaining < chrono::Duration::zero() {
        return SlaStatus::Breached;
    }

    let total = due - created_at;
    if total <= chrono::Duration::zero() {
        return SlaStatus::AtRisk;
    }

    let ratio = remaining.num_milliseconds() as f64 / total.num_milliseconds() as f64;
    if ratio < AT_RISK_THRESHOLD {
        SlaStatus::AtRisk
    } else {
        SlaStatus::OnTrack
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn no_due_date_is_always_on_track() {
        let now = Utc::now();
        assert_eq!(classify(now - Duration::days(30), None, now), SlaStatus::OnTrack);
    }

    #[test]
    fn overdue_is_breached() {
        let now = Utc::now();
        let created = now - Duration::hours(48);
        let due = now - Duration::hours(1);
        assert_eq!(classify(created, Some(due), now), SlaStatus::Breached);
    }

    #[test]
    fn under_twenty_percent_remaining_is_at_risk() {
        let now = Utc::now();
        // 24h window with 2h remaining: 8.3% left.
        let created = now - Duration::hours(22);
        let due = now + Duration::hours(2);
        assert_eq!(classify(created, Some(due), now), SlaStatus::AtRisk);
    }

    #[test]
    fn ample_time_is_on_track() {
        let now = Utc::now();
        let created = now - Duration::hours(1);
        let due = now + Duration::hours(23);
        assert_eq!(classify(created, Some(due), now), SlaStatus::OnTrack);
    }

    #[test]
    fn exactly_at_threshold_is_on_track() {
        let now = Utc::now();
        // 10h window, 2h remaining: ratio is exactly 0.2, not below it.
        let created = now - Duration::hours(8);
        let due = now + Duration::hours(2);
        assert_eq!(classify(created, Some(due), now), SlaStatus::OnTrack);
    }

    #[test]
    fn degenerate_window_not_yet_due_is_at_risk() {
        let now = Utc::now();
        // Due date before creation but still in the future relative to now.
        let due = now + Duration::hours(1);
        let created = now + Duration::hours(2);
        assert_eq!(classify(created, Some(due), now), SlaStatus::AtRisk);
    }

    #[test]
    fn degenerate_window_overdue_is_breached() {
        let now = Utc::now();
        let due = now - Duration::hours(1);
        let created = now - Duration::minutes(30);
        assert_eq!(classify(created, Some(due), now), SlaStatus::Breached);
    }
}
