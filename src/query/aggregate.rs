// ABOUTME: Aggregation engine computing call summaries, agent rollups, and histograms
// ABOUTME: All rate and average computations guard division by zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! Derived metrics over call-log collections.
//!
//! Aggregations always run over the post-filter, pre-pagination set so the
//! numbers reflect what the caller filtered, not the current page. Percentage
//! fields are fixed to one decimal place as part of the response contract.
//! Empty collections produce zeros, never NaN.

use chrono::Timelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{CallLog, CallStatus, CallType};

/// Number of entries in the busiest-hours ranking.
const BUSY_HOURS_TOP_N: usize = 5;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallsByType {
    pub incoming: usize,
    pub outgoing: usize,
    pub missed: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallsByStatus {
    pub answered: usize,
    pub missed: usize,
    pub busy: usize,
    pub failed: usize,
}

/// Summary block attached to call-log list responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAggregations {
    pub total_calls: usize,
    pub answered_calls: usize,
    pub missed_calls: usize,
    pub total_duration: u64,
    /// `round(sum / count)` in seconds; zero for an empty set.
    pub average_duration: u64,
    pub calls_by_type: CallsByType,
    pub calls_by_status: CallsByStatus,
}

/// Per-agent rollup for the analytics endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformance {
    pub user_id: String,
    pub name: String,
    pub total_calls: usize,
    pub answered_calls: usize,
    pub total_duration: u64,
    pub average_duration: u64,
    /// Mean response time in seconds over calls that recorded one; one decimal.
    pub average_response_time: f64,
    pub tickets_created: usize,
    /// Percentage of calls that produced a ticket; one decimal.
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusyHour {
    pub hour: u32,
    pub call_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallTypeSplit {
    pub incoming: f64,
    pub outgoing: f64,
    pub missed: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallPatterns {
    /// Hour of day (0-23) to call count.
    pub by_hour: BTreeMap<u32, usize>,
    /// Weekday name to call count.
    pub by_day: BTreeMap<String, usize>,
    /// Percentage split by call type, one decimal.
    pub by_type: CallTypeSplit,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_calls: usize,
    pub answered_calls: usize,
    pub missed_calls: usize,
    pub average_duration: u64,
    pub total_call_time: u64,
    pub average_response_time: f64,
    pub call_conversion_rate: f64,
    pub busy_hours: Vec<BusyHour>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallAnalytics {
    pub summary: AnalyticsSummary,
    pub agent_performance: Vec<AgentPerformance>,
    pub call_patterns: CallPatterns,
}

/// Per-phone-number stats for the call history endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneStats {
    pub total_calls: usize,
    pub last_call_date: Option<chrono::DateTime<chrono::Utc>>,
    pub total_duration: u64,
    pub average_duration: u64,
    pub conversion_rate: f64,
}

/// Compute the list-response summary block.
#[must_use]
pub fn summarize(calls: &[CallLog]) -> CallAggregations {
    let total_duration: u64 = calls.iter().map(|c| u64::from(c.duration)).sum();
    CallAggregations {
        total_calls: calls.len(),
        answered_calls: count_status(calls, CallStatus::Answered),
        missed_calls: count_status(calls, CallStatus::Missed),
        total_duration,
        average_duration: safe_average(total_duration, calls.len()),
        calls_by_type: CallsByType {
            incoming: count_type(calls, CallType::Incoming),
            outgoing: count_type(calls, CallType::Outgoing),
            missed: count_type(calls, CallType::Missed),
        },
        calls_by_status: CallsByStatus {
            answered: count_status(calls, CallStatus::Answered),
            missed: count_status(calls, CallStatus::Missed),
            busy: count_status(calls, CallStatus::Busy),
            failed: count_status(calls, CallStatus::Failed),
        },
    }
}

/// Compute the full analytics payload for `/api/call-logs/analytics/stats`.
#[must_use]
pub fn analytics(calls: &[CallLog]) -> CallAnalytics {
    let total = calls.len();
    let total_duration: u64 = calls.iter().map(|c| u64::from(c.duration)).sum();
    let tickets_created = calls.iter().filter(|c| c.ticket_created).count();

    let by_hour = hour_histogram(calls);
    let mut busy_hours: Vec<BusyHour> = by_hour
        .iter()
        .map(|(&hour, &call_count)| BusyHour { hour, call_count })
        .collect();
    // Descending by count, then ascending hour for determinism.
    busy_hours.sort_by(|a, b| b.call_count.cmp(&a.call_count).then(a.hour.cmp(&b.hour)));
    busy_hours.truncate(BUSY_HOURS_TOP_N);

    let mut by_day: BTreeMap<String, usize> = BTreeMap::new();
    for call in calls {
        *by_day
            .entry(call.started_at.format("%A").to_string())
            .or_insert(0) += 1;
    }

    CallAnalytics {
        summary: AnalyticsSummary {
            total_calls: total,
            answered_calls: count_status(calls, CallStatus::Answered),
            missed_calls: count_status(calls, CallStatus::Missed),
            average_duration: safe_average(total_duration, total),
            total_call_time: total_duration,
            average_response_time: average_response_time(calls),
            call_conversion_rate: percentage(tickets_created, total),
            busy_hours,
        },
        agent_performance: agent_rollups(calls),
        call_patterns: CallPatterns {
            by_hour,
            by_day,
            by_type: CallTypeSplit {
                incoming: percentage(count_type(calls, CallType::Incoming), total),
                outgoing: percentage(count_type(calls, CallType::Outgoing), total),
                missed: percentage(count_type(calls, CallType::Missed), total),
            },
        },
    }
}

/// Compute per-phone history stats; `calls` must already be scoped to one
/// phone number.
#[must_use]
pub fn phone_stats(calls: &[CallLog]) -> PhoneStats {
    let total_duration: u64 = calls.iter().map(|c| u64::from(c.duration)).sum();
    let tickets_created = calls.iter().filter(|c| c.ticket_created).count();
    PhoneStats {
        total_calls: calls.len(),
        last_call_date: calls.iter().map(|c| c.started_at).max(),
        total_duration,
        average_duration: safe_average(total_duration, calls.len()),
        conversion_rate: percentage(tickets_created, calls.len()),
    }
}

fn agent_rollups(calls: &[CallLog]) -> Vec<AgentPerformance> {
    struct Acc {
        name: String,
        total_calls: usize,
        answered_calls: usize,
        total_duration: u64,
        response_time_sum: u64,
        response_time_count: usize,
        tickets_created: usize,
    }

    // BTreeMap keeps the output deterministic across runs.
    let mut agents: BTreeMap<String, Acc> = BTreeMap::new();
    for call in calls {
        let Some(user_id) = call.user_id.as_deref() else {
            continue;
        };
        let acc = agents.entry(user_id.to_owned()).or_insert_with(|| Acc {
            name: call.user_name.clone().unwrap_or_else(|| user_id.to_owned()),
            total_calls: 0,
            answered_calls: 0,
            total_duration: 0,
            response_time_sum: 0,
            response_time_count: 0,
            tickets_created: 0,
        });
        acc.total_calls += 1;
        if call.status == CallStatus::Answered {
            acc.answered_calls += 1;
        }
        acc.total_duration += u64::from(call.duration);
        if call.response_time > 0 {
            acc.response_time_sum += u64::from(call.response_time);
            acc.response_time_count += 1;
        }
        if call.ticket_created {
            acc.tickets_created += 1;
        }
    }

    agents
        .into_iter()
        .map(|(user_id, acc)| AgentPerformance {
            user_id,
            name: acc.name,
            total_calls: acc.total_calls,
            answered_calls: acc.answered_calls,
            total_duration: acc.total_duration,
            average_duration: safe_average(acc.total_duration, acc.total_calls),
            average_response_time: round1(if acc.response_time_count == 0 {
                0.0
            } else {
                acc.response_time_sum as f64 / acc.response_time_count as f64
            }),
            tickets_created: acc.tickets_created,
            conversion_rate: percentage(acc.tickets_created, acc.total_calls),
        })
        .collect()
}

fn hour_histogram(calls: &[CallLog]) -> BTreeMap<u32, usize> {
    let mut by_hour = BTreeMap::new();
    for call in calls {
        *by_hour.entry(call.started_at.hour()).or_insert(0) += 1;
    }
    by_hour
}

fn average_response_time(calls: &[CallLog]) -> f64 {
    let with_response: Vec<u64> = calls
        .iter()
        .filter(|c| c.response_time > 0)
        .map(|c| u64::from(c.response_time))
        .collect();
    if with_response.is_empty() {
        return 0.0;
    }
    round1(with_response.iter().sum::<u64>() as f64 / with_response.len() as f64)
}

fn count_status(calls: &[CallLog], status: CallStatus) -> usize {
    calls.iter().filter(|c| c.status == status).count()
}

fn count_type(calls: &[CallLog], call_type: CallType) -> usize {
    calls.iter().filter(|c| c.call_type == call_type).count()
}

/// `round(sum / count)`, zero when the set is empty.
fn safe_average(sum: u64, count: usize) -> u64 {
    if count == 0 {
        0
    } else {
        (sum as f64 / count as f64).round() as u64
    }
}

/// Percentage to one decimal place, zero when the denominator is zero.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        round1(part as f64 / whole as f64 * 100.0)
    }
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::call_fixture;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn average_duration_empty_is_zero_not_nan() {
        let agg = summarize(&[]);
        assert_eq!(agg.average_duration, 0);
        assert_eq!(agg.total_calls, 0);

        let stats = analytics(&[]);
        assert_eq!(stats.summary.average_duration, 0);
        assert_eq!(stats.summary.call_conversion_rate, 0.0);
        assert_eq!(stats.summary.average_response_time, 0.0);
    }

    #[test]
    fn average_duration_rounds() {
        let mut a = call_fixture("a");
        a.duration = 100;
        let mut b = call_fixture("b");
        b.duration = 200;
        let agg = summarize(&[a, b]);
        assert_eq!(agg.average_duration, 150);
        assert_eq!(agg.total_duration, 300);
    }

    #[test]
    fn status_and_type_counts() {
        let mut a = call_fixture("a");
        a.status = CallStatus::Answered;
        a.call_type = CallType::Incoming;
        let mut b = call_fixture("b");
        b.status = CallStatus::Missed;
        b.call_type = CallType::Missed;
        let mut c = call_fixture("c");
        c.status = CallStatus::Busy;
        c.call_type = CallType::Outgoing;

        let agg = summarize(&[a, b, c]);
        assert_eq!(agg.answered_calls, 1);
        assert_eq!(agg.missed_calls, 1);
        assert_eq!(agg.calls_by_status.busy, 1);
        assert_eq!(agg.calls_by_type.outgoing, 1);
    }

    #[test]
    fn conversion_rate_has_one_decimal() {
        let mut calls: Vec<CallLog> = (0..3).map(|i| call_fixture(&format!("c{i}"))).collect();
        calls[0].ticket_created = true;
        for call in &mut calls {
            call.user_id = Some("agent_1".into());
            call.user_name = Some("Sam Field".into());
        }
        let stats = analytics(&calls);
        // 1 of 3 calls converted: 33.3, not 33.333...
        assert_eq!(stats.summary.call_conversion_rate, 33.3);
        assert_eq!(stats.agent_performance.len(), 1);
        assert_eq!(stats.agent_performance[0].conversion_rate, 33.3);
    }

    #[test]
    fn busy_hours_top_five_descending() {
        let base = Utc.with_ymd_and_hms(2025, 8, 18, 0, 0, 0).unwrap();
        let mut calls = Vec::new();
        // Hour h gets h calls, hours 1..=7.
        for hour in 1..=7u32 {
            for i in 0..hour {
                let mut call = call_fixture(&format!("c{hour}_{i}"));
                call.started_at = base + Duration::hours(i64::from(hour));
                calls.push(call);
            }
        }
        let stats = analytics(&calls);
        let hours: Vec<u32> = stats.summary.busy_hours.iter().map(|b| b.hour).collect();
        assert_eq!(hours, vec![7, 6, 5, 4, 3]);
        assert_eq!(stats.summary.busy_hours[0].call_count, 7);
    }

    #[test]
    fn histograms_cover_hour_and_weekday() {
        // Monday 2025-08-18 at 09:00 and 14:00.
        let monday_morning = Utc.with_ymd_and_hms(2025, 8, 18, 9, 0, 0).unwrap();
        let monday_afternoon = Utc.with_ymd_and_hms(2025, 8, 18, 14, 0, 0).unwrap();
        let mut a = call_fixture("a");
        a.started_at = monday_morning;
        let mut b = call_fixture("b");
        b.started_at = monday_afternoon;

        let stats = analytics(&[a, b]);
        assert_eq!(stats.call_patterns.by_hour.get(&9), Some(&1));
        assert_eq!(stats.call_patterns.by_hour.get(&14), Some(&1));
        assert_eq!(stats.call_patterns.by_day.get("Monday"), Some(&2));
    }

    #[test]
    fn agent_rollup_response_time_ignores_zeroes() {
        let mut a = call_fixture("a");
        a.user_id = Some("agent_1".into());
        a.response_time = 4;
        let mut b = call_fixture("b");
        b.user_id = Some("agent_1".into());
        b.response_time = 0; // unknown, excluded from the mean

        let stats = analytics(&[a, b]);
        assert_eq!(stats.agent_performance[0].average_response_time, 4.0);
    }

    #[test]
    fn phone_stats_empty_is_zero() {
        let stats = phone_stats(&[]);
        assert_eq!(stats.total_calls, 0);
        assert_eq!(stats.average_duration, 0);
        assert_eq!(stats.conversion_rate, 0.0);
        assert!(stats.last_call_date.is_none());
    }

    #[test]
    fn type_split_percentages_sum_close_to_hundred() {
        let mut calls: Vec<CallLog> = (0..4).map(|i| call_fixture(&format!("c{i}"))).collect();
        calls[0].call_type = CallType::Incoming;
        calls[1].call_type = CallType::Incoming;
        calls[2].call_type = CallType::Outgoing;
        calls[3].call_type = CallType::Missed;
        let stats = analytics(&calls);
        assert_eq!(stats.call_patterns.by_type.incoming, 50.0);
        assert_eq!(stats.call_patterns.by_type.outgoing, 25.0);
        assert_eq!(stats.call_patterns.by_type.missed, 25.0);
    }
}
