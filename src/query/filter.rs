// ABOUTME: Filter predicates over ticket and call-log collections
// ABOUTME: Parses wire query parameters into typed filters with AND composition
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! Typed filters built from flat query-string parameters.
//!
//! Contract: filters compose with logical AND; an absent or empty parameter
//! never excludes a record; string equality is case-insensitive; `search` is
//! a case-insensitive substring match; date bounds are inclusive and compare
//! parsed instants; tags use OR semantics across a comma-separated list.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::errors::{AppError, AppResult};
use crate::models::{CallLog, Ticket};

/// Wire-level query parameters for `GET /api/tickets`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketListParams {
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub assigned_to: Option<String>,
    pub team: Option<String>,
    pub organization_id: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub tags: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Wire-level query parameters for `GET /api/call-logs`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallLogListParams {
    pub organization_id: Option<String>,
    pub team_id: Option<String>,
    pub user_id: Option<String>,
    pub call_type: Option<String>,
    pub status: Option<String>,
    pub phone_number: Option<String>,
    pub contact_name: Option<String>,
    pub search: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub min_duration: Option<u32>,
    pub max_duration: Option<u32>,
    pub has_recording: Option<String>,
    pub has_ticket: Option<String>,
    pub business_hours_only: Option<String>,
    pub tags: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Typed ticket filter; every field is optional and ANDed when present.
#[derive(Debug, Default, Clone)]
pub struct TicketFilter {
    status: Option<String>,
    priority: Option<String>,
    category: Option<String>,
    assigned_to: Option<String>,
    team: Option<String>,
    organization_id: Option<String>,
    search: Option<String>,
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
    tags: Vec<String>,
}

impl TicketFilter {
    /// Build a typed filter from wire parameters.
    ///
    /// # Errors
    /// Returns `InvalidInput` when a supplied date bound fails to parse.
    pub fn from_params(params: &TicketListParams) -> AppResult<Self> {
        Ok(Self {
            status: normalize(&params.status),
            priority: normalize(&params.priority),
            category: normalize(&params.category),
            assigned_to: normalize(&params.assigned_to),
            team: normalize(&params.team),
            organization_id: normalize(&params.organization_id),
            search: normalize(&params.search),
            date_from: parse_date(&params.date_from, "dateFrom")?,
            date_to: parse_date(&params.date_to, "dateTo")?,
            tags: split_tags(&params.tags),
        })
    }

    /// Whether a single ticket satisfies every supplied predicate.
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        eq_param(&self.status, ticket.status.as_str())
            && eq_param(&self.priority, ticket.priority.as_str())
            && eq_param(&self.category, &ticket.category)
            && eq_opt_param(
                &self.assigned_to,
                ticket.assignee.as_ref().map(|a| a.id.as_str()),
            )
            && eq_opt_param(&self.team, ticket.team.as_deref())
            && eq_opt_param(
                &self.organization_id,
                ticket.organization_id.as_deref(),
            )
            && self.matches_search(ticket)
            && date_in_range(ticket.created_at, self.date_from, self.date_to)
            && tags_overlap(&self.tags, &ticket.tags)
    }

    pub fn apply(&self, tickets: Vec<Ticket>) -> Vec<Ticket> {
        tickets.into_iter().filter(|t| self.matches(t)).collect()
    }

    fn matches_search(&self, ticket: &Ticket) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        contains_ci(&ticket.contact_name, needle)
            || contains_ci(&ticket.phone_number, needle)
            || contains_ci(&ticket.company, needle)
            || contains_ci(&ticket.subject, needle)
            || ticket.notes.iter().any(|n| contains_ci(&n.content, needle))
    }
}

/// Typed call-log filter; every field is optional and ANDed when present.
#[derive(Debug, Default, Clone)]
pub struct CallLogFilter {
    organization_id: Option<String>,
    team_id: Option<String>,
    user_id: Option<String>,
    call_type: Option<String>,
    status: Option<String>,
    phone_number: Option<String>,
    contact_name: Option<String>,
    search: Option<String>,
    date_from: Option<DateTime<Utc>>,
    date_to: Option<DateTime<Utc>>,
    min_duration: Option<u32>,
    max_duration: Option<u32>,
    has_recording: Option<bool>,
    has_ticket: Option<bool>,
    business_hours_only: bool,
    tags: Vec<String>,
}

impl CallLogFilter {
    /// Build a typed filter from wire parameters.
    ///
    /// # Errors
    /// Returns `InvalidInput` when a supplied date bound fails to parse.
    pub fn from_params(params: &CallLogListParams) -> AppResult<Self> {
        Ok(Self {
            organization_id: normalize(&params.organization_id),
            team_id: normalize(&params.team_id),
            user_id: normalize(&params.user_id),
            call_type: normalize(&params.call_type),
            status: normalize(&params.status),
            phone_number: normalize(&params.phone_number),
            contact_name: normalize(&params.contact_name),
            search: normalize(&params.search),
            date_from: parse_date(&params.date_from, "dateFrom")?,
            date_to: parse_date(&params.date_to, "dateTo")?,
            min_duration: params.min_duration,
            max_duration: params.max_duration,
            has_recording: parse_flag(&params.has_recording),
            has_ticket: parse_flag(&params.has_ticket),
            business_hours_only: parse_flag(&params.business_hours_only) == Some(true),
            tags: split_tags(&params.tags),
        })
    }

    /// Scoping-only variant used by the analytics endpoint.
    pub fn scope(
        organization_id: Option<String>,
        team_id: Option<String>,
        user_id: Option<String>,
        date_from: Option<String>,
        date_to: Option<String>,
    ) -> AppResult<Self> {
        Ok(Self {
            organization_id: normalize(&organization_id),
            team_id: normalize(&team_id),
            user_id: normalize(&user_id),
            date_from: parse_date(&date_from, "dateFrom")?,
            date_to: parse_date(&date_to, "dateTo")?,
            ..Self::default()
        })
    }

    /// Whether a single call log satisfies every supplied predicate.
    #[must_use]
    pub fn matches(&self, call: &CallLog) -> bool {
        eq_opt_param(&self.organization_id, call.organization_id.as_deref())
            && eq_opt_param(&self.team_id, call.team_id.as_deref())
            && eq_opt_param(&self.user_id, call.user_id.as_deref())
            && eq_param(&self.call_type, call.call_type.as_str())
            && eq_param(&self.status, call.status.as_str())
            && self
                .phone_number
                .as_ref()
                .map_or(true, |p| contains_ci(&call.phone_number, p))
            && self
                .contact_name
                .as_ref()
                .map_or(true, |n| contains_ci(&call.contact_name, n))
            && self.matches_search(call)
            && date_in_range(call.started_at, self.date_from, self.date_to)
            && self.min_duration.map_or(true, |min| call.duration >= min)
            && self.max_duration.map_or(true, |max| call.duration <= max)
            && self
                .has_recording
                .map_or(true, |want| call.recording_url.is_some() == want)
            && self
                .has_ticket
                .map_or(true, |want| call.ticket_created == want)
            && (!self.business_hours_only || call.is_business_hours)
            && tags_overlap(&self.tags, &call.tags)
    }

    pub fn apply(&self, calls: Vec<CallLog>) -> Vec<CallLog> {
        calls.into_iter().filter(|c| self.matches(c)).collect()
    }

    fn matches_search(&self, call: &CallLog) -> bool {
        let Some(needle) = &self.search else {
            return true;
        };
        contains_ci(&call.contact_name, needle)
            || contains_ci(&call.company, needle)
            || contains_ci(&call.phone_number, needle)
            || contains_ci(&call.call_notes, needle)
            || contains_ci(&call.call_number, needle)
    }
}

/// Empty strings count as absent so `?status=` is a no-op.
fn normalize(param: &Option<String>) -> Option<String> {
    param
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

fn parse_date(param: &Option<String>, field: &str) -> AppResult<Option<DateTime<Utc>>> {
    match param.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| AppError::invalid_input(format!("{field} is not a valid RFC 3339 date"))),
    }
}

/// Tri-state boolean flag: `"true"` / `"false"`, anything else is absent.
fn parse_flag(param: &Option<String>) -> Option<bool> {
    match param.as_deref().map(str::trim) {
        Some(v) if v.eq_ignore_ascii_case("true") => Some(true),
        Some(v) if v.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn split_tags(param: &Option<String>) -> Vec<String> {
    param
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

fn eq_param(param: &Option<String>, value: &str) -> bool {
    param
        .as_deref()
        .map_or(true, |p| p.eq_ignore_ascii_case(value))
}

fn eq_opt_param(param: &Option<String>, value: Option<&str>) -> bool {
    match param.as_deref() {
        None => true,
        Some(p) => value.is_some_and(|v| p.eq_ignore_ascii_case(v)),
    }
}

fn contains_ci(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}

/// Inclusive on both bounds.
fn date_in_range(
    ts: DateTime<Utc>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    from.map_or(true, |f| ts >= f) && to.map_or(true, |t| ts <= t)
}

/// OR semantics: a record matches when it carries any of the requested tags.
fn tags_overlap(wanted: &[String], actual: &[String]) -> bool {
    wanted.is_empty()
        || wanted
            .iter()
            .any(|w| actual.iter().any(|a| a.eq_ignore_ascii_case(w)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{call_fixture, ticket_fixture};
    use chrono::Duration;

    #[test]
    fn empty_filter_is_identity() {
        let tickets: Vec<Ticket> = (0..4).map(|i| ticket_fixture(&format!("t{i}"))).collect();
        let filter = TicketFilter::from_params(&TicketListParams::default()).unwrap();
        let out = filter.apply(tickets.clone());
        assert_eq!(out.len(), tickets.len());
    }

    #[test]
    fn empty_string_params_are_no_ops() {
        let params = TicketListParams {
            status: Some(String::new()),
            search: Some("  ".into()),
            ..Default::default()
        };
        let filter = TicketFilter::from_params(&params).unwrap();
        assert!(filter.matches(&ticket_fixture("t1")));
    }

    #[test]
    fn status_filter_is_case_insensitive() {
        let mut ticket = ticket_fixture("t1");
        ticket.status = crate::models::TicketStatus::InProgress;
        let params = TicketListParams {
            status: Some("IN-PROGRESS".into()),
            ..Default::default()
        };
        let filter = TicketFilter::from_params(&params).unwrap();
        assert!(filter.matches(&ticket));
    }

    #[test]
    fn filters_compose_with_and() {
        let mut call = call_fixture("c1");
        call.call_type = crate::models::CallType::Missed;
        call.ticket_created = false;
        call.ticket_id = None;

        let params = CallLogListParams {
            call_type: Some("missed".into()),
            has_ticket: Some("false".into()),
            ..Default::default()
        };
        let filter = CallLogFilter::from_params(&params).unwrap();
        assert!(filter.matches(&call));

        // Same record fails once one leg of the conjunction flips.
        call.ticket_created = true;
        assert!(!filter.matches(&call));
    }

    #[test]
    fn search_is_substring_and_case_insensitive() {
        let mut ticket = ticket_fixture("t1");
        ticket.company = "Acme Corp".into();
        let params = TicketListParams {
            search: Some("acme".into()),
            ..Default::default()
        };
        let filter = TicketFilter::from_params(&params).unwrap();
        assert!(filter.matches(&ticket));

        let params = TicketListParams {
            search: Some("globex".into()),
            ..Default::default()
        };
        let filter = TicketFilter::from_params(&params).unwrap();
        assert!(!filter.matches(&ticket));
    }

    #[test]
    fn search_reaches_note_contents() {
        let mut ticket = ticket_fixture("t1");
        ticket.notes.push(crate::models::Note {
            id: "n1".into(),
            content: "Escalated to the billing team".into(),
            author: "System".into(),
            author_id: "system".into(),
            created_at: ticket.created_at,
            note_type: crate::models::NoteType::System,
        });
        let params = TicketListParams {
            search: Some("billing".into()),
            ..Default::default()
        };
        let filter = TicketFilter::from_params(&params).unwrap();
        assert!(filter.matches(&ticket));
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let call = call_fixture("c1");
        let exact = call.started_at.to_rfc3339();
        let params = CallLogListParams {
            date_from: Some(exact.clone()),
            date_to: Some(exact),
            ..Default::default()
        };
        let filter = CallLogFilter::from_params(&params).unwrap();
        assert!(filter.matches(&call));
    }

    #[test]
    fn invalid_date_is_rejected() {
        let params = CallLogListParams {
            date_from: Some("yesterday".into()),
            ..Default::default()
        };
        assert!(CallLogFilter::from_params(&params).is_err());
    }

    #[test]
    fn duration_range_bounds() {
        let mut call = call_fixture("c1");
        call.duration = 120;
        let params = CallLogListParams {
            min_duration: Some(60),
            max_duration: Some(180),
            ..Default::default()
        };
        let filter = CallLogFilter::from_params(&params).unwrap();
        assert!(filter.matches(&call));

        call.duration = 200;
        assert!(!filter.matches(&call));
    }

    #[test]
    fn tags_use_or_semantics() {
        let mut call = call_fixture("c1");
        call.tags = vec!["enterprise".into(), "follow_up".into()];
        let params = CallLogListParams {
            tags: Some("hot_lead, enterprise".into()),
            ..Default::default()
        };
        let filter = CallLogFilter::from_params(&params).unwrap();
        assert!(filter.matches(&call));

        let params = CallLogListParams {
            tags: Some("hot_lead".into()),
            ..Default::default()
        };
        let filter = CallLogFilter::from_params(&params).unwrap();
        assert!(!filter.matches(&call));
    }

    #[test]
    fn business_hours_flag() {
        let mut call = call_fixture("c1");
        call.is_business_hours = false;
        let params = CallLogListParams {
            business_hours_only: Some("true".into()),
            ..Default::default()
        };
        let filter = CallLogFilter::from_params(&params).unwrap();
        assert!(!filter.matches(&call));

        call.is_business_hours = true;
        assert!(filter.matches(&call));
    }

    #[test]
    fn filter_soundness_output_is_subset() {
        let mut calls: Vec<CallLog> = (0..6).map(|i| call_fixture(&format!("c{i}"))).collect();
        for (i, call) in calls.iter_mut().enumerate() {
            call.duration = (i as u32) * 50;
            call.started_at = call.started_at - Duration::hours(i as i64);
        }
        let params = CallLogListParams {
            min_duration: Some(100),
            ..Default::default()
        };
        let filter = CallLogFilter::from_params(&params).unwrap();
        let out = filter.apply(calls.clone());
        assert!(out.len() < calls.len());
        for call in &out {
            assert!(call.duration >= 100);
            assert!(calls.iter().any(|c| c.id == call.id));
        }
    }
}
