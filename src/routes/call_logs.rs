// ABOUTME: Call-log endpoints: list with aggregations, intake with auto-ticket, history, analytics
// ABOUTME: The intake handler persists call and ticket through one atomic store operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{CallLog, TicketView};
use crate::query::aggregate::{self, CallAggregations, CallAnalytics, PhoneStats};
use crate::query::filter::CallLogListParams;
use crate::query::sort::{self, CallLogSortKey};
use crate::query::{paginate, CallLogFilter, PageSpec, Pagination, SortOrder};
use crate::response::ApiResponse;
use crate::workflow::{self, CallIntake};

const DEFAULT_PAGE_SIZE: u32 = 20;
const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLogListData {
    pub call_logs: Vec<CallLog>,
    pub pagination: Pagination,
    /// Computed over the filtered set, not the current page.
    pub aggregations: CallAggregations,
}

/// `GET /api/call-logs`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CallLogListParams>,
) -> AppResult<Json<ApiResponse<CallLogListData>>> {
    let filter = CallLogFilter::from_params(&params)?;
    let key = CallLogSortKey::from_param(params.sort_by.as_deref());
    let order = SortOrder::from_param(params.sort_order.as_deref());
    let spec = PageSpec::new(params.page, params.limit, DEFAULT_PAGE_SIZE);

    let mut calls = filter.apply(state.store.list_call_logs().await?);
    sort::sort_call_logs(&mut calls, key, order);
    let aggregations = aggregate::summarize(&calls);
    let (page, pagination) = paginate(calls, spec);

    Ok(Json(ApiResponse::data(CallLogListData {
        call_logs: page,
        pagination,
        aggregations,
    })))
}

/// `GET /api/call-logs/:id`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CallLog>>> {
    let call = state
        .store
        .get_call_log(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Call log"))?;
    Ok(Json(ApiResponse::data(call)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallCreatedData {
    pub call_log: CallLog,
    /// Present only when the intake asked for a ticket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticket: Option<TicketView>,
}

/// `POST /api/call-logs` — call intake, optionally auto-creating a linked
/// ticket. Both records are persisted in one atomic repository operation.
pub async fn create(
    State(state): State<AppState>,
    Json(intake): Json<CallIntake>,
) -> AppResult<(StatusCode, Json<ApiResponse<CallCreatedData>>)> {
    let now = Utc::now();
    let mut call = workflow::build_call_log(&intake, now)?;
    let ticket = intake
        .wants_ticket()
        .then(|| workflow::build_ticket_from_call(&mut call, now));

    state
        .store
        .create_call_with_ticket(call.clone(), ticket.clone())
        .await?;
    info!(
        call_id = %call.id,
        ticket_created = call.ticket_created,
        "call logged"
    );

    let message = if ticket.is_some() {
        "Call logged and ticket created"
    } else {
        "Call logged"
    };
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            CallCreatedData {
                call_log: call,
                ticket: ticket.map(|t| TicketView::of(t, now)),
            },
            message,
        )),
    ))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone_number: String,
    pub contact_name: String,
    pub company: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHistoryData {
    pub contact_info: Option<ContactInfo>,
    /// Most recent first, capped at ten entries.
    pub calls: Vec<CallLog>,
    pub stats: PhoneStats,
}

/// `GET /api/call-logs/history/:phone_number` — exact-match history for one
/// phone number.
pub async fn history(
    State(state): State<AppState>,
    Path(phone_number): Path<String>,
) -> AppResult<Json<ApiResponse<CallHistoryData>>> {
    let mut calls: Vec<CallLog> = state
        .store
        .list_call_logs()
        .await?
        .into_iter()
        .filter(|c| c.phone_number == phone_number)
        .collect();
    sort::sort_call_logs(&mut calls, CallLogSortKey::StartedAt, SortOrder::Desc);

    let stats = aggregate::phone_stats(&calls);
    let contact_info = calls.first().map(|latest| ContactInfo {
        phone_number: latest.phone_number.clone(),
        contact_name: latest.contact_name.clone(),
        company: latest.company.clone(),
    });
    calls.truncate(HISTORY_LIMIT);

    Ok(Json(ApiResponse::data(CallHistoryData {
        contact_info,
        calls,
        stats,
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsParams {
    pub organization_id: Option<String>,
    pub team_id: Option<String>,
    pub user_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// `GET /api/call-logs/analytics/stats`
pub async fn analytics_stats(
    State(state): State<AppState>,
    Query(params): Query<AnalyticsParams>,
) -> AppResult<Json<ApiResponse<CallAnalytics>>> {
    let filter = CallLogFilter::scope(
        params.organization_id,
        params.team_id,
        params.user_id,
        params.date_from,
        params.date_to,
    )?;
    let calls = filter.apply(state.store.list_call_logs().await?);
    Ok(Json(ApiResponse::data(aggregate::analytics(&calls))))
}
