// ABOUTME: Ticket endpoints: list/create/update, notes, assignment, resolution, stats
// ABOUTME: Every response shapes tickets through TicketView so SLA fields are derived on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{
    self, Assignee, Note, NoteType, Priority, Stage, Ticket, TicketStatus, TicketView,
};
use crate::query::filter::TicketListParams;
use crate::query::sort::{self, TicketSortKey};
use crate::query::{paginate, PageSpec, Pagination, SortOrder, TicketFilter};
use crate::response::ApiResponse;

const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketListData {
    pub tickets: Vec<TicketView>,
    pub pagination: Pagination,
}

/// `GET /api/tickets`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TicketListParams>,
) -> AppResult<Json<ApiResponse<TicketListData>>> {
    let filter = TicketFilter::from_params(&params)?;
    let key = TicketSortKey::from_param(params.sort_by.as_deref());
    let order = SortOrder::from_param(params.sort_order.as_deref());
    let spec = PageSpec::new(params.page, params.limit, DEFAULT_PAGE_SIZE);

    let mut tickets = filter.apply(state.store.list_tickets().await?);
    sort::sort_tickets(&mut tickets, key, order);
    let (page, pagination) = paginate(tickets, spec);

    let now = Utc::now();
    let views = page.into_iter().map(|t| TicketView::of(t, now)).collect();
    Ok(Json(ApiResponse::data(TicketListData {
        tickets: views,
        pagination,
    })))
}

/// `GET /api/tickets/:id`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TicketView>>> {
    let ticket = fetch(&state, &id).await?;
    Ok(Json(ApiResponse::data(TicketView::of(ticket, Utc::now()))))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateTicketRequest {
    pub contact_name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub source: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub team: Option<String>,
    pub stage: Option<Stage>,
    pub deal_value: Option<f64>,
    pub organization_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// `POST /api/tickets`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateTicketRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TicketView>>)> {
    let contact_name = required(&body.contact_name, "contactName")?;
    let phone_number = required(&body.phone_number, "phoneNumber")?;
    let subject = required(&body.subject, "subject")?;

    let now = Utc::now();
    let ticket = Ticket {
        id: models::generate_id("ticket"),
        ticket_number: models::display_number("TKT", now),
        contact_name,
        phone_number,
        email: body.email.unwrap_or_default(),
        company: body.company.unwrap_or_default(),
        subject,
        description: body.description.unwrap_or_default(),
        status: TicketStatus::New,
        priority: body.priority.unwrap_or_default(),
        category: body.category.unwrap_or_else(|| "support".to_owned()),
        source: body.source.unwrap_or_else(|| "web".to_owned()),
        created_at: now,
        updated_at: now,
        last_activity: now,
        due_date: body.due_date,
        assignee: None,
        team: body.team,
        stage: body.stage.unwrap_or_default(),
        deal_value: body.deal_value.unwrap_or(0.0),
        next_follow_up: None,
        conversion_probability: 0,
        resolution: None,
        resolution_date: None,
        resolution_time_minutes: None,
        call_log_id: None,
        organization_id: body.organization_id,
        tags: body.tags.unwrap_or_default(),
        notes: vec![],
    };
    state.store.put_ticket(ticket.clone()).await?;
    info!(ticket_id = %ticket.id, "ticket created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            TicketView::of(ticket, now),
            "Ticket created",
        )),
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTicketRequest {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub category: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub team: Option<String>,
    pub stage: Option<Stage>,
    pub deal_value: Option<f64>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub conversion_probability: Option<u8>,
    pub tags: Option<Vec<String>>,
}

/// `PUT /api/tickets/:id` — partial update of the mutable fields.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTicketRequest>,
) -> AppResult<Json<ApiResponse<TicketView>>> {
    let mut ticket = fetch(&state, &id).await?;
    let now = Utc::now();

    if let Some(subject) = body.subject {
        ticket.subject = subject;
    }
    if let Some(description) = body.description {
        ticket.description = description;
    }
    if let Some(status) = body.status {
        ticket.status = status;
    }
    if let Some(priority) = body.priority {
        ticket.priority = priority;
    }
    if let Some(category) = body.category {
        ticket.category = category;
    }
    if let Some(due_date) = body.due_date {
        ticket.due_date = Some(due_date);
    }
    if let Some(team) = body.team {
        ticket.team = Some(team);
    }
    if let Some(stage) = body.stage {
        ticket.stage = stage;
    }
    if let Some(deal_value) = body.deal_value {
        ticket.deal_value = deal_value;
    }
    if let Some(next_follow_up) = body.next_follow_up {
        ticket.next_follow_up = Some(next_follow_up);
    }
    if let Some(probability) = body.conversion_probability {
        ticket.conversion_probability = probability.min(100);
    }
    if let Some(tags) = body.tags {
        ticket.tags = tags;
    }
    ticket.touch(now);
    state.store.put_ticket(ticket.clone()).await?;

    Ok(Json(ApiResponse::with_message(
        TicketView::of(ticket, now),
        "Ticket updated",
    )))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesData {
    pub notes: Vec<Note>,
}

/// `GET /api/tickets/:id/notes`
pub async fn list_notes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<NotesData>>> {
    let ticket = fetch(&state, &id).await?;
    Ok(Json(ApiResponse::data(NotesData {
        notes: ticket.notes,
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddNoteRequest {
    pub content: Option<String>,
    pub author: Option<String>,
    pub author_id: Option<String>,
    #[serde(rename = "type")]
    pub note_type: Option<NoteType>,
}

/// `POST /api/tickets/:id/notes` — append-only.
pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AddNoteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Note>>)> {
    let content = body
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::missing_field("content"))?
        .to_owned();

    let mut ticket = fetch(&state, &id).await?;
    let now = Utc::now();
    let note = Note {
        id: models::generate_id("note"),
        content,
        author: body.author.unwrap_or_else(|| "Agent".to_owned()),
        author_id: body.author_id.unwrap_or_default(),
        created_at: now,
        note_type: body.note_type.unwrap_or(NoteType::Agent),
    };
    ticket.append_note(note.clone(), now);
    state.store.put_ticket(ticket).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(note, "Note added")),
    ))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignRequest {
    pub assignee: Option<Assignee>,
    pub team: Option<String>,
}

/// `POST /api/tickets/:id/assign`
pub async fn assign(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AssignRequest>,
) -> AppResult<Json<ApiResponse<TicketView>>> {
    let assignee = body
        .assignee
        .ok_or_else(|| AppError::missing_field("assignee"))?;

    let mut ticket = fetch(&state, &id).await?;
    let now = Utc::now();
    let note = Note {
        id: models::generate_id("note"),
        content: format!("Assigned to {}", assignee.name),
        author: "System".into(),
        author_id: "system".into(),
        created_at: now,
        note_type: NoteType::Assignment,
    };
    ticket.assignee = Some(assignee);
    if let Some(team) = body.team {
        ticket.team = Some(team);
    }
    if ticket.status == TicketStatus::New {
        ticket.status = TicketStatus::Open;
    }
    ticket.append_note(note, now);
    state.store.put_ticket(ticket.clone()).await?;
    info!(ticket_id = %ticket.id, "ticket assigned");

    Ok(Json(ApiResponse::with_message(
        TicketView::of(ticket, now),
        "Ticket assigned",
    )))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolveRequest {
    pub resolution: Option<String>,
    pub author: Option<String>,
    pub author_id: Option<String>,
}

/// `POST /api/tickets/:id/resolve`
pub async fn resolve(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ResolveRequest>,
) -> AppResult<Json<ApiResponse<TicketView>>> {
    let resolution = body
        .resolution
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .ok_or_else(|| AppError::missing_field("resolution"))?
        .to_owned();

    let mut ticket = fetch(&state, &id).await?;
    let now = Utc::now();
    let note = Note {
        id: models::generate_id("note"),
        content: resolution.clone(),
        author: body.author.unwrap_or_else(|| "Agent".to_owned()),
        author_id: body.author_id.unwrap_or_default(),
        created_at: now,
        note_type: NoteType::Resolution,
    };
    ticket.status = TicketStatus::Resolved;
    ticket.resolution = Some(resolution);
    ticket.resolution_date = Some(now);
    ticket.resolution_time_minutes = Some((now - ticket.created_at).num_minutes());
    ticket.append_note(note, now);
    state.store.put_ticket(ticket.clone()).await?;
    info!(ticket_id = %ticket.id, "ticket resolved");

    Ok(Json(ApiResponse::with_message(
        TicketView::of(ticket, now),
        "Ticket resolved",
    )))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_priority: BTreeMap<String, usize>,
    pub overdue: usize,
    pub recent: Vec<TicketView>,
}

/// `GET /api/tickets/stats` — dashboard summary counters.
pub async fn stats(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<TicketStats>>> {
    let tickets = state.store.list_tickets().await?;
    let now = Utc::now();

    let mut by_status: BTreeMap<String, usize> = BTreeMap::new();
    let mut by_priority: BTreeMap<String, usize> = BTreeMap::new();
    for ticket in &tickets {
        *by_status.entry(ticket.status.as_str().to_owned()).or_insert(0) += 1;
        *by_priority
            .entry(ticket.priority.as_str().to_owned())
            .or_insert(0) += 1;
    }

    let views: Vec<TicketView> = tickets
        .into_iter()
        .map(|t| TicketView::of(t, now))
        .collect();
    let overdue = views.iter().filter(|v| v.is_overdue).count();

    let mut recent = views.clone();
    recent.sort_by(|a, b| b.ticket.created_at.cmp(&a.ticket.created_at));
    recent.truncate(5);

    Ok(Json(ApiResponse::data(TicketStats {
        total: views.len(),
        by_status,
        by_priority,
        overdue,
        recent,
    })))
}

async fn fetch(state: &AppState, id: &str) -> AppResult<Ticket> {
    state
        .store
        .get_ticket(id)
        .await?
        .ok_or_else(|| AppError::not_found("Ticket"))
}

fn required(field: &Option<String>, name: &str) -> AppResult<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| AppError::missing_field(name))
}
