// ABOUTME: Server-sent event streams with scripted demo events and heartbeats
// ABOUTME: Demo generator only: events come from fixed timers, not a real event bus
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # SSE Demo Streams
//!
//! Long-lived streams for dashboard development. Every connection gets a
//! `connected` event immediately; the call-logs stream then emits two
//! scripted demo events on fixed timers, and both streams heartbeat on the
//! configured interval. Dropping the response tears down the per-connection
//! timers, so disconnects clean up without bookkeeping.

use std::convert::Infallible;
use std::time::Duration;

use async_stream::stream;
use axum::extract::State;
use axum::response::sse::{Event, Sse};
use chrono::Utc;
use futures_util::Stream;
use serde_json::json;
use tracing::debug;

use super::AppState;

/// Seconds until the scripted demo call event.
const DEMO_CALL_DELAY_SECS: u64 = 5;
/// Seconds until the scripted demo analytics event.
const DEMO_ANALYTICS_DELAY_SECS: u64 = 10;

fn connected_event(stream_name: &str) -> Event {
    Event::default().event("connected").data(
        json!({
            "type": "connected",
            "stream": stream_name,
            "timestamp": Utc::now(),
        })
        .to_string(),
    )
}

fn heartbeat_event() -> Event {
    Event::default().event("heartbeat").data(
        json!({
            "type": "heartbeat",
            "timestamp": Utc::now(),
        })
        .to_string(),
    )
}

/// `GET /api/tickets/stream`
pub async fn tickets_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let heartbeat = Duration::from_secs(state.config.sse.heartbeat_seconds);
    debug!("ticket stream connected");

    Sse::new(stream! {
        yield Ok(connected_event("tickets"));
        loop {
            tokio::time::sleep(heartbeat).await;
            yield Ok(heartbeat_event());
        }
    })
}

/// `GET /api/call-logs/stream`
pub async fn call_logs_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let heartbeat = Duration::from_secs(state.config.sse.heartbeat_seconds);
    debug!("call-log stream connected");

    Sse::new(stream! {
        yield Ok(connected_event("call-logs"));

        tokio::time::sleep(Duration::from_secs(DEMO_CALL_DELAY_SECS)).await;
        yield Ok(Event::default().event("CALL_LOG_CREATED").data(
            json!({
                "type": "CALL_LOG_CREATED",
                "demo": true,
                "callLog": {
                    "phoneNumber": "+1 (555) 010-7788",
                    "contactName": "Demo Caller",
                    "callType": "incoming",
                    "status": "answered",
                    "duration": 95,
                    "startedAt": Utc::now(),
                },
                "timestamp": Utc::now(),
            })
            .to_string(),
        ));

        tokio::time::sleep(Duration::from_secs(
            DEMO_ANALYTICS_DELAY_SECS - DEMO_CALL_DELAY_SECS,
        ))
        .await;
        yield Ok(Event::default().event("CALL_ANALYTICS_UPDATED").data(
            json!({
                "type": "CALL_ANALYTICS_UPDATED",
                "demo": true,
                "summary": { "totalCalls": 1, "answeredCalls": 1 },
                "timestamp": Utc::now(),
            })
            .to_string(),
        ));

        loop {
            tokio::time::sleep(heartbeat).await;
            yield Ok(heartbeat_event());
        }
    })
}
