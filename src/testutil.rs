// ABOUTME: Shared unit-test fixtures for tickets and call logs
// ABOUTME: Compiled only under cfg(test)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use chrono::{Duration, Utc};

use crate::models::{
    is_business_hours, CallLog, CallStatus, CallType, Priority, Stage, Ticket, TicketStatus,
};

/// A plain open support ticket created an hour ago with a 24h SLA window.
pub fn ticket_fixture(id: &str) -> Ticket {
    let created = Utc::now() - Duration::hours(1);
    Ticket {
        id: id.to_owned(),
        ticket_number: "TKT-2025-08-001".into(),
        contact_name: "Jane Porter".into(),
        phone_number: "+1 (555) 010-2000".into(),
        email: "jane.porter@example.com".into(),
        company: "Porter Logistics".into(),
        subject: "Cannot access dashboard".into(),
        description: "Login loops back to the sign-in page".into(),
        status: TicketStatus::Open,
        priority: Priority::Medium,
        category: "support".into(),
        source: "phone".into(),
        created_at: created,
        updated_at: created,
        last_activity: created,
        due_date: Some(created + Duration::hours(24)),
        assignee: None,
        team: None,
        stage: Stage::Prospect,
        deal_value: 0.0,
        next_follow_up: None,
        conversion_probability: 0,
        resolution: None,
        resolution_date: None,
        resolution_time_minutes: None,
        call_log_id: None,
        organization_id: Some("org_demo".into()),
        tags: vec![],
        notes: vec![],
    }
}

/// An answered incoming call from half an hour ago.
pub fn call_fixture(id: &str) -> CallLog {
    let started = Utc::now() - Duration::minutes(30);
    CallLog {
        id: id.to_owned(),
        call_number: "CALL-2025-08-001".into(),
        phone_number: "+1 (555) 010-2000".into(),
        contact_name: "Jane Porter".into(),
        company: "Porter Logistics".into(),
        call_type: CallType::Incoming,
        duration: 180,
        status: CallStatus::Answered,
        quality: 4,
        started_at: started,
        ended_at: Some(started + Duration::seconds(180)),
        is_business_hours: is_business_hours(started),
        organization_id: Some("org_demo".into()),
        team_id: Some("team_support".into()),
        user_id: None,
        user_name: None,
        outcome: None,
        call_notes: String::new(),
        follow_up_required: false,
        follow_up_date: None,
        recording_url: None,
        response_time: 0,
        tags: vec![],
        ticket_id: None,
        ticket_created: false,
        created_at: started,
        updated_at: started,
    }
}
