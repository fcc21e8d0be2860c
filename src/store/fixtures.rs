// ABOUTME: Demo dataset loaded into the in-memory store when no database is configured
// ABOUTME: Timestamps are relative to startup so SLA states stay plausible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

use chrono::{Duration, Utc};

use crate::models::{
    is_business_hours, Assignee, CallLog, CallStatus, CallType, Note, NoteType, Priority, Role,
    Stage, Ticket, TicketStatus, User,
};

/// Low bcrypt cost keeps demo startup and tests fast; real accounts created
/// through the setup endpoint use the library default.
const FIXTURE_BCRYPT_COST: u32 = 4;

pub const DEMO_ORG_ID: &str = "org_demo";
pub const DEMO_ORG_NAME: &str = "Calldesk Demo";

pub fn demo_users() -> Vec<User> {
    let now = Utc::now();
    let hash = |pw: &str| bcrypt::hash(pw, FIXTURE_BCRYPT_COST).unwrap_or_default();
    vec![
        User {
            id: "user_admin".into(),
            email: "admin@calldesk.io".into(),
            password_hash: hash("Admin@123"),
            first_name: "Avery".into(),
            last_name: "Admin".into(),
            role: Role::SuperAdmin,
            organization_id: DEMO_ORG_ID.into(),
            organization_name: DEMO_ORG_NAME.into(),
            is_active: true,
            created_at: now - Duration::days(90),
        },
        User {
            id: "user_agent_sam".into(),
            email: "sam@calldesk.io".into(),
            password_hash: hash("Agent@123"),
            first_name: "Sam".into(),
            last_name: "Field".into(),
            role: Role::Agent,
            organization_id: DEMO_ORG_ID.into(),
            organization_name: DEMO_ORG_NAME.into(),
            is_active: true,
            created_at: now - Duration::days(60),
        },
        User {
            id: "user_agent_riley".into(),
            email: "riley@calldesk.io".into(),
            password_hash: hash("Agent@123"),
            first_name: "Riley".into(),
            last_name: "Nguyen".into(),
            role: Role::Agent,
            organization_id: DEMO_ORG_ID.into(),
            organization_name: DEMO_ORG_NAME.into(),
            is_active: true,
            created_at: now - Duration::days(45),
        },
    ]
}

pub fn demo_tickets() -> Vec<Ticket> {
    let now = Utc::now();
    let base = |id: &str, number: &str, hours_ago: i64| Ticket {
        id: id.into(),
        ticket_number: number.into(),
        contact_name: String::new(),
        phone_number: String::new(),
        email: String::new(),
        company: String::new(),
        subject: String::new(),
        description: String::new(),
        status: TicketStatus::Open,
        priority: Priority::Medium,
        category: "support".into(),
        source: "phone".into(),
        created_at: now - Duration::hours(hours_ago),
        updated_at: now - Duration::hours(hours_ago),
        last_activity: now - Duration::hours(hours_ago),
        due_date: None,
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
        organization_id: Some(DEMO_ORG_ID.into()),
        tags: vec![],
        notes: vec![],
    };

    let mut healthy = base("ticket_demo_1", "TKT-2025-08-001", 2);
    healthy.contact_name = "Jane Porter".into();
    healthy.phone_number = "+1 (555) 010-2000".into();
    healthy.email = "jane.porter@porterlogistics.com".into();
    healthy.company = "Porter Logistics".into();
    healthy.subject = "Dashboard login loop".into();
    healthy.description = "Login redirects back to the sign-in page on Safari".into();
    healthy.due_date = Some(now + Duration::hours(22));
    healthy.assignee = Some(Assignee {
        id: "user_agent_sam".into(),
        name: "Sam Field".into(),
        email: "sam@calldesk.io".into(),
    });
    healthy.team = Some("team_support".into());
    healthy.tags = vec!["portal".into()];

    let mut at_risk = base("ticket_demo_2", "TKT-2025-08-002", 20);
    at_risk.contact_name = "Marco Diaz".into();
    at_risk.phone_number = "+1 (555) 010-3444".into();
    at_risk.company = "Diaz & Sons".into();
    at_risk.subject = "Pricing question for annual plan".into();
    at_risk.status = TicketStatus::InProgress;
    at_risk.priority = Priority::High;
    at_risk.category = "sales".into();
    at_risk.team = Some("team_sales".into());
    at_risk.stage = Stage::Qualified;
    at_risk.deal_value = 14_400.0;
    at_risk.conversion_probability = 60;
    // Inside the final fifth of its window.
    at_risk.due_date = Some(now + Duration::hours(3));
    at_risk.tags = vec!["hot_lead".into()];

    let mut breached = base("ticket_demo_3", "TKT-2025-08-003", 30);
    breached.contact_name = "Priya Shah".into();
    breached.phone_number = "+1 (555) 010-8120".into();
    breached.company = "Shah Medical".into();
    breached.subject = "Invoice discrepancy on August statement".into();
    breached.priority = Priority::Urgent;
    breached.category = "billing".into();
    breached.due_date = Some(now - Duration::hours(6));
    breached.notes.push(Note {
        id: "note_demo_1".into(),
        content: "Escalated to the billing team".into(),
        author: "Sam Field".into(),
        author_id: "user_agent_sam".into(),
        created_at: now - Duration::hours(12),
        note_type: NoteType::Agent,
    });

    let mut resolved = base("ticket_demo_4", "TKT-2025-08-004", 72);
    resolved.contact_name = "Owen Hale".into();
    resolved.phone_number = "+1 (555) 010-5577".into();
    resolved.company = "Hale Outfitters".into();
    resolved.subject = "Export to CSV missing columns".into();
    resolved.status = TicketStatus::Resolved;
    resolved.resolution = Some("Shipped fix in release 3.2.1".into());
    resolved.resolution_date = Some(now - Duration::hours(24));
    resolved.resolution_time_minutes = Some(48 * 60);

    vec![healthy, at_risk, breached, resolved]
}

pub fn demo_call_logs() -> Vec<CallLog> {
    let now = Utc::now();
    let base = |id: &str, number: &str, hours_ago: i64| {
        let started = now - Duration::hours(hours_ago);
        CallLog {
            id: id.into(),
            call_number: number.into(),
            phone_number: String::new(),
            contact_name: String::new(),
            company: String::new(),
            call_type: CallType::Incoming,
            duration: 0,
            status: CallStatus::Answered,
            quality: 0,
            started_at: started,
            ended_at: None,
            is_business_hours: is_business_hours(started),
            organization_id: Some(DEMO_ORG_ID.into()),
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
    };

    let mut linked = base("call_demo_1", "CALL-2025-08-001", 2);
    linked.phone_number = "+1 (555) 010-2000".into();
    linked.contact_name = "Jane Porter".into();
    linked.company = "Porter Logistics".into();
    linked.duration = 420;
    linked.ended_at = Some(linked.started_at + Duration::seconds(420));
    linked.quality = 4;
    linked.user_id = Some("user_agent_sam".into());
    linked.user_name = Some("Sam Field".into());
    linked.call_notes = "Walked through the Safari login loop".into();
    linked.response_time = 6;
    linked.ticket_id = Some("ticket_demo_1".into());
    linked.ticket_created = true;

    let mut sales = base("call_demo_2", "CALL-2025-08-002", 20);
    sales.phone_number = "+1 (555) 010-3444".into();
    sales.contact_name = "Marco Diaz".into();
    sales.company = "Diaz & Sons".into();
    sales.call_type = CallType::Outgoing;
    sales.duration = 900;
    sales.ended_at = Some(sales.started_at + Duration::seconds(900));
    sales.quality = 5;
    sales.team_id = Some("team_sales".into());
    sales.user_id = Some("user_agent_riley".into());
    sales.user_name = Some("Riley Nguyen".into());
    sales.outcome = Some("demo-scheduled".into());
    sales.response_time = 4;
    sales.recording_url = Some("https://recordings.calldesk.io/call_demo_2.mp3".into());
    sales.tags = vec!["hot_lead".into()];
    sales.ticket_id = Some("ticket_demo_2".into());
    sales.ticket_created = true;

    let mut missed = base("call_demo_3", "CALL-2025-08-003", 5);
    missed.phone_number = "+1 (555) 010-9911".into();
    missed.contact_name = "Unknown Caller".into();
    missed.call_type = CallType::Missed;
    missed.status = CallStatus::Missed;
    missed.follow_up_required = true;
    missed.follow_up_date = Some(now + Duration::hours(19));

    let mut repeat = base("call_demo_4", "CALL-2025-08-004", 50);
    repeat.phone_number = "+1 (555) 010-2000".into();
    repeat.contact_name = "Jane Porter".into();
    repeat.company = "Porter Logistics".into();
    repeat.duration = 180;
    repeat.ended_at = Some(repeat.started_at + Duration::seconds(180));
    repeat.quality = 3;
    repeat.user_id = Some("user_agent_sam".into());
    repeat.user_name = Some("Sam Field".into());
    repeat.response_time = 11;

    vec![linked, sales, missed, repeat]
}
