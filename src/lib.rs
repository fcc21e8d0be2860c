// ABOUTME: Calldesk library root: query engines, storage, auth, and the HTTP surface
// ABOUTME: The calldesk-server binary wires these together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # Calldesk API Service
//!
//! Backend for a call-center/CRM dashboard: tickets, call logs, auth, and
//! analytics over one HTTP/JSON surface. The core is a query-and-aggregation
//! engine (filter, stable sort, page-based pagination, derived metrics) that
//! runs over collections held by a pluggable repository. SLA state is derived
//! on every read; call intake can atomically create a linked ticket; SSE
//! endpoints stream scripted demo events for dashboard development.

pub mod auth;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod query;
pub mod response;
pub mod routes;
pub mod sla;
pub mod store;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testutil;
