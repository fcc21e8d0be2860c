// ABOUTME: Query engine over ticket and call-log collections
// ABOUTME: Composes filtering, stable sorting, page-based pagination, and aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Calldesk

//! # Query Engine
//!
//! The structurally interesting core of the service: list endpoints run
//! filter → sort → aggregate → paginate over an owned snapshot of the
//! collection. Filters AND together and absent parameters are no-ops;
//! sorting is stable with insertion order breaking ties; pagination is
//! page-based everywhere; aggregations reflect the filtered set, not the
//! current page.

pub mod aggregate;
pub mod filter;
pub mod sort;

pub use filter::{CallLogFilter, TicketFilter};
pub use sort::{paginate, PageSpec, Pagination, SortOrder};
