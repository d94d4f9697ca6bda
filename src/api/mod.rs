//! HTTP API module for the Settlement Engine.
//!
//! This module provides the REST API endpoints for simulating termination
//! settlements and summarising computed ones.

mod directory;
mod handlers;
mod request;
mod response;
mod state;

pub use directory::{EmployeeDirectory, InMemoryDirectory};
pub use handlers::create_router;
pub use request::{ReportFilterRequest, ReportRequest, SettlementSummaryRequest, SimulateRequest};
pub use response::{
    ApiError, ApiErrorResponse, ReportEntryResponse, ReportFilterResponse, ReportResponse,
    SettlementLines, SettlementResponse, TenureResponse, TypeTotalsResponse,
};
pub use state::AppState;
