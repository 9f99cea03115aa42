//! Testing utilities for the Gantt workspace
//!
//! Shared fixtures and an in-memory record service.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::NaiveDate;
use gantt_core::{FetchError, RecordService};
use gantt_model::{
    Allocation, AllocationChange, ChartRequest, ChartResponse, Effort, Project, Resource, Role,
    SlotBounds, Status,
};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Wednesday used as "today" across fixtures
pub fn wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn allocation(id: &str, project: &str, left: i32, right: i32) -> Allocation {
    Allocation::new(id, project, SlotBounds::new(left, right))
}

pub fn resource(id: &str, name: &str, allocations: Vec<Allocation>) -> Resource {
    allocations
        .into_iter()
        .fold(Resource::new(id, name), Resource::with_allocation)
}

/// Two engineers and a designer over three projects
pub fn sample_response() -> ChartResponse {
    ChartResponse {
        resources: vec![
            resource(
                "r1",
                "Ada Lovelace",
                vec![
                    allocation("a1", "p1", 3, 7).with_effort(Effort::High),
                    allocation("a2", "p2", -2, 1).with_status(Status::Hold),
                ],
            )
            .with_default_role("Engineer"),
            resource("r2", "Grace Hopper", vec![allocation("a3", "p1", 0, 12)])
                .with_default_role("Engineer"),
            resource(
                "r3",
                "Dieter Rams",
                vec![allocation("a4", "p3", 5, 6).with_status(Status::Unavailable)],
            )
            .with_default_role("Designer"),
        ],
        projects: vec![
            Project::new("p1", "Apollo"),
            Project::new("p2", "Gemini"),
            Project::new("p3", "Mercury"),
        ],
        roles: vec![Role("Engineer".into()), Role("Designer".into())],
        project_id: None,
    }
}

/// In-memory [`RecordService`]
///
/// Queued responses are returned in order; once the queue is empty the
/// default response is returned. Every request and save is recorded.
#[derive(Debug, Default)]
pub struct FakeRecordService {
    default: Mutex<Option<ChartResponse>>,
    queued: Mutex<VecDeque<Result<ChartResponse, FetchError>>>,
    requests: Mutex<Vec<ChartRequest>>,
    saves: Mutex<Vec<AllocationChange>>,
    save_error: Mutex<Option<FetchError>>,
}

impl FakeRecordService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(response: ChartResponse) -> Self {
        let fake = Self::new();
        *fake.default.lock() = Some(response);
        fake
    }

    pub fn push_response(&self, response: Result<ChartResponse, FetchError>) {
        self.queued.lock().push_back(response);
    }

    pub fn fail_saves(&self, error: FetchError) {
        *self.save_error.lock() = Some(error);
    }

    pub fn requests(&self) -> Vec<ChartRequest> {
        self.requests.lock().clone()
    }

    pub fn saves(&self) -> Vec<AllocationChange> {
        self.saves.lock().clone()
    }
}

#[async_trait]
impl RecordService for FakeRecordService {
    async fn fetch(&self, request: ChartRequest) -> Result<ChartResponse, FetchError> {
        self.requests.lock().push(request);
        if let Some(next) = self.queued.lock().pop_front() {
            return next;
        }
        Ok(self.default.lock().clone().unwrap_or_default())
    }

    async fn save_allocation(&self, change: AllocationChange) -> Result<(), FetchError> {
        if let Some(error) = self.save_error.lock().clone() {
            return Err(error);
        }
        self.saves.lock().push(change);
        Ok(())
    }
}
