//! Gantt chart orchestrator
//!
//! [`GanttChart`] owns the view configuration, the generated grid, the
//! merged resource list and the drag controller. Every command takes
//! `&mut self`; the only async boundary is the [`RecordService`].
//!
//! Refreshes are sequenced: [`GanttChart::begin_refresh`] hands out a
//! ticket, and [`GanttChart::apply_refresh`] drops any response whose
//! ticket is not newer than the last one applied, or was issued before the
//! last view or scope change.

use crate::config::{ChartScope, GanttConfig};
use crate::drag::{DragController, DragMode, DragPreview, DragState, GridMetrics};
use crate::error::{FetchError, GanttError, Result};
use crate::service::RecordService;
use gantt_calendar::{CalendarGrid, Clock, DateRange, Navigation, Slot, SlotGroup, ViewConfig, ViewMode};
use gantt_layout::{merge_into, AllocationGeometry, AllocationLayout, MergeStats, ResourceRow};
use gantt_model::{
    Allocation, AllocationChange, AllocationId, ChartRequest, ChartResponse, FilterSet, Project,
    ProjectId, Resource, Role, SlotBounds,
};

/// Request tagged with its refresh sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshTicket {
    /// Monotonically increasing sequence number
    pub sequence: u64,
    /// Request to send to the record service
    pub request: ChartRequest,
}

/// What [`GanttChart::apply_refresh`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Response merged into the resource list
    Applied(MergeStats),
    /// A newer response was already applied, or the view or scope changed
    /// after the ticket was issued; this one was dropped
    Stale,
}

impl RefreshOutcome {
    /// Whether the response was applied
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Resource allocation chart
pub struct GanttChart<C: Clock> {
    config: GanttConfig,
    clock: C,
    view: ViewConfig,
    grid: CalendarGrid,
    layout: AllocationLayout,
    resources: Vec<Resource>,
    projects: Vec<Project>,
    roles: Vec<Role>,
    filters: FilterSet,
    scope: ChartScope,
    project_id: Option<ProjectId>,
    drag: DragController,
    next_sequence: u64,
    last_applied: Option<u64>,
    // tickets up to this sequence were issued for an earlier view or scope
    view_epoch: u64,
}

impl<C: Clock> GanttChart<C> {
    /// Create a chart showing the configured default view around today
    ///
    /// # Errors
    /// Returns [`GanttError::Config`] when `config` fails validation.
    pub fn new(config: GanttConfig, clock: C) -> Result<Self> {
        config.validate()?;
        let today = clock.today();
        let view = ViewConfig::new(config.default_view.clone(), today);
        let grid = view.grid(today)?;

        tracing::info!(
            "chart created: {} starting {}",
            view.mode(),
            view.start_date()
        );

        Ok(Self {
            layout: config.layout(),
            scope: config.scope.clone(),
            config,
            clock,
            view,
            grid,
            resources: Vec::new(),
            projects: Vec::new(),
            roles: Vec::new(),
            filters: FilterSet::new(),
            project_id: None,
            drag: DragController::new(),
            next_sequence: 0,
            last_applied: None,
            view_epoch: 0,
        })
    }

    // ----- views -----

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GanttConfig {
        &self.config
    }

    /// Current view configuration
    #[inline]
    #[must_use]
    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    /// Current grid
    #[inline]
    #[must_use]
    pub fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    /// Slots of the current grid
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        self.grid.slots()
    }

    /// Header groups of the current grid
    #[inline]
    #[must_use]
    pub fn groups(&self) -> &[SlotGroup] {
        self.grid.groups()
    }

    /// Date range the grid covers
    #[inline]
    #[must_use]
    pub fn date_range(&self) -> DateRange {
        self.grid.date_range()
    }

    /// Merged resource list
    #[inline]
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Projects from the last applied response
    #[inline]
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Roles from the last applied response
    #[inline]
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Project reported by the record service for the current page
    #[inline]
    #[must_use]
    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Record scope
    #[inline]
    #[must_use]
    pub fn scope(&self) -> &ChartScope {
        &self.scope
    }

    /// Active filters
    #[inline]
    #[must_use]
    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    /// Projects matching `text` that are not already filtered on
    #[must_use]
    pub fn project_options(&self, text: &str) -> Vec<&Project> {
        self.filters.project_options(&self.projects, text)
    }

    /// Drag controller state
    #[inline]
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Row views for every resource, rebuilt from current data
    #[must_use]
    pub fn rows(&self) -> Vec<ResourceRow> {
        let total = self.grid.total_slots();
        self.resources
            .iter()
            .map(|resource| ResourceRow::build(resource, total, &self.layout))
            .collect()
    }

    /// Geometry of one allocation on the current grid
    #[must_use]
    pub fn layout(&self, allocation: &Allocation) -> AllocationGeometry {
        self.layout.layout(allocation, self.grid.total_slots())
    }

    /// Geometry of the dragged allocation at its previewed bounds
    #[must_use]
    pub fn drag_preview(&self) -> Option<(AllocationId, AllocationGeometry)> {
        let session = self.drag.session()?;
        let (_, allocation) = self.find_allocation(&session.allocation_id)?;
        let mut preview = allocation.clone();
        preview.set_bounds(session.proposed());
        Some((session.allocation_id.clone(), self.layout(&preview)))
    }

    /// Resource and allocation for an allocation id
    #[must_use]
    pub fn find_allocation(&self, id: &AllocationId) -> Option<(&Resource, &Allocation)> {
        self.resources
            .iter()
            .find_map(|r| r.find_allocation(id).map(|a| (r, a)))
    }

    // ----- view commands -----

    /// Switch view mode, keeping the start date
    ///
    /// Cancels any drag in progress.
    ///
    /// # Errors
    /// Calendar errors leave the previous view and grid in place.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Result<()> {
        let view = self.view.with_mode(mode);
        self.apply_view(view)?;
        tracing::info!("view mode set to {}", self.view.mode());
        Ok(())
    }

    /// Switch view mode from a selector value such as `"1/14"`
    ///
    /// # Errors
    /// [`gantt_calendar::CalendarError::InvalidViewMode`] for malformed
    /// values; the view is unchanged.
    pub fn set_view_str(&mut self, value: &str) -> Result<()> {
        let mode: ViewMode = value.parse()?;
        self.set_view_mode(mode)
    }

    /// Move the window
    ///
    /// # Errors
    /// Calendar errors leave the previous view and grid in place.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<()> {
        let today = self.clock.today();
        let view = self
            .view
            .navigate(navigation, today, self.config.date_shift_days)?;
        self.apply_view(view)?;
        tracing::info!("navigated ({:?}) to {}", navigation, self.view.start_date());
        Ok(())
    }

    /// Jump to a date typed as `YYYY-MM-DD`
    ///
    /// # Errors
    /// [`gantt_calendar::CalendarError::InvalidDate`] for text that is not
    /// a date; the view is unchanged.
    pub fn navigate_to_str(&mut self, text: &str) -> Result<()> {
        let view = self.view.navigate_to_str(text).map_err(|err| {
            tracing::warn!("rejected date {:?}: {}", text, err);
            err
        })?;
        self.apply_view(view)?;
        tracing::info!("navigated to {}", self.view.start_date());
        Ok(())
    }

    fn apply_view(&mut self, view: ViewConfig) -> Result<()> {
        let grid = view.grid(self.clock.today())?;
        if self.drag.cancel() {
            tracing::debug!("drag cancelled by view change");
        }
        self.view = view;
        self.grid = grid;
        self.view_epoch = self.next_sequence;
        Ok(())
    }

    // ----- scope and filters -----

    /// Change the record scope used by later refreshes
    ///
    /// Responses to tickets issued before the change are dropped.
    pub fn set_scope(&mut self, scope: ChartScope) {
        self.scope = scope;
        self.view_epoch = self.next_sequence;
    }

    /// Replace the filters used by later refreshes
    pub fn set_filters(&mut self, filters: FilterSet) {
        self.filters = filters;
    }

    /// Edit the filters used by later refreshes
    pub fn filters_mut(&mut self) -> &mut FilterSet {
        &mut self.filters
    }

    // ----- refresh -----

    /// Build the request for the current view and reserve a sequence number
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.next_sequence += 1;
        let range = self.grid.date_range();
        let mut request = ChartRequest::new(
            range.start_millis(),
            range.end_millis(),
            self.view.mode().slot_size_days(),
        )
        .with_filters(&self.filters);
        match &self.scope {
            ChartScope::All => {}
            ChartScope::Resource(id) => request = request.with_resource(id.clone()),
            ChartScope::Project(id) => request = request.with_project(id.clone()),
        }

        tracing::debug!("refresh #{} issued for {}", self.next_sequence, range.title());
        RefreshTicket {
            sequence: self.next_sequence,
            request,
        }
    }

    /// Fold the result of a ticketed fetch into the chart
    ///
    /// # Errors
    /// Returns [`GanttError::Fetch`] for a failed, non-stale fetch; the
    /// resource list is left untouched.
    pub fn apply_refresh(
        &mut self,
        sequence: u64,
        result: std::result::Result<ChartResponse, FetchError>,
    ) -> Result<RefreshOutcome> {
        if self.last_applied.is_some_and(|last| sequence <= last) {
            tracing::debug!("refresh #{} is stale, dropped", sequence);
            return Ok(RefreshOutcome::Stale);
        }
        if sequence <= self.view_epoch {
            tracing::debug!("refresh #{} was issued for a previous view, dropped", sequence);
            return Ok(RefreshOutcome::Stale);
        }

        let response = result.map_err(|err| {
            tracing::warn!("refresh #{} failed: {}", sequence, err);
            err
        })?;

        let stats = merge_into(&mut self.resources, response.resources, self.config.merge_policy);
        self.projects = response.projects;
        self.roles = response.roles;
        if response.project_id.is_some() {
            self.project_id = response.project_id;
        }
        self.last_applied = Some(sequence);

        tracing::info!(
            "refresh #{} applied: {} replaced, {} appended, {} resources",
            sequence,
            stats.replaced,
            stats.appended,
            self.resources.len()
        );
        Ok(RefreshOutcome::Applied(stats))
    }

    /// Fetch and apply in one step
    ///
    /// # Errors
    /// See [`GanttChart::apply_refresh`].
    pub async fn refresh<S>(&mut self, service: &S) -> Result<RefreshOutcome>
    where
        S: RecordService + ?Sized,
    {
        let ticket = self.begin_refresh();
        let result = service.fetch(ticket.request).await;
        self.apply_refresh(ticket.sequence, result)
    }

    // ----- drag -----

    /// Start dragging an allocation
    ///
    /// Returns `Ok(false)` while another drag is in progress.
    ///
    /// # Errors
    /// [`GanttError::AllocationNotFound`] for an unknown id.
    pub fn begin_drag(&mut self, allocation_id: &AllocationId, slot: i32, mode: DragMode) -> Result<bool> {
        let (_, allocation) = self
            .find_allocation(allocation_id)
            .ok_or_else(|| GanttError::AllocationNotFound(allocation_id.to_string()))?;
        let allocation = allocation.clone();

        let started = self.drag.begin(&allocation, slot, mode);
        if started {
            tracing::debug!("drag {:?} started on {} at slot {}", mode, allocation_id, slot);
        } else {
            tracing::debug!("drag on {} ignored, another drag is active", allocation_id);
        }
        Ok(started)
    }

    /// Pointer over `slot`
    pub fn update_drag(&mut self, slot: i32) -> Option<DragPreview> {
        self.drag.update(slot)
    }

    /// Pointer at pixel `x`; leaving the grid cancels the drag
    pub fn update_drag_pointer(&mut self, x: f64, metrics: &GridMetrics) -> Option<DragPreview> {
        self.drag.update_pointer(x, metrics)
    }

    /// Abandon the drag
    pub fn cancel_drag(&mut self) -> bool {
        let cancelled = self.drag.cancel();
        if cancelled {
            tracing::debug!("drag cancelled");
        }
        cancelled
    }

    /// Finish the drag and produce the candidate change
    ///
    /// Returns `Ok(None)` when no drag was active or the bounds did not
    /// change. The resource list is not modified.
    ///
    /// # Errors
    /// [`GanttError::AllocationNotFound`] if the allocation disappeared
    /// during the drag, or a calendar error when the proposed bounds map
    /// outside the representable date range.
    pub fn end_drag(&mut self) -> Result<Option<AllocationChange>> {
        let Some(outcome) = self.drag.end() else {
            return Ok(None);
        };
        if outcome.is_noop() {
            tracing::debug!("drag on {} ended without change", outcome.allocation_id);
            return Ok(None);
        }

        let (resource, _) = self
            .find_allocation(&outcome.allocation_id)
            .ok_or_else(|| GanttError::AllocationNotFound(outcome.allocation_id.to_string()))?;
        let (start_date, end_date) = self.grid.date_span(outcome.proposed)?;

        let change = AllocationChange {
            allocation_id: outcome.allocation_id,
            resource_id: resource.id.clone(),
            project_id: outcome.project_id,
            previous: outcome.previous,
            proposed: outcome.proposed,
            start_date,
            end_date,
        };
        tracing::info!(
            "drag on {} ended: {}..{}",
            change.allocation_id,
            change.start_date,
            change.end_date
        );
        Ok(Some(change))
    }

    /// Finish the drag, apply it locally and hand it to the record service
    ///
    /// The local bounds are updated before the save; if the save fails
    /// they are restored.
    ///
    /// # Errors
    /// See [`GanttChart::end_drag`]; a failed save is returned as
    /// [`GanttError::Fetch`].
    pub async fn commit_drag<S>(&mut self, service: &S) -> Result<Option<AllocationChange>>
    where
        S: RecordService + ?Sized,
    {
        let Some(change) = self.end_drag()? else {
            return Ok(None);
        };

        self.set_local_bounds(&change, change.proposed);
        if let Err(err) = service.save_allocation(change.clone()).await {
            tracing::error!("saving {} failed: {}", change.allocation_id, err);
            self.set_local_bounds(&change, change.previous);
            return Err(err.into());
        }
        Ok(Some(change))
    }

    fn set_local_bounds(&mut self, change: &AllocationChange, bounds: SlotBounds) {
        if let Some(allocation) = self
            .resources
            .iter_mut()
            .filter(|r| r.id == change.resource_id)
            .find_map(|r| r.find_allocation_mut(&change.allocation_id))
        {
            allocation.set_bounds(bounds);
        }
    }
}

impl<C: Clock> std::fmt::Debug for GanttChart<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GanttChart")
            .field("view", &self.view)
            .field("resources", &self.resources.len())
            .field("scope", &self.scope)
            .field("drag", &self.drag.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::MockRecordService;
    use chrono::NaiveDate;
    use gantt_calendar::{CalendarError, FixedClock};
    use gantt_layout::MergePolicy;
    use gantt_model::ResourceId;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn chart(config: GanttConfig) -> GanttChart<FixedClock> {
        GanttChart::new(config, FixedClock(date(2026, 10, 14))).unwrap()
    }

    fn response() -> ChartResponse {
        ChartResponse {
            resources: vec![
                Resource::new("r1", "Ada")
                    .with_allocation(Allocation::new("a1", "p1", SlotBounds::new(3, 7))),
                Resource::new("r2", "Grace")
                    .with_allocation(Allocation::new("a2", "p2", SlotBounds::new(0, 1))),
            ],
            projects: vec![Project::new("p1", "Apollo"), Project::new("p2", "Gemini")],
            roles: vec![Role("Engineer".into())],
            project_id: None,
        }
    }

    fn loaded(config: GanttConfig) -> GanttChart<FixedClock> {
        let mut chart = chart(config);
        let ticket = chart.begin_refresh();
        chart.apply_refresh(ticket.sequence, Ok(response())).unwrap();
        chart
    }

    #[test]
    fn starts_on_monday_of_today() {
        let chart = chart(GanttConfig::new().with_default_view(ViewMode::day()));
        assert_eq!(chart.slots().len(), 14);
        assert_eq!(chart.date_range().start, date(2026, 10, 12));
        assert_eq!(chart.date_range().end, date(2026, 10, 25));
        assert_eq!(chart.grid().today_index(), Some(2));
    }

    #[test]
    fn navigation_moves_by_configured_shift() {
        let mut chart = chart(GanttConfig::new());
        chart.navigate(Navigation::Next).unwrap();
        assert_eq!(chart.view().start_date(), date(2026, 10, 19));

        chart.navigate(Navigation::Previous).unwrap();
        chart.navigate(Navigation::Previous).unwrap();
        assert_eq!(chart.view().start_date(), date(2026, 10, 5));

        chart.navigate(Navigation::Today).unwrap();
        assert_eq!(chart.view().start_date(), date(2026, 10, 12));

        chart.navigate_to_str("2027-01-01").unwrap();
        assert_eq!(chart.view().start_date(), date(2026, 12, 28));
    }

    #[test]
    fn invalid_input_leaves_view_untouched() {
        let mut chart = chart(GanttConfig::new());
        let before = chart.grid().clone();

        let err = chart.navigate_to_str("2026-02-30").unwrap_err();
        assert!(err.is_user_facing());
        assert_eq!(err.user_message(), "Invalid Date");

        let err = chart.set_view_str("weekly").unwrap_err();
        assert!(matches!(err, GanttError::Calendar(CalendarError::InvalidViewMode(_))));

        let err = chart.set_view_str("0/10").unwrap_err();
        assert!(matches!(err, GanttError::Calendar(CalendarError::InvalidInput(_))));

        assert_eq!(chart.grid(), &before);
    }

    #[test]
    fn view_change_regenerates_grid() {
        let mut chart = chart(GanttConfig::new());
        assert_eq!(chart.slots().len(), 10);

        chart.set_view_str("30/12").unwrap();
        assert_eq!(chart.slots().len(), 12);
        assert_eq!(chart.view().mode(), &ViewMode::month());
        assert_eq!(chart.view().start_date(), date(2026, 10, 12));
    }

    #[test]
    fn request_reflects_view_scope_and_filters() {
        let mut chart = chart(
            GanttConfig::new()
                .with_default_view(ViewMode::day())
                .with_scope(ChartScope::Resource(ResourceId::new("r9"))),
        );
        chart.filters_mut().add_role("Engineer");

        let ticket = chart.begin_refresh();
        assert_eq!(ticket.sequence, 1);
        assert_eq!(ticket.request.start_time, "1791763200000");
        assert_eq!(ticket.request.end_time, "1792886400000");
        assert_eq!(ticket.request.slot_size_days, 1);
        assert_eq!(ticket.request.resource_id, Some(ResourceId::new("r9")));
        assert!(ticket.request.filters.is_some());

        assert_eq!(chart.begin_refresh().sequence, 2);
    }

    #[test]
    fn stale_response_is_dropped() {
        let mut chart = chart(GanttConfig::new());
        let first = chart.begin_refresh();
        let second = chart.begin_refresh();

        let newer = ChartResponse {
            resources: vec![Resource::new("r5", "Newest")],
            ..ChartResponse::default()
        };
        assert!(chart.apply_refresh(second.sequence, Ok(newer)).unwrap().is_applied());

        let outcome = chart.apply_refresh(first.sequence, Ok(response())).unwrap();
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert_eq!(chart.resources().len(), 1);
        assert_eq!(chart.resources()[0].name, "Newest");
    }

    #[test]
    fn response_for_previous_window_is_dropped() {
        let mut chart = chart(GanttConfig::new().with_default_view(ViewMode::day()));
        let ticket = chart.begin_refresh();
        assert_eq!(ticket.request.start_time, "1791763200000");

        chart.navigate(Navigation::Next).unwrap();
        let outcome = chart.apply_refresh(ticket.sequence, Ok(response())).unwrap();
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert!(chart.resources().is_empty());

        let current = chart.begin_refresh();
        assert!(chart.apply_refresh(current.sequence, Ok(response())).unwrap().is_applied());
        assert_eq!(chart.resources().len(), 2);
    }

    #[test]
    fn response_for_previous_scope_is_dropped() {
        let mut chart = loaded(GanttConfig::new());
        let ticket = chart.begin_refresh();
        chart.set_scope(ChartScope::Resource(ResourceId::new("r1")));

        let other = ChartResponse {
            resources: vec![Resource::new("r7", "Elsewhere")],
            ..ChartResponse::default()
        };
        assert_eq!(
            chart.apply_refresh(ticket.sequence, Ok(other)).unwrap(),
            RefreshOutcome::Stale
        );
        assert!(chart.resources().iter().all(|r| r.id.as_str() != "r7"));
    }

    #[test]
    fn failed_fetch_keeps_previous_state() {
        let mut chart = loaded(GanttConfig::new());
        let ticket = chart.begin_refresh();

        let err = chart
            .apply_refresh(ticket.sequence, Err(FetchError::Backend("boom".into())))
            .unwrap_err();
        assert!(matches!(err, GanttError::Fetch(_)));
        assert_eq!(chart.resources().len(), 2);
        assert_eq!(chart.projects().len(), 2);
    }

    #[test]
    fn refresh_preserves_row_positions() {
        let mut chart = loaded(GanttConfig::new().with_merge_policy(MergePolicy::RetainCleared));
        let ticket = chart.begin_refresh();
        let update = ChartResponse {
            resources: vec![Resource::new("r3", "Linus"), Resource::new("r2", "Grace H.")],
            ..ChartResponse::default()
        };
        chart.apply_refresh(ticket.sequence, Ok(update)).unwrap();

        let names: Vec<_> = chart.resources().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Grace H.", "Linus"]);
        assert_eq!(chart.resources()[0].allocation_count(), 0);
    }

    #[test]
    fn rows_and_project_options() {
        let chart = loaded(GanttConfig::new());
        let rows = chart.rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].bar_count(), 1);

        let options: Vec<_> = chart.project_options("gem").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(options, vec!["Gemini"]);
    }

    #[test]
    fn end_drag_produces_change_with_dates() {
        let mut chart = loaded(GanttConfig::new().with_default_view(ViewMode::day()));
        let id = AllocationId::new("a1");

        assert!(chart.begin_drag(&id, 3, DragMode::ResizeLeft).unwrap());
        assert!(!chart.begin_drag(&AllocationId::new("a2"), 0, DragMode::Move).unwrap());
        chart.update_drag(5);
        assert!(chart.drag_preview().is_some());

        let change = chart.end_drag().unwrap().unwrap();
        assert_eq!(change.resource_id, ResourceId::new("r1"));
        assert_eq!(change.proposed, SlotBounds::new(5, 7));
        assert_eq!(change.start_date, date(2026, 10, 17));
        assert_eq!(change.end_date, date(2026, 10, 19));

        let (_, allocation) = chart.find_allocation(&id).unwrap();
        assert_eq!(allocation.bounds(), SlotBounds::new(3, 7));
        assert_eq!(chart.drag_state(), DragState::Idle);
    }

    #[test]
    fn unchanged_drag_yields_nothing() {
        let mut chart = loaded(GanttConfig::new());
        chart.begin_drag(&AllocationId::new("a1"), 4, DragMode::Move).unwrap();
        assert_eq!(chart.end_drag().unwrap(), None);
    }

    #[test]
    fn unknown_allocation_cannot_be_dragged() {
        let mut chart = loaded(GanttConfig::new());
        let err = chart
            .begin_drag(&AllocationId::new("nope"), 0, DragMode::Move)
            .unwrap_err();
        assert!(matches!(err, GanttError::AllocationNotFound(_)));
    }

    #[test]
    fn view_change_cancels_drag() {
        let mut chart = loaded(GanttConfig::new());
        chart.begin_drag(&AllocationId::new("a1"), 3, DragMode::Move).unwrap();
        chart.navigate(Navigation::Next).unwrap();
        assert_eq!(chart.drag_state(), DragState::Idle);
    }

    #[tokio::test]
    async fn refresh_through_service() {
        let mut service = MockRecordService::new();
        service
            .expect_fetch()
            .withf(|request| request.start_time == "1791763200000" && request.slot_size_days == 7)
            .times(1)
            .returning(|_| Ok(response()));

        let mut chart = chart(GanttConfig::new());
        let outcome = chart.refresh(&service).await.unwrap();

        assert!(outcome.is_applied());
        assert_eq!(chart.resources().len(), 2);
        assert_eq!(chart.roles().len(), 1);
    }

    #[tokio::test]
    async fn commit_drag_saves_and_applies() {
        let mut service = MockRecordService::new();
        service
            .expect_save_allocation()
            .withf(|change| change.proposed == SlotBounds::new(4, 8))
            .times(1)
            .returning(|_| Ok(()));

        let mut chart = loaded(GanttConfig::new());
        let id = AllocationId::new("a1");
        chart.begin_drag(&id, 5, DragMode::Move).unwrap();
        chart.update_drag(6);

        let change = chart.commit_drag(&service).await.unwrap().unwrap();
        assert_eq!(change.previous, SlotBounds::new(3, 7));
        assert_eq!(chart.find_allocation(&id).unwrap().1.bounds(), SlotBounds::new(4, 8));
    }

    #[tokio::test]
    async fn failed_save_restores_bounds() {
        let mut service = MockRecordService::new();
        service
            .expect_save_allocation()
            .times(1)
            .returning(|_| Err(FetchError::Transport("offline".into())));

        let mut chart = loaded(GanttConfig::new());
        let id = AllocationId::new("a1");
        chart.begin_drag(&id, 7, DragMode::ResizeRight).unwrap();
        chart.update_drag(9);

        let err = chart.commit_drag(&service).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(chart.find_allocation(&id).unwrap().1.bounds(), SlotBounds::new(3, 7));
    }

    #[tokio::test]
    async fn commit_without_drag_does_not_call_service() {
        let service = MockRecordService::new();
        let mut chart = loaded(GanttConfig::new());
        assert_eq!(chart.commit_drag(&service).await.unwrap(), None);
    }
}
