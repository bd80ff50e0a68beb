//! Insight panel
//!
//! One overlay shared by the three insight actions. Every opening gets its
//! own [`CancelToken`]; closing the panel or opening it again cancels the
//! previous token, and a response that arrives for a cancelled or
//! superseded opening is dropped instead of overwriting the panel.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use super::ViewContext;
use crate::api::{InsightRequest, TrackerBackend};
use crate::error::ClientResult;
use crate::models::{ApplicationRecord, InsightKind, InsightOutput, Session};

struct CancelInner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cancellation handle for one panel opening
#[derive(Clone)]
pub struct CancelToken {
    id: u64,
    inner: Arc<CancelInner>,
}

impl CancelToken {
    fn new(id: u64) -> Self {
        Self {
            id,
            inner: Arc::new(CancelInner {
                cancelled: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`CancelToken::cancel`] has been called
    pub async fn cancelled(&self) {
        loop {
            // Register before checking the flag so a concurrent cancel is not missed
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Default)]
struct PanelState {
    visible: bool,
    kind: Option<InsightKind>,
    output: Option<InsightOutput>,
    active: Option<CancelToken>,
}

/// What the panel currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    Hidden,
    Loading(InsightKind),
    Showing(InsightKind, InsightOutput),
}

/// How an in-flight request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightResolution {
    /// The result landed in the panel
    Applied(InsightOutput),
    /// The opening was closed or superseded first
    Discarded,
}

#[derive(Clone)]
pub struct InsightPanel {
    ctx: ViewContext,
    state: Arc<Mutex<PanelState>>,
    tickets: Arc<AtomicU64>,
}

impl InsightPanel {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            state: Arc::new(Mutex::new(PanelState::default())),
            tickets: Arc::new(AtomicU64::new(0)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        lock_state(&self.state)
    }

    /// Open the panel for `record` and prepare the request.
    ///
    /// The panel shows the loading state right away; the returned
    /// [`PendingInsight`] performs the call.
    pub fn open_for(
        &self,
        kind: InsightKind,
        record: &ApplicationRecord,
    ) -> ClientResult<PendingInsight> {
        self.open(kind, &record.company, &record.job)
    }

    pub fn open(&self, kind: InsightKind, company: &str, job: &str) -> ClientResult<PendingInsight> {
        let session = self.ctx.session.require()?;
        let token = CancelToken::new(self.tickets.fetch_add(1, Ordering::SeqCst) + 1);

        {
            let mut state = self.lock();
            if let Some(previous) = state.active.replace(token.clone()) {
                tracing::debug!(ticket = previous.id(), "Superseding insight request");
                previous.cancel();
            }
            state.visible = true;
            state.kind = Some(kind);
            state.output = None;
        }

        tracing::info!(?kind, company, ticket = token.id(), "Opening insight panel");

        Ok(PendingInsight {
            backend: self.ctx.backend.clone(),
            state: self.state.clone(),
            request: InsightRequest {
                user_id: session.user_id.clone(),
                company: company.to_string(),
                job: job.to_string(),
            },
            session,
            kind,
            token,
        })
    }

    /// Hide the panel, clear its content and cancel any request in flight
    pub fn close(&self) {
        let mut state = self.lock();
        if let Some(active) = state.active.take() {
            active.cancel();
        }
        *state = PanelState::default();
    }

    pub fn is_open(&self) -> bool {
        self.lock().visible
    }

    pub fn snapshot(&self) -> PanelView {
        let state = self.lock();
        match (state.visible, state.kind, &state.output) {
            (false, _, _) | (true, None, _) => PanelView::Hidden,
            (true, Some(kind), None) => PanelView::Loading(kind),
            (true, Some(kind), Some(output)) => PanelView::Showing(kind, output.clone()),
        }
    }
}

fn lock_state(state: &Mutex<PanelState>) -> MutexGuard<'_, PanelState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A request started by [`InsightPanel::open`] that has not run yet
pub struct PendingInsight {
    backend: Arc<dyn TrackerBackend>,
    state: Arc<Mutex<PanelState>>,
    session: Session,
    kind: InsightKind,
    request: InsightRequest,
    token: CancelToken,
}

impl PendingInsight {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    /// Perform the call and settle the panel, unless the opening was
    /// cancelled in the meantime.
    pub async fn run(self) -> InsightResolution {
        let result = tokio::select! {
            biased;
            _ = self.token.cancelled() => {
                tracing::debug!(ticket = self.token.id(), "Insight request cancelled");
                return InsightResolution::Discarded;
            }
            result = self.backend.request_insight(&self.session, self.kind, &self.request) => result,
        };

        let output = match result {
            Ok(payload) => InsightOutput::from(payload),
            Err(err) => {
                tracing::warn!(kind = ?self.kind, error = %err, "Insight request failed");
                InsightOutput::Error(err.user_message(self.kind.default_error()))
            }
        };

        let mut state = lock_state(&self.state);
        let current = state
            .active
            .as_ref()
            .map(|active| active.id() == self.token.id())
            .unwrap_or(false);
        if !current || self.token.is_cancelled() {
            tracing::debug!(ticket = self.token.id(), "Dropping late insight response");
            return InsightResolution::Discarded;
        }

        state.output = Some(output.clone());
        InsightResolution::Applied(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use crate::session::LOGIN_PROMPT;
    use crate::views::testing::{context, record, session, FakeBackend};

    fn signed_in(backend: Arc<FakeBackend>) -> InsightPanel {
        let ctx = context(backend);
        ctx.session.login(session("u1"));
        InsightPanel::new(ctx)
    }

    #[tokio::test]
    async fn test_each_kind_loads_then_shows_one_branch() {
        let backend = FakeBackend::new();
        let panel = signed_in(backend.clone());
        let app = record("a1", "u1", "details");

        for kind in InsightKind::ALL {
            let pending = panel.open_for(kind, &app).unwrap();
            assert_eq!(panel.snapshot(), PanelView::Loading(kind));

            let output = match pending.run().await {
                InsightResolution::Applied(output) => output,
                InsightResolution::Discarded => panic!("{:?} was discarded", kind),
            };
            assert_eq!(panel.snapshot(), PanelView::Showing(kind, output.clone()));

            match (kind, output) {
                (InsightKind::SkillRecommendations, InsightOutput::Skills(list)) => {
                    assert_eq!(list[0].skill, "Company a1 skill");
                }
                (InsightKind::InterviewPrep, InsightOutput::Interview(list)) => {
                    assert_eq!(list[0].focus, "Intern");
                }
                (InsightKind::SkillAnalysis, InsightOutput::SkillAnalysis(analysis)) => {
                    assert_eq!(analysis.missing_skills, vec!["Kubernetes".to_string()]);
                }
                (kind, other) => panic!("{:?} produced {:?}", kind, other),
            }
        }
        assert_eq!(backend.count("insight"), 3);
    }

    #[tokio::test]
    async fn test_failure_shows_kind_default_error() {
        let backend = FakeBackend::new();
        backend.fail("insight", None);
        let panel = signed_in(backend.clone());

        let pending = panel.open(InsightKind::InterviewPrep, "Acme", "Intern").unwrap();
        let resolution = pending.run().await;

        let expected = InsightOutput::Error("Error fetching interview prep tips.".to_string());
        assert_eq!(resolution, InsightResolution::Applied(expected.clone()));
        assert_eq!(
            panel.snapshot(),
            PanelView::Showing(InsightKind::InterviewPrep, expected)
        );
    }

    #[tokio::test]
    async fn test_failure_prefers_backend_message() {
        let backend = FakeBackend::new();
        backend.fail("insight", Some("Profile incomplete"));
        let panel = signed_in(backend.clone());

        let pending = panel.open(InsightKind::SkillAnalysis, "Acme", "Intern").unwrap();
        assert_eq!(
            pending.run().await,
            InsightResolution::Applied(InsightOutput::Error("Profile incomplete".to_string()))
        );
    }

    #[tokio::test]
    async fn test_close_during_flight_discards_result() {
        let backend = FakeBackend::new();
        backend.hold_insights();
        let panel = signed_in(backend.clone());

        let pending = panel.open(InsightKind::SkillAnalysis, "Acme", "Intern").unwrap();
        let token = pending.token().clone();
        let task = tokio::spawn(pending.run());

        panel.close();
        backend.release_insight();

        assert_eq!(task.await.unwrap(), InsightResolution::Discarded);
        assert!(token.is_cancelled());
        assert_eq!(panel.snapshot(), PanelView::Hidden);
        assert!(!panel.is_open());
    }

    #[tokio::test]
    async fn test_reopen_supersedes_previous_request() {
        let backend = FakeBackend::new();
        backend.hold_insights();
        let panel = signed_in(backend.clone());

        let first = panel
            .open(InsightKind::SkillRecommendations, "Old", "Intern")
            .unwrap();
        let first_task = tokio::spawn(first.run());

        let second = panel.open(InsightKind::InterviewPrep, "New", "Intern").unwrap();
        assert_eq!(first_task.await.unwrap(), InsightResolution::Discarded);
        assert_eq!(panel.snapshot(), PanelView::Loading(InsightKind::InterviewPrep));

        let second_task = tokio::spawn(second.run());
        backend.release_insight();
        assert!(matches!(
            second_task.await.unwrap(),
            InsightResolution::Applied(InsightOutput::Interview(_))
        ));
    }

    #[tokio::test]
    async fn test_open_clears_previous_output() {
        let backend = FakeBackend::new();
        let panel = signed_in(backend.clone());

        let pending = panel.open(InsightKind::SkillAnalysis, "Acme", "Intern").unwrap();
        pending.run().await;
        assert!(matches!(panel.snapshot(), PanelView::Showing(..)));

        let _pending = panel.open(InsightKind::SkillRecommendations, "Acme", "Intern").unwrap();
        assert_eq!(
            panel.snapshot(),
            PanelView::Loading(InsightKind::SkillRecommendations)
        );
    }

    #[tokio::test]
    async fn test_requires_session() {
        let backend = FakeBackend::new();
        let panel = InsightPanel::new(context(backend.clone()));

        let err = panel
            .open(InsightKind::SkillAnalysis, "Acme", "Intern")
            .err()
            .unwrap();
        assert!(matches!(err, ClientError::NoSession));
        assert_eq!(err.user_message("unused"), LOGIN_PROMPT);
        assert_eq!(panel.snapshot(), PanelView::Hidden);
        assert_eq!(backend.count("insight"), 0);
    }

    #[tokio::test]
    async fn test_cancelled_resolves_after_cancel() {
        let token = CancelToken::new(7);
        let waiter = {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        };
        token.cancel();
        waiter.await.unwrap();
        assert!(token.is_cancelled());
        // Already cancelled tokens resolve immediately
        token.cancelled().await;
    }
}
