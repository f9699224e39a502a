//! Board controller: the single owner of a rendered task board.

use super::{BoardEffects, BoardError, BoardResult, NotificationId, NotificationTtl, Session, TaskBoard};
use crate::attachment::PreviewStore;
use crate::comment::{Comment, CommentApi, services::CommentThreadController};
use crate::config::BoardConfig;
use crate::deadline::DeadlineTimers;
use crate::remote::RemoteError;
use crate::task::{
    domain::{NewTask, Progress, Task, TaskId, TaskStatus, TaskUpdate, UserId},
    ports::{ExecutorDirectory, TaskApi},
    services::{
        TaskLoader, TransitionCoordinator, TransitionOutcome, TransitionReport, TransitionSender,
        TransitionStart,
    },
};
use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Backend and presentation collaborators of a board.
pub struct BoardPorts<T, D, M, P, F> {
    /// Task API.
    pub tasks: Arc<T>,
    /// Executor directory.
    pub executors: Arc<D>,
    /// Comment API.
    pub comments: Arc<M>,
    /// Preview store for staged images.
    pub previews: Arc<P>,
    /// Visual effects sink.
    pub effects: Arc<F>,
}

/// Owns the board context and drives every user-facing operation.
///
/// Operations never return raw backend errors without having raised a
/// notification first. Loads report `None` on failure; mutations return
/// [`BoardError`].
pub struct BoardController<T, D, M, P, F, C>
where
    T: TaskApi,
    D: ExecutorDirectory,
    M: CommentApi,
    P: PreviewStore,
    F: BoardEffects,
    C: Clock + Send + Sync + 'static,
{
    session: Session,
    config: BoardConfig,
    board: TaskBoard,
    clock: Arc<C>,
    tasks: Arc<T>,
    executors: Arc<D>,
    loader: TaskLoader<T>,
    transitions: TransitionCoordinator<T, F, C>,
    thread: CommentThreadController<M, P, C>,
    timers: DeadlineTimers<C>,
    last_reload_attempt: Option<DateTime<Utc>>,
}

impl<T, D, M, P, F, C> BoardController<T, D, M, P, F, C>
where
    T: TaskApi,
    D: ExecutorDirectory,
    M: CommentApi,
    P: PreviewStore,
    F: BoardEffects,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a controller with an empty board. Call
    /// [`BoardController::mount`] to load it.
    #[must_use]
    pub fn new(
        session: Session,
        config: BoardConfig,
        ports: BoardPorts<T, D, M, P, F>,
        clock: Arc<C>,
    ) -> Self {
        let BoardPorts {
            tasks,
            executors,
            comments,
            previews,
            effects,
        } = ports;
        let board = TaskBoard::new(NotificationTtl::from_config(&config));
        let loader = TaskLoader::new(Arc::clone(&tasks));
        let transitions =
            TransitionCoordinator::new(Arc::clone(&tasks), effects, Arc::clone(&clock));
        let thread = CommentThreadController::new(
            comments,
            previews,
            Arc::clone(&clock),
            config.upload_timeout(),
        );
        let timers = DeadlineTimers::new(Arc::clone(&clock), config.timer_tick());
        Self {
            session,
            config,
            board,
            clock,
            tasks,
            executors,
            loader,
            transitions,
            thread,
            timers,
            last_reload_attempt: None,
        }
    }

    /// Returns the board state.
    #[must_use]
    pub const fn board(&self) -> &TaskBoard {
        &self.board
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the comment thread of the open task.
    #[must_use]
    pub const fn thread(&self) -> &CommentThreadController<M, P, C> {
        &self.thread
    }

    /// Returns the comment thread for composing.
    pub const fn thread_mut(&mut self) -> &mut CommentThreadController<M, P, C> {
        &mut self.thread
    }

    /// Returns the deadline countdowns of visible tasks.
    #[must_use]
    pub const fn timers(&self) -> &DeadlineTimers<C> {
        &self.timers
    }

    /// Loads the board and, for privileged users, the executor directory.
    ///
    /// Returns the number of loaded tasks, or `None` when the load failed.
    pub async fn mount(&mut self) -> Option<usize> {
        tracing::info!(
            user_id = %self.session.user_id,
            role = ?self.session.role,
            "mounting task board"
        );
        let loaded = self.refresh().await;
        if self.session.is_privileged() {
            self.load_executors().await;
        }
        loaded
    }

    /// Reloads the board for the current scope.
    ///
    /// Returns the number of loaded tasks, or `None` when the load failed.
    pub async fn refresh(&mut self) -> Option<usize> {
        let now = self.clock.utc();
        self.last_reload_attempt = Some(now);
        let loaded = self.loader.reload(&mut self.board, now).await.ok();
        self.sync_timers();
        loaded
    }

    /// Returns `true` when the periodic reload is due at `now`.
    #[must_use]
    pub fn reload_due(&self, now: DateTime<Utc>) -> bool {
        let interval = TimeDelta::from_std(self.config.reload_interval()).unwrap_or(TimeDelta::MAX);
        self.last_reload_attempt
            .is_none_or(|last| now.signed_duration_since(last) >= interval)
    }

    /// Drives periodic work: prunes expired notifications and reloads the
    /// board when the reload interval has elapsed.
    ///
    /// Returns `true` when a reload was attempted.
    pub async fn tick(&mut self) -> bool {
        let now = self.clock.utc();
        let pruned = self.board.notifications.prune(now);
        if pruned > 0 {
            tracing::trace!(pruned, "expired notifications removed");
        }
        if !self.reload_due(now) {
            return false;
        }
        self.refresh().await;
        true
    }

    /// Applies the optimistic move of `task_id` to `target`.
    ///
    /// A [`TransitionStart::Started`] result carries the pending transition
    /// to hand to a [`TransitionSender`]. Its outcome goes back through
    /// [`BoardController::finish_transition`]. The board stays available
    /// for other drags and reloads in between.
    pub fn begin_transition(&mut self, task_id: TaskId, target: TaskStatus) -> TransitionStart {
        let start = self.transitions.begin(&mut self.board, task_id, target);
        self.sync_timers();
        start
    }

    /// Returns a sender for pending transitions that does not borrow the
    /// controller.
    #[must_use]
    pub fn transition_sender(&self) -> TransitionSender<T> {
        self.transitions.sender()
    }

    /// Reports the backend answer of a transition, reloading the board when
    /// the update was rejected.
    pub async fn finish_transition(&mut self, outcome: TransitionOutcome) -> TransitionReport {
        let report = self.transitions.finish(&mut self.board, outcome).await;
        self.sync_timers();
        report
    }

    /// Moves a task to `target`, optimistically, and reconciles with the
    /// backend.
    ///
    /// Holds the controller for the whole round trip; use
    /// [`BoardController::begin_transition`] to overlap several drags.
    pub async fn request_transition(
        &mut self,
        task_id: TaskId,
        target: TaskStatus,
    ) -> TransitionReport {
        match self.begin_transition(task_id, target) {
            TransitionStart::Started(pending) => {
                let outcome = self.transition_sender().send(pending).await;
                self.finish_transition(outcome).await
            }
            TransitionStart::Unchanged => TransitionReport::Unchanged,
            TransitionStart::AlreadyInFlight => TransitionReport::AlreadyInFlight,
            TransitionStart::UnknownTask => TransitionReport::UnknownTask,
        }
    }

    /// Shows the board of `user`, or the signed-in user's own board for
    /// `None`.
    ///
    /// The board switches scope only once the new listing has loaded;
    /// pending transitions are then forgotten. When the load fails the
    /// previous scope and its tasks stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotPrivileged`] when a non-privileged user asks
    /// for someone else's board.
    pub async fn view_as(&mut self, user: Option<UserId>) -> BoardResult<Option<usize>> {
        let target = user.filter(|id| *id != self.session.user_id);
        if target.is_some() && !self.session.is_privileged() {
            tracing::warn!(user_id = %self.session.user_id, "view-as denied");
            self.board.notifications.error(
                "Only managers and admins can view other boards",
                self.clock.utc(),
            );
            return Err(BoardError::NotPrivileged);
        }
        tracing::info!(viewing_as = ?target, "switching board scope");
        let now = self.clock.utc();
        self.last_reload_attempt = Some(now);
        let listing = self.loader.fetch(target).await;
        if listing.is_ok() {
            self.board.in_flight.clear();
            self.board.viewing_as = target;
        }
        let loaded = self.loader.apply(&mut self.board, listing, now).ok();
        self.sync_timers();
        Ok(loaded)
    }

    /// Creates a task.
    ///
    /// Non-privileged users always assign the task to themselves; privileged
    /// users default to themselves when no assignee is chosen. The created
    /// task is prepended when it belongs to the board being viewed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Remote`] when the backend rejects the task.
    pub async fn create_task(&mut self, request: NewTask) -> BoardResult<Task> {
        let assignee = if self.session.is_privileged() {
            request.assignee_id().unwrap_or(self.session.user_id)
        } else {
            self.session.user_id
        };
        let payload = request.with_assignee(assignee);

        match self.tasks.create_task(&payload).await {
            Ok(task) => {
                let scope = self.board.viewing_as.unwrap_or(self.session.user_id);
                if task.is_assigned_to(scope) {
                    self.board.partitions.prepend(task.clone());
                    self.sync_timers();
                }
                tracing::info!(task_id = %task.id(), %assignee, "task created");
                self.board
                    .notifications
                    .success("Task created", self.clock.utc());
                Ok(task)
            }
            Err(error) => Err(self.report_failure(error, "Failed to create task")),
        }
    }

    /// Updates the progress of a task on the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] without a request when the task
    /// is not on the board, and [`BoardError::Remote`] when the backend
    /// rejects the update.
    pub async fn update_progress(&mut self, task_id: TaskId, progress: Progress) -> BoardResult<Task> {
        self.ensure_on_board(task_id)?;
        match self
            .tasks
            .update_task(task_id, &TaskUpdate::progress(progress))
            .await
        {
            Ok(task) => {
                self.board.partitions.replace(task.clone());
                self.board
                    .notifications
                    .success("Progress updated", self.clock.utc());
                Ok(task)
            }
            Err(error) => Err(self.report_failure(error, "Failed to update progress")),
        }
    }

    /// Deletes a task. The task leaves the board only after the backend
    /// confirms the deletion.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTask`] without a request when the task
    /// is not on the board, and [`BoardError::Remote`] when the backend
    /// rejects the deletion.
    pub async fn delete_task(&mut self, task_id: TaskId) -> BoardResult<()> {
        self.ensure_on_board(task_id)?;
        match self.tasks.delete_task(task_id).await {
            Ok(()) => {
                self.board.partitions.remove(task_id);
                self.board.in_flight.remove(&task_id);
                self.timers.stop(task_id);
                if self.thread.active_task() == Some(task_id) {
                    self.thread.close();
                }
                tracing::info!(%task_id, "task deleted");
                self.board
                    .notifications
                    .success("Task deleted", self.clock.utc());
                Ok(())
            }
            Err(error) => Err(self.report_failure(error, "Failed to delete task")),
        }
    }

    /// Opens the comment thread of a task.
    ///
    /// Returns the number of loaded comments, or `None` when the thread
    /// could not be loaded.
    pub async fn open_task(&mut self, task_id: TaskId) -> Option<usize> {
        self.thread.open_task(task_id).await.ok()
    }

    /// Submits the composed comment to the open thread.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NoActiveThread`] when no thread is open and
    /// [`BoardError::Comment`] when submission fails.
    pub async fn submit_comment(&mut self) -> BoardResult<Comment> {
        let Some(task_id) = self.thread.active_task() else {
            self.board
                .notifications
                .error("Open a task before commenting", self.clock.utc());
            return Err(BoardError::NoActiveThread);
        };
        Ok(self
            .thread
            .submit(task_id, &mut self.board.notifications)
            .await?)
    }

    /// Dismisses a notification before it expires.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.board.notifications.dismiss(id)
    }

    async fn load_executors(&mut self) {
        match self.executors.list_executors().await {
            Ok(executors) => {
                tracing::debug!(count = executors.len(), "executor directory loaded");
                self.board.executors = executors;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to load executors");
                self.board.notifications.error(
                    error.user_message("Failed to load executors"),
                    self.clock.utc(),
                );
            }
        }
    }

    fn ensure_on_board(&mut self, task_id: TaskId) -> BoardResult<()> {
        if self.board.partitions.contains(task_id) {
            return Ok(());
        }
        self.board
            .notifications
            .error("Task not found", self.clock.utc());
        Err(BoardError::UnknownTask(task_id))
    }

    fn report_failure(&mut self, error: RemoteError, fallback: &str) -> BoardError {
        tracing::warn!(%error, "{fallback}");
        self.board
            .notifications
            .error(error.user_message(fallback), self.clock.utc());
        BoardError::Remote(error)
    }

    fn sync_timers(&mut self) {
        self.timers.sync_visible(self.board.partitions.iter());
    }
}
