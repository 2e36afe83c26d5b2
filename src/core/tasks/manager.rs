use std::{
    future::Future,
    sync::{
        mpsc,
        Arc,
    },
    thread,
};

use eframe::egui;
use tokio::runtime::Runtime;
use tracing::debug;

use super::TaskResult;
use crate::{
    core::{
        AppConfig,
        CourseRecord,
        PlannerError,
    },
    sync::{
        HttpTransport,
        SyncGateway,
        Transport,
    },
};

/// Runs backend calls off the UI thread and hands their results back through
/// a channel the app drains once per frame.
pub struct TaskManager<T = HttpTransport> {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    gateway: Arc<SyncGateway<T>>,
    repaint: Option<egui::Context>,
}

impl TaskManager<HttpTransport> {
    pub fn new(config: &AppConfig) -> Result<Self, PlannerError> {
        Self::with_transport(HttpTransport::new(config)?)
    }
}

impl<T: Transport + 'static> TaskManager<T> {
    pub fn with_transport(transport: T) -> Result<Self, PlannerError> {
        let runtime = Arc::new(Runtime::new()?);
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            runtime,
            receiver,
            sender,
            gateway: Arc::new(SyncGateway::new(transport)),
            repaint: None,
        })
    }

    /// Lets finished tasks wake the UI instead of waiting for the next input event.
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let sender = self.sender.clone();
        let runtime = Arc::clone(&self.runtime);
        let repaint = self.repaint.clone();

        thread::spawn(move || {
            let result = runtime.block_on(task);
            debug!("Task {} finished (ok: {})", result.task_type(), result.is_ok());

            let _ = sender.send(result);
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    pub fn load_initial_state(&self) {
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move { TaskResult::InitialStateLoaded(gateway.load_initial_state().await) });
    }

    pub fn save_courses(&self, records: Vec<CourseRecord>) {
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move { TaskResult::CoursesSaved(gateway.save_all(&records).await) });
    }

    /// Status and summary are fetched independently; each reports on its own.
    pub fn load_status(&self) {
        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move { TaskResult::StatusLoaded(gateway.fetch_status().await) });

        let gateway = Arc::clone(&self.gateway);
        self.spawn(async move { TaskResult::SummaryLoaded(gateway.fetch_summary().await) });
    }
}
