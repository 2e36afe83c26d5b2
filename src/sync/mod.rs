//! Talks to the planner backend: the initial load, the bulk save, and the two
//! status reads.
//!
//! Saves replace the whole remote collection with the local copy. Two editors
//! saving against the same backend race, and the last save wins.

pub mod transport;

use serde::{
    de::DeserializeOwned,
    Deserialize,
};
use tracing::{
    debug,
    info,
    warn,
};
pub use transport::{
    HttpTransport,
    RawResponse,
    Transport,
};

use crate::core::{
    BackendStatus,
    CourseRecord,
    PlannerError,
    Settings,
    Summary,
};

const ROOT_PATH: &str = "/";
const COURSES_PATH: &str = "/courses";
const SETTINGS_PATH: &str = "/settings";
const SUMMARY_PATH: &str = "/summary";

/// Everything the editor needs before it can show the table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InitialState {
    pub records: Vec<CourseRecord>,
    pub categories: Vec<String>,
}

#[derive(Deserialize)]
struct SaveReceipt {
    saved: usize,
}

pub struct SyncGateway<T> {
    transport: T,
}

impl<T: Transport> SyncGateway<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches courses and settings concurrently. Either failing fails the
    /// whole load.
    pub async fn load_initial_state(&self) -> Result<InitialState, PlannerError> {
        let (records, settings) = futures::try_join!(
            self.fetch_json::<Vec<CourseRecord>>(COURSES_PATH),
            self.fetch_json::<Settings>(SETTINGS_PATH),
        )?;

        info!(
            "Loaded {} courses and {} categories",
            records.len(),
            settings.required_ecs.len()
        );

        Ok(InitialState { records, categories: settings.categories() })
    }

    /// Replaces the backend's course list with `records`. Returns the count the
    /// backend reports having saved, when it reports one.
    pub async fn save_all(&self, records: &[CourseRecord]) -> Result<Option<usize>, PlannerError> {
        let body = serde_json::to_string(records)
            .map_err(|e| PlannerError::SaveFailed(format!("could not encode courses: {e}")))?;

        let resp = self.transport.put_json(COURSES_PATH, body).await.map_err(|e| {
            warn!("PUT {} failed: {}", COURSES_PATH, e);
            PlannerError::SaveFailed(e.to_string())
        })?;

        if !resp.is_success() {
            warn!("PUT {} returned {}", COURSES_PATH, resp.status);
            return Err(PlannerError::SaveFailed(resp.body));
        }

        let saved = serde_json::from_str::<SaveReceipt>(&resp.body).ok().map(|r| r.saved);
        match saved {
            Some(count) => info!("Backend saved {} of {} courses", count, records.len()),
            None => info!("Sent {} courses; backend returned no count", records.len()),
        }
        Ok(saved)
    }

    pub async fn fetch_status(&self) -> Result<BackendStatus, PlannerError> {
        self.fetch_json(ROOT_PATH).await
    }

    pub async fn fetch_summary(&self) -> Result<Summary, PlannerError> {
        self.fetch_json(SUMMARY_PATH).await
    }

    async fn fetch_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, PlannerError> {
        let resp = self.transport.get(path).await.map_err(|e| {
            warn!("GET {} failed: {}", path, e);
            PlannerError::LoadFailed(format!("GET {path}: {e}"))
        })?;

        if !resp.is_success() {
            warn!("GET {} returned {}", path, resp.status);
            return Err(PlannerError::LoadFailed(format!(
                "GET {path} returned {}: {}",
                resp.status, resp.body
            )));
        }

        debug!("GET {} -> {} bytes", path, resp.body.len());
        serde_json::from_str(&resp.body)
            .map_err(|e| PlannerError::LoadFailed(format!("malformed JSON from {path}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::Mutex,
    };

    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct FakeTransport {
        gets: HashMap<String, Result<RawResponse, String>>,
        put_response: Option<Result<RawResponse, String>>,
        puts: Mutex<Vec<(String, String)>>,
    }

    impl FakeTransport {
        fn with_get(mut self, path: &str, status: u16, body: impl ToString) -> Self {
            self.gets.insert(path.to_string(), Ok(RawResponse::new(status, body.to_string())));
            self
        }

        fn with_get_error(mut self, path: &str, message: &str) -> Self {
            self.gets.insert(path.to_string(), Err(message.to_string()));
            self
        }

        fn with_put(mut self, status: u16, body: &str) -> Self {
            self.put_response = Some(Ok(RawResponse::new(status, body)));
            self
        }

        fn with_put_error(mut self, message: &str) -> Self {
            self.put_response = Some(Err(message.to_string()));
            self
        }
    }

    impl Transport for FakeTransport {
        async fn get(&self, path: &str) -> Result<RawResponse, PlannerError> {
            match self.gets.get(path) {
                Some(Ok(resp)) => Ok(resp.clone()),
                Some(Err(message)) => Err(PlannerError::Custom(message.clone())),
                None => Ok(RawResponse::new(404, "Not Found")),
            }
        }

        async fn put_json(&self, path: &str, body: String) -> Result<RawResponse, PlannerError> {
            self.puts.lock().unwrap().push((path.to_string(), body));
            match &self.put_response {
                Some(Ok(resp)) => Ok(resp.clone()),
                Some(Err(message)) => Err(PlannerError::Custom(message.clone())),
                None => Ok(RawResponse::new(200, "")),
            }
        }
    }

    fn courses_json() -> serde_json::Value {
        json!([
            { "Course_Name": "Algo", "Category": "CS", "ECs": 5.0, "Quarter": "1, 3", "Year": 1,
              "Selected__Y_N": true, "Notes": "", "Prerequisite": "" },
            { "Course_Name": "Bio", "Category": "Sci", "ECs": null, "Quarter": null, "Year": null,
              "Selected__Y_N": false, "Notes": null, "Prerequisite": "" }
        ])
    }

    const SETTINGS_JSON: &str =
        r#"{"required_ecs": {"Sci": 10, "CS": 20, "Thesis": 45}, "overflow_target": "CS"}"#;

    #[tokio::test]
    async fn test_load_initial_state() {
        let transport = FakeTransport::default()
            .with_get(COURSES_PATH, 200, courses_json())
            .with_get(SETTINGS_PATH, 200, SETTINGS_JSON);
        let gateway = SyncGateway::new(transport);

        let state = gateway.load_initial_state().await.unwrap();

        assert_eq!(state.records.len(), 2);
        assert_eq!(state.records[0].credits, Some(5.0));
        assert_eq!(state.records[1].quarter, "");
        assert_eq!(state.categories, vec!["Sci", "CS", "Thesis"]);
    }

    #[tokio::test]
    async fn test_settings_failure_fails_whole_load() {
        let transport = FakeTransport::default()
            .with_get(COURSES_PATH, 200, courses_json())
            .with_get_error(SETTINGS_PATH, "connection refused");
        let gateway = SyncGateway::new(transport);

        let err = gateway.load_initial_state().await.unwrap_err();
        match err {
            PlannerError::LoadFailed(detail) => assert!(detail.contains("connection refused")),
            other => panic!("Expected LoadFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bad_status_or_malformed_json_fails_load() {
        let gateway = SyncGateway::new(
            FakeTransport::default()
                .with_get(COURSES_PATH, 500, "Internal Server Error")
                .with_get(SETTINGS_PATH, 200, SETTINGS_JSON),
        );
        assert!(matches!(
            gateway.load_initial_state().await,
            Err(PlannerError::LoadFailed(_))
        ));

        let gateway = SyncGateway::new(
            FakeTransport::default()
                .with_get(COURSES_PATH, 200, courses_json())
                .with_get(SETTINGS_PATH, 200, "{not json"),
        );
        assert!(matches!(
            gateway.load_initial_state().await,
            Err(PlannerError::LoadFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_save_sends_full_list() {
        let gateway = SyncGateway::new(FakeTransport::default().with_put(200, r#"{"saved": 2}"#));
        let records = vec![
            CourseRecord { name: "Algo".to_string(), credits: Some(5.0), ..Default::default() },
            CourseRecord::default(),
        ];

        let saved = gateway.save_all(&records).await.unwrap();
        assert_eq!(saved, Some(2));

        let puts = gateway.transport.puts.lock().unwrap();
        assert_eq!(puts.len(), 1);
        assert_eq!(puts[0].0, COURSES_PATH);

        let sent: Vec<CourseRecord> = serde_json::from_str(&puts[0].1).unwrap();
        assert_eq!(sent, records);
    }

    #[tokio::test]
    async fn test_untouched_fractional_credits_are_saved_unchanged() {
        let courses = json!([
            { "Course_Name": "Thesis prep", "Category": "Thesis & Research", "ECs": 7.5, "Quarter": "2",
              "Year": 1, "Selected__Y_N": true, "Notes": null, "Prerequisite": "" }
        ]);
        let gateway = SyncGateway::new(
            FakeTransport::default()
                .with_get(COURSES_PATH, 200, courses)
                .with_get(SETTINGS_PATH, 200, SETTINGS_JSON)
                .with_put(200, r#"{"saved": 1}"#),
        );

        let state = gateway.load_initial_state().await.unwrap();
        assert_eq!(state.records[0].credits, Some(7.5));

        gateway.save_all(&state.records).await.unwrap();

        let puts = gateway.transport.puts.lock().unwrap();
        let sent: serde_json::Value = serde_json::from_str(&puts[0].1).unwrap();
        assert_eq!(sent[0]["ECs"], 7.5);
        assert_eq!(sent[0]["Year"], 1);
    }

    #[tokio::test]
    async fn test_save_server_error_carries_body() {
        let gateway = SyncGateway::new(FakeTransport::default().with_put(500, "db locked"));
        let records = vec![CourseRecord { name: "Algo".to_string(), ..Default::default() }];

        match gateway.save_all(&records).await {
            Err(PlannerError::SaveFailed(detail)) => assert_eq!(detail, "db locked"),
            other => panic!("Expected SaveFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_network_error() {
        let gateway = SyncGateway::new(FakeTransport::default().with_put_error("timed out"));

        match gateway.save_all(&[]).await {
            Err(PlannerError::SaveFailed(detail)) => assert!(detail.contains("timed out")),
            other => panic!("Expected SaveFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_without_receipt() {
        let gateway = SyncGateway::new(FakeTransport::default().with_put(204, ""));
        assert_eq!(gateway.save_all(&[]).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_status_reads_are_independent() {
        let gateway = SyncGateway::new(
            FakeTransport::default()
                .with_get(ROOT_PATH, 200, r#"{"message": "Hello, backend is working!"}"#)
                .with_get_error(SUMMARY_PATH, "refused"),
        );

        let status = gateway.fetch_status().await.unwrap();
        assert_eq!(status.message, "Hello, backend is working!");
        assert!(matches!(gateway.fetch_summary().await, Err(PlannerError::LoadFailed(_))));
    }

    #[tokio::test]
    async fn test_summary_rows() {
        let summary = json!({
            "rows": [
                { "Category": "CS", "Required_ECs": 20, "Selected_ECs": 25.0, "Remaining_ECs": -5.0 }
            ],
            "total_selected_ecs": 25.0,
            "overflow_target": "CS",
            "categories": ["CS"]
        });
        let gateway = SyncGateway::new(FakeTransport::default().with_get(SUMMARY_PATH, 200, summary));

        let summary = gateway.fetch_summary().await.unwrap();
        assert_eq!(summary.total_selected_ecs, 25.0);
        assert_eq!(summary.rows[0].category, "CS");
        assert_eq!(summary.rows[0].remaining_ecs, -5.0);
    }
}
