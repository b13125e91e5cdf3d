//! In-memory job server for unit tests

use std::collections::{
    HashMap,
    HashSet,
};
use std::sync::Mutex;

use async_trait::async_trait;
use pipescout_plugin_api::{
    PluginError,
    PluginResult,
};

use crate::server::JobServer;
use crate::types::JobRef;

pub(crate) const BASE_URL: &str = "https://ci.example.com/jenkins";

fn job(name: &str, class: &str) -> JobRef {
    JobRef {
        name: name.to_string(),
        url: format!("{BASE_URL}/job/{name}/"),
        class: class.to_string(),
        path: vec![name.to_string()],
    }
}

pub(crate) fn folder(name: &str) -> JobRef {
    job(name, "com.cloudbees.hudson.plugins.folder.Folder")
}

pub(crate) fn pipeline(name: &str) -> JobRef {
    job(name, "org.jenkinsci.plugins.workflow.job.WorkflowJob")
}

pub(crate) fn other(name: &str) -> JobRef {
    job(name, "hudson.model.FreeStyleProject")
}

/// Jobs are keyed by name; listings and fetches are recorded in call order
#[derive(Default)]
pub(crate) struct FakeJobServer {
    top_level: Vec<JobRef>,
    children: HashMap<String, Vec<JobRef>>,
    jobs: HashMap<Vec<String>, JobRef>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeJobServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_level(mut self, jobs: Vec<JobRef>) -> Self {
        self.top_level = jobs;
        self
    }

    pub fn with_children(mut self, folder: &str, jobs: Vec<JobRef>) -> Self {
        self.children.insert(folder.to_string(), jobs);
        self
    }

    /// Registers a job reachable through `fetch_job_by_path`
    pub fn with_job(mut self, path: &[&str], job: JobRef) -> Self {
        self.jobs
            .insert(path.iter().map(|s| s.to_string()).collect(), job);
        self
    }

    pub fn failing_children(mut self, folder: &str) -> Self {
        self.failing.insert(folder.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl JobServer for FakeJobServer {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn list_top_level_jobs(&self) -> PluginResult<Vec<JobRef>> {
        self.record("top".to_string());
        Ok(self.top_level.clone())
    }

    async fn list_child_jobs(&self, folder: &JobRef) -> PluginResult<Vec<JobRef>> {
        self.record(format!("children:{}", folder.name));
        if self.failing.contains(&folder.name) {
            return Err(PluginError::JobFetch(format!("HTTP 500 for {}", folder.name)));
        }
        Ok(self.children.get(&folder.name).cloned().unwrap_or_default())
    }

    async fn fetch_job_by_path(&self, job_id: &str, ancestors: &[String]) -> PluginResult<JobRef> {
        let mut path = ancestors.to_vec();
        path.push(job_id.to_string());
        self.record(format!("job:{}", path.join("/")));
        self.jobs
            .get(&path)
            .cloned()
            .ok_or_else(|| PluginError::JobFetch(format!("HTTP 404 for {}", path.join("/"))))
    }
}
