//! API response types for Jenkins API

use serde::Deserialize;

use crate::classify::JobKind;

/// Fields requested from every Jenkins JSON endpoint
pub(crate) const JOB_TREE: &str = "_class,name,url,jobs[_class,name,url]";

/// A job known to the Jenkins server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobRef {
    pub name: String,
    /// Canonical server-side URL of the job
    #[serde(default)]
    pub url: String,
    #[serde(rename = "_class")]
    #[serde(default)]
    pub class: String,
    /// Job names from the server root down to this job
    #[serde(skip)]
    pub path: Vec<String>,
}

impl JobRef {
    pub fn kind(&self) -> JobKind {
        JobKind::classify(&self.class)
    }

    /// Fills in `path` for a job listed under `parent`
    pub(crate) fn under(mut self, parent: &[String]) -> Self {
        let mut path = parent.to_vec();
        path.push(self.name.clone());
        self.path = path;
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobsResponse {
    #[serde(default)]
    pub jobs: Vec<JobRef>,
}
