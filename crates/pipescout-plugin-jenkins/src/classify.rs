use std::fmt;

const FOLDER_SUFFIX: &str = "Folder";
const PIPELINE_SUFFIX: &str = "WorkflowJob";

/// Category of a Jenkins job, derived from its `_class` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobKind {
    Folder,
    Pipeline,
    Other,
}

impl JobKind {
    /// Classifies a raw job type label by case-sensitive suffix.
    ///
    /// The folder suffix is checked first, so a label carrying both suffixes
    /// is a folder.
    pub fn classify(label: &str) -> Self {
        if label.ends_with(FOLDER_SUFFIX) {
            Self::Folder
        } else if label.ends_with(PIPELINE_SUFFIX) {
            Self::Pipeline
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "Folder"),
            Self::Pipeline => write!(f, "Pipeline"),
            Self::Other => write!(f, "Other"),
        }
    }
}
