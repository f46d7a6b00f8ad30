//! Domain model for catalog reconciliation.

mod defaults;
mod report;

pub use defaults::{
    DEFAULT_PROJECT_COLOR, DEFAULT_RATE_TYPE, EXCLUDED_CLIENT_CODES, is_excluded_client,
    new_project_for, project_key, project_label_ids, PROJECT_MEMBER_IDS,
};
pub use report::{
    ChangeSummary, ClientSync, FailedClientCreate, FailedProjectCreate, ProjectSync,
};
