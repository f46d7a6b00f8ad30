//! Fixed rosters and defaults applied to synchronized records.

use crate::connect::domain::{
    JobRecord, LabelId, NewProject, ProjectLabel, ProjectMember, TrackerClientId, normalized,
};

/// Display colour assigned to every synchronized project.
pub const DEFAULT_PROJECT_COLOR: &str = "FFFFFF";

/// Billing rate type assigned to every synchronized project.
pub const DEFAULT_RATE_TYPE: &str = "project";

/// Client codes excluded from synchronization in both directions.
pub const EXCLUDED_CLIENT_CODES: [&str; 4] = ["Client1", "Client2", "Client3", "Client4"];

/// Tracker users granted access to every synchronized project.
pub const PROJECT_MEMBER_IDS: [i64; 22] = [
    2_215_558, 2_215_702, 2_232_597, 2_232_598, 2_232_596, 2_215_698, 2_232_599, 2_232_600,
    2_230_571, 2_215_699, 2_215_700, 2_215_701, 2_244_639, 2_244_640, 2_244_638, 2_244_644,
    2_244_643, 2_245_192, 2_244_647, 2_244_646, 2_244_641, 2_244_637,
];

/// First and last label enabled on synchronized projects, inclusive.
const PROJECT_LABEL_RANGE: (i64, i64) = (4_018_292, 4_018_305);

/// Labels enabled on every synchronized project.
#[must_use]
pub fn project_label_ids() -> Vec<LabelId> {
    (PROJECT_LABEL_RANGE.0..=PROJECT_LABEL_RANGE.1)
        .map(LabelId::new)
        .collect()
}

/// Returns `true` when the client code is on the synchronization denylist.
#[must_use]
pub fn is_excluded_client(code: &str) -> bool {
    EXCLUDED_CLIENT_CODES.contains(&code)
}

/// Normalised lookup key for a tracker project, `"{name} - {code}"`.
#[must_use]
pub fn project_key(job_name: &str, job_code: &str) -> String {
    normalized(&format!("{job_name} - {job_code}"))
}

/// Builds the creation payload for a project mirroring an agency job.
///
/// The first enabled label is marked required; the member roster and
/// defaults are fixed.
#[must_use]
pub fn new_project_for(job: &JobRecord, client_id: TrackerClientId) -> NewProject {
    NewProject {
        name: format!("{} - {}", job.job_name, job.job_code),
        client_id,
        color: DEFAULT_PROJECT_COLOR.to_owned(),
        rate_type: DEFAULT_RATE_TYPE.to_owned(),
        users: PROJECT_MEMBER_IDS
            .iter()
            .map(|&user_id| ProjectMember { user_id })
            .collect(),
        labels: project_label_ids()
            .into_iter()
            .enumerate()
            .map(|(position, label_id)| ProjectLabel {
                required: position == 0,
                label_id,
            })
            .collect(),
        enable_labels: "custom".to_owned(),
        external_id: job.job_id,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_excluded_client, new_project_for, project_key};
    use crate::connect::domain::{ClientId, JobId, JobRecord, TrackerClientId};

    fn job() -> JobRecord {
        JobRecord {
            job_id: JobId::new(42),
            client_id: ClientId::new(5),
            client_code: "ACME".to_owned(),
            client_name: "Acme Co".to_owned(),
            job_code: "J-42".to_owned(),
            job_name: "Rebrand".to_owned(),
        }
    }

    #[test]
    fn project_key_is_normalised() {
        assert_eq!(project_key(" Rebrand", "J-42 "), "rebrand - j-42");
    }

    #[test]
    fn excluded_codes_match_exactly() {
        assert!(is_excluded_client("Client1"));
        assert!(!is_excluded_client("client1"));
        assert!(!is_excluded_client("Client9"));
    }

    #[test]
    fn project_payload_marks_only_the_first_label_required() {
        let payload = new_project_for(&job(), TrackerClientId::new(5));
        assert_eq!(payload.name, "Rebrand - J-42");
        assert_eq!(payload.external_id, JobId::new(42));
        assert_eq!(payload.users.len(), 22);
        assert_eq!(payload.labels.len(), 14);
        let required = payload
            .labels
            .iter()
            .filter(|label| label.required)
            .count();
        assert_eq!(required, 1);
        assert!(payload.labels.first().is_some_and(|label| label.required));
    }
}
