//! Domain model shared with the remote platforms.
//!
//! Identifier newtypes and the wire-facing records exchanged with the
//! tracker and agency APIs. Infrastructure concerns stay outside this
//! boundary; everything here is plain data.

mod agency;
mod error;
mod ids;
mod tracker;

pub use agency::{
    AgencyClientRecord, AgencySession, AgencyTask, JobRecord, TimesheetFields, TimesheetReceipt,
};
pub use error::{ConnectError, ConnectResult};
pub use ids::{ClientId, JobId, LabelId, PersonId, SourceEntryId, TargetEntryId, TaskId, TrackerClientId, TrackerUserId};
pub use tracker::{
    ClientDirectory, CreatedClient, NewClient, NewProject, ProjectLabel, ProjectMember,
    TrackerClientRef, TrackerEntry, TrackerProject, TrackerProjectRef, TrackerUser,
    TrackerUserRef, normalized,
};
