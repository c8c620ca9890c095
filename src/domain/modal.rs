//! Modal identifiers for the single-slot overlay.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A transient overlay kind.
///
/// Only the preview kinds carry a payload; everything else is a form whose
/// content is owned by the modal component itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModalId {
    AddCandidate,
    ScheduleInterview,
    CreateShortlist,
    ShareShortlist,
    EditTask,
    CandidatePreview,
    ShortlistPreview,
}

impl ModalId {
    pub const ALL: [Self; 7] = [
        Self::AddCandidate,
        Self::ScheduleInterview,
        Self::CreateShortlist,
        Self::ShareShortlist,
        Self::EditTask,
        Self::CandidatePreview,
        Self::ShortlistPreview,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddCandidate => "add-candidate",
            Self::ScheduleInterview => "schedule-interview",
            Self::CreateShortlist => "create-shortlist",
            Self::ShareShortlist => "share-shortlist",
            Self::EditTask => "edit-task",
            Self::CandidatePreview => "candidate-preview",
            Self::ShortlistPreview => "shortlist-preview",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::AddCandidate => "Add Candidate",
            Self::ScheduleInterview => "Schedule Interview",
            Self::CreateShortlist => "Create Shortlist",
            Self::ShareShortlist => "Share Shortlist",
            Self::EditTask => "Edit Task",
            Self::CandidatePreview => "Candidate Preview",
            Self::ShortlistPreview => "Shortlist Preview",
        }
    }

    /// Whether the orchestrator keeps the payload passed to `open`.
    #[must_use]
    pub const fn accepts_payload(self) -> bool {
        matches!(self, Self::CandidatePreview | Self::ShortlistPreview)
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known modal identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModal(pub String);

impl fmt::Display for UnknownModal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown modal: {}", self.0)
    }
}

impl std::error::Error for UnknownModal {}

impl FromStr for ModalId {
    type Err = UnknownModal;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|modal| modal.as_str() == needle)
            .ok_or_else(|| UnknownModal(s.to_string()))
    }
}
