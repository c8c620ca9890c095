//! Screen identifiers managed by the navigation controller.
//!
//! [`ScreenId`] is a closed enumeration. Strings coming from outside the crate
//! (host commands, persisted links) are parsed with [`ScreenId::parse_lossy`],
//! which falls back to [`ScreenId::Dashboard`] for anything unrecognized, so the
//! current screen is always a member of the enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named, enumerated view slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenId {
    Dashboard,
    Candidates,
    CandidateDetail,
    Pipeline,
    Shortlists,
    ShortlistDetail,
    EditShortlist,
    Settings,
    StandaloneShortlistPreview,
}

impl ScreenId {
    /// Every screen, in sidebar order.
    pub const ALL: [Self; 9] = [
        Self::Dashboard,
        Self::Candidates,
        Self::CandidateDetail,
        Self::Pipeline,
        Self::Shortlists,
        Self::ShortlistDetail,
        Self::EditShortlist,
        Self::Settings,
        Self::StandaloneShortlistPreview,
    ];

    /// Stable kebab-case identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Candidates => "candidates",
            Self::CandidateDetail => "candidate-detail",
            Self::Pipeline => "pipeline",
            Self::Shortlists => "shortlists",
            Self::ShortlistDetail => "shortlist-detail",
            Self::EditShortlist => "edit-shortlist",
            Self::Settings => "settings",
            Self::StandaloneShortlistPreview => "standalone-shortlist-preview",
        }
    }

    /// Human-readable title used for the window title and headers.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Candidates => "Candidates",
            Self::CandidateDetail => "Candidate Profile",
            Self::Pipeline => "Pipeline",
            Self::Shortlists => "Shortlists",
            Self::ShortlistDetail => "Shortlist",
            Self::EditShortlist => "Edit Shortlist",
            Self::Settings => "Settings",
            Self::StandaloneShortlistPreview => "Shortlist Preview",
        }
    }

    /// Whether views for this screen receive the `back` callback.
    #[must_use]
    pub const fn shows_back(self) -> bool {
        matches!(
            self,
            Self::CandidateDetail
                | Self::ShortlistDetail
                | Self::EditShortlist
                | Self::StandaloneShortlistPreview
        )
    }

    /// Whether the screen is listed in the sidebar.
    ///
    /// Detail screens are only reachable from their parent list.
    #[must_use]
    pub const fn in_sidebar(self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Candidates | Self::Pipeline | Self::Shortlists | Self::Settings
        )
    }

    /// Parses an identifier, falling back to [`ScreenId::Dashboard`].
    ///
    /// # Examples
    ///
    /// ```
    /// use delv_shell::domain::ScreenId;
    ///
    /// assert_eq!(ScreenId::parse_lossy("settings"), ScreenId::Settings);
    /// assert_eq!(ScreenId::parse_lossy("reports"), ScreenId::Dashboard);
    /// ```
    #[must_use]
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::debug!(screen = %value, "unknown screen id, falling back to dashboard");
            Self::Dashboard
        })
    }
}

impl Default for ScreenId {
    fn default() -> Self {
        Self::Dashboard
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not a known screen identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScreen(pub String);

impl fmt::Display for UnknownScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown screen: {}", self.0)
    }
}

impl std::error::Error for UnknownScreen {}

impl FromStr for ScreenId {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|screen| screen.as_str() == needle)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}
