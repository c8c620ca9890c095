//! Viewport classification and sidebar policy.
//!
//! Width thresholds:
//!
//! | width (px)   | tier    |
//! |--------------|---------|
//! | `< 768`      | Mobile  |
//! | `768..1024`  | Tablet  |
//! | `>= 1024`    | Desktop |
//!
//! The sidebar is open exactly when the user is authenticated and the viewport
//! is at least [`SIDEBAR_MIN_WIDTH`] wide. A manual toggle overrides the policy
//! until the next resize or authentication change recomputes it.

use std::fmt;

pub const TABLET_MIN_WIDTH: u32 = 768;
pub const DESKTOP_MIN_WIDTH: u32 = 1024;

/// Narrowest viewport that can show the sidebar.
pub const SIDEBAR_MIN_WIDTH: u32 = 640;

/// Responsive layout tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    Desktop,
}

impl Breakpoint {
    #[must_use]
    pub const fn classify(width_px: u32) -> Self {
        if width_px < TABLET_MIN_WIDTH {
            Self::Mobile
        } else if width_px < DESKTOP_MIN_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the sidebar should be open for this session and width.
#[must_use]
pub const fn sidebar_policy(authenticated: bool, width_px: u32) -> bool {
    authenticated && width_px >= SIDEBAR_MIN_WIDTH
}

/// Settled viewport plus the sidebar flag derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    pub width_px: u32,
    pub breakpoint: Breakpoint,
    pub sidebar_open: bool,
}

impl ViewportState {
    /// Viewport before authentication has resolved. The sidebar stays closed.
    #[must_use]
    pub const fn new(width_px: u32) -> Self {
        Self {
            width_px,
            breakpoint: Breakpoint::classify(width_px),
            sidebar_open: false,
        }
    }

    /// Applies a settled width and recomputes the sidebar from policy.
    #[must_use]
    pub const fn resized(&self, width_px: u32, authenticated: bool) -> Self {
        Self {
            width_px,
            breakpoint: Breakpoint::classify(width_px),
            sidebar_open: sidebar_policy(authenticated, width_px),
        }
    }

    /// Recomputes the sidebar for a new authentication state.
    #[must_use]
    pub const fn reauthenticated(&self, authenticated: bool) -> Self {
        self.resized(self.width_px, authenticated)
    }

    /// Flips the sidebar.
    ///
    /// Returns `None` when the toggle is not allowed: unauthenticated, or the
    /// viewport is too narrow to show a sidebar at all.
    #[must_use]
    pub const fn toggled(&self, authenticated: bool) -> Option<Self> {
        if !authenticated || self.width_px < SIDEBAR_MIN_WIDTH {
            return None;
        }
        Some(Self {
            sidebar_open: !self.sidebar_open,
            ..*self
        })
    }
}
