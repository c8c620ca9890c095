//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots composed by the view dispatcher from
//! [`AppState`](crate::app::AppState) and the active views. They contain no
//! business logic, only display-ready data plus the [`Intent`]s attached to
//! activatable actions.
//!
//! # Example
//!
//! ```
//! use delv_shell::ui::contract::Intent;
//! use delv_shell::ui::viewmodel::{Panel, PanelKind};
//!
//! let panel = Panel::new(PanelKind::Screen, "Dashboard")
//!     .line("3 interviews today")
//!     .action("Reload", Intent::Reload);
//! assert_eq!(panel.actions.len(), 1);
//! ```

use crate::app::Breakpoint;
use crate::domain::ScreenId;
use crate::ui::contract::Intent;

/// Complete shell view model for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellViewModel {
    pub header: HeaderInfo,

    /// Present only while the sidebar is open.
    pub sidebar: Option<SidebarInfo>,

    /// Main content: loading, login, a screen, or a fallback panel.
    pub content: Panel,

    /// Overlay drawn above the content while a modal is open.
    pub modal: Option<Panel>,

    pub footer: FooterInfo,

    /// Set for the single tick after a navigation.
    pub transitioning: bool,
}

impl ShellViewModel {
    /// Actions the host can activate by index.
    ///
    /// An open modal captures all input, so its actions replace the content's.
    #[must_use]
    pub fn active_actions(&self) -> &[PanelAction] {
        self.modal
            .as_ref()
            .map_or(&self.content.actions, |modal| &modal.actions)
    }
}

/// What a panel represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Screen,
    Modal,
    Login,
    Loading,
    /// Recoverable error shown in place of a failed view.
    Fallback,
}

/// A titled block of lines with activatable actions.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub kind: PanelKind,
    pub title: String,
    pub subtitle: Option<String>,
    pub lines: Vec<String>,
    pub actions: Vec<PanelAction>,
}

impl Panel {
    #[must_use]
    pub fn new(kind: PanelKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            subtitle: None,
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    #[must_use]
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn action(mut self, label: impl Into<String>, intent: Intent) -> Self {
        self.actions.push(PanelAction {
            label: label.into(),
            intent,
        });
        self
    }

    /// Adds an action only when an intent is available.
    #[must_use]
    pub fn action_if(self, label: impl Into<String>, intent: Option<Intent>) -> Self {
        match intent {
            Some(intent) => self.action(label, intent),
            None => self,
        }
    }
}

/// A labelled intent inside a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelAction {
    pub label: String,
    pub intent: Intent,
}

/// Top bar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub user: Option<UserBadge>,
    pub breakpoint: Breakpoint,
    pub show_back: bool,
}

/// Signed-in user shown in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBadge {
    pub name: String,
    pub role: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarInfo {
    pub items: Vec<SidebarItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub screen: ScreenId,
    pub label: String,
    pub is_active: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hints for the current surface.
    pub keybindings: String,
}
