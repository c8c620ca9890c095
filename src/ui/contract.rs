//! Contract between the shell and screen/modal views.
//!
//! Views never hold a reference to the shell. They receive callback builders
//! that produce [`Intent`] values, attach those intents to the actions they
//! render, and the runtime turns an activated intent back into an
//! [`Event`](crate::app::Event). This keeps views pure and lets the host
//! activate actions by index.
//!
//! # Example
//!
//! ```
//! use delv_shell::domain::ScreenId;
//! use delv_shell::ui::contract::{Intent, ScreenCallbacks};
//!
//! let detail = ScreenCallbacks::for_screen(ScreenId::CandidateDetail);
//! assert_eq!(detail.back(), Some(Intent::Back));
//!
//! let dashboard = ScreenCallbacks::for_screen(ScreenId::Dashboard);
//! assert_eq!(dashboard.back(), None);
//! ```

use crate::domain::error::Result;
use crate::domain::{ModalId, ScreenId};
use crate::ui::viewmodel::Panel;
use serde_json::Value;

/// Something a view asks the shell to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    NavigateToScreen {
        screen: ScreenId,
        entity_id: Option<String>,
    },
    OpenModal {
        modal: ModalId,
        payload: Option<Value>,
    },
    Back,
    CloseModal,
    /// Full shell reload, offered by the fallback panel.
    Reload,
}

/// Callbacks handed to a screen view.
///
/// `back` is only available on screens that show a back affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenCallbacks {
    screen: ScreenId,
}

impl ScreenCallbacks {
    #[must_use]
    pub const fn for_screen(screen: ScreenId) -> Self {
        Self { screen }
    }

    #[must_use]
    pub const fn screen(&self) -> ScreenId {
        self.screen
    }

    #[must_use]
    pub fn navigate_to_screen(&self, screen: ScreenId, entity_id: Option<&str>) -> Intent {
        Intent::NavigateToScreen {
            screen,
            entity_id: entity_id.map(str::to_string),
        }
    }

    #[must_use]
    pub fn open_modal(&self, modal: ModalId, payload: Option<Value>) -> Intent {
        Intent::OpenModal { modal, payload }
    }

    #[must_use]
    pub const fn back(&self) -> Option<Intent> {
        if self.screen.shows_back() {
            Some(Intent::Back)
        } else {
            None
        }
    }
}

/// Callbacks handed to a modal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModalCallbacks;

impl ModalCallbacks {
    /// Maps an open-state change to an intent. Only closing does anything.
    #[must_use]
    pub const fn on_open_change(&self, open: bool) -> Option<Intent> {
        if open {
            None
        } else {
            Some(Intent::CloseModal)
        }
    }
}

/// A constructed screen, ready to render.
pub trait ScreenView {
    /// Renders the screen.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Render`](crate::ShellError::Render) when the view
    /// cannot produce output for its inputs.
    fn render(&self, callbacks: &ScreenCallbacks) -> Result<Panel>;
}

/// Builds screen views from identifiers.
pub trait ViewFactory {
    /// Constructs the view for `screen`.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Render`](crate::ShellError::Render) when the view
    /// cannot be built, for example a detail screen without an entity id.
    fn construct(&self, screen: ScreenId, entity_id: Option<&str>) -> Result<Box<dyn ScreenView>>;
}

/// Props passed to every modal view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalProps {
    pub open: bool,
}

/// A modal body.
pub trait ModalView {
    fn render(&self, props: ModalProps, payload: Option<&Value>, callbacks: &ModalCallbacks) -> Panel;
}
