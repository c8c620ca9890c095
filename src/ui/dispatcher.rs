//! View dispatch and render-failure isolation.
//!
//! The dispatcher is the only place a screen failure is caught. Construction
//! and rendering of the selected view run inside one boundary; an `Err` or a
//! panic is logged and replaced with a fallback panel offering a reload. The
//! reducer and session state never see the failure.
//!
//! It also composes the full [`ShellViewModel`]: loading splash or login view
//! while signed out, otherwise the screen plus chrome and the modal overlay.

use crate::app::AppState;
use crate::domain::error::ShellError;
use crate::domain::ScreenId;
use crate::ui::contract::{Intent, ModalCallbacks, ModalProps, ScreenCallbacks, ViewFactory};
use crate::ui::modals::standard_modal;
use crate::ui::screens::{loading_panel, login_panel, StandardViews};
use crate::ui::viewmodel::{Panel, PanelKind, ShellViewModel};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Product name used in window titles.
pub const APP_NAME: &str = "Delv Talent";

/// Window title for a screen, e.g. `"Pipeline | Delv Talent"`.
#[must_use]
pub fn window_title(screen: ScreenId) -> String {
    format!("{} | {APP_NAME}", screen.title())
}

/// Maps screens to views and isolates their failures.
pub struct ViewDispatcher {
    factory: Box<dyn ViewFactory>,
}

impl ViewDispatcher {
    #[must_use]
    pub fn new(factory: Box<dyn ViewFactory>) -> Self {
        Self { factory }
    }

    /// Renders `screen`, substituting a fallback panel on any failure.
    #[must_use]
    pub fn render(&self, screen: ScreenId, entity_id: Option<&str>) -> Panel {
        let _span = tracing::debug_span!("render_screen", screen = %screen).entered();
        let callbacks = ScreenCallbacks::for_screen(screen);

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.factory
                .construct(screen, entity_id)
                .and_then(|view| view.render(&callbacks))
        }));

        let error = match outcome {
            Ok(Ok(panel)) => return panel,
            Ok(Err(error)) => error,
            Err(payload) => ShellError::Render {
                screen: screen.to_string(),
                message: panic_message(&*payload),
            },
        };

        tracing::error!(screen = %screen, error = %error, "screen failed to render");
        fallback_panel(screen, &error)
    }

    /// Renders by raw identifier; unknown ids get the dashboard.
    #[must_use]
    pub fn render_named(&self, screen_id: &str, entity_id: Option<&str>) -> Panel {
        self.render(ScreenId::parse_lossy(screen_id), entity_id)
    }

    /// Composes the whole frame for the current state.
    #[must_use]
    pub fn compose(&self, state: &AppState) -> ShellViewModel {
        let nav = &state.navigation;

        let (content, modal) = if state.is_authenticated() {
            let content = self.render(nav.current_screen, nav.selected_entity_id.as_deref());
            let modal = state.modal.active_modal.map(|id| {
                standard_modal(id).render(
                    ModalProps { open: true },
                    state.modal.payload.as_ref(),
                    &ModalCallbacks,
                )
            });
            (content, modal)
        } else if state.session.loading {
            (loading_panel(), None)
        } else {
            (login_panel(state.session.error.as_deref()), None)
        };

        ShellViewModel {
            header: state.compute_header(),
            sidebar: state.compute_sidebar(),
            content,
            modal,
            footer: state.compute_footer(),
            transitioning: nav.transitioning,
        }
    }
}

impl Default for ViewDispatcher {
    fn default() -> Self {
        Self::new(Box::new(StandardViews))
    }
}

impl std::fmt::Debug for ViewDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewDispatcher").finish_non_exhaustive()
    }
}

fn fallback_panel(screen: ScreenId, error: &ShellError) -> Panel {
    Panel::new(PanelKind::Fallback, "Something went wrong")
        .subtitle(format!("{} could not be displayed", screen.title()))
        .line(error.to_string())
        .action("Reload", Intent::Reload)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
