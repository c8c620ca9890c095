//! User interface layer: view dispatch, view contracts and ANSI rendering.
//!
//! # Architecture
//!
//! ```text
//! AppState → ViewDispatcher::compose → ShellViewModel → render → ANSI frame
//!               │
//!               └─ ViewFactory → ScreenView::render(ScreenCallbacks) → Panel
//! ```
//!
//! # Modules
//!
//! - [`contract`]: intents, callbacks and the view traits
//! - [`dispatcher`]: screen lookup with failure isolation, frame composition
//! - [`screens`] / [`modals`]: standard views over the [`sample`] workspace
//! - [`viewmodel`]: display-ready frame types
//! - [`renderer`] / [`components`] / [`helpers`]: ANSI output
//! - [`theme`]: color schemes

pub mod components;
pub mod contract;
pub mod dispatcher;
pub mod helpers;
pub mod modals;
pub mod renderer;
pub mod sample;
pub mod screens;
pub mod theme;
pub mod viewmodel;

pub use contract::{Intent, ModalCallbacks, ScreenCallbacks, ScreenView, ViewFactory};
pub use dispatcher::{window_title, ViewDispatcher};
pub use renderer::render;
pub use screens::StandardViews;
pub use theme::Theme;
pub use viewmodel::{Panel, PanelAction, PanelKind, ShellViewModel};
