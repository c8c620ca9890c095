//! Standard screen views.
//!
//! [`StandardViews`] maps every [`ScreenId`] to a view with an exhaustive
//! match, so adding a screen without a view fails to compile. Detail screens
//! need an entity id that resolves in the sample data; anything else is a
//! [`ShellError::Render`] that the dispatcher turns into a fallback panel.

use crate::domain::error::{Result, ShellError};
use crate::domain::{ModalId, ScreenId};
use crate::ui::contract::{ScreenCallbacks, ScreenView, ViewFactory};
use crate::ui::sample::{self, SampleCandidate, SampleShortlist, CANDIDATES, SHORTLISTS, STAGES};
use crate::ui::viewmodel::{Panel, PanelKind};
use serde_json::json;

/// Default [`ViewFactory`] backed by the built-in sample workspace.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardViews;

impl ViewFactory for StandardViews {
    fn construct(&self, screen: ScreenId, entity_id: Option<&str>) -> Result<Box<dyn ScreenView>> {
        let view: Box<dyn ScreenView> = match screen {
            ScreenId::Dashboard => Box::new(DashboardView),
            ScreenId::Candidates => Box::new(CandidatesView),
            ScreenId::CandidateDetail => Box::new(CandidateDetailView {
                candidate: require_candidate(screen, entity_id)?,
            }),
            ScreenId::Pipeline => Box::new(PipelineView),
            ScreenId::Shortlists => Box::new(ShortlistsView),
            ScreenId::ShortlistDetail => Box::new(ShortlistDetailView {
                shortlist: require_shortlist(screen, entity_id)?,
            }),
            ScreenId::EditShortlist => Box::new(EditShortlistView {
                shortlist: require_shortlist(screen, entity_id)?,
            }),
            ScreenId::Settings => Box::new(SettingsView),
            ScreenId::StandaloneShortlistPreview => {
                let shortlist = match entity_id {
                    Some(id) => require_shortlist(screen, Some(id))?,
                    None => &SHORTLISTS[0],
                };
                Box::new(StandalonePreviewView { shortlist })
            }
        };
        Ok(view)
    }
}

fn require_candidate(screen: ScreenId, entity_id: Option<&str>) -> Result<&'static SampleCandidate> {
    let id = entity_id.ok_or_else(|| render_error(screen, "no candidate selected"))?;
    sample::find_candidate(id).ok_or_else(|| render_error(screen, format!("unknown candidate '{id}'")))
}

fn require_shortlist(screen: ScreenId, entity_id: Option<&str>) -> Result<&'static SampleShortlist> {
    let id = entity_id.ok_or_else(|| render_error(screen, "no shortlist selected"))?;
    sample::find_shortlist(id).ok_or_else(|| render_error(screen, format!("unknown shortlist '{id}'")))
}

fn render_error(screen: ScreenId, message: impl Into<String>) -> ShellError {
    ShellError::Render {
        screen: screen.to_string(),
        message: message.into(),
    }
}

fn candidate_line(candidate: &SampleCandidate) -> String {
    format!(
        "{:<16} {:<26} {:<10} {:>3}",
        candidate.name, candidate.role, candidate.stage, candidate.score
    )
}

fn candidate_payload(candidate: &SampleCandidate) -> serde_json::Value {
    json!({
        "id": candidate.id,
        "name": candidate.name,
        "role": candidate.role,
        "stage": candidate.stage,
    })
}

fn shortlist_payload(shortlist: &SampleShortlist) -> serde_json::Value {
    json!({
        "id": shortlist.id,
        "title": shortlist.title,
        "client": shortlist.client,
        "candidates": shortlist.candidate_ids.len(),
    })
}

struct DashboardView;

impl ScreenView for DashboardView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let interviewing = sample::candidates_in_stage("Interview").count();
        let offers = sample::candidates_in_stage("Offer").count();

        Ok(Panel::new(PanelKind::Screen, "Dashboard")
            .subtitle("Today at a glance")
            .line(format!("Active candidates   {}", CANDIDATES.len()))
            .line(format!("In interview        {interviewing}"))
            .line(format!("Offers out          {offers}"))
            .line(format!("Open shortlists     {}", SHORTLISTS.len()))
            .action("View candidates", cb.navigate_to_screen(ScreenId::Candidates, None))
            .action("Open pipeline", cb.navigate_to_screen(ScreenId::Pipeline, None))
            .action("Add candidate", cb.open_modal(ModalId::AddCandidate, None))
            .action("Schedule interview", cb.open_modal(ModalId::ScheduleInterview, None))
            .action("Edit task", cb.open_modal(ModalId::EditTask, None)))
    }
}

struct CandidatesView;

impl ScreenView for CandidatesView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let mut panel = Panel::new(PanelKind::Screen, "Candidates")
            .subtitle(format!("{} people in the workspace", CANDIDATES.len()));

        for candidate in &CANDIDATES {
            panel = panel.line(candidate_line(candidate));
        }
        for candidate in &CANDIDATES {
            panel = panel
                .action(
                    format!("Open {}", candidate.name),
                    cb.navigate_to_screen(ScreenId::CandidateDetail, Some(candidate.id)),
                )
                .action(
                    format!("Preview {}", candidate.name),
                    cb.open_modal(ModalId::CandidatePreview, Some(candidate_payload(candidate))),
                );
        }

        Ok(panel.action("Add candidate", cb.open_modal(ModalId::AddCandidate, None)))
    }
}

struct CandidateDetailView {
    candidate: &'static SampleCandidate,
}

impl ScreenView for CandidateDetailView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let c = self.candidate;
        let shortlisted: Vec<&str> = SHORTLISTS
            .iter()
            .filter(|s| s.candidate_ids.contains(&c.id))
            .map(|s| s.title)
            .collect();

        Ok(Panel::new(PanelKind::Screen, c.name)
            .subtitle(c.role)
            .line(format!("Stage      {}", c.stage))
            .line(format!("Location   {}", c.location))
            .line(format!("Match      {}%", c.score))
            .line(if shortlisted.is_empty() {
                "Not on any shortlist".to_string()
            } else {
                format!("Shortlists {}", shortlisted.join(", "))
            })
            .action_if("Back", cb.back())
            .action("Schedule interview", cb.open_modal(ModalId::ScheduleInterview, None))
            .action("Create shortlist", cb.open_modal(ModalId::CreateShortlist, None)))
    }
}

struct PipelineView;

impl ScreenView for PipelineView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let mut panel = Panel::new(PanelKind::Screen, "Pipeline").subtitle("Candidates by stage");

        for stage in &STAGES {
            let names: Vec<&str> = sample::candidates_in_stage(stage).map(|c| c.name).collect();
            let listed = if names.is_empty() { "-".to_string() } else { names.join(", ") };
            panel = panel.line(format!("{stage:<10} {:>2}  {listed}", names.len()));
        }

        for candidate in sample::candidates_in_stage("Interview") {
            panel = panel.action(
                format!("Open {}", candidate.name),
                cb.navigate_to_screen(ScreenId::CandidateDetail, Some(candidate.id)),
            );
        }

        Ok(panel.action("Schedule interview", cb.open_modal(ModalId::ScheduleInterview, None)))
    }
}

struct ShortlistsView;

impl ScreenView for ShortlistsView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let mut panel = Panel::new(PanelKind::Screen, "Shortlists");

        for shortlist in &SHORTLISTS {
            panel = panel.line(format!(
                "{:<26} {:<20} {} candidates",
                shortlist.title,
                shortlist.client,
                shortlist.candidate_ids.len()
            ));
        }
        for shortlist in &SHORTLISTS {
            panel = panel
                .action(
                    format!("Open {}", shortlist.title),
                    cb.navigate_to_screen(ScreenId::ShortlistDetail, Some(shortlist.id)),
                )
                .action(
                    format!("Preview {}", shortlist.title),
                    cb.open_modal(ModalId::ShortlistPreview, Some(shortlist_payload(shortlist))),
                );
        }

        Ok(panel.action("Create shortlist", cb.open_modal(ModalId::CreateShortlist, None)))
    }
}

struct ShortlistDetailView {
    shortlist: &'static SampleShortlist,
}

impl ScreenView for ShortlistDetailView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let s = self.shortlist;
        let mut panel = Panel::new(PanelKind::Screen, s.title).subtitle(format!("For {}", s.client));

        for candidate in s.candidate_ids.iter().filter_map(|id| sample::find_candidate(id)) {
            panel = panel.line(candidate_line(candidate));
        }

        Ok(panel
            .action_if("Back", cb.back())
            .action("Edit shortlist", cb.navigate_to_screen(ScreenId::EditShortlist, Some(s.id)))
            .action("Share shortlist", cb.open_modal(ModalId::ShareShortlist, None))
            .action(
                "Client preview",
                cb.navigate_to_screen(ScreenId::StandaloneShortlistPreview, Some(s.id)),
            ))
    }
}

struct EditShortlistView {
    shortlist: &'static SampleShortlist,
}

impl ScreenView for EditShortlistView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let s = self.shortlist;
        let mut panel = Panel::new(PanelKind::Screen, format!("Edit: {}", s.title))
            .line(format!("Title    {}", s.title))
            .line(format!("Client   {}", s.client));

        for candidate in &CANDIDATES {
            let mark = if s.candidate_ids.contains(&candidate.id) { "[x]" } else { "[ ]" };
            panel = panel.line(format!("{mark} {}", candidate.name));
        }

        Ok(panel
            .action_if("Back", cb.back())
            .action("Add candidate", cb.open_modal(ModalId::AddCandidate, None)))
    }
}

struct SettingsView;

impl ScreenView for SettingsView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        Ok(Panel::new(PanelKind::Screen, "Settings")
            .line("Workspace        Delv Global")
            .line("Notifications    Email and in-app")
            .line("Interview slots  45 minutes")
            .action("Edit reminder task", cb.open_modal(ModalId::EditTask, None)))
    }
}

struct StandalonePreviewView {
    shortlist: &'static SampleShortlist,
}

impl ScreenView for StandalonePreviewView {
    fn render(&self, cb: &ScreenCallbacks) -> Result<Panel> {
        let s = self.shortlist;
        let mut panel = Panel::new(PanelKind::Screen, s.title)
            .subtitle(format!("Prepared for {}", s.client));

        for candidate in s.candidate_ids.iter().filter_map(|id| sample::find_candidate(id)) {
            panel = panel.line(format!("{} - {} ({})", candidate.name, candidate.role, candidate.location));
        }

        Ok(panel.action_if("Back", cb.back()))
    }
}

/// Splash shown while a session operation is resolving.
#[must_use]
pub fn loading_panel() -> Panel {
    Panel::new(PanelKind::Loading, "Delv Talent").line("Loading your workspace...")
}

/// Sign-in surface, showing the last authentication error if any.
#[must_use]
pub fn login_panel(error: Option<&str>) -> Panel {
    let panel = Panel::new(PanelKind::Login, "Sign in to Delv Talent")
        .subtitle("Recruiting operations workspace");

    match error {
        Some(message) => panel.line(message),
        None => panel.line("Enter your work email and password."),
    }
}
