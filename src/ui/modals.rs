//! Standard modal views.
//!
//! Form modals show their fields and close on either action; preview modals
//! show whatever payload the opener supplied. Every modal reaches the shell
//! only through [`ModalCallbacks::on_open_change`].

use crate::domain::ModalId;
use crate::ui::contract::{ModalCallbacks, ModalProps, ModalView};
use crate::ui::viewmodel::{Panel, PanelKind};
use serde_json::Value;

/// Returns the view for a modal kind.
#[must_use]
pub fn standard_modal(modal: ModalId) -> Box<dyn ModalView> {
    match modal {
        ModalId::AddCandidate => Box::new(FormModal {
            modal,
            fields: &["Full name", "Email", "Role", "Source"],
            submit: "Add candidate",
        }),
        ModalId::ScheduleInterview => Box::new(FormModal {
            modal,
            fields: &["Candidate", "Interviewers", "Date", "Duration"],
            submit: "Schedule",
        }),
        ModalId::CreateShortlist => Box::new(FormModal {
            modal,
            fields: &["Title", "Client", "Role"],
            submit: "Create",
        }),
        ModalId::ShareShortlist => Box::new(FormModal {
            modal,
            fields: &["Recipient email", "Message", "Link expiry"],
            submit: "Share",
        }),
        ModalId::EditTask => Box::new(FormModal {
            modal,
            fields: &["Task", "Due date", "Assignee"],
            submit: "Save task",
        }),
        ModalId::CandidatePreview | ModalId::ShortlistPreview => Box::new(PreviewModal { modal }),
    }
}

struct FormModal {
    modal: ModalId,
    fields: &'static [&'static str],
    submit: &'static str,
}

impl ModalView for FormModal {
    fn render(&self, props: ModalProps, _payload: Option<&Value>, callbacks: &ModalCallbacks) -> Panel {
        let mut panel = Panel::new(PanelKind::Modal, self.modal.title());
        if !props.open {
            return panel;
        }

        for field in self.fields {
            panel = panel.line(format!("{field:<16} ____________"));
        }

        panel
            .action_if(self.submit, callbacks.on_open_change(false))
            .action_if("Cancel", callbacks.on_open_change(false))
    }
}

struct PreviewModal {
    modal: ModalId,
}

impl ModalView for PreviewModal {
    fn render(&self, props: ModalProps, payload: Option<&Value>, callbacks: &ModalCallbacks) -> Panel {
        let mut panel = Panel::new(PanelKind::Modal, self.modal.title());
        if !props.open {
            return panel;
        }

        match payload {
            Some(Value::Object(fields)) => {
                for (key, value) in fields {
                    let shown = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    panel = panel.line(format!("{key:<12} {shown}"));
                }
            }
            Some(other) => panel = panel.line(other.to_string()),
            None => panel = panel.line("Nothing to preview"),
        }

        panel.action_if("Close", callbacks.on_open_change(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::contract::Intent;
    use serde_json::json;

    const OPEN: ModalProps = ModalProps { open: true };

    #[test]
    fn every_modal_can_close() {
        for modal in ModalId::ALL {
            let panel = standard_modal(modal).render(OPEN, None, &ModalCallbacks);
            assert!(
                panel.actions.iter().any(|a| a.intent == Intent::CloseModal),
                "{modal} has no close action"
            );
        }
    }

    #[test]
    fn preview_lists_payload_fields() {
        let payload = json!({"name": "Priya Raman", "stage": "Interview"});
        let panel = standard_modal(ModalId::CandidatePreview).render(OPEN, Some(&payload), &ModalCallbacks);
        assert!(panel.lines.iter().any(|l| l.contains("Priya Raman")));
    }

    #[test]
    fn closed_modal_renders_empty() {
        let panel = standard_modal(ModalId::EditTask).render(ModalProps { open: false }, None, &ModalCallbacks);
        assert!(panel.lines.is_empty());
        assert!(panel.actions.is_empty());
    }
}
