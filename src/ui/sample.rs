//! Built-in recruiting data shown by the standard views.

/// A candidate in the demo workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleCandidate {
    pub id: &'static str,
    pub name: &'static str,
    pub role: &'static str,
    pub stage: &'static str,
    pub location: &'static str,
    pub score: u8,
}

/// A shortlist in the demo workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleShortlist {
    pub id: &'static str,
    pub title: &'static str,
    pub client: &'static str,
    pub candidate_ids: &'static [&'static str],
}

pub static CANDIDATES: [SampleCandidate; 5] = [
    SampleCandidate {
        id: "c-101",
        name: "Priya Raman",
        role: "Senior Backend Engineer",
        stage: "Interview",
        location: "London",
        score: 92,
    },
    SampleCandidate {
        id: "c-102",
        name: "Marcus Webb",
        role: "Product Designer",
        stage: "Screening",
        location: "Berlin",
        score: 84,
    },
    SampleCandidate {
        id: "c-103",
        name: "Sofia Alvarez",
        role: "Data Scientist",
        stage: "Offer",
        location: "Madrid",
        score: 95,
    },
    SampleCandidate {
        id: "c-104",
        name: "Jonah Kim",
        role: "Engineering Manager",
        stage: "Sourced",
        location: "Remote",
        score: 78,
    },
    SampleCandidate {
        id: "c-105",
        name: "Amara Okafor",
        role: "Frontend Engineer",
        stage: "Interview",
        location: "Lagos",
        score: 88,
    },
];

pub static SHORTLISTS: [SampleShortlist; 2] = [
    SampleShortlist {
        id: "s-201",
        title: "Platform Engineering Q4",
        client: "Northwind Logistics",
        candidate_ids: &["c-101", "c-105", "c-104"],
    },
    SampleShortlist {
        id: "s-202",
        title: "Analytics Leadership",
        client: "Helios Energy",
        candidate_ids: &["c-103"],
    },
];

/// Pipeline stages in board order.
pub static STAGES: [&str; 5] = ["Sourced", "Screening", "Interview", "Offer", "Hired"];

#[must_use]
pub fn find_candidate(id: &str) -> Option<&'static SampleCandidate> {
    CANDIDATES.iter().find(|c| c.id == id)
}

#[must_use]
pub fn find_shortlist(id: &str) -> Option<&'static SampleShortlist> {
    SHORTLISTS.iter().find(|s| s.id == id)
}

#[must_use]
pub fn candidates_in_stage(stage: &str) -> impl Iterator<Item = &'static SampleCandidate> + '_ {
    CANDIDATES.iter().filter(move |c| c.stage == stage)
}
