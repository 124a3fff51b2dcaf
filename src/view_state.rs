//! Dashboard view state as a plain value with a pure update function.

use serde::{Deserialize, Serialize};

use crate::models::Meeting;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Meetings,
    Crm,
    Todos,
    Archive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum Modal {
    MeetingDetail(String),
    NewTodo,
    Comments,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    pub active_tab: Tab,
    pub drawer_open: bool,
    pub modal: Option<Modal>,
    pub search: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewAction {
    SelectTab(Tab),
    ToggleDrawer,
    CloseDrawer,
    OpenModal(Modal),
    CloseModal,
    SetSearch(String),
    ClearSearch,
}

pub fn reduce(state: DashboardState, action: ViewAction) -> DashboardState {
    match action {
        ViewAction::SelectTab(tab) => DashboardState {
            active_tab: tab,
            ..state
        },
        ViewAction::ToggleDrawer => DashboardState {
            drawer_open: !state.drawer_open,
            ..state
        },
        ViewAction::CloseDrawer => DashboardState {
            drawer_open: false,
            ..state
        },
        ViewAction::OpenModal(modal) => DashboardState {
            modal: Some(modal),
            drawer_open: false,
            ..state
        },
        ViewAction::CloseModal => DashboardState {
            modal: None,
            ..state
        },
        ViewAction::SetSearch(search) => DashboardState { search, ..state },
        ViewAction::ClearSearch => DashboardState {
            search: String::new(),
            ..state
        },
    }
}

/// Meetings whose title, attendees or platform contain `search`, ignoring case.
pub fn filter_meetings(meetings: &[Meeting], search: &str) -> Vec<Meeting> {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return meetings.to_vec();
    }

    meetings
        .iter()
        .filter(|m| {
            m.title.to_lowercase().contains(&needle)
                || m.attendees
                    .iter()
                    .any(|a| a.to_lowercase().contains(&needle))
                || m
                    .platform
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}
