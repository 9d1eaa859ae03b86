// src/types/action.rs
use crate::types::JobId;

/// A user action on the job board, as bound to a rendered control.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Toggles saved membership.
    Save(JobId),
    Unsave(JobId),
    Hide(JobId),
    UnhideAll,
    ClearSaved,
    ToggleShowHidden,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Save(_) => "save",
            Self::Unsave(_) => "unsave",
            Self::Hide(_) => "hide",
            Self::UnhideAll => "unhide-all",
            Self::ClearSaved => "clear-saved",
            Self::ToggleShowHidden => "toggle-hidden",
        }
    }

    pub fn target(&self) -> Option<&JobId> {
        match self {
            Self::Save(id) | Self::Unsave(id) | Self::Hide(id) => Some(id),
            _ => None,
        }
    }

    /// Job actions need an id; global actions ignore it.
    pub fn parse(name: &str, id: Option<&str>) -> Option<Self> {
        let id = id.filter(|s| !s.is_empty()).map(JobId::from);
        match name {
            "save" => id.map(Self::Save),
            "unsave" => id.map(Self::Unsave),
            "hide" => id.map(Self::Hide),
            "unhide-all" => Some(Self::UnhideAll),
            "clear-saved" => Some(Self::ClearSaved),
            "toggle-hidden" => Some(Self::ToggleShowHidden),
            _ => None,
        }
    }
}
