//! Structured event binding.
//!
//! Static controls are bound by id through [`EventRegistry`]. Rows rendered
//! from backend data carry a `data-action` attribute plus `data-*` payload
//! instead of inline handlers; those resolve through [`Action::from_dataset`].

use super::{Control, PageId};
use crate::api::HistoryFilter;
use std::collections::{BTreeMap, HashMap};

/// `data-action` values emitted by the row renderers.
pub const SHOW_DETAIL: &str = "show-detail";
pub const REMOVE_STOCK: &str = "remove-stock";
pub const DELETE_HISTORY: &str = "delete-history";

/// Kind of user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    EnterKey,
}

/// A user interaction delivered to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Interaction with a statically known control
    Control { control: Control, kind: EventKind },
    /// Click on a rendered element carrying `data-action`
    Delegated {
        action: String,
        dataset: BTreeMap<String, String>,
    },
}

impl UiEvent {
    pub fn click(control: Control) -> Self {
        UiEvent::Control {
            control,
            kind: EventKind::Click,
        }
    }

    pub fn enter(control: Control) -> Self {
        UiEvent::Control {
            control,
            kind: EventKind::EnterKey,
        }
    }

    pub fn delegated<'a, I>(action: &str, dataset: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        UiEvent::Delegated {
            action: action.to_string(),
            dataset: dataset
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// What the client does in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Navigate(PageId),
    SelectFilter(HistoryFilter),
    /// Submit the add-stock form with the current input value
    SubmitAddStock,
    ShowDetail { code: String },
    RemoveStock { code: String, name: String },
    DeleteHistory { id: i64, name: String },
    OpenNotice,
    CloseNotice,
    /// Send the notice with the current textarea value
    SubmitNotice,
}

impl Action {
    /// Decode a delegated `data-action` with its `data-*` payload.
    pub fn from_dataset(action: &str, dataset: &BTreeMap<String, String>) -> Option<Action> {
        let get = |key: &str| dataset.get(key).map(String::as_str);
        match action {
            SHOW_DETAIL => Some(Action::ShowDetail {
                code: get("code").filter(|c| !c.is_empty())?.to_string(),
            }),
            REMOVE_STOCK => Some(Action::RemoveStock {
                code: get("code").filter(|c| !c.is_empty())?.to_string(),
                name: get("name").unwrap_or_default().to_string(),
            }),
            DELETE_HISTORY => Some(Action::DeleteHistory {
                id: get("id")?.parse().ok()?,
                name: get("name").unwrap_or_default().to_string(),
            }),
            _ => None,
        }
    }
}

/// Bindings from controls to actions.
#[derive(Debug, Clone, Default)]
pub struct EventRegistry {
    bindings: HashMap<(Control, EventKind), Action>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard's standard wiring.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.bind(Control::RefreshButton, EventKind::Click, Action::Refresh);
        registry.bind(Control::AddStockButton, EventKind::Click, Action::SubmitAddStock);
        registry.bind(Control::StockNameInput, EventKind::EnterKey, Action::SubmitAddStock);
        registry.bind(
            Control::BackToDashboard,
            EventKind::Click,
            Action::Navigate(PageId::Dashboard),
        );
        for page in PageId::ALL {
            registry.bind(Control::Nav(page), EventKind::Click, Action::Navigate(page));
        }
        for filter in HistoryFilter::ALL {
            registry.bind(
                Control::FilterTab(filter),
                EventKind::Click,
                Action::SelectFilter(filter),
            );
        }
        registry.bind(Control::NoticeOpenButton, EventKind::Click, Action::OpenNotice);
        registry.bind(Control::NoticeCloseButton, EventKind::Click, Action::CloseNotice);
        registry.bind(Control::NoticeCancelButton, EventKind::Click, Action::CloseNotice);
        registry.bind(Control::NoticeOverlay, EventKind::Click, Action::CloseNotice);
        registry.bind(Control::NoticeSendButton, EventKind::Click, Action::SubmitNotice);
        registry
    }

    /// Bind an action, returning the one it replaced.
    pub fn bind(&mut self, control: Control, kind: EventKind, action: Action) -> Option<Action> {
        self.bindings.insert((control, kind), action)
    }

    pub fn unbind(&mut self, control: Control, kind: EventKind) -> Option<Action> {
        self.bindings.remove(&(control, kind))
    }

    pub fn resolve(&self, event: &UiEvent) -> Option<Action> {
        match event {
            UiEvent::Control { control, kind } => self.bindings.get(&(*control, *kind)).cloned(),
            UiEvent::Delegated { action, dataset } => Action::from_dataset(action, dataset),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
