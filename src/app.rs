use chrono::{DateTime, Utc};
use ratatui::widgets::TableState;

use crate::action::Action;
use crate::domain::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    PlaybookList,
    ScheduleForm,
}

#[derive(Debug, Clone)]
pub enum LoadState<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    LoadPlaybooks,
    LoadScheduleForm { playbook: Playbook, generation: u64 },
    SubmitSchedule(ScheduleRequest),
    Quit,
}

/// State of one schedule-form activation.
///
/// A fresh activation starts loading and seeds the timestamp from the time
/// passed by the caller. A reload within the same activation (new
/// generation) keeps the user's selection and timestamp and never flips
/// `loading` back on.
#[derive(Debug, Clone)]
pub struct ScheduleForm {
    pub playbook: Playbook,
    /// Load generation this form currently expects responses for. Responses
    /// tagged with any other generation are stale and get dropped.
    pub generation: u64,
    pub loading: bool,
    pub messages: Vec<Message>,
    pub inventories: Vec<String>,
    pub selected_inventory: Option<InventoryOption>,
    pub scheduled_at: DateTime<Utc>,
    pub content: String,
    pub content_scroll: u16,
}

impl ScheduleForm {
    pub fn new(playbook: Playbook, generation: u64, earliest: DateTime<Utc>) -> Self {
        Self {
            playbook,
            generation,
            loading: true,
            messages: vec![],
            inventories: vec![],
            selected_inventory: None,
            scheduled_at: earliest,
            content: String::new(),
            content_scroll: 0,
        }
    }

    /// Selectable options, derived from the raw path list on every render.
    pub fn inventory_options(&self) -> Vec<InventoryOption> {
        inventory_options(&self.inventories)
    }

    pub fn to_request(&self) -> ScheduleRequest {
        ScheduleRequest {
            playbook_path: self.playbook.full_path.clone(),
            inventory_path: self.selected_inventory.as_ref().map(|opt| opt.text.clone()),
            control_node_id: self.playbook.control_node_id(),
            earliest: self.scheduled_at,
        }
    }

    fn select_next_inventory(&mut self) {
        let options = self.inventory_options();
        if options.is_empty() {
            return;
        }
        let next = match &self.selected_inventory {
            None => 0,
            Some(current) => (current.id + 1) % options.len(),
        };
        self.selected_inventory = options.into_iter().nth(next);
    }

    fn select_prev_inventory(&mut self) {
        let options = self.inventory_options();
        if options.is_empty() {
            return;
        }
        let prev = match &self.selected_inventory {
            None => options.len() - 1,
            Some(current) if current.id == 0 => options.len() - 1,
            Some(current) => (current.id - 1).min(options.len() - 1),
        };
        self.selected_inventory = options.into_iter().nth(prev);
    }
}

pub struct App {
    pub view: View,
    pub minion_id: i64,
    pub playbooks: LoadState<Vec<Playbook>>,
    pub playbook_table_state: TableState,
    pub form: Option<ScheduleForm>,
    pub form_generation: u64,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(minion_id: i64) -> Self {
        Self {
            view: View::PlaybookList,
            minion_id,
            playbooks: LoadState::Loading,
            playbook_table_state: TableState::default(),
            form: None,
            form_generation: 0,
            show_help: false,
            should_quit: false,
        }
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        match action {
            // Navigation
            Action::NavigateUp => {
                self.navigate_up();
                vec![]
            }
            Action::NavigateDown => {
                self.navigate_down();
                vec![]
            }
            Action::NavigateTop => {
                self.navigate_top();
                vec![]
            }
            Action::NavigateBottom => {
                self.navigate_bottom();
                vec![]
            }
            Action::Select => self.open_schedule_form(),
            Action::Back => {
                if self.view == View::ScheduleForm {
                    self.view = View::PlaybookList;
                    self.form = None;
                }
                vec![]
            }

            // Schedule form
            Action::NextInventory => {
                if let Some(form) = self.form.as_mut() {
                    form.select_next_inventory();
                }
                vec![]
            }
            Action::PrevInventory => {
                if let Some(form) = self.form.as_mut() {
                    form.select_prev_inventory();
                }
                vec![]
            }
            Action::ClearInventory => {
                if let Some(form) = self.form.as_mut() {
                    form.selected_inventory = None;
                }
                vec![]
            }
            Action::AdjustScheduledAt(minutes) => {
                if let Some(form) = self.form.as_mut() {
                    form.scheduled_at += chrono::Duration::minutes(minutes);
                }
                vec![]
            }
            Action::ResetScheduledAt => {
                if let Some(form) = self.form.as_mut() {
                    form.scheduled_at = Utc::now();
                }
                vec![]
            }
            Action::Submit => self.submit(),

            // UI
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                vec![]
            }

            // Data responses
            Action::PlaybooksLoaded(result) => {
                match result {
                    Ok(playbooks) => {
                        self.playbooks = LoadState::Loaded(playbooks);
                        if self.playbook_table_state.selected().is_none() {
                            self.playbook_table_state.select_first();
                        }
                    }
                    Err(err) => self.playbooks = LoadState::Error(err.to_string()),
                }
                vec![]
            }
            Action::InventoriesLoaded { generation, result } => {
                let Some(form) = self.current_form(generation) else {
                    return vec![];
                };
                match result {
                    Ok(mut inventories) => {
                        // The playbook-pinned inventory is always offered,
                        // after the server's entries; duplicates allowed.
                        if let Some(custom) = form
                            .playbook
                            .custom_inventory
                            .as_ref()
                            .filter(|ci| !ci.is_empty())
                        {
                            inventories.push(custom.clone());
                        }
                        form.inventories = inventories;
                    }
                    Err(err) => form.messages = err.to_messages(),
                }
                vec![]
            }
            Action::PlaybookContentLoaded { generation, result } => {
                let Some(form) = self.current_form(generation) else {
                    return vec![];
                };
                match result {
                    Ok(content) => form.content = content,
                    Err(err) => form.messages = err.to_messages(),
                }
                vec![]
            }
            Action::ScheduleFormSettled { generation } => {
                if let Some(form) = self.current_form(generation) {
                    form.loading = false;
                }
                vec![]
            }
            Action::ScheduleFinished(result) => {
                if let Some(form) = self.form.as_mut() {
                    match result {
                        Ok(action_id) => {
                            form.messages = vec![Message::success(format!(
                                "Playbook execution scheduled as action {}",
                                action_id
                            ))];
                        }
                        Err(err) => form.messages = err.to_messages(),
                    }
                }
                vec![]
            }

            // App control
            Action::Refresh => match self.view {
                View::PlaybookList => {
                    self.playbooks = LoadState::Loading;
                    vec![Effect::LoadPlaybooks]
                }
                View::ScheduleForm => self.reload_form(),
            },
            Action::Tick => vec![],
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
        }
    }

    /// The active form, but only if `generation` is still the one it expects.
    fn current_form(&mut self, generation: u64) -> Option<&mut ScheduleForm> {
        let form = self.form.as_mut()?;
        if form.generation != generation {
            tracing::debug!(generation, "dropping stale schedule-form response");
            return None;
        }
        Some(form)
    }

    fn open_schedule_form(&mut self) -> Vec<Effect> {
        if self.view != View::PlaybookList {
            return vec![];
        }
        let Some(playbooks) = self.playbooks.data() else {
            return vec![];
        };
        let Some(idx) = self.playbook_table_state.selected() else {
            return vec![];
        };
        let Some(playbook) = playbooks.get(idx).cloned() else {
            return vec![];
        };

        self.form_generation += 1;
        let generation = self.form_generation;
        self.form = Some(ScheduleForm::new(playbook.clone(), generation, Utc::now()));
        self.view = View::ScheduleForm;
        vec![Effect::LoadScheduleForm {
            playbook,
            generation,
        }]
    }

    fn reload_form(&mut self) -> Vec<Effect> {
        let Some(form) = self.form.as_mut() else {
            return vec![];
        };
        self.form_generation += 1;
        form.generation = self.form_generation;
        vec![Effect::LoadScheduleForm {
            playbook: form.playbook.clone(),
            generation: form.generation,
        }]
    }

    fn submit(&mut self) -> Vec<Effect> {
        let Some(form) = self.form.as_ref() else {
            return vec![];
        };
        if form.loading {
            return vec![];
        }
        vec![Effect::SubmitSchedule(form.to_request())]
    }

    fn navigate_up(&mut self) {
        match self.view {
            View::PlaybookList => self.playbook_table_state.select_previous(),
            View::ScheduleForm => {
                if let Some(form) = self.form.as_mut() {
                    form.content_scroll = form.content_scroll.saturating_sub(1);
                }
            }
        }
    }

    fn navigate_down(&mut self) {
        match self.view {
            View::PlaybookList => {
                let len = self.playbooks.data().map(|p| p.len()).unwrap_or(0);
                if len > 0 {
                    self.playbook_table_state.select_next();
                }
            }
            View::ScheduleForm => {
                if let Some(form) = self.form.as_mut() {
                    form.content_scroll = form.content_scroll.saturating_add(1);
                }
            }
        }
    }

    fn navigate_top(&mut self) {
        match self.view {
            View::PlaybookList => self.playbook_table_state.select_first(),
            View::ScheduleForm => {
                if let Some(form) = self.form.as_mut() {
                    form.content_scroll = 0;
                }
            }
        }
    }

    fn navigate_bottom(&mut self) {
        match self.view {
            View::PlaybookList => self.playbook_table_state.select_last(),
            View::ScheduleForm => {
                if let Some(form) = self.form.as_mut() {
                    form.content_scroll = u16::MAX;
                }
            }
        }
    }
}
