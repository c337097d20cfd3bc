use crate::client::ClientError;
use crate::domain::*;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateUp,
    NavigateDown,
    NavigateTop,
    NavigateBottom,
    Select,
    Back,

    // Schedule form
    NextInventory,
    PrevInventory,
    ClearInventory,
    AdjustScheduledAt(i64),
    ResetScheduledAt,
    Submit,

    // UI
    ToggleHelp,

    // Data responses
    PlaybooksLoaded(Result<Vec<Playbook>, ClientError>),
    InventoriesLoaded {
        generation: u64,
        result: Result<Vec<String>, ClientError>,
    },
    PlaybookContentLoaded {
        generation: u64,
        result: Result<String, ClientError>,
    },
    ScheduleFormSettled {
        generation: u64,
    },
    ScheduleFinished(Result<i64, ClientError>),

    // App control
    Refresh,
    Tick,
    Quit,
}
