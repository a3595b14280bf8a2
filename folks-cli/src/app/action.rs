use folks_core::OrderField;

/// User actions that can be performed in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the row cursor up
    MoveUp,
    /// Move the row cursor down
    MoveDown,
    GoToFirst,
    GoToLast,
    /// Check or uncheck the row under the cursor
    ToggleRow,
    /// Check or uncheck every row on the page
    ToggleAll,
    NextPage,
    PrevPage,
    SortBy(OrderField),
    Refresh,
    /// Open the date filter prompt
    EditFilter,
    FilterInput(char),
    FilterBackspace,
    /// Switch between start and end date
    FilterSwitchField,
    /// Clear the field under focus
    FilterClearField,
    ApplyFilter,
    CancelFilter,
    /// Request delete (show confirmation dialog)
    Delete,
    ConfirmDelete,
    CancelDelete,
    /// Submit the statistics job
    RunStats,
    DismissStats,
    ShowHelp,
    HideHelp,
    Quit,
    /// No action (for tick events)
    Tick,
}
