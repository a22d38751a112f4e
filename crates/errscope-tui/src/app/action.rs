/// All possible actions in the application (command pattern)
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    // Navigation
    GoBack,
    Quit,

    // UI toggles
    ToggleHelp,
    ToggleStats,
    ToggleDetail,

    // Row selection within the page
    SelectUp,
    SelectDown,
    SelectFirst,
    SelectLast,

    // Pages
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,

    // Filter form
    OpenFilter,
    CloseFilter,
    ApplyFilter,
    FilterInput(char),
    FilterBackspace,
    FilterClearField,
    FilterNextField,
    FilterPrevField,

    // Quick filters
    CycleErrorType,
    CycleErrorTypeBack,
    ClearFilters,

    // Data
    Reload,
    ExportMatches,

    // Tick (expires messages)
    Tick,

    // Render request
    Render,
}
