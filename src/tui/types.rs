/// High-level UI modes; `List` is the home state, everything else is a
/// modal dialog layered over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    List,
    Add,
    Edit,
    ConfirmDelete,
    Options,
}

/// Which field of the add/edit form owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Address,
    Description,
}

/// Which control of the options dialog owns the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionsFocus {
    #[default]
    Interval,
    SortKey,
}
