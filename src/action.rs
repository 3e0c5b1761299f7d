use crate::layout::ResizeCommand;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Resize(ResizeCommand),
    CycleSortMode,
    EnterFilterMode,
    CommitFilter,
    UpdateFilter(String),
    SelectPrev,
    SelectNext,
    Terminate,
    ReniceUp,
    ReniceDown,
    PointerMove(u16, u16),
    PointerClick(u16, u16),
    None,
}
