use crate::core::SlotId;

/// Side effects the host executes after a dispatch. Reducers stay pure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    OpenTab(SlotId),
    CloseTab(SlotId),
}
