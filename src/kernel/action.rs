use compact_str::CompactString;

use crate::core::SlotId;
use crate::kernel::state::{ColorScheme, Locale};

#[derive(Debug, Clone)]
pub enum Action {
    Files(FilesAction),
    /// Time travel over the files slice only.
    UndoFiles,
    RedoFiles,
    SetColorScheme(ColorScheme),
    SetLocale(Locale),
    /// Register the slot as a project file (when it names a document) and
    /// ask the host to show its tab.
    OpenSlot(SlotId),
    CloseSlot(SlotId),
    Tick,
}

#[derive(Debug, Clone)]
pub enum FilesAction {
    Add { name: CompactString },
    Remove { name: CompactString },
    Rename { from: CompactString, to: CompactString },
}
