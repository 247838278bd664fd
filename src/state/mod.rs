//! Field editing engine and editor state

mod app_state;
mod drag;
mod error;
mod field;
mod field_store;
mod history;
mod observer;
mod session;
mod steps;

pub use app_state::*;
pub use drag::{DragCoordinator, DragItem, DragState, DropOutcome, Move};
pub use error::{EditorError, EditorResult};
pub use field::{find_duplicate_id, Field, FieldId, FieldType};
pub use field_store::FieldStore;
pub use history::HistoryLog;
pub use observer::FieldObserver;
pub use session::EditorSession;
pub use steps::{StepDeriver, StepPartition, STEP_SLICES};
