//! formsmith - a form builder engine
//!
//! Compose an ordered list of form fields, paginate them into steps,
//! reorder them by dragging and undo/redo every edit. The engine lives in
//! [`state`]; [`storage`] provides the persistence collaborators.

pub mod config;
pub mod state;
pub mod storage;
