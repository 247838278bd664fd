//! Drag gesture state machine
//!
//! Two kinds of drag exist and are never conflated: dragging a field type
//! in from the palette (which inserts a brand-new field on drop) and
//! dragging an existing field over other slots (which relocates it live,
//! on every hover).

use super::field::{FieldId, FieldType};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragItem {
    /// A field type picked up from the palette
    NewField(FieldType),
    /// An existing field being reordered
    Reorder {
        id: FieldId,
        /// Slot the gesture started from
        origin: usize,
        /// Slot the field currently occupies
        index: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragItem),
}

/// A live splice to apply to the field store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub id: FieldId,
    pub from: usize,
    pub to: usize,
}

/// Result of ending a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Nothing to apply; reorders are committed while hovering
    Settled,
    /// Insert a new field of this type
    Insert(FieldType),
}

#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Id of the field being reordered, if any
    pub fn dragged_id(&self) -> Option<&FieldId> {
        match &self.state {
            DragState::Dragging(DragItem::Reorder { id, .. }) => Some(id),
            _ => None,
        }
    }

    /// Pick up an existing field at `index`
    pub fn begin_reorder(&mut self, id: FieldId, index: usize) {
        tracing::debug!(%id, index, "drag started");
        self.state = DragState::Dragging(DragItem::Reorder {
            id,
            origin: index,
            index,
        });
    }

    /// Pick up a field type from the palette
    pub fn begin_palette(&mut self, field_type: FieldType) {
        tracing::debug!(%field_type, "palette drag started");
        self.state = DragState::Dragging(DragItem::NewField(field_type));
    }

    /// The pointer entered the slot at `target`. Returns the move to apply
    /// when a reorder drag enters a slot other than the tracked one.
    pub fn hover(&mut self, target: usize) -> Option<Move> {
        let DragState::Dragging(DragItem::Reorder { id, index, .. }) = &mut self.state else {
            return None;
        };
        if *index == target {
            return None;
        }
        let from = *index;
        *index = target;
        Some(Move {
            id: id.clone(),
            from,
            to: target,
        })
    }

    /// Point the tracked slot at where the field actually sits now, after
    /// a change the gesture did not make (undo, redo, an edit elsewhere)
    pub fn resync(&mut self, position: usize) {
        if let DragState::Dragging(DragItem::Reorder { id, index, .. }) = &mut self.state {
            if *index != position {
                tracing::debug!(%id, stale = *index, position, "drag index resynced");
                *index = position;
            }
        }
    }

    /// End the gesture, inside or outside a target
    pub fn drop(&mut self) -> DropOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(DragItem::NewField(field_type)) => DropOutcome::Insert(field_type),
            DragState::Dragging(DragItem::Reorder { id, origin, index }) => {
                tracing::debug!(%id, origin, index, "drag settled");
                DropOutcome::Settled
            }
            DragState::Idle => DropOutcome::Settled,
        }
    }

    /// Abandon the gesture; the last hovered position stays committed
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_starts_idle() {
        let drag = DragCoordinator::new();
        assert_eq!(drag.state(), &DragState::Idle);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_hover_while_idle_does_nothing() {
        let mut drag = DragCoordinator::new();
        assert_eq!(drag.hover(3), None);
    }

    #[test]
    fn test_hover_tracks_index() {
        let mut drag = DragCoordinator::new();
        drag.begin_reorder(FieldId::from("c"), 2);
        assert_eq!(
            drag.hover(0),
            Some(Move {
                id: FieldId::from("c"),
                from: 2,
                to: 0
            })
        );
        assert_eq!(drag.hover(0), None);
        assert_eq!(
            drag.hover(1).map(|m| (m.from, m.to)),
            Some((0, 1))
        );
        assert_eq!(
            drag.state(),
            &DragState::Dragging(DragItem::Reorder {
                id: FieldId::from("c"),
                origin: 2,
                index: 1
            })
        );
    }

    #[test]
    fn test_hover_on_own_slot_is_no_op() {
        let mut drag = DragCoordinator::new();
        drag.begin_reorder(FieldId::from("a"), 1);
        assert_eq!(drag.hover(1), None);
    }

    #[test]
    fn test_resync_moves_tracked_slot() {
        let mut drag = DragCoordinator::new();
        drag.begin_reorder(FieldId::from("c"), 2);
        drag.hover(0);
        drag.resync(2);
        assert_eq!(drag.hover(0).map(|m| (m.from, m.to)), Some((2, 0)));
    }

    #[test]
    fn test_resync_ignores_palette_drags() {
        let mut drag = DragCoordinator::new();
        drag.begin_palette(FieldType::Text);
        drag.resync(4);
        assert_eq!(
            drag.state(),
            &DragState::Dragging(DragItem::NewField(FieldType::Text))
        );
    }

    #[test]
    fn test_reorder_drop_settles() {
        let mut drag = DragCoordinator::new();
        drag.begin_reorder(FieldId::from("a"), 0);
        drag.hover(2);
        assert_eq!(drag.drop(), DropOutcome::Settled);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_palette_drag_never_moves() {
        let mut drag = DragCoordinator::new();
        drag.begin_palette(FieldType::Date);
        assert_eq!(drag.hover(0), None);
        assert_eq!(drag.dragged_id(), None);
        assert_eq!(drag.drop(), DropOutcome::Insert(FieldType::Date));
        assert_eq!(drag.state(), &DragState::Idle);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut drag = DragCoordinator::new();
        drag.begin_reorder(FieldId::from("a"), 0);
        drag.cancel();
        assert_eq!(drag.drop(), DropOutcome::Settled);
    }
}
