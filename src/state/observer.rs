//! Synchronous change notification contract

use super::field::Field;

/// Receives the post-mutation field list after every committed change.
/// Delivery is synchronous and in registration order.
pub trait FieldObserver {
    fn fields_changed(&mut self, fields: &[Field]);
}
