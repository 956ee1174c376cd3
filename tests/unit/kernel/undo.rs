use super::*;

#[test]
fn record_pushes_past_and_clears_future() {
    let mut undoable = Undoable::new(0);
    assert!(undoable.record_with(|v| {
        *v = 1;
        true
    }));
    assert!(undoable.undo());
    assert!(undoable.can_redo());

    assert!(undoable.record_with(|v| {
        *v = 2;
        true
    }));
    assert!(!undoable.can_redo(), "new edit must discard the redo branch");
    assert_eq!(*undoable.present(), 2);
}

#[test]
fn record_without_change_is_a_no_op() {
    let mut undoable = Undoable::new(7);
    assert!(!undoable.record_with(|_| false));
    assert!(!undoable.can_undo());
    assert_eq!(*undoable.present(), 7);
}

#[test]
fn undo_and_redo_walk_the_stacks() {
    let mut undoable = Undoable::new("a".to_string());
    undoable.record_with(|v| {
        v.push('b');
        true
    });
    undoable.record_with(|v| {
        v.push('c');
        true
    });

    assert_eq!(undoable.present(), "abc");
    assert!(undoable.undo());
    assert_eq!(undoable.present(), "ab");
    assert!(undoable.undo());
    assert_eq!(undoable.present(), "a");
    assert!(!undoable.undo(), "empty past");

    assert!(undoable.redo());
    assert!(undoable.redo());
    assert_eq!(undoable.present(), "abc");
    assert!(!undoable.redo(), "empty future");
}
