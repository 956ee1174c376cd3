use super::*;
use std::cell::Cell;
use std::rc::Rc;

use crate::models::TextSurface;
use crate::services::document::{MemoryDocumentStore, StoreWriteError};

/// Counts writes flowing into the store through the engine while sharing
/// values with an inner store the test drives directly.
struct RecordingStore {
    inner: MemoryDocumentStore,
    writes: Rc<Cell<usize>>,
}

impl DocumentStore for RecordingStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreWriteError> {
        self.writes.set(self.writes.get() + 1);
        self.inner.set(key, value)
    }

    fn subscribe(&self, key: &str, listener: Box<dyn Fn(&str)>) -> Subscription {
        self.inner.subscribe(key, listener)
    }
}

/// Rejects every write; used to exercise the unsynced path.
struct OfflineStore;

impl DocumentStore for OfflineStore {
    fn get(&self, _key: &str) -> Option<String> {
        None
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreWriteError> {
        Err(StoreWriteError {
            key: key.to_string(),
            reason: "offline".to_string(),
        })
    }

    fn subscribe(&self, _key: &str, _listener: Box<dyn Fn(&str)>) -> Subscription {
        Subscription::detached()
    }
}

struct Fixture {
    engine: SyncEngine<TextSurface>,
    /// Writes performed by the engine (test writes to `external` bypass it).
    writes: Rc<Cell<usize>>,
    external: MemoryDocumentStore,
}

fn fixture(raw: &str) -> Fixture {
    let external = MemoryDocumentStore::new();
    let writes = Rc::new(Cell::new(0));
    let recording = RecordingStore {
        inner: external.clone(),
        writes: Rc::clone(&writes),
    };
    Fixture {
        engine: SyncEngine::new(SlotId::decode(raw), Rc::new(recording)),
        writes,
        external,
    }
}

fn mount(engine: &mut SyncEngine<TextSurface>) {
    engine
        .mount(|seed| Ok(TextSurface::new(seed)))
        .expect("mount");
}

fn contents(engine: &SyncEngine<TextSurface>) -> String {
    engine.surface().expect("surface").borrow().contents()
}

fn revision(engine: &SyncEngine<TextSurface>) -> u64 {
    engine.surface().expect("surface").borrow().revision()
}

#[test]
fn mount_seeds_the_surface_from_the_store() {
    let mut fx = fixture("script::mario");
    fx.external.set("script::mario", "let x=1").unwrap();

    mount(&mut fx.engine);
    assert_eq!(fx.engine.phase(), SyncPhase::Synced);
    assert_eq!(contents(&fx.engine), "let x=1");
}

#[test]
fn mount_defaults_to_empty_when_value_absent() {
    let mut fx = fixture("script::fresh");
    mount(&mut fx.engine);
    assert_eq!(contents(&fx.engine), "");
}

#[test]
fn mount_is_idempotent() {
    let mut fx = fixture("script::mario");
    mount(&mut fx.engine);

    let built_again = Cell::new(false);
    fx.engine
        .mount(|seed| {
            built_again.set(true);
            Ok(TextSurface::new(seed))
        })
        .expect("second mount is a no-op");
    assert!(!built_again.get(), "no second handle for a mounted slot");
}

#[test]
fn external_push_is_applied_once_and_idempotent() {
    let mut fx = fixture("script::mario");
    fx.external.set("script::mario", "let x=1").unwrap();
    mount(&mut fx.engine);
    let base = revision(&fx.engine);

    fx.external.set("script::mario", "let x=2").unwrap();
    assert_eq!(contents(&fx.engine), "let x=2");
    assert_eq!(revision(&fx.engine), base + 1);

    // Same value again: exactly one surface mutation total.
    fx.external.set("script::mario", "let x=2").unwrap();
    assert_eq!(revision(&fx.engine), base + 1);
}

#[test]
fn external_pushes_are_never_echoed_to_the_store() {
    let mut fx = fixture("script::mario");
    mount(&mut fx.engine);

    fx.external.set("script::mario", "a").unwrap();
    fx.external.set("script::mario", "b").unwrap();
    fx.external.set("script::mario", "b").unwrap();
    fx.external.set("script::mario", "c").unwrap();

    assert_eq!(fx.writes.get(), 0, "engine must not write during pushes");
    assert_eq!(contents(&fx.engine), "c");
}

#[test]
fn one_edit_forwards_exactly_one_write_with_full_content() {
    let mut fx = fixture("script::mario");
    fx.external.set("script::mario", "let x=").unwrap();
    mount(&mut fx.engine);

    {
        let surface = fx.engine.surface().unwrap();
        let mut surface = surface.borrow_mut();
        for _ in 0.."let x=".chars().count() {
            surface.move_right();
        }
        surface.insert_str("3");
    }

    assert_eq!(fx.writes.get(), 1);
    assert_eq!(fx.external.get("script::mario").as_deref(), Some("let x=3"));
    assert!(!fx.engine.is_unsynced());
}

#[test]
fn forwarded_edit_does_not_bounce_back_into_the_surface() {
    let mut fx = fixture("script::mario");
    mount(&mut fx.engine);
    let surface = Rc::clone(fx.engine.surface().unwrap());

    surface.borrow_mut().insert_char('x');
    // One revision from the keystroke; the store notification triggered by
    // the forwarded write must not mutate the surface again.
    assert_eq!(surface.borrow().revision(), 1);
    assert_eq!(fx.writes.get(), 1);
}

#[test]
fn config_and_reflow_do_not_touch_content_or_guard() {
    let mut fx = fixture("script::mario");
    fx.external.set("script::mario", "text").unwrap();
    mount(&mut fx.engine);
    let base = revision(&fx.engine);

    fx.engine.apply_config(&SurfaceConfig {
        show_line_numbers: false,
        tab_width: 2,
    });
    fx.engine.reflow(Geometry::new(80, 24));

    assert_eq!(revision(&fx.engine), base);
    assert_eq!(fx.writes.get(), 0);

    // Guard is still idle: a real push goes through afterwards.
    fx.external.set("script::mario", "after").unwrap();
    assert_eq!(contents(&fx.engine), "after");
}

#[test]
fn blur_is_forwarded_to_the_registered_callback() {
    let mut fx = fixture("script::mario");
    mount(&mut fx.engine);
    let blurred = Rc::new(Cell::new(0));
    let counter = Rc::clone(&blurred);
    fx.engine.set_on_blur(move || counter.set(counter.get() + 1));

    fx.engine.blur();
    assert_eq!(blurred.get(), 1);
}

#[test]
fn dispose_before_mount_is_safe() {
    let mut fx = fixture("script::mario");
    fx.engine.dispose();
    assert_eq!(fx.engine.phase(), SyncPhase::Disposed);

    // Mount after dispose stays a no-op; remount needs a fresh engine.
    fx.engine
        .mount(|seed| Ok(TextSurface::new(seed)))
        .expect("no-op");
    assert!(fx.engine.surface().is_none());
    assert_eq!(fx.writes.get(), 0);
}

#[test]
fn dispose_twice_is_safe() {
    let mut fx = fixture("script::mario");
    mount(&mut fx.engine);
    fx.engine.dispose();
    fx.engine.dispose();
    assert_eq!(fx.engine.phase(), SyncPhase::Disposed);
}

#[test]
fn no_surface_mutation_after_dispose() {
    let mut fx = fixture("script::mario");
    mount(&mut fx.engine);
    let surface = Rc::clone(fx.engine.surface().unwrap());

    fx.engine.dispose();
    fx.external.set("script::mario", "late update").unwrap();

    assert!(surface.borrow().is_disposed());
    assert_eq!(surface.borrow().contents(), "");
    assert_eq!(fx.writes.get(), 0);
}

#[test]
fn drop_disposes_the_slot() {
    let fx = fixture("script::mario");
    let mut engine = fx.engine;
    mount(&mut engine);
    let surface = Rc::clone(engine.surface().unwrap());

    drop(engine);
    assert!(surface.borrow().is_disposed());
    fx.external.set("script::mario", "late").unwrap();
    assert_eq!(surface.borrow().contents(), "");
}

#[test]
fn failed_surface_init_leaves_the_slot_degraded() {
    let mut fx = fixture("script::broken");
    let err = fx
        .engine
        .mount(|_seed| Err::<TextSurface, _>(SurfaceInitError("no backend".into())))
        .unwrap_err();
    assert_eq!(err.to_string(), "editing surface failed to initialize: no backend");
    assert_eq!(fx.engine.phase(), SyncPhase::Mounting);

    // No automatic retry: a later mount attempt is a no-op.
    fx.engine
        .mount(|seed| Ok(TextSurface::new(seed)))
        .expect("no-op");
    assert!(fx.engine.surface().is_none());
}

#[test]
fn rejected_write_flags_the_slot_unsynced() {
    let mut engine: SyncEngine<TextSurface> =
        SyncEngine::new(SlotId::decode("script::offline"), Rc::new(OfflineStore));
    mount(&mut engine);

    engine.surface().unwrap().borrow_mut().insert_char('x');
    assert!(engine.is_unsynced());
    // Content remains visible in the surface.
    assert_eq!(contents(&engine), "x");
}

#[test]
fn end_to_end_scenario() {
    // Open slot script::mario with stored value "let x=1".
    let mut fx = fixture("script::mario");
    fx.external.set("script::mario", "let x=1").unwrap();

    // Mount: surface seeded.
    mount(&mut fx.engine);
    assert_eq!(contents(&fx.engine), "let x=1");

    // External update: surface follows, zero engine writes.
    fx.external.set("script::mario", "let x=2").unwrap();
    assert_eq!(contents(&fx.engine), "let x=2");
    assert_eq!(fx.writes.get(), 0);

    // User edit to "let x=3": exactly one write with the full content.
    {
        let surface = fx.engine.surface().unwrap();
        let mut surface = surface.borrow_mut();
        for _ in 0.."let x=2".chars().count() {
            surface.move_right();
        }
        surface.backspace();
        surface.insert_char('3');
    }
    assert_eq!(fx.writes.get(), 2, "backspace and insert are two edits");
    assert_eq!(fx.external.get("script::mario").as_deref(), Some("let x=3"));

    // Close tab: disposal, later updates never reach the dead surface.
    let surface = Rc::clone(fx.engine.surface().unwrap());
    fx.engine.dispose();
    fx.external.set("script::mario", "let x=4").unwrap();
    assert_eq!(surface.borrow().contents(), "let x=3");
    assert!(surface.borrow().is_disposed());
}
