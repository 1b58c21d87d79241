//! Event sink boundary.
//!
//! This module is the only allowed bridge between lifecycle logic and the
//! global metrics state. A scoped override routes events to a caller-owned
//! sink and is restored on all exits, including unwind.

use crate::obs;
use std::{cell::RefCell, rc::Rc};

///
/// ProxyEvent
///

#[remain::sorted]
#[derive(Clone, Debug)]
pub enum ProxyEvent {
    CloneFinalized {
        path: &'static str,
    },
    InitFailed {
        path: &'static str,
    },
    InitFinish {
        path: &'static str,
    },
    InitStart {
        path: &'static str,
    },
    LoadIssued {
        path: &'static str,
    },
    PayloadBuilt {
        path: &'static str,
        properties: u64,
    },
    SleepPropertyMissing {
        path: &'static str,
        property: String,
    },
}

///
/// EventSink
///

pub trait EventSink {
    fn record(&self, event: &ProxyEvent);
}

/// GlobalEventSink
/// Default sink that counts into the thread-local metrics state.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalEventSink;

impl EventSink for GlobalEventSink {
    fn record(&self, event: &ProxyEvent) {
        obs::with_state_mut(|m| match event {
            ProxyEvent::CloneFinalized { .. } => {
                m.clones_finalized = m.clones_finalized.saturating_add(1);
            }
            ProxyEvent::InitFailed { .. } => {
                m.init_failed = m.init_failed.saturating_add(1);
            }
            ProxyEvent::InitFinish { .. } => {
                m.init_completed = m.init_completed.saturating_add(1);
            }
            ProxyEvent::InitStart { .. } => {
                m.init_started = m.init_started.saturating_add(1);
            }
            ProxyEvent::LoadIssued { .. } => {
                m.loads_issued = m.loads_issued.saturating_add(1);
            }
            ProxyEvent::PayloadBuilt { .. } => {
                m.payloads_built = m.payloads_built.saturating_add(1);
            }
            ProxyEvent::SleepPropertyMissing { .. } => {
                m.sleep_properties_missing = m.sleep_properties_missing.saturating_add(1);
            }
        });
    }
}

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<Rc<dyn EventSink>>> = RefCell::new(None);
}

pub(crate) fn record(event: &ProxyEvent) {
    let sink = SINK_OVERRIDE.with(|cell| cell.borrow().clone());

    match sink {
        Some(sink) => sink.record(event),
        None => GlobalEventSink.record(event),
    }
}

/// Run a closure with a temporary event sink override.
pub fn with_event_sink<T>(sink: Rc<dyn EventSink>, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<Rc<dyn EventSink>>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0.take();
            });
        }
    }

    let prev = SINK_OVERRIDE.with(|cell| cell.borrow_mut().replace(sink));
    let _guard = Guard(prev);

    f()
}
