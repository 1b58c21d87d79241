use crate::{error::ProxyError, proxy::instance::ProxyInstance};
use std::{fmt, rc::Rc};

/// Callback that performs the deferred load and transitions a proxy to
/// initialized state.
pub type Initializer = Rc<dyn Fn(&mut ProxyInstance, InitTrigger) -> Result<(), ProxyError>>;

/// Callback that finalizes a cloned proxy's independent state.
pub type Cloner = Rc<dyn Fn(&mut ProxyInstance) -> Result<(), ProxyError>>;

///
/// ProxyState
///
/// Explicit lifecycle state. Replaces boolean flag pairs so reentrant
/// transitions stay visible in one place.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProxyState {
    #[default]
    Uninitialized,
    Initializing,
    Initialized,
}

impl ProxyState {
    #[must_use]
    pub const fn is_initialized(self) -> bool {
        matches!(self, Self::Initialized)
    }
}

///
/// InitTrigger
///
/// Why an initializer is running. Clone finalization is passed explicitly
/// rather than inferred from shared instance flags.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InitTrigger {
    /// First real use of a lazy-tracked property.
    Access,
    /// Finalization of a fresh clone.
    Clone,
}

///
/// CapturedCallbacks
///
/// Snapshot taken by an initializer before it runs.
/// Restored only on the rollback path.
///

pub struct CapturedCallbacks {
    initializer: Option<Initializer>,
    cloner: Option<Cloner>,
}

///
/// ProxyCell
///
/// Lifecycle storage for one proxy instance.
/// Invariant: once the state is `Initialized`, both callback slots are empty.
///

#[derive(Clone, Default)]
pub struct ProxyCell {
    state: ProxyState,
    initializer: Option<Initializer>,
    cloner: Option<Cloner>,
}

impl ProxyCell {
    #[must_use]
    pub fn new(initializer: Option<Initializer>, cloner: Option<Cloner>) -> Self {
        Self {
            state: ProxyState::Uninitialized,
            initializer,
            cloner,
        }
    }

    #[must_use]
    pub const fn state(&self) -> ProxyState {
        self.state
    }

    pub(crate) const fn set_state(&mut self, state: ProxyState) {
        self.state = state;
    }

    #[must_use]
    pub fn has_initializer(&self) -> bool {
        self.initializer.is_some()
    }

    #[must_use]
    pub fn has_cloner(&self) -> bool {
        self.cloner.is_some()
    }

    /// Handle to the stored initializer without consuming it.
    #[must_use]
    pub fn initializer_handle(&self) -> Option<Initializer> {
        self.initializer.clone()
    }

    /// Handle to the stored cloner without consuming it.
    #[must_use]
    pub fn cloner_handle(&self) -> Option<Cloner> {
        self.cloner.clone()
    }

    /// Take both callbacks out (the capture-and-clear step).
    #[must_use]
    pub fn capture(&mut self) -> CapturedCallbacks {
        CapturedCallbacks {
            initializer: self.initializer.take(),
            cloner: self.cloner.take(),
        }
    }

    /// Put captured callbacks back (the rollback path).
    pub fn restore(&mut self, captured: CapturedCallbacks) {
        self.initializer = captured.initializer;
        self.cloner = captured.cloner;
    }

    /// Transition to `Initialized` and drop both callbacks, upholding the
    /// mutual-exclusion invariant.
    pub fn mark_initialized(&mut self) {
        self.state = ProxyState::Initialized;
        self.initializer = None;
        self.cloner = None;
    }
}

impl fmt::Debug for ProxyCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCell")
            .field("state", &self.state)
            .field("initializer", &self.initializer.is_some())
            .field("cloner", &self.cloner.is_some())
            .finish()
    }
}
