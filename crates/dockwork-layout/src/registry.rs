//! Window → manager lookup.
//!
//! Hosts that run several managers register each managed window here, and
//! the pane windows each manager adopts. A pane window (or a floating
//! frame's window) can then find the manager responsible for it without any
//! process-wide state: the registry is an ordinary value the host owns.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::pane::WindowId;

/// Registration failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    NullWindow,
    AlreadyRegistered(WindowId),
    UnknownManager(WindowId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NullWindow => write!(f, "cannot register the null window"),
            Self::AlreadyRegistered(window) => write!(f, "{window} is already registered"),
            Self::UnknownManager(window) => write!(f, "no manager is registered for {window}"),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Scoped lookup from windows to manager handles of type `H`.
#[derive(Debug, Clone)]
pub struct ManagerRegistry<H> {
    managers: FxHashMap<WindowId, H>,
    /// Pane window → managed window of its manager.
    panes: FxHashMap<WindowId, WindowId>,
}

impl<H> Default for ManagerRegistry<H> {
    fn default() -> Self {
        Self {
            managers: FxHashMap::default(),
            panes: FxHashMap::default(),
        }
    }
}

impl<H> ManagerRegistry<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the manager of `managed`.
    pub fn register(&mut self, managed: WindowId, handle: H) -> Result<(), RegistryError> {
        if managed.is_null() {
            return Err(RegistryError::NullWindow);
        }
        if self.managers.contains_key(&managed) {
            return Err(RegistryError::AlreadyRegistered(managed));
        }
        self.managers.insert(managed, handle);
        Ok(())
    }

    /// Remove a manager and every pane window attached to it.
    pub fn unregister(&mut self, managed: WindowId) -> Option<H> {
        let handle = self.managers.remove(&managed)?;
        self.panes.retain(|_, owner| *owner != managed);
        Some(handle)
    }

    /// Record that `pane` is managed by the manager of `managed`.
    pub fn attach_pane(&mut self, managed: WindowId, pane: WindowId) -> Result<(), RegistryError> {
        if pane.is_null() {
            return Err(RegistryError::NullWindow);
        }
        if !self.managers.contains_key(&managed) {
            return Err(RegistryError::UnknownManager(managed));
        }
        self.panes.insert(pane, managed);
        Ok(())
    }

    pub fn detach_pane(&mut self, pane: WindowId) -> bool {
        self.panes.remove(&pane).is_some()
    }

    /// The manager responsible for `window`, which may be a managed window
    /// or a pane window.
    #[must_use]
    pub fn find(&self, window: WindowId) -> Option<&H> {
        if let Some(handle) = self.managers.get(&window) {
            return Some(handle);
        }
        let managed = self.panes.get(&window)?;
        self.managers.get(managed)
    }

    #[must_use]
    pub fn find_mut(&mut self, window: WindowId) -> Option<&mut H> {
        let managed = if self.managers.contains_key(&window) {
            window
        } else {
            *self.panes.get(&window)?
        };
        self.managers.get_mut(&managed)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: WindowId = WindowId::new(1);
    const OTHER: WindowId = WindowId::new(2);
    const PANE: WindowId = WindowId::new(10);

    #[test]
    fn pane_windows_resolve_to_their_manager() {
        let mut registry = ManagerRegistry::new();
        registry.register(FRAME, "main").unwrap();
        registry.register(OTHER, "tools").unwrap();
        registry.attach_pane(OTHER, PANE).unwrap();
        assert_eq!(registry.find(FRAME), Some(&"main"));
        assert_eq!(registry.find(PANE), Some(&"tools"));
        assert_eq!(registry.find(WindowId::new(99)), None);
    }

    #[test]
    fn double_registration_is_rejected() {
        let mut registry = ManagerRegistry::new();
        registry.register(FRAME, 1).unwrap();
        assert_eq!(
            registry.register(FRAME, 2),
            Err(RegistryError::AlreadyRegistered(FRAME))
        );
        assert_eq!(registry.register(WindowId::NULL, 3), Err(RegistryError::NullWindow));
    }

    #[test]
    fn unregister_forgets_attached_panes() {
        let mut registry = ManagerRegistry::new();
        registry.register(FRAME, 7).unwrap();
        registry.attach_pane(FRAME, PANE).unwrap();
        if let Some(handle) = registry.find_mut(PANE) {
            *handle += 1;
        }
        assert_eq!(registry.unregister(FRAME), Some(8));
        assert_eq!(registry.find(PANE), None);
        assert!(registry.is_empty());
        assert_eq!(
            registry.attach_pane(FRAME, PANE),
            Err(RegistryError::UnknownManager(FRAME))
        );
    }
}
