//! Scoped switching of the model's present units.

use super::StructuralModel;
use crate::config::UnitSystem;
use std::ops::{Deref, DerefMut};
use tracing::{debug, warn};

/// Switches a session to other units and restores the original units when
/// dropped, including on early return or error.
pub struct UnitGuard<'a, S: StructuralModel + ?Sized> {
    session: &'a mut S,
    original: Option<UnitSystem>,
}

impl<'a, S: StructuralModel + ?Sized> UnitGuard<'a, S> {
    /// Switch `session` to `target` units for the guard's lifetime.
    ///
    /// With `target = None`, or when the session already uses the target
    /// units, nothing is changed and nothing is restored.
    pub fn switch(session: &'a mut S, target: Option<UnitSystem>) -> Self {
        let original = session.present_units();

        match target {
            Some(units) if units != original => {
                debug!("Switching model units {} -> {}", original, units);
                if let Err(failure) = session.set_present_units(units) {
                    warn!("Setting units was not properly retrieved ({})", failure);
                }
                Self {
                    session,
                    original: Some(original),
                }
            }
            _ => Self {
                session,
                original: None,
            },
        }
    }
}

impl<S: StructuralModel + ?Sized> Deref for UnitGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        &*self.session
    }
}

impl<S: StructuralModel + ?Sized> DerefMut for UnitGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut *self.session
    }
}

impl<S: StructuralModel + ?Sized> Drop for UnitGuard<'_, S> {
    fn drop(&mut self) {
        if let Some(original) = self.original.take() {
            debug!("Restoring model units {}", original);
            if let Err(failure) = self.session.set_present_units(original) {
                warn!("Restoring units was not properly retrieved ({})", failure);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{PointConnection, PointLoad, Retrieval, SessionFailure};

    struct UnitsOnly {
        units: UnitSystem,
        history: Vec<UnitSystem>,
    }

    impl StructuralModel for UnitsOnly {
        fn unlock(&mut self) -> Result<(), SessionFailure> {
            Ok(())
        }
        fn point_names(&self) -> Retrieval<Vec<String>> {
            Retrieval::Empty
        }
        fn frame_names(&self) -> Retrieval<Vec<String>> {
            Retrieval::Empty
        }
        fn point_coordinates(&self, _point: &str) -> Retrieval<[f64; 3]> {
            Retrieval::Empty
        }
        fn point_connectivity(&self, _point: &str) -> Retrieval<Vec<PointConnection>> {
            Retrieval::Empty
        }
        fn point_loads(&self, _group: &str) -> Retrieval<Vec<PointLoad>> {
            Retrieval::Empty
        }
        fn present_units(&self) -> UnitSystem {
            self.units
        }
        fn set_present_units(&mut self, units: UnitSystem) -> Result<(), SessionFailure> {
            self.units = units;
            self.history.push(units);
            Ok(())
        }
    }

    fn session(units: UnitSystem) -> UnitsOnly {
        UnitsOnly {
            units,
            history: Vec::new(),
        }
    }

    #[test]
    fn test_guard_switches_and_restores() {
        let mut model = session(UnitSystem::NMmC);
        {
            let guard = UnitGuard::switch(&mut model, Some(UnitSystem::KnMC));
            assert_eq!(guard.present_units(), UnitSystem::KnMC);
        }
        assert_eq!(model.units, UnitSystem::NMmC);
        assert_eq!(model.history, vec![UnitSystem::KnMC, UnitSystem::NMmC]);
    }

    #[test]
    fn test_guard_restores_on_error_path() {
        fn failing_query(model: &mut UnitsOnly) -> Result<(), String> {
            let guard = UnitGuard::switch(model, Some(UnitSystem::KnMC));
            if guard.present_units() == UnitSystem::KnMC {
                return Err("query failed".to_string());
            }
            Ok(())
        }

        let mut model = session(UnitSystem::KipFtF);
        assert!(failing_query(&mut model).is_err());
        assert_eq!(model.units, UnitSystem::KipFtF);
    }

    #[test]
    fn test_guard_without_target_is_noop() {
        let mut model = session(UnitSystem::NMC);
        drop(UnitGuard::switch(&mut model, None));
        drop(UnitGuard::switch(&mut model, Some(UnitSystem::NMC)));
        assert!(model.history.is_empty());
    }
}
