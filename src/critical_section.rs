//! Priority-ceiling critical sections around bus transactions.

use crate::hal::PriorityMask;
use std::sync::atomic::{AtomicU8, Ordering};

/// Ceiling used around every bus transaction on the reference board.
pub const DEFAULT_CEILING: u8 = 1;

/// Scoped priority-mask raise.
///
/// Creating the guard raises the mask to at least `ceiling` (a stricter level
/// already in force is kept); dropping it writes back the level that was
/// active before, on every exit path including unwinding.
#[must_use = "the critical section ends as soon as the guard is dropped"]
pub struct CriticalSection<'a, M: PriorityMask + ?Sized> {
    mask: &'a M,
    restore: u8,
}

impl<'a, M: PriorityMask + ?Sized> CriticalSection<'a, M> {
    pub fn enter(mask: &'a M, ceiling: u8) -> Self {
        let restore = mask.level();
        mask.raise(ceiling);
        Self { mask, restore }
    }

    /// Level that will be restored on drop.
    pub fn restore_level(&self) -> u8 {
        self.restore
    }
}

impl<M: PriorityMask + ?Sized> Drop for CriticalSection<'_, M> {
    fn drop(&mut self) {
        self.mask.set_level(self.restore);
    }
}

/// Runs `f` with the mask raised to `ceiling`.
pub fn with<M, R>(mask: &M, ceiling: u8, f: impl FnOnce() -> R) -> R
where
    M: PriorityMask + ?Sized,
{
    let _section = CriticalSection::enter(mask, ceiling);
    f()
}

/// Software priority mask for hosted targets, which have no BASEPRI.
///
/// Keeps the level so code above the shim can still observe it.
#[derive(Debug, Default)]
pub struct SoftPriorityMask {
    level: AtomicU8,
}

impl SoftPriorityMask {
    pub const fn new() -> Self {
        Self {
            level: AtomicU8::new(0),
        }
    }
}

impl PriorityMask for SoftPriorityMask {
    fn level(&self) -> u8 {
        self.level.load(Ordering::Acquire)
    }

    fn set_level(&self, level: u8) {
        self.level.store(level, Ordering::Release);
    }
}

/// Cortex-M BASEPRI register.
///
/// The level is written raw, as the platform's `__set_BASEPRI` does; boards
/// with fewer than eight implemented priority bits must pick a ceiling that
/// survives the truncation.
#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct Basepri;

#[cfg(all(feature = "cortex-m", target_arch = "arm"))]
impl PriorityMask for Basepri {
    fn level(&self) -> u8 {
        cortex_m::register::basepri::read()
    }

    fn set_level(&self, level: u8) {
        // SAFETY: raising or lowering BASEPRI cannot break memory safety; it
        // only changes which interrupts may preempt the current context.
        unsafe { cortex_m::register::basepri::write(level) }
    }

    fn raise(&self, level: u8) {
        // the core ignores the write unless it strengthens the mask
        cortex_m::register::basepri_max::write(level)
    }
}
