//! Calendar clock abstraction.

use crate::model::calendar::CalendarDate;
use std::cell::Cell;

/// Source of the current local calendar date.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

/// Reads the host's local date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate::from(chrono::Local::now().date_naive())
    }
}

/// Manually driven clock for simulations and tests.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Cell<CalendarDate>,
}

impl FixedClock {
    pub fn new(today: CalendarDate) -> Self {
        Self {
            today: Cell::new(today),
        }
    }

    pub fn set(&self, today: CalendarDate) {
        self.today.set(today);
    }

    /// Moves the clock to the next calendar day.
    pub fn advance_day(&self) {
        self.today.set(self.today.get().next_day());
    }
}

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.today.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}
