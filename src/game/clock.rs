//! Calendar source for day rollover.
//!
//! A "day" is a calendar date with no time-of-day or zone attached. The system
//! clock reports the host's local date, so the board rolls over at local midnight.

use chrono::{Days, Local, NaiveDate};
use std::cell::Cell;
use std::rc::Rc;

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Cell<NaiveDate>,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Cell::new(date),
        }
    }

    pub fn set(&self, date: NaiveDate) {
        self.date.set(date);
    }

    pub fn advance_days(&self, days: u64) {
        let current = self.date.get();
        self.date
            .set(current.checked_add_days(Days::new(days)).unwrap_or(current));
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// True when `later` is exactly the calendar day after `earlier`.
pub fn is_next_day(earlier: NaiveDate, later: NaiveDate) -> bool {
    earlier.succ_opt() == Some(later)
}
