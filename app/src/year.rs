use chrono::{Datelike as _, Local};

use crate::dom::{Dom, Node};

/// Source of the current calendar year.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn current_year(&self) -> i32;
}

/// Local wall-clock time, as the visitor's browser reports it.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn current_year(&self) -> i32 {
        Local::now().year()
    }
}

/// Writes the current year into the element with id `year_id`.
pub fn set_year<D: Dom, C: Clock>(dom: &D, year_id: &str, clock: &C) -> bool {
    let Some(target) = dom.element_by_id(year_id) else {
        return false;
    };
    target.set_text(&clock.current_year().to_string());
    true
}
