//! Test helpers for driving a picker with a controllable clock.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::controller::DatePicker;
use super::events::PickerEvent;
use super::options::PickerOptions;
use super::surface::InputElement;
use super::timers::Clock;

/// Fixed "today" used by every harness
pub const TODAY: (i32, u32, u32) = (2020, 6, 15);

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

pub fn today() -> NaiveDate {
    ymd(TODAY.0, TODAY.1, TODAY.2)
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
    today: Cell<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { now: Cell::new(Instant::now()), today: Cell::new(today) }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn today(&self) -> NaiveDate {
        self.today.get()
    }
}

/// A picker plus handles on its clock and emitted events
pub struct Harness {
    pub dp: DatePicker,
    pub clock: Rc<ManualClock>,
    pub events: Rc<RefCell<Vec<PickerEvent>>>,
}

impl Harness {
    /// Advance past the debounce window and fire due timers
    pub fn settle(&mut self) {
        self.clock.advance_ms(6);
        self.dp.tick();
    }

    /// Drain recorded events
    pub fn take_events(&self) -> Vec<PickerEvent> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn count(&self, event: PickerEvent) -> usize {
        self.events.borrow().iter().filter(|e| **e == event).count()
    }
}

/// Dropdown-mode picker with the given input text and range
pub fn harness(text: &str, min: NaiveDate, max: NaiveDate) -> Harness {
    harness_with(PickerOptions::new(today()).with_range(min, max), text)
}

pub fn harness_with(options: PickerOptions, text: &str) -> Harness {
    let clock = Rc::new(ManualClock::new(today()));
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let dp = DatePicker::new(
        InputElement::new(text),
        options,
        Box::new(move |event| sink.borrow_mut().push(event)),
        clock.clone(),
    );
    Harness { dp, clock, events }
}
