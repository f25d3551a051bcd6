//! `EventCalendar` — time-ordered store of not-yet-processed events.
//!
//! # Why this shape
//!
//! Events are bucketed per distinct scheduled time in a
//! `BTreeMap<SimTime, VecDeque<_>>`.  The map keeps buckets ordered by time;
//! the deque keeps events that share a time in insertion order, which gives
//! the FIFO tie-break for free and makes a run reproducible for a fixed
//! sequence of `add` calls.
//!
//! # Performance note
//!
//! `add` and `next` are O(log T) where T is the number of distinct pending
//! times.  A clinic run rarely holds more than a few dozen pending events
//! (one arrival, one per busy server, the closing event).

use std::collections::{BTreeMap, VecDeque};

use uc_core::SimTime;

use crate::{CalendarError, CalendarResult};

/// An event removed from the calendar, together with its scheduling data.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent<E> {
    /// The time the event was scheduled for.  Equals the calendar clock once
    /// the event has been extracted.
    pub time:  SimTime,
    /// Insertion sequence number, unique and increasing within one calendar.
    pub seq:   u64,
    pub event: E,
}

/// A priority queue of events keyed by scheduled time, FIFO within a time.
pub struct EventCalendar<E> {
    inner:    BTreeMap<SimTime, VecDeque<(u64, E)>>,
    /// Cached total event count for O(1) `len()`.
    total:    usize,
    /// Time of the most recently extracted event.
    now:      SimTime,
    next_seq: u64,
}

impl<E> Default for EventCalendar<E> {
    fn default() -> Self {
        Self {
            inner:    BTreeMap::new(),
            total:    0,
            now:      SimTime::ZERO,
            next_seq: 0,
        }
    }
}

impl<E> EventCalendar<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `time` and return its sequence number.
    ///
    /// Scheduling into the past (before [`time`][Self::time]) is a logic
    /// error in the caller and fails with
    /// [`CalendarError::TimeOrderingViolation`]; the calendar is unchanged.
    /// Scheduling at exactly the current time is allowed.
    pub fn add(&mut self, time: SimTime, event: E) -> CalendarResult<u64> {
        if time < self.now {
            return Err(CalendarError::TimeOrderingViolation {
                requested: time,
                now:       self.now,
            });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner.entry(time).or_default().push_back((seq, event));
        self.total += 1;
        Ok(seq)
    }

    /// Remove and return the earliest event, advancing the clock to its time.
    pub fn next(&mut self) -> CalendarResult<ScheduledEvent<E>> {
        let mut bucket = self.inner.first_entry().ok_or(CalendarError::EmptyCalendar)?;
        let time = *bucket.key();
        let (seq, event) = bucket
            .get_mut()
            .pop_front()
            .ok_or(CalendarError::EmptyCalendar)?;
        if bucket.get().is_empty() {
            bucket.remove();
        }
        self.total -= 1;
        self.now = time;
        Ok(ScheduledEvent { time, seq, event })
    }

    /// The earliest pending scheduled time, or `None` if empty.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    /// The calendar clock: time of the last extracted event (zero initially).
    pub fn time(&self) -> SimTime {
        self.now
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of distinct future times with at least one pending event.
    pub fn time_count(&self) -> usize {
        self.inner.len()
    }

    /// Iterate pending events in the order `next()` would return them.
    pub fn iter(&self) -> impl Iterator<Item = (SimTime, &E)> + '_ {
        self.inner
            .iter()
            .flat_map(|(&t, bucket)| bucket.iter().map(move |(_, e)| (t, e)))
    }
}
