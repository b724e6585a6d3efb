//! Date-tier ordering and truncation.
//!
//! Dates are free text, so ordering is coarse: anything marked "today" comes
//! first, then "tomorrow", then everything else. Within a tier, events are
//! ordered by their lower-cased date text, which carries no chronological
//! meaning outside the first two tiers.

use crate::models::Event;

const TODAY_MARKERS: [&str; 2] = ["i dag", "today"];
const TOMORROW_MARKERS: [&str; 2] = ["i morgen", "tomorrow"];

/// Priority bucket of a date text: 0 today, 1 tomorrow, 2 anything else.
pub fn tier(date: &str) -> u8 {
    let date = date.to_lowercase();
    if TODAY_MARKERS.iter().any(|m| date.contains(m)) {
        0
    } else if TOMORROW_MARKERS.iter().any(|m| date.contains(m)) {
        1
    } else {
        2
    }
}

/// Orders events by tier and truncates to a fixed size.
#[derive(Debug, Clone, Copy)]
pub struct Ranker {
    max_events: usize,
}

impl Ranker {
    pub fn new(max_events: usize) -> Self {
        Self { max_events }
    }

    /// Stable sort by `(tier, lower-cased date)`, then keep the first `max_events`.
    pub fn rank(&self, mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by_cached_key(|event| {
            let date = event.date.to_lowercase();
            (tier(&date), date)
        });
        events.truncate(self.max_events);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawEvent;

    fn event(title: &str, date: &str) -> Event {
        let mut raw = RawEvent::new(title, "https://x.dk", "x.dk");
        raw.date = date.to_string();
        Event::from(raw)
    }

    #[test]
    fn test_tiers() {
        assert_eq!(tier("I dag kl. 17"), 0);
        assert_eq!(tier("Today"), 0);
        assert_eq!(tier("I MORGEN"), 1);
        assert_eq!(tier("tomorrow evening"), 1);
        assert_eq!(tier("Tue, 9 Dec"), 2);
        assert_eq!(tier(""), 2);
    }

    #[test]
    fn test_orders_by_tier_then_date_text() {
        let out = Ranker::new(15).rank(vec![
            event("a", "Regular event"),
            event("b", "I morgen"),
            event("c", "Today"),
            event("d", "Aktiviteter"),
            event("e", "I dag"),
        ]);
        let titles: Vec<&str> = out.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["e", "c", "b", "d", "a"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let out = Ranker::new(15).rank(vec![
            event("first", "Kommer snart"),
            event("second", "kommer snart"),
            event("third", "Kommer snart"),
        ]);
        let titles: Vec<&str> = out.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_truncates_and_tiers_are_monotonic() {
        let events: Vec<Event> = (0..40)
            .map(|i| {
                let date = match i % 3 {
                    0 => format!("dag {i}"),
                    1 => "i morgen".to_string(),
                    _ => "i dag".to_string(),
                };
                event(&format!("e{i}"), &date)
            })
            .collect();
        let out = Ranker::new(15).rank(events);
        assert_eq!(out.len(), 15);
        for pair in out.windows(2) {
            assert!(tier(&pair[0].date) <= tier(&pair[1].date));
        }
    }

    #[test]
    fn test_today_events_fill_the_front() {
        let mut events: Vec<Event> = (0..15)
            .map(|i| event(&format!("later {i}"), &format!("{} dec", 10 + i)))
            .collect();
        for (i, date) in ["today", "I dag 18:00", "i dag 10:00", "Today 09:00", "I DAG"]
            .iter()
            .enumerate()
        {
            events.insert(i * 3, event(&format!("now {i}"), date));
        }
        assert_eq!(events.len(), 20);

        let out = Ranker::new(15).rank(events);
        assert_eq!(out.len(), 15);
        let front: Vec<&str> = out[..5].iter().map(|e| e.date.as_str()).collect();
        assert_eq!(
            front,
            vec!["I DAG", "i dag 10:00", "I dag 18:00", "today", "Today 09:00"]
        );
        assert!(out[5..].iter().all(|e| tier(&e.date) == 2));
    }

    #[test]
    fn test_fewer_than_max_is_untouched_in_length() {
        let out = Ranker::new(15).rank(vec![event("only", "")]);
        assert_eq!(out.len(), 1);
    }
}
