//! Expansion of planned-transaction rules into concrete dated occurrences.

use chrono::{Datelike, Duration, NaiveDate};

use crate::dates::{clamp_day_to_month, shift_month};
use crate::domain::{DateWindow, PlannedTransaction, Recurrence, RecurrenceEnd, TransactionNature};

/// Hard ceiling on rule-stepping iterations, guaranteeing termination
/// regardless of rule misconfiguration. Ten years of daily steps.
const MAX_EXPANSION_STEPS: usize = 3650;

/// One concrete, dated instance of a planned-transaction rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub amount: f64,
    pub nature: TransactionNature,
    pub description: String,
    pub category: String,
}

/// Expands `rule` into the ordered occurrences intersecting `window`.
///
/// The sequence is finite and recomputed fresh on every call; paused rules
/// expand to nothing. Candidates start at the rule's anchor `due_date` and
/// advance one rule-step at a time. A candidate is emitted only when it
/// lies inside the window and on or after the anchor; the
/// `AfterOccurrences` terminator counts emitted (window-matched)
/// occurrences only.
pub fn expand_occurrences(rule: &PlannedTransaction, window: DateWindow) -> Vec<Occurrence> {
    let mut occurrences = Vec::new();
    if !rule.is_active {
        return occurrences;
    }

    if let Recurrence::OneTime = rule.recurrence {
        if window.contains(rule.due_date) {
            occurrences.push(occurrence_on(rule, rule.due_date));
        }
        return occurrences;
    }

    let anchor = rule.due_date;
    let mut current = anchor;
    let mut emitted = 0u32;

    for _ in 0..MAX_EXPANSION_STEPS {
        if current > window.end {
            break;
        }
        match rule.ends {
            RecurrenceEnd::OnDate(end_date) if current > end_date => break,
            RecurrenceEnd::AfterOccurrences(limit) if emitted >= limit => break,
            _ => {}
        }

        if matches_rule(&rule.recurrence, anchor, current)
            && window.contains(current)
            && current >= anchor
        {
            occurrences.push(occurrence_on(rule, current));
            emitted += 1;
        }

        let next = step(&rule.recurrence, anchor, current);
        if next <= current {
            break;
        }
        current = next;
    }

    occurrences
}

fn occurrence_on(rule: &PlannedTransaction, date: NaiveDate) -> Occurrence {
    Occurrence {
        date,
        amount: rule.amount,
        nature: rule.nature(),
        description: rule.description.clone(),
        category: rule.category.clone(),
    }
}

/// Whether `candidate` is a valid occurrence date for the rule. Only weekly
/// rules with an explicit day-of-week set filter candidates; every other
/// recurrence lands exactly on its stepped dates.
fn matches_rule(recurrence: &Recurrence, anchor: NaiveDate, candidate: NaiveDate) -> bool {
    match recurrence {
        Recurrence::Weekly {
            interval,
            days_of_week,
        } if !days_of_week.is_empty() => {
            let weekday = candidate.weekday().num_days_from_sunday() as u8;
            if !days_of_week.contains(&weekday) {
                return false;
            }
            if candidate == anchor {
                return true;
            }
            // Whole weeks elapsed since the anchor, gated by the interval.
            let weeks = (candidate - anchor).num_days() / 7;
            weeks % i64::from((*interval).max(1)) == 0
        }
        _ => true,
    }
}

/// Advances one rule-step from `current`. Monthly and yearly steps re-clamp
/// the anchor's day-of-month on every iteration, so a rule anchored on the
/// 31st lands on Feb 28/29 and returns to the 31st in longer months.
fn step(recurrence: &Recurrence, anchor: NaiveDate, current: NaiveDate) -> NaiveDate {
    match recurrence {
        Recurrence::OneTime => current,
        Recurrence::Daily { interval } => {
            current + Duration::days(i64::from((*interval).max(1)))
        }
        Recurrence::Weekly {
            interval,
            days_of_week,
        } => {
            if days_of_week.is_empty() {
                current + Duration::weeks(i64::from((*interval).max(1)))
            } else {
                // Candidates advance day by day; the weekday set and week
                // gate in `matches_rule` do the filtering.
                current + Duration::days(1)
            }
        }
        Recurrence::Monthly { interval } => {
            let shifted = shift_month(current, (*interval).max(1) as i32);
            clamp_day_to_month(anchor.day(), shifted.year(), shifted.month())
        }
        Recurrence::Yearly { interval } => clamp_day_to_month(
            anchor.day(),
            current.year() + (*interval).max(1) as i32,
            anchor.month(),
        ),
    }
}
