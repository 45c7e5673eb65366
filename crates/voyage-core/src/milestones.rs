//! Milestone timeline normalization.
//!
//! Turns raw milestone records into an ordered, classified timeline anchored
//! to the shipment's origin and destination. Records are never dropped or
//! reordered; short timelines are padded with placeholder stops.

use chrono::{DateTime, Utc};

use crate::models::{Milestone, MilestoneStatus, RawMilestone, Shipment};

/// Label for milestones with no code-derived or explicit location.
pub const IN_TRANSIT_LABEL: &str = "In Transit";

/// The four stops every timeline shows, by type code.
pub const CANONICAL_STOPS: [(u32, &str); 4] = [
    (0, "Empty to Shipper"),
    (1, "Departure"),
    (2, "Arrival"),
    (3, "Delivery"),
];

fn canonical_name(code: u32) -> Option<&'static str> {
    CANONICAL_STOPS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

fn is_canonical(code: Option<u32>) -> bool {
    code.is_some_and(|code| canonical_name(code).is_some())
}

/// Location a milestone is pinned to.
///
/// Codes 0–1 belong to the origin, 2–3 to the destination; anything else
/// keeps its own location or reads as in transit.
pub fn anchor_location(
    code: Option<u32>,
    explicit: Option<&str>,
    origin: &str,
    destination: &str,
) -> String {
    match code {
        Some(0 | 1) => origin.to_string(),
        Some(2 | 3) => destination.to_string(),
        _ => explicit
            .map(str::trim)
            .filter(|loc| !loc.is_empty())
            .unwrap_or(IN_TRANSIT_LABEL)
            .to_string(),
    }
}

/// Status of the milestone at `index`, given how many before it completed.
pub fn milestone_status(
    date: Option<DateTime<Utc>>,
    index: usize,
    completed_before: usize,
    now: DateTime<Utc>,
) -> MilestoneStatus {
    if date.is_some_and(|date| date <= now) {
        MilestoneStatus::Completed
    } else if completed_before == index {
        MilestoneStatus::Current
    } else {
        MilestoneStatus::Upcoming
    }
}

/// Statuses for a run of dates with no placeholders involved.
pub fn classify_dates(dates: &[Option<DateTime<Utc>>], now: DateTime<Utc>) -> Vec<MilestoneStatus> {
    let mut completed_before = 0usize;
    dates
        .iter()
        .enumerate()
        .map(|(index, date)| {
            let status = milestone_status(*date, index, completed_before, now);
            if status == MilestoneStatus::Completed {
                completed_before += 1;
            }
            status
        })
        .collect()
}

enum Slot<'a> {
    Record(usize, &'a RawMilestone),
    Placeholder(u32),
}

/// Classify raw milestones against `now`.
///
/// A milestone is completed when it has a date at or before `now`, current
/// when every milestone before it is completed, and upcoming otherwise.
/// Placeholders are always upcoming.
pub fn normalize_milestones(
    raw: &[RawMilestone],
    origin: &str,
    destination: &str,
    now: DateTime<Utc>,
) -> Vec<Milestone> {
    let slots = plan_slots(raw);

    let mut completed_before = 0usize;
    let mut out = Vec::with_capacity(slots.len());
    for (index, slot) in slots.into_iter().enumerate() {
        let milestone = match slot {
            Slot::Placeholder(code) => Milestone {
                id: format!("placeholder-{code}"),
                code: Some(code),
                name: canonical_name(code).unwrap_or_default().to_string(),
                date: None,
                location: anchor_location(Some(code), None, origin, destination),
                status: MilestoneStatus::Upcoming,
                placeholder: true,
            },
            Slot::Record(raw_index, record) => {
                let status = milestone_status(record.date, index, completed_before, now);
                Milestone {
                    id: record
                        .id
                        .clone()
                        .unwrap_or_else(|| format!("milestone-{raw_index}")),
                    code: record.code,
                    name: display_name(record),
                    date: record.date,
                    location: anchor_location(
                        record.code,
                        record.location.as_deref(),
                        origin,
                        destination,
                    ),
                    status,
                    placeholder: false,
                }
            }
        };
        if milestone.status == MilestoneStatus::Completed {
            completed_before += 1;
        }
        out.push(milestone);
    }
    out
}

/// Timeline for a shipment, anchored to its own origin and destination.
pub fn shipment_timeline(shipment: &Shipment, now: DateTime<Utc>) -> Vec<Milestone> {
    normalize_milestones(
        &shipment.milestones,
        shipment.origin.as_deref().unwrap_or_default(),
        shipment.destination.as_deref().unwrap_or_default(),
        now,
    )
}

fn display_name(record: &RawMilestone) -> String {
    if let Some(name) = record.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match record.code {
        Some(code) => canonical_name(code)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Milestone {code}")),
        None => IN_TRANSIT_LABEL.to_string(),
    }
}

/// Interleave records with placeholders for missing canonical stops.
///
/// Padding only happens when there are fewer records than canonical stops.
/// A placeholder is emitted just before the first record carrying a higher
/// canonical code, so canonical order holds without moving any record.
fn plan_slots(raw: &[RawMilestone]) -> Vec<Slot<'_>> {
    let mut missing: Vec<u32> = if raw.len() < CANONICAL_STOPS.len() {
        CANONICAL_STOPS
            .iter()
            .map(|(code, _)| *code)
            .filter(|code| !raw.iter().any(|r| r.code == Some(*code)))
            .collect()
    } else {
        Vec::new()
    };
    missing.reverse();

    let mut slots = Vec::with_capacity(raw.len() + missing.len());
    for (index, record) in raw.iter().enumerate() {
        if is_canonical(record.code) {
            let code = record.code.unwrap_or_default();
            while missing.last().is_some_and(|next| *next < code) {
                if let Some(next) = missing.pop() {
                    slots.push(Slot::Placeholder(next));
                }
            }
        }
        slots.push(Slot::Record(index, record));
    }
    while let Some(next) = missing.pop() {
        slots.push(Slot::Placeholder(next));
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn statuses(milestones: &[Milestone]) -> Vec<MilestoneStatus> {
        milestones.iter().map(|m| m.status).collect()
    }

    #[test]
    fn classifies_completed_current_upcoming() {
        let raw = vec![
            RawMilestone::new(0, Some(now() - Duration::days(3))),
            RawMilestone::new(1, None),
            RawMilestone::new(2, None),
            RawMilestone::new(3, None),
        ];
        let out = normalize_milestones(&raw, "Shanghai, China", "Los Angeles, USA", now());
        assert_eq!(
            statuses(&out),
            vec![
                MilestoneStatus::Completed,
                MilestoneStatus::Current,
                MilestoneStatus::Upcoming,
                MilestoneStatus::Upcoming,
            ]
        );
        assert_eq!(out[0].location, "Shanghai, China");
        assert_eq!(out[1].location, "Shanghai, China");
        assert_eq!(out[2].location, "Los Angeles, USA");
        assert_eq!(out[3].name, "Delivery");
    }

    #[test]
    fn future_date_is_not_completed() {
        let raw = vec![
            RawMilestone::new(0, Some(now() + Duration::days(1))),
            RawMilestone::new(1, Some(now() + Duration::days(2))),
            RawMilestone::new(2, None),
            RawMilestone::new(3, None),
        ];
        let out = normalize_milestones(&raw, "A", "B", now());
        assert_eq!(out[0].status, MilestoneStatus::Current);
        assert!(out[1..].iter().all(|m| m.status == MilestoneStatus::Upcoming));
    }

    #[test]
    fn date_equal_to_now_is_completed() {
        let raw = vec![RawMilestone::new(0, Some(now()))];
        let out = normalize_milestones(&raw, "A", "B", now());
        assert_eq!(out[0].status, MilestoneStatus::Completed);
    }

    #[test]
    fn at_most_one_current_after_gap() {
        let raw = vec![
            RawMilestone::new(0, Some(now() - Duration::days(5))),
            RawMilestone::new(1, None),
            RawMilestone::new(2, Some(now() - Duration::days(1))),
            RawMilestone::new(3, None),
        ];
        let out = normalize_milestones(&raw, "A", "B", now());
        assert_eq!(
            statuses(&out),
            vec![
                MilestoneStatus::Completed,
                MilestoneStatus::Current,
                MilestoneStatus::Completed,
                MilestoneStatus::Upcoming,
            ]
        );
    }

    #[test]
    fn short_timeline_is_padded_in_canonical_order() {
        let raw = vec![
            RawMilestone::new(1, Some(now() - Duration::days(2))),
            RawMilestone::new(3, None),
        ];
        let out = normalize_milestones(&raw, "Origin", "Dest", now());
        let codes: Vec<_> = out.iter().map(|m| m.code).collect();
        assert_eq!(codes, vec![Some(0), Some(1), Some(2), Some(3)]);

        let placeholder = &out[0];
        assert!(placeholder.placeholder);
        assert_eq!(placeholder.name, "Empty to Shipper");
        assert_eq!(placeholder.location, "Origin");
        assert_eq!(placeholder.status, MilestoneStatus::Upcoming);
        assert!(placeholder.date.is_none());
        assert_eq!(out[2].location, "Dest");
        assert!(out[2].placeholder);
        assert!(!out[1].placeholder);
    }

    #[test]
    fn empty_input_yields_four_upcoming_placeholders() {
        let out = normalize_milestones(&[], "Origin", "Dest", now());
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|m| m.placeholder));
        assert!(out.iter().all(|m| m.status == MilestoneStatus::Upcoming));
    }

    #[test]
    fn long_timeline_is_untouched() {
        let raw: Vec<_> = (0..6).map(|code| RawMilestone::new(code, None)).collect();
        let out = normalize_milestones(&raw, "A", "B", now());
        assert_eq!(out.len(), 6);
        assert!(out.iter().all(|m| !m.placeholder));
        assert_eq!(out[4].location, IN_TRANSIT_LABEL);
        assert_eq!(out[5].name, "Milestone 5");
    }

    #[test]
    fn non_canonical_codes_keep_their_location() {
        let mut transshipment = RawMilestone::new(7, None);
        transshipment.location = Some("Singapore".to_string());
        transshipment.name = Some("Transshipment".to_string());
        let out = normalize_milestones(&[transshipment], "A", "B", now());
        // Placeholders for 0..=3 follow the record since it carries no canonical code
        assert_eq!(out.len(), 5);
        assert_eq!(out[0].location, "Singapore");
        assert_eq!(out[0].name, "Transshipment");
        assert_eq!(out[0].status, MilestoneStatus::Current);
    }

    #[test]
    fn classify_dates_matches_timeline_rule() {
        let dates = [Some(now() - Duration::days(1)), None, Some(now() - Duration::hours(1))];
        assert_eq!(
            classify_dates(&dates, now()),
            vec![
                MilestoneStatus::Completed,
                MilestoneStatus::Current,
                MilestoneStatus::Completed,
            ]
        );
    }

    #[test]
    fn missing_code_reads_in_transit() {
        let raw = RawMilestone::default();
        let out = normalize_milestones(&[raw], "A", "B", now());
        assert_eq!(out[0].name, IN_TRANSIT_LABEL);
        assert_eq!(out[0].location, IN_TRANSIT_LABEL);
        assert_eq!(out[0].id, "milestone-0");
    }
}
