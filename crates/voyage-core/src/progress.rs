//! Voyage progress: how much of a route counts as traveled.
//!
//! One rule feeds both the route split point and the timeline progress bar:
//! `(last_reached_index + 1) / total_stops`, where the last reached stop is
//! the current milestone if any, else the last of the completed ones.

use crate::models::{Milestone, MilestoneStatus, ShipmentStatus};

/// Index of the furthest stop reached, if any stop has been reached.
pub fn last_reached_index(milestones: &[Milestone]) -> Option<usize> {
    let statuses: Vec<MilestoneStatus> = milestones.iter().map(|m| m.status).collect();
    last_reached_in(&statuses)
}

/// Same rule over bare statuses.
pub fn last_reached_in(statuses: &[MilestoneStatus]) -> Option<usize> {
    if let Some(current) = statuses.iter().position(|s| *s == MilestoneStatus::Current) {
        return Some(current);
    }
    let completed = statuses
        .iter()
        .filter(|s| **s == MilestoneStatus::Completed)
        .count();
    completed.checked_sub(1)
}

/// Fraction of stops reached, clamped to `[0, 1]`.
pub fn progress_fraction(last_reached: Option<usize>, total_stops: usize) -> f64 {
    match last_reached {
        Some(index) if total_stops > 0 => ((index + 1) as f64 / total_stops as f64).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Progress of a classified timeline.
pub fn compute_progress(milestones: &[Milestone]) -> f64 {
    progress_fraction(last_reached_index(milestones), milestones.len())
}

/// Progress for a shipment given the stop it has reached.
///
/// Delivered and closed shipments are complete whatever their milestones say.
pub fn classify(status: ShipmentStatus, milestone_index: Option<usize>, total_stops: usize) -> f64 {
    if status.is_finished() && total_stops > 0 {
        return 1.0;
    }
    progress_fraction(milestone_index, total_stops)
}

/// Stop index implied by status alone, for routes with no milestone data.
///
/// Delivered → last stop, in transit → the middle stop, otherwise the first.
pub fn status_milestone_index(status: ShipmentStatus, total_stops: usize) -> usize {
    match status {
        ShipmentStatus::Delivered => total_stops.saturating_sub(1),
        ShipmentStatus::InTransit => total_stops / 2,
        ShipmentStatus::Pending | ShipmentStatus::Closed => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MilestoneStatus::{Completed, Current, Upcoming};

    fn timeline(statuses: &[MilestoneStatus]) -> Vec<Milestone> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| Milestone {
                id: format!("m{i}"),
                code: Some(i as u32),
                name: String::new(),
                date: None,
                location: String::new(),
                status: *status,
                placeholder: false,
            })
            .collect()
    }

    #[test]
    fn current_milestone_drives_progress() {
        let milestones = timeline(&[Completed, Current, Upcoming, Upcoming]);
        assert_eq!(last_reached_index(&milestones), Some(1));
        assert_eq!(compute_progress(&milestones), 0.5);
    }

    #[test]
    fn completed_count_without_current() {
        let milestones = timeline(&[Completed, Completed, Completed, Upcoming]);
        assert_eq!(compute_progress(&milestones), 0.75);
    }

    #[test]
    fn all_completed_is_one() {
        let milestones = timeline(&[Completed, Completed, Completed, Completed]);
        assert_eq!(compute_progress(&milestones), 1.0);
    }

    #[test]
    fn nothing_reached_is_zero() {
        assert_eq!(compute_progress(&timeline(&[Upcoming, Upcoming])), 0.0);
        assert_eq!(compute_progress(&[]), 0.0);
    }

    #[test]
    fn progress_stays_in_bounds() {
        assert_eq!(progress_fraction(Some(10), 4), 1.0);
        assert_eq!(progress_fraction(Some(0), 0), 0.0);
    }

    #[test]
    fn classify_honours_finished_status() {
        assert_eq!(classify(ShipmentStatus::Delivered, Some(0), 4), 1.0);
        assert_eq!(classify(ShipmentStatus::Closed, None, 4), 1.0);
        assert_eq!(classify(ShipmentStatus::InTransit, Some(1), 4), 0.5);
        assert_eq!(classify(ShipmentStatus::Pending, None, 4), 0.0);
        assert_eq!(classify(ShipmentStatus::Delivered, None, 0), 0.0);
    }

    #[test]
    fn status_index_rule() {
        assert_eq!(status_milestone_index(ShipmentStatus::Delivered, 5), 4);
        assert_eq!(status_milestone_index(ShipmentStatus::InTransit, 5), 2);
        assert_eq!(status_milestone_index(ShipmentStatus::Pending, 5), 0);
        assert_eq!(status_milestone_index(ShipmentStatus::Closed, 5), 0);
        assert_eq!(status_milestone_index(ShipmentStatus::Delivered, 0), 0);
    }
}
