//! Headcounts for the list view.

use crate::record::{Attendance, GolfRecord, RsvpRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RsvpSummary {
    pub total: usize,
    pub attending: usize,
    pub not_attending: usize,
    pub maybe: usize,
    /// Party sizes summed over attending responses only.
    pub total_guests: u64,
}

impl RsvpSummary {
    pub fn from_records(records: &[RsvpRecord]) -> Self {
        records.iter().fold(
            RsvpSummary {
                total: records.len(),
                ..Default::default()
            },
            |mut summary, record| {
                match record.attending {
                    Attendance::Yes => {
                        summary.attending += 1;
                        summary.total_guests += u64::from(record.guests);
                    }
                    Attendance::No => summary.not_attending += 1,
                    Attendance::Maybe => summary.maybe += 1,
                }
                summary
            },
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GolfSummary {
    pub signups: usize,
    pub players: u64,
}

impl GolfSummary {
    pub fn from_records(records: &[GolfRecord]) -> Self {
        GolfSummary {
            signups: records.len(),
            players: records.iter().map(|r| u64::from(r.party_size)).sum(),
        }
    }
}

/// RSVPs in listing order: yes, maybe, no. Stable within each group.
pub fn sorted_for_display(records: &[RsvpRecord]) -> Vec<&RsvpRecord> {
    let mut sorted: Vec<&RsvpRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.attending.sort_rank());
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::GolfTag;
    use chrono::Utc;

    fn rsvp(name: &str, attending: Attendance, guests: u32) -> RsvpRecord {
        RsvpRecord {
            name: name.to_string(),
            email: String::new(),
            organization: None,
            attending,
            guests,
            message: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn counts_guests_only_for_attending() {
        let records = vec![
            rsvp("A", Attendance::Yes, 2),
            rsvp("B", Attendance::No, 5),
            rsvp("C", Attendance::Maybe, 3),
            rsvp("D", Attendance::Yes, 1),
        ];

        let summary = RsvpSummary::from_records(&records);

        assert_eq!(
            summary,
            RsvpSummary {
                total: 4,
                attending: 2,
                not_attending: 1,
                maybe: 1,
                total_guests: 3,
            }
        );
    }

    #[test]
    fn empty_list_is_all_zero() {
        assert_eq!(RsvpSummary::from_records(&[]), RsvpSummary::default());
        assert_eq!(GolfSummary::from_records(&[]), GolfSummary::default());
    }

    #[test]
    fn golf_summary_sums_party_sizes() {
        let golfer = |size| GolfRecord {
            name: "G".to_string(),
            email: String::new(),
            handicap: None,
            party_size: size,
            pairing_pref: None,
            notes: None,
            timestamp: Utc::now(),
            tag: GolfTag::Golf,
        };

        let summary = GolfSummary::from_records(&[golfer(2), golfer(4)]);

        assert_eq!(summary.signups, 2);
        assert_eq!(summary.players, 6);
    }

    #[test]
    fn huge_party_sizes_do_not_overflow_totals() {
        let records: Vec<RsvpRecord> = crate::record::decode_rows(vec![
            serde_json::json!({"name": "A", "attending": "yes", "guests": "4294967295"}),
            serde_json::json!({"name": "B", "attending": "yes", "guests": "2"}),
        ]);

        let summary = RsvpSummary::from_records(&records);

        assert_eq!(summary.attending, 2);
        assert_eq!(summary.total_guests, u64::from(u32::MAX) + 2);
    }

    #[test]
    fn display_order_is_yes_maybe_no() {
        let records = vec![
            rsvp("no-1", Attendance::No, 1),
            rsvp("yes-1", Attendance::Yes, 1),
            rsvp("maybe-1", Attendance::Maybe, 1),
            rsvp("yes-2", Attendance::Yes, 1),
        ];

        let names: Vec<_> = sorted_for_display(&records)
            .into_iter()
            .map(|r| r.name.as_str())
            .collect();

        assert_eq!(names, vec!["yes-1", "yes-2", "maybe-1", "no-1"]);
    }
}
