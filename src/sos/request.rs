//! In-memory state for one open SOS request.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::gateway::MessageRef;
use crate::sos::render::{SosAttributes, SosStatus};

/// Squad size at which a request stops accepting members.
pub const SQUAD_SIZE: usize = 4;

/// One member who responded to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: u64,
    pub display_name: String,
}

/// The unit of lifecycle state for one SOS, keyed by its voice channel id.
///
/// The roster is a historical "who responded" record in join order: leaving
/// the voice channel never removes an entry. Status is purely a function of
/// the roster length at the last mutation and never transitions back to
/// `Open`.
#[derive(Debug, Clone)]
pub struct SosRequest {
    pub channel_id: u64,
    pub channel_name: String,
    pub host_guild_id: u64,
    pub host_guild_name: String,
    pub initiator_id: u64,
    pub attributes: SosAttributes,
    pub invite_url: String,
    pub participants: Vec<Participant>,
    pub status: SosStatus,
    /// Destination guild id -> the summary copy posted there. Populated once
    /// at creation; entries are removed only at teardown.
    pub broadcast_copies: HashMap<u64, MessageRef>,
    pub last_activity: DateTime<Utc>,
}

impl SosRequest {
    /// Records a member arrival in the roster.
    ///
    /// Duplicate identities are ignored. Reaching [`SQUAD_SIZE`] closes the
    /// request; arrivals after that are still recorded but the status stays
    /// `Closed`.
    ///
    /// # Returns
    /// - `true` - The roster changed
    /// - `false` - The identity was already present
    pub fn record_join(&mut self, id: u64, display_name: &str) -> bool {
        if self.participants.iter().any(|p| p.id == id) {
            return false;
        }

        self.participants.push(Participant {
            id,
            display_name: display_name.to_string(),
        });

        if self.status == SosStatus::Open && self.participants.len() >= SQUAD_SIZE {
            self.status = SosStatus::Closed;
        }

        self.last_activity = Utc::now();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SosRequest {
        SosRequest {
            channel_id: 1,
            channel_name: "SOS QRF#1".to_string(),
            host_guild_id: 10,
            host_guild_name: "Host Clan".to_string(),
            initiator_id: 100,
            attributes: SosAttributes::default(),
            invite_url: "https://discord.gg/abc".to_string(),
            participants: vec![Participant {
                id: 100,
                display_name: "Initiator".to_string(),
            }],
            status: SosStatus::Open,
            broadcast_copies: HashMap::new(),
            last_activity: Utc::now(),
        }
    }

    #[test]
    fn closes_exactly_at_squad_size() {
        let mut request = request();

        assert!(request.record_join(101, "Second"));
        assert_eq!(request.status, SosStatus::Open);
        assert!(request.record_join(102, "Third"));
        assert_eq!(request.status, SosStatus::Open);
        assert!(request.record_join(103, "Fourth"));
        assert_eq!(request.status, SosStatus::Closed);
    }

    #[test]
    fn never_reopens() {
        let mut request = request();
        for id in 101..=103 {
            request.record_join(id, "Member");
        }
        assert_eq!(request.status, SosStatus::Closed);

        assert!(request.record_join(104, "Late"));
        assert_eq!(request.status, SosStatus::Closed);
        assert_eq!(request.participants.len(), 5);
    }

    #[test]
    fn duplicate_joins_are_ignored() {
        let mut request = request();

        assert!(!request.record_join(100, "Initiator"));
        assert_eq!(request.participants.len(), 1);
    }
}
