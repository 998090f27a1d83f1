//! Rendering of SOS request state into a platform-independent summary.
//!
//! Rendering is a pure function of request state: identical input always
//! produces identical output, so re-propagating an unchanged request edits
//! every broadcast copy to byte-identical content. The conversion to an
//! actual Discord embed happens at the gateway edge.

use crate::sos::request::Participant;

/// Embed title of every SOS broadcast copy. Also used by the cleanup sweep to
/// recognize stale copies.
pub const SOS_TITLE: &str = "SOS ACTIVATED";

/// Free-form descriptive fields fixed at creation time.
///
/// Every field is optional; absent fields render as "Open" ("None" for
/// notes).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SosAttributes {
    pub enemy: Option<String>,
    pub difficulty: Option<String>,
    pub mission: Option<String>,
    pub voice: Option<String>,
    pub notes: Option<String>,
}

/// Whether a request still accepts squad members.
///
/// Transitions `Open -> Closed` once and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SosStatus {
    Open,
    Closed,
}

impl SosStatus {
    pub fn label(self) -> &'static str {
        match self {
            SosStatus::Open => "**Open**",
            SosStatus::Closed => "**Closed**",
        }
    }
}

/// One name/value pair of a rendered summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    pub name: String,
    pub value: String,
}

/// Platform-independent rendering of one SOS request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub title: String,
    pub description: String,
    pub fields: Vec<SummaryField>,
}

fn attribute(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Open")
}

/// Renders the summary view for one request.
///
/// Participants are rendered in join order.
pub fn render_summary(
    attributes: &SosAttributes,
    status: SosStatus,
    participants: &[Participant],
    host_guild_name: &str,
    invite_url: &str,
) -> SummaryView {
    let description = format!(
        "**Comms:** [Join Now]({invite})\n\n\
         **Enemy:** {enemy}\n\
         **Difficulty:** {difficulty}\n\
         **Mission Focus:** {mission}\n\
         **Voice:** {voice}\n\
         **Notes:** {notes}\n\n",
        invite = invite_url,
        enemy = attribute(&attributes.enemy),
        difficulty = attribute(&attributes.difficulty),
        mission = attribute(&attributes.mission),
        voice = attribute(&attributes.voice),
        notes = attributes.notes.as_deref().unwrap_or("None"),
    );

    let roster = participants
        .iter()
        .map(|participant| participant.display_name.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    SummaryView {
        title: SOS_TITLE.to_string(),
        description,
        fields: vec![
            SummaryField {
                name: "HOST CLAN".to_string(),
                value: host_guild_name.to_string(),
            },
            SummaryField {
                name: "Status".to_string(),
                value: status.label().to_string(),
            },
            SummaryField {
                name: "Fleet Response".to_string(),
                value: roster,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: u64, name: &str) -> Participant {
        Participant {
            id,
            display_name: name.to_string(),
        }
    }

    #[test]
    fn absent_attributes_render_as_placeholders() {
        let view = render_summary(
            &SosAttributes::default(),
            SosStatus::Open,
            &[participant(1, "Alice")],
            "Host Clan",
            "https://discord.gg/abc",
        );

        assert!(view.description.contains("**Enemy:** Open"));
        assert!(view.description.contains("**Notes:** None"));
    }

    #[test]
    fn attributes_render_verbatim() {
        let attributes = SosAttributes {
            enemy: Some("Automaton".to_string()),
            difficulty: Some("Helldive".to_string()),
            ..Default::default()
        };

        let view = render_summary(
            &attributes,
            SosStatus::Open,
            &[participant(1, "Alice")],
            "Host Clan",
            "https://discord.gg/abc",
        );

        assert!(view.description.contains("**Enemy:** Automaton"));
        assert!(view.description.contains("**Difficulty:** Helldive"));
    }

    #[test]
    fn render_is_deterministic() {
        let participants = vec![participant(1, "Alice"), participant(2, "Bob")];

        let first = render_summary(
            &SosAttributes::default(),
            SosStatus::Closed,
            &participants,
            "Host Clan",
            "https://discord.gg/abc",
        );
        let second = render_summary(
            &SosAttributes::default(),
            SosStatus::Closed,
            &participants,
            "Host Clan",
            "https://discord.gg/abc",
        );

        assert_eq!(first, second);
    }

    #[test]
    fn roster_preserves_join_order() {
        let participants = vec![
            participant(3, "Charlie"),
            participant(1, "Alice"),
            participant(2, "Bob"),
        ];

        let view = render_summary(
            &SosAttributes::default(),
            SosStatus::Open,
            &participants,
            "Host Clan",
            "https://discord.gg/abc",
        );

        assert_eq!(view.fields[2].value, "Charlie\nAlice\nBob");
    }

    #[test]
    fn status_field_reflects_state() {
        let view = render_summary(
            &SosAttributes::default(),
            SosStatus::Closed,
            &[participant(1, "Alice")],
            "Host Clan",
            "https://discord.gg/abc",
        );

        assert_eq!(view.fields[1].value, "**Closed**");
    }
}
