use serde::Serialize;

/// One `.rac2` document as the timing application ingests it. Field order
/// matters: serialization follows declaration order, and the consumer's
/// files carry these keys in exactly this sequence. The two relay flags sit
/// outside `race_definition`; the consumer's schema nests them that way.
#[derive(Debug, Clone, Serialize)]
pub struct RaceFile {
    pub race_definition: RaceDefinition,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_prompt_at_splits: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sound_horn_at_splits: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RaceDefinition {
    pub boats: Vec<Boat>,
    pub c2_race_id: String,
    pub duration: u32,
    pub duration_type: String,
    pub event_name: String,
    pub handicap_enabled: bool,
    pub name_long: String,
    pub name_short: String,
    pub race_id: String,
    pub race_type: RaceType,
    pub split_value: u32,
    pub team_size: u32,
    pub time_cap: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RaceType {
    Individual,
    Relay,
}

/// Affiliation, class and participant names are left blank; the timing app
/// fills them in on its side.
#[derive(Debug, Clone, Serialize)]
pub struct Boat {
    pub affiliation: String,
    pub class_name: String,
    pub lane_number: u32,
    pub name: String,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub name: String,
}

impl RaceFile {
    /// 4-space-indented JSON, non-ASCII characters written literally, no
    /// trailing newline.
    pub fn render(&self) -> serde_json::Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8(buf).expect("serde_json emits valid UTF-8"))
    }
}

// ── Tests ──
