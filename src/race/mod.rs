pub mod definition;
pub mod infer;

use definition::{Boat, Participant, RaceDefinition, RaceFile, RaceType};

/// A compiled race plus the file stem its sink should use.
pub struct CompiledRace {
    pub file_stem: String,
    pub race: RaceFile,
}

/// Compile one event into a race definition: duration and race type inferred
/// from the title, lanes 1..N in entry order, regatta title as the event
/// name. Colons are the one character the consumer's file names cannot
/// carry, so the stem is the title with colons removed and nothing else
/// touched.
pub fn compile(entries: &[String], event_title: &str, regatta_title: &str) -> CompiledRace {
    let race_type = infer::race_type(event_title);
    let relay = race_type == RaceType::Relay;

    let boats = entries
        .iter()
        .enumerate()
        .map(|(i, name)| Boat {
            affiliation: String::new(),
            class_name: String::new(),
            lane_number: i as u32 + 1,
            name: name.clone(),
            participants: vec![Participant {
                name: String::new(),
            }],
        })
        .collect();

    let race = RaceFile {
        race_definition: RaceDefinition {
            boats,
            c2_race_id: String::new(),
            duration: infer::duration_meters(event_title),
            duration_type: "meters".to_string(),
            event_name: regatta_title.to_string(),
            handicap_enabled: false,
            name_long: event_title.to_string(),
            name_short: "short name".to_string(),
            race_id: String::new(),
            race_type,
            split_value: 500,
            team_size: if relay { 4 } else { 1 },
            time_cap: 0,
        },
        display_prompt_at_splits: relay.then_some(true),
        sound_horn_at_splits: relay.then_some(true),
    };

    CompiledRace {
        file_stem: event_title.replace(':', ""),
        race,
    }
}

// ── Tests ──
