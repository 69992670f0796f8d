use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::race::CompiledRace;

/// Fixed extension of the race-definition format.
const RACE_FILE_EXT: &str = "rac2";

/// Render and write one race file into `dir`. The caller logs failures and
/// keeps going; one unwritable file never stops the remaining events.
pub fn write_race_file(dir: &Path, compiled: &CompiledRace) -> Result<PathBuf> {
    let path = dir.join(format!("{}.{}", compiled.file_stem, RACE_FILE_EXT));
    let json = compiled.race.render()?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    info!("File created: {}", path.display());
    Ok(path)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::race::compile;

    #[test]
    fn writes_stem_dot_rac2() {
        let dir = tempfile::tempdir().unwrap();
        let compiled = compile(
            &["Smith".to_string()],
            "Final: Heat 2",
            "Erg Sprints 2025",
        );

        let path = write_race_file(dir.path(), &compiled).unwrap();
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), "Final Heat 2.rac2");

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, compiled.race.render().unwrap());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        let compiled = compile(&["Smith".to_string()], "Open 8+", "Regatta");
        assert!(write_race_file(&gone, &compiled).is_err());
    }

    /// Fixture-to-file walk of the whole pipeline, minus the network.
    #[test]
    fn fixtures_compile_to_expected_race_files() {
        let index = std::fs::read_to_string("tests/fixtures/entries_index.html").unwrap();
        let listing = crate::events::parse_index(&index, "test://index");
        assert_eq!(listing.regatta_title, "Erg Sprints 2025");

        let pages = [
            ("tests/fixtures/event_heat.html", &listing.events[0]),
            ("tests/fixtures/event_empty.html", &listing.events[2]),
        ];

        let dir = tempfile::tempdir().unwrap();
        for (fixture, event) in pages {
            let html = std::fs::read_to_string(fixture).unwrap();
            let names = crate::entries::parse_entries(&html, "test://event");
            // An event with no entries produces no file at all.
            if names.is_empty() {
                continue;
            }
            let compiled = compile(&names, &event.title, &listing.regatta_title);
            write_race_file(dir.path(), &compiled).unwrap();
        }

        let written: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written, vec!["Men's 2000m Singles.rac2"]);

        let json = std::fs::read_to_string(dir.path().join(&written[0])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let def = &value["race_definition"];
        assert_eq!(def["event_name"], "Erg Sprints 2025");
        assert_eq!(def["duration"], 2000);
        assert_eq!(def["race_type"], "individual");
        assert_eq!(def["boats"].as_array().unwrap().len(), 4);
        assert_eq!(def["boats"][2]["name"], "Ødegård, Åse");
        assert_eq!(def["boats"][3]["lane_number"], 4);
    }
}
