use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::info;

use crate::{options::RandomizerOptions, snapshot::Snapshot};

/// Writes a finished snapshot for the patching step to pick up.
pub struct OutputWriter {
    dir: PathBuf,
}

impl OutputWriter {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn write(
        &self,
        name: &str,
        player: &str,
        snapshot: &Snapshot,
        options: &RandomizerOptions,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let mut written = Vec::new();

        let snapshot_path = self.dir.join(format!("{name}_snapshot.json"));
        write_file(&snapshot_path, serde_json::to_string_pretty(snapshot)?)?;
        written.push(snapshot_path);

        let slot_data_path = self.dir.join(format!("{name}_slot_data.json"));
        write_file(
            &slot_data_path,
            serde_json::to_string_pretty(&options.slot_data())?,
        )?;
        written.push(slot_data_path);

        if options.randomize_starters {
            let spoiler_path = self.dir.join(format!("{name}_spoiler.txt"));
            write_file(&spoiler_path, spoiler(player, snapshot))?;
            written.push(spoiler_path);
        }

        for path in &written {
            info!("wrote {}", path.display());
        }
        Ok(written)
    }
}

pub fn spoiler(player: &str, snapshot: &Snapshot) -> String {
    let mut text = format!("Starter Pokemon ({player}):\n\n");
    for line in snapshot.spoiler_lines() {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

fn write_file(path: &Path, contents: String) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}
