use std::{fs, path::Path};

use serde::Serialize;

/// Flat summary of one conversion run, written as JSON when requested.
#[derive(Serialize, Debug)]
pub struct ConversionStats {
    pub nodes: usize,
    pub ways: usize,
    pub relations: usize,
    pub layers: usize,
    pub file_size: u64,
    pub plan_type: String,
    pub projection: String,
    pub colors_enabled: bool,
}

pub fn write_stats(stats: &ConversionStats, output_filepath: &Path) -> anyhow::Result<()> {
    let contents = serde_json::to_string_pretty(stats)?;
    fs::write(output_filepath, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testdir::testdir;

    use super::{write_stats, ConversionStats};

    #[test]
    fn test_write_stats() {
        let stats = ConversionStats {
            nodes: 12,
            ways: 3,
            relations: 1,
            layers: 2,
            file_size: 4096,
            plan_type: "key-plan".to_string(),
            projection: "EPSG:3857".to_string(),
            colors_enabled: true,
        };
        let test_dir = testdir!();
        let stats_filepath = test_dir.join("stats.json");
        write_stats(&stats, &stats_filepath).unwrap();

        let contents = fs::read_to_string(&stats_filepath).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(12, parsed["nodes"]);
        assert_eq!(2, parsed["layers"]);
        assert_eq!("key-plan", parsed["plan_type"]);
        assert_eq!(true, parsed["colors_enabled"]);
    }
}
