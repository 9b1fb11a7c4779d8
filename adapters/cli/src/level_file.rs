use std::{fs, path::Path};

use anyhow::{Context, Result};
use tilewalk_world::LevelDefinition;

/// Reads a level definition from a TOML file.
pub(crate) fn load_level(path: &Path) -> Result<LevelDefinition> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file at {}", path.display()))?;
    parse_level(&contents).with_context(|| format!("invalid level file {}", path.display()))
}

fn parse_level(contents: &str) -> Result<LevelDefinition> {
    toml::from_str(contents).context("failed to parse level toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilewalk_world::World;

    const CORRIDOR: &str = r#"
[metrics]
tiles_per_grid_x = 4
tiles_per_grid_y = 3
grid_count_x = 1
grid_count_y = 1
tile_side_in_world_units = 1.0
tile_side_in_pixels = 32.0

[player]
width = 0.5
height = 1.0

[spawn]
tile_x = 1
tile_y = 1
offset_x = 0.5
offset_y = 0.5

[[grids]]
x = 0
y = 0
rows = [
    [1, 1, 1, 1],
    [1, 0, 0, 1],
    [1, 1, 1, 1],
]
"#;

    #[test]
    fn parses_level_with_partial_spawn() {
        let level = parse_level(CORRIDOR).expect("level parses");

        assert_eq!(level.metrics.tiles_per_grid_x, 4);
        assert_eq!(level.spawn.grid_x, 0);
        assert_eq!(level.spawn.tile_x, 1);
        assert_eq!(level.grids.len(), 1);
        assert!(World::from_level(&level).is_ok());
    }

    #[test]
    fn builtin_level_survives_toml_round_trip() {
        let builtin = LevelDefinition::builtin();
        let encoded = toml::to_string(&builtin).expect("builtin level serializes");

        let decoded = parse_level(&encoded).expect("level parses");

        assert_eq!(decoded, builtin);
    }

    #[test]
    fn rejects_missing_sections() {
        let error = parse_level("[player]\nwidth = 1.0\nheight = 1.0\n")
            .expect_err("metrics are required");

        assert!(format!("{error:#}").contains("failed to parse level toml contents"));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("definitely/not/a/level.toml");

        let error = load_level(path).expect_err("file does not exist");

        assert!(format!("{error:#}").contains("definitely/not/a/level.toml"));
    }
}
