use crate::config::gameplay::GameplayConfig;
use crate::config::worldgen::WorldGenConfig;
use crate::utils::VoxelError;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, LevelFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub log_level: String,
    /// Ticks the headless session runs before quitting.
    pub session_ticks: u32,
    pub worldgen: WorldGenConfig,
    pub gameplay: GameplayConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            session_ticks: 600,
            worldgen: WorldGenConfig::default(),
            gameplay: GameplayConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Loads `path`, writing the defaults there first when it does not exist.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            info!("Wrote default config to {}", path.display());
            return Ok(config);
        }
        Self::load(path)
    }

    pub fn validate(&self) -> std::result::Result<(), VoxelError> {
        let g = &self.gameplay;
        let scalars = [
            ("gravity", g.gravity),
            ("jump_force", g.jump_force),
            ("terminal_velocity", g.terminal_velocity),
            ("movement_speed", g.movement_speed),
            ("max_delta_time", g.max_delta_time),
            ("fixed_timestep", g.fixed_timestep),
            ("mouse_sensitivity", g.mouse_sensitivity),
            ("reach", g.reach),
        ];
        let vectors = g.player_size.iter().chain(g.spawn_point.iter());
        if let Some((name, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(VoxelError::invalid(format!("{name} must be finite")));
        }
        if vectors.copied().any(|v| !v.is_finite()) {
            return Err(VoxelError::invalid("player size and spawn point must be finite"));
        }

        if g.gravity >= 0.0 {
            return Err(VoxelError::invalid("gravity must be negative"));
        }
        if g.fixed_timestep <= 0.0 || g.max_delta_time <= 0.0 {
            return Err(VoxelError::invalid("timesteps must be positive"));
        }
        if g.terminal_velocity <= 0.0 || g.jump_force < 0.0 || g.movement_speed < 0.0 {
            return Err(VoxelError::invalid("speeds must be non-negative"));
        }
        if g.reach < 0.0 {
            return Err(VoxelError::invalid("reach must be non-negative"));
        }
        if g.player_size.iter().any(|s| *s <= 0.0) {
            return Err(VoxelError::invalid("player size must be positive on every axis"));
        }
        if self.worldgen.chunk_radius < 0 {
            return Err(VoxelError::invalid("chunk radius must be non-negative"));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> std::result::Result<LevelFilter, VoxelError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| VoxelError::invalid(format!("unknown log level '{}'", self.log_level)))
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "MetroManDevTeam", "voxbox")
        .context("Couldn't determine project directory")?;
    Ok(proj_dirs.config_dir().join("voxbox.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::worldgen::GeneratorKind;

    #[test]
    fn test_default_is_valid() {
        EngineConfig::default().validate().unwrap();
        assert_eq!(EngineConfig::default().level_filter().unwrap(), LevelFilter::Info);
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("voxbox.toml");

        let mut config = EngineConfig::default();
        config.worldgen.generator = GeneratorKind::Flat;
        config.gameplay.max_delta_time = 0.05;
        config.save(&path).unwrap();

        assert_eq!(EngineConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voxbox.toml");
        assert!(!path.exists());
        let config = EngineConfig::load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: EngineConfig = toml::from_str(
            r#"
            log_level = "debug"

            [worldgen]
            generator = "scatter"
            seed = 7

            [gameplay]
            gravity = -9.8
            "#,
        )
        .unwrap();
        assert_eq!(config.worldgen.generator, GeneratorKind::Scatter);
        assert_eq!(config.worldgen.seed, 7);
        assert_eq!(config.worldgen.chunk_radius, 1);
        assert_eq!(config.gameplay.gravity, -9.8);
        assert_eq!(config.gameplay.jump_force, GameplayConfig::default().jump_force);
        config.validate().unwrap();
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.gameplay.gravity = 1.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.gameplay.max_delta_time = 0.0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.gameplay.player_size = [0.6, 0.0, 0.6];
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.log_level = "loud".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_finite_values() {
        let mut config = EngineConfig::default();
        config.gameplay.reach = f32::INFINITY;
        assert!(matches!(config.validate(), Err(VoxelError::InvalidArgument(_))));

        let mut config = EngineConfig::default();
        config.gameplay.gravity = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.gameplay.spawn_point = [0.0, f32::NEG_INFINITY, 0.0];
        assert!(config.validate().is_err());

        let parsed: EngineConfig = toml::from_str("[gameplay]\nreach = inf\n").unwrap();
        assert!(parsed.gameplay.reach.is_infinite());
        assert!(parsed.validate().is_err());
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[gameplay]\ngravity = 3.0\n").unwrap();
        assert!(EngineConfig::load(&path).is_err());
        std::fs::write(&path, "not toml at all [").unwrap();
        assert!(EngineConfig::load(&path).is_err());
    }
}
