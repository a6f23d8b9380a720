use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Deserialize;

use crate::domains::{City, PuzzleBoard};

#[derive(Parser, Debug)]
#[command(
    name = "A* Search",
    about = "Step-wise A* search demos: Romania routes, 8-puzzle, mazes.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Scenario to run: romania, puzzle or maze")]
    pub scenario: Option<String>,

    #[arg(long, help = "Start city for the romania scenario")]
    pub start_city: Option<String>,

    #[arg(
        long,
        help = "Start board for the puzzle scenario, nine digits row by row with 0 as the blank"
    )]
    pub start_tiles: Option<String>,

    #[arg(long, help = "Path to a YAML maze scenario file")]
    pub maze_path: Option<String>,

    #[arg(long, help = "Seed for the random number generator")]
    pub seed: Option<u64>,

    #[arg(long, help = "Step budget before the search is cancelled")]
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub scenario: String,
    pub start_city: String,
    pub start_tiles: String,
    pub maze_path: Option<String>,
    pub seed: u64,
    pub max_steps: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scenario: "romania".to_string(),
            start_city: "Arad".to_string(),
            start_tiles: "134802765".to_string(),
            maze_path: None,
            seed: 0,
            max_steps: 100_000,
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Config> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Config> {
        if let Some(scenario) = &cli.scenario {
            self.scenario = scenario.clone();
        }
        if let Some(start_city) = &cli.start_city {
            self.start_city = start_city.clone();
        }
        if let Some(start_tiles) = &cli.start_tiles {
            self.start_tiles = start_tiles.clone();
        }
        if let Some(maze_path) = &cli.maze_path {
            self.maze_path = Some(maze_path.clone());
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(max_steps) = cli.max_steps {
            self.max_steps = max_steps;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        match self.scenario.as_str() {
            "romania" => {
                City::from_name(&self.start_city).ok_or_else(|| {
                    anyhow!("there is no city named {} in the map", self.start_city)
                })?;
            }
            "puzzle" => {
                PuzzleBoard::from_digits(&self.start_tiles)
                    .with_context(|| format!("invalid start board {:?}", self.start_tiles))?;
            }
            "maze" => {}
            other => {
                return Err(anyhow!(
                    "unknown scenario {other:?}, expected romania, puzzle or maze"
                ))
            }
        }

        if self.max_steps == 0 {
            return Err(anyhow!("step budget must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_config_overridden_by_flags() {
        let config = Config::from_yaml_str("scenario: puzzle\nmax_steps: 50\n").unwrap();
        assert_eq!(config.scenario, "puzzle");
        assert_eq!(config.max_steps, 50);

        let cli = Cli::parse_from(["astar", "--scenario", "romania", "--start-city", "Lugoj"]);
        let config = config.override_from_command_line(&cli).unwrap();
        assert_eq!(config.scenario, "romania");
        assert_eq!(config.start_city, "Lugoj");
        assert_eq!(config.max_steps, 50);
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let config = Config {
            start_city: "Atlantis".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            scenario: "chess".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            scenario: "puzzle".to_string(),
            start_tiles: "11".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());

        let config = Config {
            max_steps: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_yaml_keys_are_rejected() {
        assert!(Config::from_yaml_str("scenari0: maze\n").is_err());
    }
}
