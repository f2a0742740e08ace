//! Agent configuration

use std::str::FromStr;

use parley_common::{ParleyError, Result};
use parley_darwinian::DarwinianConfig;
use parley_opponent::OpponentWeighting;
use serde::{Deserialize, Serialize};

/// Configuration of one negotiation agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Genetic search settings
    pub darwinian: DarwinianConfig,
    /// How opponent issue weights are estimated
    pub opponent_weighting: OpponentWeighting,
    /// Seed for the session RNG; entropy seeded when absent
    pub seed: Option<u64>,
}

impl AgentConfig {
    /// Load configuration from the environment
    pub fn load() -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut cfg = Self::default();
        cfg.apply_env(|key| std::env::var(key).ok())?;
        cfg.darwinian.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON document; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.darwinian.validate()?;
        Ok(cfg)
    }

    /// Apply `PARLEY_*` overrides from `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let darwinian = &mut self.darwinian;
        override_with(&lookup, "PARLEY_POPULATION_SIZE", &mut darwinian.population_size)?;
        override_with(&lookup, "PARLEY_MATING_POOL_SIZE", &mut darwinian.mating_pool_size)?;
        override_with(&lookup, "PARLEY_ELITISM", &mut darwinian.elitism)?;
        override_with(&lookup, "PARLEY_CROSSOVER_RATE", &mut darwinian.crossover_rate)?;
        override_with(&lookup, "PARLEY_MUTATION_RATE", &mut darwinian.mutation_rate)?;
        override_with(&lookup, "PARLEY_SHORTLIST_SIZE", &mut darwinian.shortlist_size)?;
        override_with(&lookup, "PARLEY_CONCESSION_ALPHA", &mut darwinian.concession_alpha)?;
        override_with(&lookup, "PARLEY_CONCESSION_BETA", &mut darwinian.concession_beta)?;
        override_with(&lookup, "PARLEY_OPPONENT_WEIGHTING", &mut self.opponent_weighting)?;

        if let Some(raw) = lookup("PARLEY_SEED") {
            self.seed = Some(parse_var("PARLEY_SEED", &raw)?);
        }
        Ok(())
    }
}

fn override_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    target: &mut T,
) -> Result<()>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(key) {
        *target = parse_var(key, &raw)?;
    }
    Ok(())
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ParleyError::Config(format!("{}='{}': {}", key, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides() {
        let vars = env(&[
            ("PARLEY_POPULATION_SIZE", "40"),
            ("PARLEY_MUTATION_RATE", "0.1"),
            ("PARLEY_SEED", "1234"),
            ("PARLEY_OPPONENT_WEIGHTING", "uniform"),
        ]);
        let mut cfg = AgentConfig::default();
        cfg.apply_env(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(cfg.darwinian.population_size, 40);
        assert_eq!(cfg.darwinian.mutation_rate, 0.1);
        assert_eq!(cfg.darwinian.mating_pool_size, 80);
        assert_eq!(cfg.seed, Some(1234));
        assert_eq!(cfg.opponent_weighting, OpponentWeighting::Uniform);
    }

    #[test]
    fn test_malformed_env_value() {
        let vars = env(&[("PARLEY_POPULATION_SIZE", "many")]);
        let mut cfg = AgentConfig::default();
        let err = cfg.apply_env(|key| vars.get(key).cloned()).unwrap_err();
        assert!(matches!(err, ParleyError::Config(_)));
        assert!(err.to_string().contains("PARLEY_POPULATION_SIZE"));
    }

    #[test]
    fn test_from_json() {
        let cfg = AgentConfig::from_json_str(
            r#"{"darwinian": {"population_size": 30}, "opponent_weighting": "uniform", "seed": 9}"#,
        )
        .unwrap();
        assert_eq!(cfg.darwinian.population_size, 30);
        assert_eq!(cfg.darwinian.elitism, 0.1);
        assert_eq!(cfg.opponent_weighting, OpponentWeighting::Uniform);
        assert_eq!(cfg.seed, Some(9));

        assert_eq!(AgentConfig::from_json_str("{}").unwrap(), AgentConfig::default());
        assert!(matches!(
            AgentConfig::from_json_str(r#"{"darwinian": {"elitism": 2.0}}"#),
            Err(ParleyError::Config(_))
        ));
        assert!(AgentConfig::from_json_str("not json").is_err());
    }
}
