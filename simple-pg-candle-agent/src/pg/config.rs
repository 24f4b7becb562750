//! Configuration of [`SimplePg`](super::SimplePg).
use super::CategoricalActorConfig;
use crate::{opt::OptimizerConfig, util::OutDim, Device};
use anyhow::Result;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fmt::Debug,
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Constructs [`SimplePg`](super::SimplePg).
///
/// `P` is the configuration of the network producing logits of actions.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct SimplePgConfig<P: OutDim> {
    pub(super) actor_config: CategoricalActorConfig<P>,

    /// Device on which the parameters are placed. CPU if not given.
    pub device: Option<Device>,

    /// Seed of the random number generator for sampling actions.
    pub(super) seed: u64,
}

impl<P: OutDim> Default for SimplePgConfig<P> {
    fn default() -> Self {
        Self {
            actor_config: CategoricalActorConfig::default(),
            device: None,
            seed: 42,
        }
    }
}

impl<P> SimplePgConfig<P>
where
    P: DeserializeOwned + Serialize + OutDim + Debug + PartialEq + Clone,
{
    /// Sets configuration of the actor.
    pub fn actor_config(mut self, v: CategoricalActorConfig<P>) -> Self {
        self.actor_config = v;
        self
    }

    /// Sets the configuration of the policy network.
    pub fn policy_config(mut self, v: P) -> Self {
        self.actor_config = self.actor_config.policy_config(v);
        self
    }

    /// Sets optimizer configuration.
    pub fn opt_config(mut self, v: OptimizerConfig) -> Self {
        self.actor_config = self.actor_config.opt_config(v);
        self
    }

    /// Overrides the learning rate.
    pub fn learning_rate(mut self, lr: f64) -> Self {
        self.actor_config = self.actor_config.learning_rate(lr);
        self
    }

    /// Sets the device.
    pub fn device(mut self, device: Device) -> Self {
        self.device = Some(device);
        self
    }

    /// Sets the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns optimizer configuration.
    pub fn get_opt_config(&self) -> &OptimizerConfig {
        self.actor_config.get_opt_config()
    }

    /// Returns the random seed.
    pub fn get_seed(&self) -> u64 {
        self.seed
    }

    /// Constructs [`SimplePgConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`SimplePgConfig`] as YAML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlp::MlpConfig;
    use tempdir::TempDir;

    #[test]
    fn test_serde_simple_pg_config() -> Result<()> {
        let config = SimplePgConfig::default()
            .policy_config(MlpConfig::new(4, vec![32], 2, false))
            .learning_rate(0.01)
            .device(Device::Cpu)
            .seed(7);

        let dir = TempDir::new("simple_pg_config")?;
        let path = dir.path().join("simple_pg_config.yaml");
        config.save(&path)?;
        let config_ = SimplePgConfig::<MlpConfig>::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
