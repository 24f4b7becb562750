use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use simple_pg::{
    candle_agent::{
        mlp::{Mlp, MlpConfig},
        pg::{SimplePg, SimplePgConfig},
    },
    core::{record::NullRecorder, Env as _, Trainer, TrainerConfig},
    py_gym_env::{ArrayObsFilter, DiscreteActFilter, GymEnv, GymEnvConfig},
};
use std::{
    convert::TryFrom,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

mod obs_act_types {
    use super::*;
    use ndarray::ArrayD;

    #[derive(Clone, Debug)]
    pub struct Obs(ArrayD<f32>);

    impl simple_pg::core::Obs for Obs {
        fn len(&self) -> usize {
            self.0.len()
        }
    }

    impl From<ArrayD<f32>> for Obs {
        fn from(obs: ArrayD<f32>) -> Self {
            Obs(obs)
        }
    }

    impl From<Obs> for Vec<f32> {
        fn from(obs: Obs) -> Self {
            obs.0.iter().copied().collect()
        }
    }

    #[derive(Clone, Debug)]
    pub struct Act(usize);

    impl simple_pg::core::Act for Act {
        fn index(&self) -> usize {
            self.0
        }
    }

    impl From<usize> for Act {
        fn from(ix: usize) -> Self {
            Act(ix)
        }
    }

    pub type ObsFilter = ArrayObsFilter<Obs>;
    pub type ActFilter = DiscreteActFilter<Act>;
    pub type EnvConfig = GymEnvConfig<Obs, Act, ObsFilter, ActFilter>;
    pub type Env = GymEnv<Obs, Act, ObsFilter, ActFilter>;
    pub type Agent = SimplePg<Env, Mlp>;
}

use obs_act_types::*;

mod config {
    use super::*;

    /// Configuration of a training run.
    ///
    /// The policy network is built from `hidden_sizes` and the spaces of the environment.
    #[derive(Serialize, Deserialize, Clone)]
    pub struct SimplePgRunConfig {
        pub env_config: EnvConfig,
        pub hidden_sizes: Vec<usize>,
        pub agent_config: SimplePgConfig<MlpConfig>,
        pub trainer_config: TrainerConfig,
    }

    impl Default for SimplePgRunConfig {
        fn default() -> Self {
            Self {
                env_config: EnvConfig::default(),
                hidden_sizes: vec![32],
                agent_config: SimplePgConfig::default().learning_rate(1e-2),
                trainer_config: TrainerConfig::default(),
            }
        }
    }

    impl SimplePgRunConfig {
        /// Applies command line arguments given explicitly.
        pub fn apply_args(mut self, args: &Args) -> Self {
            if let Some(name) = &args.env_name {
                self.env_config = self.env_config.name(name.as_str());
            }
            if args.render {
                self.env_config = self.env_config.render_mode(Some("human".to_string()));
                self.trainer_config = self.trainer_config.render(true);
            }
            if let Some(lr) = args.lr {
                self.agent_config = self.agent_config.learning_rate(lr);
            }
            if let Some(epochs) = args.epochs {
                self.trainer_config = self.trainer_config.epochs(epochs);
            }
            if let Some(batch_size) = args.batch_size {
                self.trainer_config = self.trainer_config.batch_size(batch_size);
            }
            if let Some(hidden_sizes) = &args.hidden_sizes {
                self.hidden_sizes = hidden_sizes.clone();
            }
            if let Some(seed) = args.seed {
                self.agent_config = self.agent_config.seed(seed);
            }
            self
        }

        /// Constructs [`SimplePgRunConfig`] from YAML file.
        pub fn load(path: impl AsRef<Path>) -> Result<Self> {
            let file = File::open(path)?;
            let rdr = BufReader::new(file);
            let b = serde_yaml::from_reader(rdr)?;
            Ok(b)
        }

        /// Saves [`SimplePgRunConfig`] as YAML file.
        pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
            let mut file = File::create(path)?;
            file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
            Ok(())
        }
    }
}

use config::SimplePgRunConfig;

/// Train a categorical policy with the simplest formulation of policy gradient
#[derive(Parser, Debug, Default)]
#[command(version, about)]
struct Args {
    /// Name of the Gymnasium environment [default: CartPole-v1]
    #[arg(long = "env_name", visible_alias = "env")]
    env_name: Option<String>,

    /// Render the first episode of each epoch
    #[arg(long, default_value_t = false)]
    render: bool,

    /// Learning rate [default: 0.01]
    #[arg(long)]
    lr: Option<f64>,

    /// The number of epochs [default: 50]
    #[arg(long)]
    epochs: Option<usize>,

    /// Minimum number of steps in a batch [default: 5000]
    #[arg(long)]
    batch_size: Option<usize>,

    /// Units of hidden layers, comma separated [default: 32]
    #[arg(long, value_delimiter = ',')]
    hidden_sizes: Option<Vec<usize>>,

    /// Random seed of the environment and the policy [default: 42]
    #[arg(long)]
    seed: Option<u64>,

    /// YAML file of the run configuration, overridden by the other arguments
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Seed given to the first `reset()` of the environment.
fn env_seed(config: &SimplePgRunConfig) -> Result<i64> {
    let seed = config.agent_config.get_seed();
    i64::try_from(seed).with_context(|| format!("seed {} does not fit in i64", seed))
}

fn train(config: SimplePgRunConfig) -> Result<()> {
    let env = Env::build(&config.env_config, env_seed(&config)?)?;
    let policy_config = MlpConfig::new(env.obs_dim(), config.hidden_sizes, env.n_actions(), false);
    let mut agent = Agent::build(config.agent_config.policy_config(policy_config))?;
    let mut trainer = Trainer::build(config.trainer_config);
    let mut recorder = NullRecorder::new();

    trainer.train(env, &mut agent, &mut recorder)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => SimplePgRunConfig::load(path)?,
        None => SimplePgRunConfig::default(),
    }
    .apply_args(&args);

    println!("Using simplest formulation of policy gradient.");
    train(config)
}
