use anyhow::Result;
use ndarray::ArrayD;
use simple_pg_core::{error::PgError, Act, Env, Obs};
use simple_pg_py_gym_env::{
    ArrayObsFilter, ArrayObsFilterConfig, DiscreteActFilter, GymEnv, GymEnvConfig,
};
use tempdir::TempDir;

/// Registers CartPole variants whose `Box` observations are `float64` and `uint8`.
fn register_cast_cartpoles() -> Result<()> {
    pyo3::Python::with_gil(|py| -> Result<()> {
        py.run(
            r#"
import gymnasium, numpy

class CastObservation(gymnasium.ObservationWrapper):
    def __init__(self, env, dtype):
        super().__init__(env)
        space = env.observation_space
        self.dtype = dtype
        self.observation_space = gymnasium.spaces.Box(0, 255, space.shape, dtype)

    def observation(self, obs):
        return numpy.clip(numpy.abs(obs) * 50, 0, 255).astype(self.dtype)

for name, dtype in [('Float64', numpy.float64), ('Uint8', numpy.uint8)]:
    env_id = f'CartPole{name}-v0'
    if env_id not in gymnasium.registry:
        gymnasium.register(
            id=env_id,
            entry_point=lambda dtype=dtype, **kwargs: CastObservation(
                gymnasium.make('CartPole-v1', **kwargs), dtype
            ),
        )
"#,
            None,
            None,
        )?;
        Ok(())
    })
}

#[derive(Clone, Debug)]
struct TestObs(ArrayD<f32>);

impl Obs for TestObs {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<ArrayD<f32>> for TestObs {
    fn from(obs: ArrayD<f32>) -> Self {
        Self(obs)
    }
}

#[derive(Clone, Debug)]
struct TestAct(usize);

impl Act for TestAct {
    fn index(&self) -> usize {
        self.0
    }
}

type ObsFilter = ArrayObsFilter<TestObs>;
type ActFilter = DiscreteActFilter<TestAct>;
type TestEnv = GymEnv<TestObs, TestAct, ObsFilter, ActFilter>;
type TestEnvConfig = GymEnvConfig<TestObs, TestAct, ObsFilter, ActFilter>;

#[test]
fn test_serde_gym_env_config() -> Result<()> {
    let config = TestEnvConfig::default()
        .name("Acrobot-v1")
        .max_steps(Some(100))
        .obs_filter_config(ArrayObsFilterConfig { record_obs: true });

    let dir = TempDir::new("gym_env_config")?;
    let path = dir.path().join("gym_env_config.yaml");
    config.save(&path)?;
    let config_ = TestEnvConfig::load(&path)?;
    assert_eq!(config_.name, "Acrobot-v1");
    assert_eq!(config_.max_steps, Some(100));
    assert_eq!(
        config_.obs_filter_config,
        Some(ArrayObsFilterConfig { record_obs: true })
    );
    Ok(())
}

#[test]
#[ignore = "requires Python with gymnasium"]
fn test_cartpole_episode() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut env = TestEnv::build(&TestEnvConfig::default(), 0)?;
    assert_eq!(env.obs_dim(), 4);
    assert_eq!(env.n_actions(), 2);

    let obs = env.reset()?;
    assert_eq!(obs.len(), 4);

    let mut n_steps = 0;
    loop {
        let (step, record) = env.step(&TestAct(n_steps % 2))?;
        assert_eq!(record.get_scalar("act")?, (n_steps % 2) as f32);
        assert_eq!(step.reward, 1.0);
        n_steps += 1;
        if step.is_done() {
            break;
        }
    }
    assert!(n_steps <= 500);
    Ok(())
}

#[test]
#[ignore = "requires Python with gymnasium"]
fn test_max_steps_truncates() -> Result<()> {
    let config = TestEnvConfig::default().max_steps(Some(3));
    let mut env = TestEnv::build(&config, 0)?;
    let _ = env.reset()?;
    let (step, _) = env.step(&TestAct(0))?;
    assert!(!step.is_truncated);
    let (step, _) = env.step(&TestAct(1))?;
    assert!(!step.is_truncated);
    let (step, _) = env.step(&TestAct(0))?;
    assert!(step.is_truncated);
    Ok(())
}

#[test]
#[ignore = "requires Python with gymnasium"]
fn test_continuous_action_space_is_rejected() {
    let config = TestEnvConfig::default().name("Pendulum-v1");
    let err = TestEnv::build(&config, 0).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<PgError>(),
        Some(PgError::UnsupportedActionSpace(_))
    ));
}

#[test]
#[ignore = "requires Python with gymnasium"]
fn test_discrete_observation_space_is_rejected() {
    let config = TestEnvConfig::default().name("FrozenLake-v1");
    let err = TestEnv::build(&config, 0).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<PgError>(),
        Some(PgError::UnsupportedObservationSpace(_))
    ));
}

#[test]
#[ignore = "requires Python with gymnasium"]
fn test_non_float32_box_observations() -> Result<()> {
    register_cast_cartpoles()?;
    for name in ["CartPoleFloat64-v0", "CartPoleUint8-v0"] {
        let config = TestEnvConfig::default().name(name);
        let mut env = TestEnv::build(&config, 0)?;
        assert_eq!(env.obs_dim(), 4);

        let obs = env.reset()?;
        assert_eq!(obs.len(), 4);
        let (step, _) = env.step(&TestAct(0))?;
        assert_eq!(step.obs.len(), 4);
    }
    Ok(())
}
