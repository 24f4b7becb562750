use super::{mlp_forward, MlpConfig};
use crate::model::SubModel1;
use anyhow::Result;
use candle_core::{Device, Tensor};
use candle_nn::{linear, Linear, VarBuilder};

/// Returns vector of linear modules from [`MlpConfig`].
fn create_linear_layers(prefix: &str, vs: VarBuilder, config: &MlpConfig) -> Result<Vec<Linear>> {
    let vs = vs.pp(prefix);

    let layers = config
        .in_out_pairs()
        .iter()
        .enumerate()
        .map(|(i, &(in_dim, out_dim))| linear(in_dim, out_dim, vs.pp(format!("ln{}", i))))
        .collect::<candle_core::Result<Vec<_>>>()?;

    Ok(layers)
}

/// Multilayer perceptron with tanh activation function.
///
/// The output layer has no activation unless `activation_out` is set in [`MlpConfig`].
pub struct Mlp {
    config: MlpConfig,
    device: Device,
    layers: Vec<Linear>,
}

impl Mlp {
    /// The number of linear layers.
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }
}

impl SubModel1 for Mlp {
    type Config = MlpConfig;
    type Input = Tensor;
    type Output = Tensor;

    fn forward(&self, xs: &Self::Input) -> Result<Tensor> {
        let xs = xs.to_device(&self.device)?;
        let xs = mlp_forward(xs, &self.layers)?;

        match self.config.activation_out {
            false => Ok(xs),
            true => Ok(xs.tanh()?),
        }
    }

    fn build(vs: VarBuilder, config: Self::Config) -> Result<Self> {
        let device = vs.device().clone();
        let layers = create_linear_layers("mlp", vs, &config)?;

        Ok(Mlp {
            config,
            device,
            layers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::DType;
    use candle_nn::VarMap;

    fn build(config: MlpConfig) -> Result<(VarMap, Mlp)> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let mlp = Mlp::build(vb, config)?;
        Ok((varmap, mlp))
    }

    #[test]
    fn test_layers_from_sizes() -> Result<()> {
        let config = MlpConfig::new(4, vec![32, 16], 2, false);
        assert_eq!(config.in_out_pairs(), vec![(4, 32), (32, 16), (16, 2)]);

        let (varmap, mlp) = build(config)?;
        assert_eq!(mlp.n_layers(), 3);
        // weight and bias of each layer
        assert_eq!(varmap.all_vars().len(), 6);

        let xs = Tensor::zeros((5, 4), DType::F32, &Device::Cpu)?;
        assert_eq!(mlp.forward(&xs)?.dims(), &[5, 2]);
        Ok(())
    }

    #[test]
    fn test_no_hidden_layer() -> Result<()> {
        let config = MlpConfig::new(3, vec![], 2, false);
        assert_eq!(config.in_out_pairs(), vec![(3, 2)]);

        let (_varmap, mlp) = build(config)?;
        let xs = Tensor::ones((1, 3), DType::F32, &Device::Cpu)?;
        assert_eq!(mlp.forward(&xs)?.dims(), &[1, 2]);
        Ok(())
    }

    #[test]
    fn test_activation_out_bounds_output() -> Result<()> {
        let (_varmap, mlp) = build(MlpConfig::new(2, vec![8], 3, true))?;
        let xs = Tensor::new(&[[100f32, -100.0]], &Device::Cpu)?;
        let ys = mlp.forward(&xs)?.flatten_all()?.to_vec1::<f32>()?;
        assert!(ys.iter().all(|y| y.abs() <= 1.0));
        Ok(())
    }
}
