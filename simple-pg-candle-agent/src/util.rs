//! Utilities.
use anyhow::Result;
use candle_nn::VarMap;

/// Interface for handling output dimensions.
pub trait OutDim {
    /// Returns the output dimension.
    fn get_out_dim(&self) -> usize;

    /// Sets the  output dimension.
    fn set_out_dim(&mut self, v: usize);
}

/// Returns all parameters in the [`VarMap`] as a flat vector.
///
/// Variables are concatenated in the order of their names.
pub fn flat_params(varmap: &VarMap) -> Result<Vec<f32>> {
    let data = varmap
        .data()
        .lock()
        .map_err(|e| anyhow::anyhow!("Failed to lock varmap: {}", e))?;
    let mut names = data.keys().collect::<Vec<_>>();
    names.sort();

    let mut params = vec![];
    for name in names {
        let v = data[name].as_tensor().flatten_all()?.to_vec1::<f32>()?;
        params.extend(v);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::{DType, Device};
    use candle_nn::{Init, VarBuilder};

    #[test]
    fn test_flat_params_ordered_by_name() -> Result<()> {
        let varmap = VarMap::new();
        let _ = varmap.get((2,), "b", Init::Const(2.0), DType::F32, &Device::Cpu)?;
        let _ = varmap.get((1,), "a", Init::Const(1.0), DType::F32, &Device::Cpu)?;
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
        let _ = vb.get_with_hints((1,), "c", Init::Const(3.0))?;

        assert_eq!(flat_params(&varmap)?, vec![1.0, 2.0, 2.0, 3.0]);
        Ok(())
    }
}
