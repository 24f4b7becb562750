//! Conversion of Python objects.
use anyhow::Result;
use ndarray::ArrayD;
use numpy::PyArrayDyn;
use pyo3::{types::IntoPyDict, PyObject};

/// Converts an array-like Python object into [`ArrayD<f32>`].
///
/// The object is passed to `numpy.asarray(obs, dtype=numpy.float32)` first,
/// so observations of any numeric dtype (e.g., `uint8`, `float64`) are accepted.
pub fn pyobj_to_arrayd(obs: PyObject) -> Result<ArrayD<f32>> {
    pyo3::Python::with_gil(|py| {
        let numpy = py.import("numpy")?;
        let kwargs = [("dtype", numpy.getattr("float32")?)].into_py_dict(py);
        let obs = numpy.getattr("asarray")?.call((obs,), Some(kwargs))?;
        let obs: &PyArrayDyn<f32> = obs.extract()?;
        Ok(obs.to_owned_array())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyo3::ToPyObject;

    fn eval(code: &str) -> PyObject {
        pyo3::Python::with_gil(|py| py.eval(code, None, None).unwrap().to_object(py))
    }

    #[test]
    #[ignore = "requires Python with numpy"]
    fn test_non_float32_arrays_are_cast() -> Result<()> {
        let obs = eval("__import__('numpy').arange(4, dtype='uint8')");
        assert_eq!(pyobj_to_arrayd(obs)?.into_raw_vec(), vec![0.0, 1.0, 2.0, 3.0]);

        let obs = eval("__import__('numpy').array([[0.5, -1.5]], dtype='float64')");
        let obs = pyobj_to_arrayd(obs)?;
        assert_eq!(obs.shape(), &[1, 2]);
        assert_eq!(obs.into_raw_vec(), vec![0.5, -1.5]);
        Ok(())
    }

    #[test]
    #[ignore = "requires Python with numpy"]
    fn test_python_list_is_accepted() -> Result<()> {
        let obs = eval("[1, 2, 3]");
        assert_eq!(pyobj_to_arrayd(obs)?.into_raw_vec(), vec![1.0, 2.0, 3.0]);
        Ok(())
    }
}
