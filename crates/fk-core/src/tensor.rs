use crate::Error;
use crate::shape::Shape;

#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<S> {
    shape: S,
    data: Vec<f32>,
}

impl<S: Shape> Tensor<S> {
    pub fn from_vec(shape: S, data: Vec<f32>) -> Result<Self, Error> {
        check_len::<S>(&shape, data.len())?;
        Ok(Self { shape, data })
    }

    pub fn zeros(shape: S) -> Result<Self, Error> {
        let len = shape.checked_len()?;
        Ok(Self {
            shape,
            data: vec![0.0; len],
        })
    }

    pub fn shape(&self) -> S {
        self.shape
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Reinterprets the buffer under another shape with the same element count.
    pub fn reshape<T: Shape>(self, shape: T) -> Result<Tensor<T>, Error> {
        check_len::<T>(&shape, self.data.len())?;
        Ok(Tensor {
            shape,
            data: self.data,
        })
    }

    pub fn as_view(&self) -> TensorView<'_, S> {
        TensorView {
            shape: self.shape,
            data: &self.data,
        }
    }

    pub fn as_view_mut(&mut self) -> TensorViewMut<'_, S> {
        TensorViewMut {
            shape: self.shape,
            data: &mut self.data,
        }
    }
}

/// Read-only view over a caller-owned buffer.
#[derive(Debug, Clone, Copy)]
pub struct TensorView<'a, S> {
    shape: S,
    data: &'a [f32],
}

impl<'a, S: Shape> TensorView<'a, S> {
    pub fn from_slice(shape: S, data: &'a [f32]) -> Result<Self, Error> {
        check_len::<S>(&shape, data.len())?;
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> S {
        self.shape
    }

    pub fn as_slice(&self) -> &'a [f32] {
        self.data
    }

    pub fn reshape<T: Shape>(&self, shape: T) -> Result<TensorView<'a, T>, Error> {
        TensorView::from_slice(shape, self.data)
    }

    pub fn to_tensor(&self) -> Tensor<S> {
        Tensor {
            shape: self.shape,
            data: self.data.to_vec(),
        }
    }
}

/// Write-only view over a caller-owned output buffer.
#[derive(Debug)]
pub struct TensorViewMut<'a, S> {
    shape: S,
    data: &'a mut [f32],
}

impl<'a, S: Shape> TensorViewMut<'a, S> {
    pub fn from_slice_mut(shape: S, data: &'a mut [f32]) -> Result<Self, Error> {
        check_len::<S>(&shape, data.len())?;
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> S {
        self.shape
    }

    pub fn as_slice(&self) -> &[f32] {
        self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut *self.data
    }

    pub fn as_view(&self) -> TensorView<'_, S> {
        TensorView {
            shape: self.shape,
            data: self.data,
        }
    }

    pub fn reshape<T: Shape>(self, shape: T) -> Result<TensorViewMut<'a, T>, Error> {
        TensorViewMut::from_slice_mut(shape, self.data)
    }
}

fn check_len<S: Shape>(shape: &S, actual: usize) -> Result<(), Error> {
    let expected = shape.checked_len()?;
    if actual != expected {
        return Err(Error::SizeMismatch {
            what: S::NAME,
            expected,
            actual,
        });
    }
    Ok(())
}
