//! Variable: immutable host-resident array handle with scalar extraction

use super::{Shape, VariableId};
use crate::dtype::{DType, Element, dispatch_dtype};
use crate::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Array-like operand passed to operations
///
/// A `Variable` wraps a reference-counted byte buffer together with its
/// element type and shape. Cloning is cheap and shares the buffer. The
/// buffer is never mutated after construction, so a variable can be read
/// from any number of threads while an operation evaluates.
///
/// Elements are addressed by their linear (row-major) index.
#[derive(Clone)]
pub struct Variable {
    id: VariableId,
    data: Arc<[u8]>,
    dtype: DType,
    shape: Shape,
}

impl Variable {
    /// Create a variable from typed data with the given shape
    ///
    /// Fails with `ShapeMismatch` if `data.len()` differs from the number
    /// of elements the shape describes.
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let shape = Shape::from(shape);
        check_len(&shape, data.len())?;
        Ok(Self::from_parts(
            bytemuck::cast_slice::<T, u8>(data).into(),
            T::DTYPE,
            shape,
        ))
    }

    /// Create a zero-dimensional variable holding one value
    pub fn scalar<T: Element>(value: T) -> Self {
        Self::from_parts(
            bytemuck::bytes_of(&value).into(),
            T::DTYPE,
            Shape::scalar(),
        )
    }

    /// Create a boolean variable with the given shape
    pub fn from_bools(data: &[bool], shape: &[usize]) -> Result<Self> {
        let shape = Shape::from(shape);
        check_len(&shape, data.len())?;
        let bytes: Vec<u8> = data.iter().map(|&b| u8::from(b)).collect();
        Ok(Self::from_parts(bytes.into(), DType::Bool, shape))
    }

    /// Create a zero-dimensional boolean variable
    pub fn scalar_bool(value: bool) -> Self {
        Self::from_parts(Arc::from([u8::from(value)]), DType::Bool, Shape::scalar())
    }

    /// Create a variable from raw little-endian element bytes
    ///
    /// Use this when the element type is only known at runtime, e.g. for
    /// half-precision data in builds without the `f16` feature.
    pub fn from_bytes(bytes: &[u8], dtype: DType, shape: &[usize]) -> Result<Self> {
        let elem_size = dtype.size_in_bytes();
        if bytes.len() % elem_size != 0 {
            return Err(Error::InvalidArgument {
                arg: "bytes",
                reason: format!(
                    "{} bytes is not a multiple of the {dtype} element size {elem_size}",
                    bytes.len()
                ),
            });
        }
        let shape = Shape::from(shape);
        check_len(&shape, bytes.len() / elem_size)?;
        Ok(Self::from_parts(bytes.into(), dtype, shape))
    }

    fn from_parts(data: Arc<[u8]>, dtype: DType, shape: Shape) -> Self {
        Self {
            id: VariableId::new(),
            data,
            dtype,
            shape,
        }
    }

    /// Unique ID shared by all clones of this variable
    #[inline]
    pub fn id(&self) -> VariableId {
        self.id
    }

    /// Runtime element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    /// Dimensions
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.shape.numel()
    }

    /// True for zero-dimensional variables
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.shape.ndim() == 0
    }

    /// True if the variable holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// Extract the element at `index`, coerced to `T`
    ///
    /// When `T` matches the stored dtype the value is returned bit-exact.
    /// `f32` targets are converted directly from the stored type, so the
    /// value is rounded once. Other targets are widened to `f64` and
    /// narrowed with [`Element::from_f64`]. Boolean elements read as `0`
    /// or `1`.
    ///
    /// ```
    /// # use declops::tensor::Variable;
    /// let v = Variable::from_slice(&[1i32, 2, 3], &[3])?;
    /// assert_eq!(v.element::<f64>(2)?, 3.0);
    /// # Ok::<(), declops::error::Error>(())
    /// ```
    pub fn element<T: Element>(&self, index: usize) -> Result<T> {
        let bytes = self.element_bytes(index)?;
        if T::DTYPE == self.dtype {
            return Ok(bytemuck::pod_read_unaligned(bytes));
        }
        if T::DTYPE == DType::F32 {
            // f32 -> f64 -> f32 is exact
            return read_f32(bytes, self.dtype).map(|v| T::from_f64(f64::from(v)));
        }
        read_f64(bytes, self.dtype).map(T::from_f64)
    }

    /// Extract the element at `index` as a boolean (nonzero is true)
    pub fn element_bool(&self, index: usize) -> Result<bool> {
        let bytes = self.element_bytes(index)?;
        Ok(read_f64(bytes, self.dtype)? != 0.0)
    }

    /// Extract the single element of a one-element variable
    pub fn item<T: Element>(&self) -> Result<T> {
        if self.numel() != 1 {
            return Err(Error::InvalidArgument {
                arg: "variable",
                reason: format!("item() requires exactly one element, got {}", self.numel()),
            });
        }
        self.element(0)
    }

    fn element_bytes(&self, index: usize) -> Result<&[u8]> {
        let len = self.numel();
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        let size = self.dtype.size_in_bytes();
        let start = index * size;
        Ok(&self.data[start..start + size])
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("id", &self.id.raw())
            .field("dtype", &self.dtype)
            .field("shape", &self.shape)
            .finish()
    }
}

fn check_len(shape: &Shape, got: usize) -> Result<()> {
    let Some(expected) = shape.checked_numel() else {
        return Err(Error::InvalidArgument {
            arg: "shape",
            reason: format!("element count of shape {:?} overflows usize", shape.as_slice()),
        });
    };
    if expected != got {
        return Err(Error::shape_mismatch(shape, expected, got));
    }
    Ok(())
}

/// Widen one stored element to f64
fn read_f64(bytes: &[u8], dtype: DType) -> Result<f64> {
    if dtype == DType::Bool {
        return Ok(if bytes[0] != 0 { 1.0 } else { 0.0 });
    }
    dispatch_dtype!(dtype, T => {
        Ok(bytemuck::pod_read_unaligned::<T>(bytes).to_f64())
    }, "element")
}

/// Narrow one stored element to f32 in a single rounding step
fn read_f32(bytes: &[u8], dtype: DType) -> Result<f32> {
    if dtype == DType::Bool {
        return Ok(if bytes[0] != 0 { 1.0 } else { 0.0 });
    }
    dispatch_dtype!(dtype, T => {
        Ok(bytemuck::pod_read_unaligned::<T>(bytes).to_f32())
    }, "element")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_slice_shape_check() {
        let v = Variable::from_slice(&[1.0f32, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
        assert_eq!(v.dtype(), DType::F32);
        assert_eq!(v.shape(), &[2, 2]);
        assert_eq!(v.numel(), 4);
        assert!(!v.is_scalar());

        let err = Variable::from_slice(&[1.0f32, 2.0, 3.0], &[2, 2]).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 4,
                got: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_scalar_element() {
        let v = Variable::scalar(3.5f64);
        assert!(v.is_scalar());
        assert_eq!(v.numel(), 1);
        assert_eq!(v.element::<f64>(0).unwrap(), 3.5);
        assert_eq!(v.element::<f32>(0).unwrap(), 3.5);
        assert_eq!(v.element::<i32>(0).unwrap(), 3);
        assert_eq!(v.item::<f64>().unwrap(), 3.5);
    }

    #[test]
    fn test_element_same_dtype_is_exact() {
        let big = i64::MAX - 1;
        let v = Variable::scalar(big);
        assert_eq!(v.element::<i64>(0).unwrap(), big);
    }

    #[test]
    fn test_element_f32_rounds_once() {
        let v = Variable::scalar((1i64 << 60) + (1i64 << 36) + 1);
        let expected = ((1i64 << 60) + (1i64 << 37)) as f32;
        assert_eq!(v.element::<f32>(0).unwrap(), expected);

        let u = Variable::scalar((1u64 << 60) + (1u64 << 36) + 1);
        assert_eq!(u.element::<f32>(0).unwrap(), expected);

        let b = Variable::scalar_bool(true);
        assert_eq!(b.element::<f32>(0).unwrap(), 1.0);
    }

    #[test]
    fn test_shape_overflow_rejected() {
        let err = Variable::from_slice::<f32>(&[], &[1usize << 63, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "shape", .. }));

        let err = Variable::from_bools(&[], &[usize::MAX, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "shape", .. }));

        let empty = Variable::from_bools(&[], &[usize::MAX, 2, 0]).unwrap();
        assert!(empty.is_empty());

        let err = Variable::from_bytes(&[], DType::U8, &[usize::MAX, usize::MAX]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "shape", .. }));
    }

    #[test]
    fn test_element_out_of_bounds() {
        let v = Variable::from_slice(&[1u8, 2], &[2]).unwrap();
        assert_eq!(
            v.element::<u8>(2).unwrap_err(),
            Error::IndexOutOfBounds { index: 2, len: 2 }
        );

        let empty = Variable::from_slice::<f32>(&[], &[0]).unwrap();
        assert!(empty.is_empty());
        assert!(matches!(
            empty.element::<f32>(0),
            Err(Error::IndexOutOfBounds { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_bool_variable() {
        let v = Variable::from_bools(&[true, false], &[2]).unwrap();
        assert_eq!(v.dtype(), DType::Bool);
        assert!(v.element_bool(0).unwrap());
        assert!(!v.element_bool(1).unwrap());
        assert_eq!(v.element::<f64>(0).unwrap(), 1.0);
        assert_eq!(v.element::<u8>(1).unwrap(), 0);

        let s = Variable::scalar_bool(true);
        assert!(s.is_scalar());
        assert!(s.element_bool(0).unwrap());
    }

    #[test]
    fn test_from_bytes() {
        let bytes = 2.5f32.to_le_bytes();
        let v = Variable::from_bytes(&bytes, DType::F32, &[]).unwrap();
        assert_eq!(v.element::<f64>(0).unwrap(), 2.5);

        // Non-canonical bool bytes still read as true
        let b = Variable::from_bytes(&[7], DType::Bool, &[1]).unwrap();
        assert!(b.element_bool(0).unwrap());
        assert_eq!(b.element::<f32>(0).unwrap(), 1.0);

        let err = Variable::from_bytes(&[0u8; 3], DType::F32, &[1]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { arg: "bytes", .. }));
    }

    #[cfg(not(feature = "f16"))]
    #[test]
    fn test_half_without_feature() {
        let v = Variable::from_bytes(&[0u8, 0x3c], DType::F16, &[]).unwrap();
        assert_eq!(
            v.element::<f32>(0).unwrap_err(),
            Error::UnsupportedDType {
                dtype: DType::F16,
                op: "element"
            }
        );
    }

    #[cfg(feature = "f16")]
    #[test]
    fn test_half_element() {
        let v = Variable::scalar(half::f16::from_f32(1.5));
        assert_eq!(v.dtype(), DType::F16);
        assert_eq!(v.element::<f32>(0).unwrap(), 1.5);
    }

    #[test]
    fn test_item_requires_one_element() {
        let v = Variable::from_slice(&[1.0f64, 2.0], &[2]).unwrap();
        assert!(matches!(
            v.item::<f64>(),
            Err(Error::InvalidArgument { arg: "variable", .. })
        ));
    }

    #[test]
    fn test_clone_shares_id() {
        let v = Variable::scalar(1i32);
        let c = v.clone();
        assert_eq!(v.id(), c.id());
        assert_ne!(v.id(), Variable::scalar(1i32).id());
    }
}
