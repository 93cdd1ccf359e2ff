use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, Data, Dimension, Zip};

use crate::error::{Result, ScreenError};

// Adds two unit axes at the end of an array, leaving the last two axes free for frequency and time.
pub trait Expand2 {
    type Elem;
    fn expand2(&self) -> ArrayD<Self::Elem>;
}

impl<A: Clone, S: Data<Elem = A>, D: Dimension> Expand2 for ArrayBase<S, D> {
    type Elem = A;

    fn expand2(&self) -> ArrayD<A> {
        let arr = self.to_owned().into_dyn();
        let ndim = arr.ndim();
        arr.insert_axis(Axis(ndim)).insert_axis(Axis(ndim + 1))
    }
}

/// Adds two unity axes to all arrays, returned in the order given.
pub fn expand2<A: Clone>(arrays: &[ArrayViewD<A>]) -> Vec<ArrayD<A>> {
    arrays.iter().map(|arr| arr.expand2()).collect()
}

/// The shape all of `shapes` broadcast to, using the usual right-aligned rules:
/// lengths must either match or be 1.
pub fn broadcast_shape(shapes: &[&[usize]]) -> Result<Vec<usize>> {
    let ndim = shapes.iter().map(|s| s.len()).max().unwrap_or(0);
    let mut out = vec![1; ndim];

    for shape in shapes {
        let offset = ndim - shape.len();
        for (k, &len) in shape.iter().enumerate() {
            let cur = out[offset + k];
            if cur == 1 {
                out[offset + k] = len;
            } else if len != 1 && len != cur {
                return Err(ScreenError::Broadcast {
                    lhs: out,
                    rhs: shape.to_vec(),
                });
            }
        }
    }

    Ok(out)
}

pub fn broadcast_view<'a, A, S, D>(
    arr: &'a ArrayBase<S, D>,
    shape: &[usize],
) -> Result<ArrayViewD<'a, A>>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    arr.broadcast(shape.to_vec())
        .ok_or_else(|| ScreenError::Broadcast {
            lhs: arr.shape().to_vec(),
            rhs: shape.to_vec(),
        })
}

// Elementwise ternary map after broadcasting all three operands against each other.
pub fn zip_broadcast3<A, B, C, O, F>(
    a: ArrayViewD<A>,
    b: ArrayViewD<B>,
    c: ArrayViewD<C>,
    mut f: F,
) -> Result<ArrayD<O>>
where
    F: FnMut(&A, &B, &C) -> O,
{
    let shape = broadcast_shape(&[a.shape(), b.shape(), c.shape()])?;
    let a = broadcast_view(&a, &shape)?;
    let b = broadcast_view(&b, &shape)?;
    let c = broadcast_view(&c, &shape)?;

    Ok(Zip::from(&a)
        .and(&b)
        .and(&c)
        .map_collect(|a, b, c| f(a, b, c)))
}

#[cfg(test)]
mod test {
    use ndarray::{arr0, array, Array1, ArrayD, IxDyn};

    use crate::error::ScreenError;

    use super::{broadcast_shape, expand2, zip_broadcast3, Expand2};

    #[test]
    fn expand2_appends_unit_axes() {
        let a = array![[1., 2., 3.], [4., 5., 6.]];
        let expanded = a.expand2();

        assert_eq!(expanded.shape(), &[2, 3, 1, 1]);
        assert_eq!(
            expanded.iter().copied().collect::<Vec<_>>(),
            vec![1., 2., 3., 4., 5., 6.]
        );

        assert_eq!(arr0(7).expand2().shape(), &[1, 1]);
    }

    #[test]
    fn expand2_keeps_order() {
        let a = Array1::from(vec![1, 2, 3]).into_dyn();
        let b = ArrayD::from_elem(IxDyn(&[2, 2]), 9);
        let out = expand2(&[a.view(), b.view()]);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].shape(), &[3, 1, 1]);
        assert_eq!(out[1].shape(), &[2, 2, 1, 1]);
    }

    #[test]
    fn broadcast_shapes() {
        assert_eq!(
            broadcast_shape(&[&[5, 1, 1], &[3, 1], &[4]]).unwrap(),
            vec![5, 3, 4]
        );
        assert_eq!(broadcast_shape(&[&[], &[2]]).unwrap(), vec![2]);
        assert_eq!(broadcast_shape(&[]).unwrap(), Vec::<usize>::new());

        match broadcast_shape(&[&[3, 1, 1], &[4, 1, 1]]) {
            Err(ScreenError::Broadcast { lhs, rhs }) => {
                assert_eq!(lhs, vec![3, 1, 1]);
                assert_eq!(rhs, vec![4, 1, 1]);
            }
            other => panic!("expected broadcast error, got {:?}", other),
        }
    }

    #[test]
    fn zip_broadcasts_operands() {
        let a = array![1., 2.].into_dyn();
        let b = array![[10.], [20.], [30.]].into_dyn();
        let c = arr0(100.).into_dyn();

        let out = zip_broadcast3(a.view(), b.view(), c.view(), |a, b, c| a + b + c).unwrap();

        assert_eq!(out.shape(), &[3, 2]);
        assert_eq!(out[[0, 0]], 111.);
        assert_eq!(out[[2, 1]], 132.);
    }
}
