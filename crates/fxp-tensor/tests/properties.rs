use fxp_tensor::{FixedTensor, Shape, TensorAdapter};
use proptest::prelude::*;

fn vector<T>(data: Vec<T>) -> FixedTensor<T>
where
    T: fxp_tensor::RingElement,
{
    let len = data.len();
    FixedTensor::new(data, Shape::new(vec![len]), 0).unwrap()
}

fn pairwise_same_length() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    (0usize..64).prop_flat_map(|len| {
        (
            proptest::collection::vec(any::<i64>(), len),
            proptest::collection::vec(any::<i64>(), len),
        )
    })
}

proptest! {
    #[test]
    fn add_then_sub_restores_lhs((a, b) in pairwise_same_length()) {
        let a = vector(a);
        let b = vector(b);
        let mut sum = FixedTensor::zeros(a.shape().clone());
        let mut back = FixedTensor::zeros(a.shape().clone());
        a.add(&b, &mut sum).unwrap();
        sum.sub(&b, &mut back).unwrap();
        prop_assert_eq!(back.data(), a.data());
    }

    #[test]
    fn negative_is_additive_inverse(a in proptest::collection::vec(any::<u32>(), 0..64)) {
        let a = vector(a);
        let mut neg = FixedTensor::zeros(a.shape().clone());
        let mut sum = FixedTensor::zeros(a.shape().clone());
        a.negative(&mut neg).unwrap();
        a.add(&neg, &mut sum).unwrap();
        prop_assert!(sum.data().iter().all(|&v| v == 0));
    }

    #[test]
    fn logical_rshift_edges(x in any::<i64>()) {
        let t = vector(vec![x]);
        let mut dst = FixedTensor::zeros(t.shape().clone());
        t.logical_rshift(0, &mut dst).unwrap();
        prop_assert_eq!(dst.data(), &[x]);
        t.logical_rshift(64, &mut dst).unwrap();
        prop_assert_eq!(dst.data(), &[0]);
    }

    #[test]
    fn logical_rshift_matches_unsigned_shift(x in any::<i32>(), amount in 0u32..32) {
        let t = vector(vec![x]);
        let mut dst = FixedTensor::zeros(t.shape().clone());
        t.logical_rshift(amount, &mut dst).unwrap();
        prop_assert_eq!(dst.data(), &[((x as u32) >> amount) as i32]);
    }

    #[test]
    fn rshift_matches_native_shift(x in any::<i64>(), amount in 0u32..64) {
        let t = vector(vec![x]);
        let mut dst = FixedTensor::zeros(t.shape().clone());
        t.rshift(amount, &mut dst).unwrap();
        prop_assert_eq!(dst.data(), &[x >> amount]);
    }

    #[test]
    fn xor_twice_is_identity((a, b) in pairwise_same_length()) {
        let mut x = vector(a.clone());
        let b = vector(b);
        x.binary_assign(&b, fxp_tensor::BinaryOp::Xor).unwrap();
        x.binary_assign(&b, fxp_tensor::BinaryOp::Xor).unwrap();
        prop_assert_eq!(x.data(), a.as_slice());
    }
}
