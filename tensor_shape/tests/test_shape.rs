use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use tensor_shape::{inspect, CanonicalTensor, SeriesInput, ShapeError, ShapeProfile};

#[rstest]
#[case(json!([1.0, 2.0, 3.0]), vec![3])]
#[case(json!([[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]]), vec![3, 2])]
#[case(json!([[[1.0], [2.0]]]), vec![1, 2, 1])]
#[case(json!([]), vec![0])]
#[case(json!("not an array"), vec![])]
fn test_inspect_profiles(#[case] value: serde_json::Value, #[case] expected: Vec<usize>) {
    assert_eq!(inspect(&value), ShapeProfile::new(expected));
}

#[test]
fn test_inspect_only_follows_first_element() {
    // Siblings are not measured; ragged input is caught by request validation
    let profile = inspect(&json!([[1.0, 2.0, 3.0], [4.0]]));
    assert_eq!(profile.dims(), &[2, 3]);
}

#[test]
fn test_series_input_shapes() {
    let rank1 = SeriesInput::from_values(vec![1.0, 2.0]).unwrap();
    assert_eq!(rank1.rank(), 1);
    assert_eq!(rank1.shape().dims(), &[2]);

    let rank2 = SeriesInput::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    assert_eq!(rank2.rank(), 2);
    assert_eq!(rank2.shape().dims(), &[2, 3]);

    let rank3 = SeriesInput::from_matrices(vec![vec![vec![1.0], vec![2.0]]]).unwrap();
    assert_eq!(rank3.rank(), 3);
    assert_eq!(rank3.shape().dims(), &[1, 2, 1]);
}

#[test]
fn test_rank3_matrices_must_share_shape() {
    let err = SeriesInput::from_matrices(vec![
        vec![vec![1.0, 2.0]],
        vec![vec![3.0, 4.0], vec![5.0, 6.0]],
    ])
    .unwrap_err();

    assert!(matches!(err, ShapeError::Ragged(_)));
}

#[test]
fn test_empty_inputs_rejected() {
    assert!(matches!(
        SeriesInput::from_values(vec![]),
        Err(ShapeError::EmptyInput(_))
    ));
    assert!(matches!(
        SeriesInput::from_rows(vec![vec![]]),
        Err(ShapeError::EmptyInput(_))
    ));
    assert!(matches!(
        CanonicalTensor::new(vec![]),
        Err(ShapeError::EmptyInput(_))
    ));
}

#[test]
fn test_tensor_accessors() {
    let tensor = CanonicalTensor::from_multivariate(&[vec![1.0, 10.0], vec![2.0, 20.0]]).unwrap();

    assert_eq!(tensor.batch_size(), 1);
    assert_eq!(tensor.sequence_len(), 2);
    assert_eq!(tensor.num_features(), 2);
    assert_eq!(tensor.flatten(), vec![1.0, 10.0, 2.0, 20.0]);
}

#[test]
fn test_tensor_serde_is_plain_nested_array() {
    let tensor = CanonicalTensor::from_univariate(&[1.5, 2.5]).unwrap();
    let encoded = serde_json::to_value(&tensor).unwrap();
    assert_eq!(encoded, json!([[[1.5], [2.5]]]));

    let decoded: CanonicalTensor = serde_json::from_value(encoded).unwrap();
    assert_eq!(decoded, tensor);
}

#[test]
fn test_tensor_deserialize_rejects_ragged() {
    let result: Result<CanonicalTensor, _> = serde_json::from_value(json!([[[1.0], [2.0, 3.0]]]));
    assert!(result.is_err());
}
