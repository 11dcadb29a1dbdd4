//! Integration tests for the rmnb library
//!
//! These tests verify end-to-end functionality across multiple modules
//! and validate real-world usage scenarios.

use approx::assert_relative_eq;
use rmnb::api::{evaluate_detailed, quick, NaiveBayes};
use rmnb::persistence::{SerializableModel, TrainingParams};
use rmnb::{predict, train, Classifier, LibSVMDataset, NBError, Sample, SparseVector};
use std::io::Write;
use tempfile::NamedTempFile;

/// Small bag-of-words corpus: 1 = sports, 2 = cooking, 3 = weather
fn corpus() -> Vec<Sample> {
    let docs: Vec<(i64, Vec<(usize, f64)>)> = vec![
        (1, vec![(1, 3.0), (2, 2.0), (3, 1.0)]),
        (1, vec![(1, 1.0), (2, 4.0), (10, 1.0)]),
        (1, vec![(2, 2.0), (3, 3.0)]),
        (2, vec![(4, 2.0), (5, 3.0), (10, 1.0)]),
        (2, vec![(5, 1.0), (6, 2.0)]),
        (2, vec![(4, 3.0), (6, 1.0)]),
        (3, vec![(7, 2.0), (8, 2.0)]),
        (3, vec![(8, 3.0), (9, 1.0), (10, 1.0)]),
        (3, vec![(7, 1.0), (9, 4.0)]),
    ];
    docs.into_iter()
        .map(|(label, pairs)| Sample::new(SparseVector::from_pairs(pairs), label))
        .collect()
}

/// Test complete workflow: data loading -> training -> prediction
#[test]
fn test_complete_workflow_libsvm() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(temp_file, "1 1:3 2:2 3:1").expect("Failed to write");
    writeln!(temp_file, "1 1:1 2:4 10:1").expect("Failed to write");
    writeln!(temp_file, "2 4:2 5:3 10:1").expect("Failed to write");
    writeln!(temp_file, "2 5:1 6:2").expect("Failed to write");
    writeln!(temp_file, "3 7:2 8:2").expect("Failed to write");
    writeln!(temp_file, "3 8:3 9:1 10:1").expect("Failed to write");
    temp_file.flush().expect("Failed to flush");

    let model = NaiveBayes::new()
        .with_alpha(1.0)
        .train_from_file(temp_file.path())
        .expect("Training should succeed");

    assert_eq!(model.classes(), vec![1, 2, 3]);
    assert_eq!(model.n_features(), 10);

    let dataset = LibSVMDataset::from_file(temp_file.path()).expect("Failed to load dataset");
    let report = predict(&dataset, &model).expect("Prediction should succeed");

    assert_eq!(report.labels, vec![1, 1, 2, 2, 3, 3]);
    assert_eq!(report.accuracy, 100.0);
    assert_eq!(report.scores.len(), 6);

    let metrics = evaluate_detailed(&model, &dataset).expect("Evaluation should succeed");
    assert_eq!(metrics.accuracy(), 100.0);
    assert_eq!(metrics.macro_f1(), 1.0);
}

/// Reference example: two documents, alpha = 1
#[test]
fn test_reference_example() {
    let samples = vec![
        Sample::new(SparseVector::from_pairs(vec![(1, 2.0), (2, 1.0)]), 1),
        Sample::new(SparseVector::from_pairs(vec![(1, 1.0), (2, 2.0)]), 2),
    ];

    let model = train(samples.as_slice(), 1.0).unwrap();
    assert_relative_eq!(model.class_prior(1).unwrap(), 0.5f64.ln());
    assert_relative_eq!(model.class_prior(2).unwrap(), 0.5f64.ln());
    assert_relative_eq!(model.log_prob(1, 1).unwrap(), (3.0f64 / 5.0).ln());

    let report = predict(samples.as_slice(), &model).unwrap();
    assert_eq!(report.labels, vec![1, 2]);
    assert_eq!(report.accuracy, 100.0);
}

/// Priors form a distribution and every conditional row covers every class
#[test]
fn test_model_invariants() {
    let samples = corpus();

    for alpha in [0.01, 0.5, 1.0, 2.0] {
        let model = NaiveBayes::new()
            .with_alpha(alpha)
            .train_samples(&samples)
            .expect("Training should succeed");

        let prior_mass: f64 = model.class_priors().values().map(|p| p.exp()).sum();
        assert_relative_eq!(prior_mass, 1.0, epsilon = 1e-12);

        for per_class in model.feature_log_probs().values() {
            assert_eq!(per_class.keys().copied().collect::<Vec<_>>(), model.classes());
            assert!(per_class.values().all(|p| p.is_finite() && *p < 0.0));
        }
    }
}

/// Smaller alpha trusts the counts more
#[test]
fn test_alpha_sensitivity() {
    let samples = corpus();
    let sharp = train(samples.as_slice(), 0.01).unwrap();
    let smooth = train(samples.as_slice(), 10.0).unwrap();

    // Feature 2 is frequent in class 1 and absent elsewhere
    assert!(sharp.log_prob(2, 1).unwrap() > smooth.log_prob(2, 1).unwrap());
    assert!(sharp.log_prob(2, 2).unwrap() < smooth.log_prob(2, 2).unwrap());

    for model in [&sharp, &smooth] {
        let report = predict(samples.as_slice(), model).unwrap();
        assert!((0.0..=100.0).contains(&report.accuracy));
    }
}

/// Documents made only of unseen features fall back to the priors
#[test]
fn test_unseen_feature_neutrality() {
    let samples = corpus();
    let model = train(samples.as_slice(), 1.0).unwrap();

    let unseen = vec![Sample::new(
        SparseVector::from_pairs(vec![(500, 2.0), (501, 7.0)]),
        3,
    )];
    let report = predict(unseen.as_slice(), &model).unwrap();

    let priors: Vec<f64> = model.class_priors().values().copied().collect();
    assert_eq!(report.scores[0], priors);
    // All three classes have three documents, so the lowest label wins the tie
    assert_eq!(report.labels[0], 1);
}

/// Skewed priors decide featureless documents
#[test]
fn test_prior_only_classification() {
    let mut samples = corpus();
    samples.push(Sample::new(SparseVector::from_pairs(vec![(7, 1.0)]), 3));

    let model = train(samples.as_slice(), 1.0).unwrap();
    let prediction = model.predict(&Sample::new(SparseVector::empty(), 1));
    assert_eq!(prediction.label, 3);
}

/// Predicting twice gives identical output
#[test]
fn test_prediction_determinism() {
    let samples = corpus();
    let model = train(samples.as_slice(), 0.5).unwrap();

    let first = predict(samples.as_slice(), &model).unwrap();
    let second = predict(samples.as_slice(), &model).unwrap();
    assert_eq!(first, second);

    let batch = model.predict_batch(&samples);
    assert_eq!(
        batch.iter().map(|p| p.label).collect::<Vec<_>>(),
        first.labels
    );
}

/// Saving and reloading a model leaves predictions unchanged
#[test]
fn test_model_persistence_round_trip() {
    let samples = corpus();
    let model = train(samples.as_slice(), 0.5).unwrap();

    let temp_file = NamedTempFile::new().expect("Failed to create temp file");
    SerializableModel::from_model(
        &model,
        TrainingParams {
            alpha: 0.5,
            n_documents: samples.len(),
        },
    )
    .save_to_file(temp_file.path())
    .expect("Save should succeed");

    let restored = SerializableModel::load_from_file(temp_file.path())
        .and_then(SerializableModel::into_model)
        .expect("Load should succeed");

    assert_eq!(restored, model);
    assert_eq!(
        predict(samples.as_slice(), &restored).unwrap(),
        predict(samples.as_slice(), &model).unwrap()
    );
}

/// Model files carrying only the two probability tables load as well
#[test]
fn test_load_model_without_metadata() {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    write!(
        temp_file,
        r#"{{"p_c": {{"1": -0.6931471805599453, "2": -0.6931471805599453}},
            "q_wc": {{"1": {{"1": -0.5108256237659907, "2": -0.916290731874155}},
                     "2": {{"1": -0.916290731874155, "2": -0.5108256237659907}}}}}}"#
    )
    .expect("Failed to write");
    temp_file.flush().expect("Failed to flush");

    let loaded = SerializableModel::load_from_file(temp_file.path()).unwrap();
    assert!(loaded.metadata.is_none());

    let model = loaded.into_model().unwrap();
    let samples = vec![
        Sample::new(SparseVector::from_pairs(vec![(1, 2.0), (2, 1.0)]), 1),
        Sample::new(SparseVector::from_pairs(vec![(1, 1.0), (2, 2.0)]), 2),
    ];
    let report = predict(samples.as_slice(), &model).unwrap();
    assert_eq!(report.labels, vec![1, 2]);
}

/// Test error handling for invalid inputs
#[test]
fn test_error_handling() {
    let empty: Vec<Sample> = Vec::new();
    assert!(matches!(
        NaiveBayes::new().train_samples(&empty),
        Err(NBError::EmptyDataset)
    ));

    let samples = corpus();
    assert!(matches!(
        NaiveBayes::new().with_alpha(-0.5).train_samples(&samples),
        Err(NBError::InvalidParameter(_))
    ));

    let model = train(samples.as_slice(), 1.0).unwrap();
    assert!(matches!(
        predict(empty.as_slice(), &model),
        Err(NBError::EmptyDataset)
    ));

    let result = NaiveBayes::new().train_from_file("/non/existent/file.libsvm");
    assert!(matches!(result, Err(NBError::IoError(_))));
}

/// A class whose feature mass overflows cannot be trained
#[test]
fn test_overflowing_feature_mass() {
    let samples = vec![
        Sample::new(SparseVector::from_pairs(vec![(1, 1e308), (2, 1e308)]), 1),
        Sample::new(SparseVector::from_pairs(vec![(2, 1.0)]), 2),
    ];
    assert!(matches!(
        train(samples.as_slice(), 1.0),
        Err(NBError::MalformedVector(_))
    ));
}

/// Hold-out validation on the corpus
#[test]
fn test_simple_validation() {
    // Interleave classes so both splits see every label
    let samples = corpus();
    let order = [0, 3, 6, 1, 4, 7, 2, 5, 8];
    let interleaved: Vec<Sample> = order.iter().map(|&i| samples[i].clone()).collect();

    let accuracy = quick::simple_validation(interleaved.as_slice(), 0.7, 1.0)
        .expect("Validation should succeed");
    assert_eq!(accuracy, 100.0);
}
