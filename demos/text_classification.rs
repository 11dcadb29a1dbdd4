//! Demo classifying tiny bag-of-words documents and comparing smoothing constants

use rmnb::api::{EvaluationMetrics, NaiveBayes};
use rmnb::core::{Sample, SparseVector};
use rmnb::predict;

const VOCABULARY: [&str; 10] = [
    "goal", "match", "team", "oven", "recipe", "flour", "rain", "wind", "cloud", "today",
];

fn doc(label: i64, words: &[(&str, f64)]) -> Sample {
    let pairs = words.iter().filter_map(|&(word, count)| {
        VOCABULARY
            .iter()
            .position(|&w| w == word)
            .map(|id| (id + 1, count))
    });
    Sample::new(SparseVector::from_pairs(pairs), label)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Multinomial Naive Bayes Text Demo ===");

    // 1 = sports, 2 = cooking, 3 = weather
    let train = vec![
        doc(1, &[("goal", 3.0), ("match", 2.0), ("team", 1.0)]),
        doc(1, &[("team", 2.0), ("match", 1.0), ("today", 1.0)]),
        doc(2, &[("oven", 2.0), ("recipe", 2.0), ("flour", 1.0)]),
        doc(2, &[("flour", 3.0), ("recipe", 1.0), ("today", 1.0)]),
        doc(3, &[("rain", 2.0), ("wind", 1.0), ("cloud", 2.0)]),
        doc(3, &[("wind", 3.0), ("today", 2.0)]),
    ];
    let test = vec![
        doc(1, &[("goal", 1.0), ("today", 1.0)]),
        doc(2, &[("oven", 1.0), ("team", 1.0), ("flour", 1.0)]),
        doc(3, &[("cloud", 1.0), ("rain", 1.0)]),
        doc(3, &[("today", 3.0)]),
    ];

    println!("Training documents: {}", train.len());
    println!("Test documents: {}", test.len());

    for alpha in [0.01, 0.1, 1.0, 10.0] {
        println!("\n--- alpha = {alpha} ---");
        let model = NaiveBayes::new().with_alpha(alpha).train_samples(&train)?;
        let report = predict(test.as_slice(), &model)?;

        for (i, (label, scores)) in report.labels.iter().zip(&report.scores).enumerate() {
            let scores: Vec<String> = scores.iter().map(|s| format!("{s:8.3}")).collect();
            println!(
                "  doc {i}: true {} predicted {label} scores [{}]",
                test[i].label,
                scores.join(" ")
            );
        }

        let actual: Vec<i64> = test.iter().map(|s| s.label).collect();
        let metrics = EvaluationMetrics::from_report(&actual, &report);
        println!("  Accuracy: {:.2}%", report.accuracy);
        println!("  Macro F1: {:.4}", metrics.macro_f1());
    }

    Ok(())
}
