//! An example using the bundled `match_scores` dataset
use scorenorm::{NormalizerIO, ScoreNormalizer};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<(), Box<dyn Error>> {
    let file = File::open("resources/match_scores.csv")?;
    let reader = BufReader::new(file);
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut tp_scores = Vec::new();
    let mut tn_scores = Vec::new();
    for result in csv_reader.records() {
        let record = result?;
        let score = record[0].parse::<f64>()?;
        let label = record[1].parse::<i64>()?;
        if label == 1 {
            tp_scores.push(score);
        } else {
            tn_scores.push(score);
        }
    }

    // Create a normalizer.
    // To provide parameters generate a default normalizer, and then use
    // the relevant `set_` methods for any parameters you would like to
    // adjust.
    let mut normalizer = ScoreNormalizer::default().set_target_recall(0.95);
    normalizer.fit(&tp_scores, &tn_scores)?;

    let probs = normalizer.normalize(&[2.0, 4.0, 6.0, 8.0], false)?;
    println!("Normalized probabilities: {:?}", probs);
    println!("Learned probability threshold: {}", normalizer.learned_threshold()?);
    println!("Matching score threshold: {}", normalizer.score_threshold()?);

    let mut scores = tp_scores.clone();
    scores.extend_from_slice(&tn_scores);
    let mut labels = vec![true; tp_scores.len()];
    labels.resize(scores.len(), false);
    println!("Training accuracy: {}", normalizer.get_accuracy(&scores, &labels, true)?);

    let path = env::temp_dir().join("match_normalizer.json");
    normalizer.save_normalizer(&path)?;
    let loaded = ScoreNormalizer::load_normalizer(&path)?;
    println!("Reloaded threshold: {}", loaded.learned_threshold()?);

    Ok(())
}
