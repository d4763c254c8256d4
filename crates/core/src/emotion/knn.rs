//! Distance-weighted k-nearest-neighbor classifier over RGB points.

use crate::color::Rgb;
use crate::error::ColorError;
use serde::Serialize;

/// Predicted label with its share of the neighbor vote.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Prediction {
    pub label: &'static str,
    /// Winning vote weight divided by total vote weight, in (0, 1].
    pub confidence: f64,
}

/// k-NN classifier with Euclidean RGB distance and `1/d` vote weights.
///
/// If any of the k neighbors sits exactly on the query, only the exact
/// matches vote (weight 1 each), avoiding an infinite weight.
#[derive(Debug, Clone)]
pub struct KnnClassifier {
    points: Vec<Rgb>,
    labels: Vec<&'static str>,
    k: usize,
}

struct Vote {
    label: &'static str,
    weight: f64,
}

/// Plain Euclidean distance between two RGB triples.
pub fn euclidean_distance(a: Rgb, b: Rgb) -> f64 {
    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    (dr * dr + dg * dg + db * db).sqrt()
}

impl KnnClassifier {
    /// Builds a classifier from labeled samples.
    ///
    /// Fails if there are no samples or `k` is 0.
    pub fn fit(
        samples: impl IntoIterator<Item = (Rgb, &'static str)>,
        k: usize,
    ) -> Result<Self, ColorError> {
        if k == 0 {
            return Err(ColorError::Internal("k-NN requires k >= 1".to_string()));
        }
        let (points, labels): (Vec<Rgb>, Vec<&'static str>) = samples.into_iter().unzip();
        if points.is_empty() {
            return Err(ColorError::Internal(
                "k-NN requires at least one training sample".to_string(),
            ));
        }
        Ok(Self { points, labels, k })
    }

    /// Predicts the label of `query`.
    ///
    /// Neighbors are ordered by distance, then by training order; vote ties
    /// go to the label whose first vote came from the nearer neighbor.
    pub fn predict(&self, query: Rgb) -> Prediction {
        let mut neighbors: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (euclidean_distance(*p, query), i))
            .collect();
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        neighbors.truncate(self.k);

        let exact = neighbors.iter().any(|(d, _)| *d == 0.0);
        let mut votes: Vec<Vote> = Vec::with_capacity(neighbors.len());
        for &(d, i) in &neighbors {
            let weight = match (exact, d == 0.0) {
                (true, true) => 1.0,
                (true, false) => continue,
                (false, _) => 1.0 / d,
            };
            let label = self.labels[i];
            match votes.iter_mut().find(|v| v.label == label) {
                Some(v) => v.weight += weight,
                None => votes.push(Vote { label, weight }),
            }
        }

        let total: f64 = votes.iter().map(|v| v.weight).sum();
        let Some((first, rest)) = votes.split_first() else {
            return Prediction::default();
        };
        let winner = rest
            .iter()
            .fold(first, |best, v| if v.weight > best.weight { v } else { best });

        Prediction {
            label: winner.label,
            confidence: winner.weight / total,
        }
    }
}
