//! Vector distance metrics

use serde::{Deserialize, Serialize};

/// Distance function used by a vector index.
///
/// Must match the space the embedding model was trained for. Every metric
/// returns "smaller is closer".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// `1 - cosine_similarity`, in `[0, 2]`
    #[default]
    Cosine,
    /// Euclidean distance
    L2,
    /// Squared Euclidean distance
    SquaredL2,
    /// `1 - dot(a, b)`
    InnerProduct,
}

impl DistanceMetric {
    /// Distance between two vectors of equal length
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::Cosine => 1.0 - cosine_similarity(a, b),
            Self::L2 => squared_l2(a, b).sqrt(),
            Self::SquaredL2 => squared_l2(a, b),
            Self::InnerProduct => 1.0 - dot(a, b),
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cosine => write!(f, "cosine"),
            Self::L2 => write!(f, "l2"),
            Self::SquaredL2 => write!(f, "squared_l2"),
            Self::InnerProduct => write!(f, "inner_product"),
        }
    }
}

/// Calculate cosine similarity between two vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot(a, b) / (norm_a * norm_b)
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 0.0001;

    #[test]
    fn test_cosine_similarity_identical() {
        let a = vec![1.0, 0.0, 0.0];

        assert!((cosine_similarity(&a, &a) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0];

        assert!(cosine_similarity(&a, &b).abs() < EPS);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        let empty: Vec<f32> = vec![];

        assert_eq!(cosine_similarity(&empty, &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_cosine_distance() {
        let a = [1.0, 0.0];
        let b = [-1.0, 0.0];

        assert!(DistanceMetric::Cosine.distance(&a, &a).abs() < EPS);
        assert!((DistanceMetric::Cosine.distance(&a, &b) - 2.0).abs() < EPS);
    }

    #[test]
    fn test_l2_distances() {
        let a = [0.0, 0.0];
        let b = [3.0, 4.0];

        assert!((DistanceMetric::L2.distance(&a, &b) - 5.0).abs() < EPS);
        assert!((DistanceMetric::SquaredL2.distance(&a, &b) - 25.0).abs() < EPS);
    }

    #[test]
    fn test_inner_product_distance() {
        let a = [0.6, 0.8];

        assert!(DistanceMetric::InnerProduct.distance(&a, &a).abs() < EPS);
    }

    #[test]
    fn test_metric_serialization() {
        assert_eq!(
            serde_json::to_string(&DistanceMetric::SquaredL2).unwrap(),
            "\"squared_l2\""
        );
        assert_eq!(DistanceMetric::default(), DistanceMetric::Cosine);
        assert_eq!(DistanceMetric::InnerProduct.to_string(), "inner_product");
    }
}
