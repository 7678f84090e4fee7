//! Linear Model Math

/// Logistic function
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Polynomial feature expansion without a bias term.
///
/// Term order matches the trained artifact's coefficient order: all degree-1
/// terms first, then every pairwise product `x[i] * x[j]` with `i <= j` in
/// index order. Degree 1 returns the input unchanged; degrees above 2 are
/// not produced by the export step and are treated as degree 2.
pub fn expand_polynomial(features: &[f64], degree: u32) -> Vec<f64> {
    let mut expanded = features.to_vec();
    if degree >= 2 {
        for i in 0..features.len() {
            for j in i..features.len() {
                expanded.push(features[i] * features[j]);
            }
        }
    }
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_bounds() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(40.0) > 0.999_999);
        assert!(sigmoid(-40.0) < 1e-6);
    }

    #[test]
    fn test_degree_two_term_order() {
        // [a, b, c] -> [a, b, c, a², ab, ac, b², bc, c²]
        let expanded = expand_polynomial(&[2.0, 3.0, 5.0], 2);
        assert_eq!(
            expanded,
            vec![2.0, 3.0, 5.0, 4.0, 6.0, 10.0, 9.0, 15.0, 25.0]
        );
    }

    #[test]
    fn test_degree_one_is_identity() {
        assert_eq!(expand_polynomial(&[1.5, -2.0], 1), vec![1.5, -2.0]);
    }
}
