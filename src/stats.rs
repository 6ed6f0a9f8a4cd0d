use serde::Serialize;

/// Arithmetic mean; an empty slice averages to 0
pub fn calculate_average(numbers: &[f64]) -> f64 {
    if numbers.is_empty() {
        return 0.0;
    }
    numbers.iter().sum::<f64>() / numbers.len() as f64
}

/// Largest element by linear scan, or `None` for an empty slice
pub fn find_max<T: PartialOrd + Copy>(numbers: &[T]) -> Option<T> {
    let (first, rest) = numbers.split_first()?;
    let mut max = *first;
    for &n in rest {
        if n > max {
            max = n;
        }
    }
    Some(max)
}

/// Smallest element by linear scan, or `None` for an empty slice
pub fn find_min<T: PartialOrd + Copy>(numbers: &[T]) -> Option<T> {
    let (first, rest) = numbers.split_first()?;
    let mut min = *first;
    for &n in rest {
        if n < min {
            min = n;
        }
    }
    Some(min)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataSummary {
    pub count: usize,
    pub average: f64,
    pub max: Option<f64>,
    pub min: Option<f64>,
}

/// Count, mean, max and min in one report
pub fn summarize(numbers: &[f64]) -> DataSummary {
    DataSummary {
        count: numbers.len(),
        average: calculate_average(numbers),
        max: find_max(numbers),
        min: find_min(numbers),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], 0.0)]
    #[case(&[2.0, 4.0], 3.0)]
    #[case(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0)]
    #[case(&[10.0], 10.0)]
    #[case(&[-1.0, 1.0], 0.0)]
    fn averages(#[case] numbers: &[f64], #[case] expected: f64) {
        assert_eq!(calculate_average(numbers), expected);
    }

    #[test]
    fn test_find_max() {
        assert_eq!(find_max::<f64>(&[]), None);
        assert_eq!(find_max(&[3, 9, 1]), Some(9));
        assert_eq!(find_max(&[5, 4, 3, 2, 1]), Some(5));
        assert_eq!(find_max(&[1]), Some(1));
        assert_eq!(find_max(&[-4.5, -2.0, -8.0]), Some(-2.0));
    }

    #[test]
    fn test_find_min() {
        assert_eq!(find_min::<i32>(&[]), None);
        assert_eq!(find_min(&[3, 9, 1]), Some(1));
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(
            summary,
            DataSummary { count: 5, average: 3.0, max: Some(5.0), min: Some(1.0) }
        );
    }

    #[test]
    fn test_summarize_empty() {
        assert_eq!(
            summarize(&[]),
            DataSummary { count: 0, average: 0.0, max: None, min: None }
        );
        assert_eq!(
            serde_json::to_value(summarize(&[])).unwrap(),
            serde_json::json!({"count": 0, "average": 0.0, "max": null, "min": null})
        );
    }
}
