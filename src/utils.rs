//! Utility functions for the action enumerator

/// Forms every combination that picks one item from each list
///
/// The result is in standard product order: the first list varies slowest
/// and the last list varies fastest. An empty list anywhere yields no
/// combinations; no lists at all yields one empty combination.
pub fn cartesian_product<T: Clone>(lists: &[Vec<T>]) -> Vec<Vec<T>> {
    let mut combinations: Vec<Vec<T>> = vec![Vec::with_capacity(lists.len())];

    for list in lists {
        let mut extended = Vec::with_capacity(combinations.len() * list.len());
        for prefix in &combinations {
            for item in list {
                let mut combination = prefix.clone();
                combination.push(item.clone());
                extended.push(combination);
            }
        }
        combinations = extended;
    }

    combinations
}
