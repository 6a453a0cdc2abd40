//! Grid layout helper for keyboard construction.

/// Minimal number of rows such that `rows * columns >= length`.
pub fn rows_for_columns(length: usize, columns: usize) -> usize {
    if columns == 0 {
        return 0;
    }
    length / columns + usize::from(length % columns > 0)
}

/// Lay a flat list out as rows of at most `columns` items.
///
/// The last row may be short; an empty input produces no rows.
pub fn reshape<T>(items: Vec<T>, columns: usize) -> Vec<Vec<T>> {
    if columns == 0 {
        return Vec::new();
    }
    let mut rows = Vec::with_capacity(rows_for_columns(items.len(), columns));
    let mut row = Vec::with_capacity(columns);
    for item in items {
        row.push(item);
        if row.len() == columns {
            rows.push(std::mem::replace(&mut row, Vec::with_capacity(columns)));
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reshape_even() {
        assert_eq!(
            reshape(vec![1, 2, 3, 4, 5, 6], 3),
            vec![vec![1, 2, 3], vec![4, 5, 6]]
        );
        assert_eq!(
            reshape(vec![1, 2, 3, 4, 5, 6], 2),
            vec![vec![1, 2], vec![3, 4], vec![5, 6]]
        );
    }

    #[test]
    fn reshape_ragged_tail() {
        assert_eq!(
            reshape(vec![1, 2, 3, 4, 5, 6, 7], 3),
            vec![vec![1, 2, 3], vec![4, 5, 6], vec![7]]
        );
    }

    #[test]
    fn reshape_empty() {
        assert!(reshape(Vec::<i32>::new(), 2).is_empty());
    }

    #[test]
    fn rows_round_up() {
        assert_eq!(rows_for_columns(7, 3), 3);
        assert_eq!(rows_for_columns(6, 3), 2);
        assert_eq!(rows_for_columns(0, 3), 0);
    }
}
