//! String helpers shared by the decomposition steps

/// Longest block shared by `a` and `b`.
/// Returns (start in a, start in b, length). Among blocks of maximal
/// length, the one starting earliest in `a` wins, then earliest in `b`.
pub fn longest_common_substring<T: PartialEq>(a: &[T], b: &[T]) -> (usize, usize, usize) {
    let (mut best_a, mut best_b, mut best_len) = (0, 0, 0);
    // prev[j + 1]: length of the common suffix of a[..i] and b[..=j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best_len {
                best_len = curr[j + 1];
                best_a = i + 1 - best_len;
                best_b = j + 1 - best_len;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    (best_a, best_b, best_len)
}

/// Put `left` and `right` at both ends of a string of length `total_length`,
/// filling the middle with `fill_char`. If they don't fit, return them
/// concatenated.
pub fn center_pad(left: &str, right: &str, total_length: usize, fill_char: char) -> String {
    let used = left.chars().count() + right.chars().count();
    if used > total_length {
        return format!("{}{}", left, right);
    }
    let middle: String = std::iter::repeat(fill_char)
        .take(total_length - used)
        .collect();
    format!("{}{}{}", left, middle, right)
}

/// `center_pad` with '.' as filler
pub fn center_pad_default(left: &str, right: &str, total_length: usize) -> String {
    center_pad(left, right, total_length, '.')
}
