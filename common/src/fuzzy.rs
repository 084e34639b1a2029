//! ファジー文字列照合
//!
//! 挿入・削除の編集距離を正規化した類似度を 0〜100 のスケールで返す。
//! ルールの閾値（特別な組み合わせ 70、色 70、デザイン 80）はこのスケールで解釈する。

/// 類似度を計算（0〜100、大文字小文字を区別しない）
///
/// どちらかが空文字列なら 0。端数は偶数丸め。
pub fn ratio(a: &str, b: &str) -> u8 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();

    if a.is_empty() || b.is_empty() {
        return 0;
    }
    if a == b {
        return 100;
    }

    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let total = a_chars.len() + b_chars.len();
    let distance = indel_distance(&a_chars, &b_chars);

    let similarity = 1.0 - (distance as f64 / total as f64);
    (similarity * 100.0).round_ties_even() as u8
}

/// 類似度が閾値を超えるか（閾値ちょうどは不一致）
pub fn exceeds(expected: &str, actual: &str, threshold: u8) -> bool {
    ratio(expected, actual) > threshold
}

/// 挿入・削除のみの編集距離（置換は削除+挿入で 2 と数える）
fn indel_distance(a: &[char], b: &[char]) -> usize {
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 2 };
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
