pub(crate) mod split;

// extended euclidean algorithm
// returns (x, y, gcd) where a*x + b*y = gcd
#[cfg(test)]
pub(crate) fn egcd(a: i64, b: i64) -> (i64, i64, i64) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1, 0);

    while r != 0 {
        let (quotient, remainder) = (old_r / r, old_r % r);
        (old_r, r) = (r, remainder);
        (old_s, s) = (s, old_s - quotient * s);
    }
    (old_s, (old_r - old_s * a) / b, old_r)
}

/// Inverse of `a` modulo `m`, in `[0, m)`
#[cfg(test)]
pub(crate) fn invm(a: i64, m: i64) -> Option<i64> {
    match egcd(a, m) {
        (x, _, 1) => Some(x.rem_euclid(m)),
        _ => None,
    }
}
