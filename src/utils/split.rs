pub(crate) trait ArraySplitter<T: Copy, const N: usize> {
    /// Copies `self` into a head of `A` and a tail of `B` elements, `A + B == N`.
    fn dissect<const A: usize, const B: usize>(&self) -> ([T; A], [T; B]);
}

impl<T: Copy, const N: usize> ArraySplitter<T, N> for [T; N] {
    #[inline]
    fn dissect<const A: usize, const B: usize>(&self) -> ([T; A], [T; B]) {
        debug_assert_eq!(A + B, N);
        (
            array_init::array_init(|i| self[i]),
            array_init::array_init(|i| self[A + i]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dissect() {
        let v: [u8; 13] = array_init::array_init(|i| i as u8 + 1);
        let (a, b): ([u8; 4], [u8; 9]) = v.dissect();
        assert_eq!(a, [1, 2, 3, 4]);
        assert_eq!(b, [5, 6, 7, 8, 9, 10, 11, 12, 13]);

        let (a, b): ([u8; 13], [u8; 0]) = v.dissect();
        assert_eq!(a, v);
        assert!(b.is_empty());
    }

    #[test]
    #[should_panic]
    fn test_dissect_too_long() {
        let v = [0u8; 4];
        let _: ([u8; 3], [u8; 3]) = v.dissect();
    }
}
