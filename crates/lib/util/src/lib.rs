pub fn size_of_slice<T>(slice: &[T]) -> u64 {
    std::mem::size_of_val(slice) as u64
}

#[inline(always)]
pub fn typed_to_bytes<T: Copy>(typed: &[T]) -> &[u8] {
    // Only meaningful for plain scalar `T`.
    unsafe { std::slice::from_raw_parts(typed.as_ptr().cast(), std::mem::size_of_val(typed)) }
}

/// Owned copy of `typed` in native byte order, in a freshly allocated buffer.
pub fn to_native_bytes<T: Copy>(typed: &[T]) -> Vec<u8> {
    typed_to_bytes(typed).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_size_counts_every_element() {
        assert_eq!(size_of_slice(&[0.0f32; 9]), 36);
        assert_eq!(size_of_slice::<u32>(&[]), 0);
    }

    #[test]
    fn bytes_are_native_endian() {
        let floats = [1.0f32, -0.5];
        let bytes = to_native_bytes(&floats);
        assert_eq!(bytes.len(), 8);
        assert_eq!(&bytes[..4], &1.0f32.to_ne_bytes());
        assert_eq!(&bytes[4..], &(-0.5f32).to_ne_bytes());
    }
}
