/// The `AsBytes` trait allows a type to be used as a key in a trie.
///
/// Keys are always indexed by their raw bytes; the trie decides how those
/// bytes are expanded into a path.
pub trait AsBytes {
    /// Yields the raw bytes of the key.
    fn as_bytes(&self) -> impl Iterator<Item = u8>;

    fn as_bytes_vec(&self) -> Vec<u8> {
        self.as_bytes().collect()
    }
}

impl AsBytes for u8 {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        std::iter::once(*self)
    }
}

// Multi-byte integers are big-endian so that numeric order matches path order.
macro_rules! be_bytes {
    ($($ty:ty),*) => {
        $(
            impl AsBytes for $ty {
                fn as_bytes(&self) -> impl Iterator<Item = u8> {
                    self.to_be_bytes().into_iter()
                }
            }
        )*
    };
}

be_bytes!(u16, u32, u64, u128, i16, i32, i64, i128);

impl<T: AsBytes> AsBytes for [T] {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        self.iter().flat_map(|x| x.as_bytes())
    }
}

impl<T: AsBytes> AsBytes for Vec<T> {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        self.iter().flat_map(|x| x.as_bytes())
    }
}

impl<const N: usize, T: AsBytes> AsBytes for [T; N] {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        self.as_slice().iter().flat_map(|x| x.as_bytes())
    }
}

impl AsBytes for str {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        str::as_bytes(self).iter().copied()
    }
}

impl AsBytes for String {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        self.as_str().as_bytes().iter().copied()
    }
}

impl<T: AsBytes + ?Sized> AsBytes for &T {
    fn as_bytes(&self) -> impl Iterator<Item = u8> {
        T::as_bytes(*self)
    }
}
