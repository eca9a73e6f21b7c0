use crate::error::CoreError;

/// Allocate a vector of `len` copies of `fill`, reporting failure instead of
/// aborting the process.
///
/// Startup buffers are sized from the display resolution; a failed
/// allocation must surface as an error so the caller can refuse to start.
pub fn try_filled_vec<T: Clone>(len: usize, fill: T, what: &'static str) -> crate::Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| CoreError::Allocation {
            what,
            bytes: len.saturating_mul(std::mem::size_of::<T>()),
        })?;
    data.resize(len, fill);
    Ok(data)
}
