/// Zero-based page request derived from an offset and a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: i64,
    pub size: i64,
}

impl PageRequest {
    /// `index = (offset + limit - 1) / limit`, integer division.
    ///
    /// This is the ceiling of `offset / limit`, so an offset that is not a
    /// multiple of the limit lands on the page after the one containing it.
    /// Callers must validate `limit > 0` and `offset >= 0` first. The inputs
    /// are 32-bit and the arithmetic is 64-bit, so no valid pair overflows.
    pub fn of(limit: i32, offset: i32) -> Self {
        let limit = i64::from(limit);
        let offset = i64::from(offset);
        PageRequest {
            index: (offset + limit - 1) / limit,
            size: limit,
        }
    }

    /// Rows skipped before this page.
    pub fn offset(&self) -> i64 {
        self.index * self.size
    }
}
