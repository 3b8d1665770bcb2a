use crate::stream::STDIN_READ_SIZE;

/// Default delay before the first publish, in milliseconds.
pub fn default_pub_delay_ms() -> u64 {
    10
}

/// Default stdin buffer growth increment.
pub fn default_chunk_size() -> usize {
    STDIN_READ_SIZE
}
