use std::io::{self, ErrorKind, Read, Write};

/// Default growth increment of the stdin buffer.
pub const STDIN_READ_SIZE: usize = 8192;

/// Upper bound of the stdin buffer growth increment.
pub const MAX_READ_SIZE: usize = 64 * 1024 * 1024;

/// Reads `reader` until end-of-stream into one owned buffer.
///
/// The buffer starts with `chunk` bytes of room and grows by `chunk`
/// whenever it is full, so input size is not bounded by a fixed ceiling.
pub fn read_to_end_growing<R: Read + ?Sized>(reader: &mut R, chunk: usize) -> io::Result<Vec<u8>> {
    let chunk = chunk.max(1);
    let mut buffer = Vec::new();
    let mut total = 0;

    loop {
        if total == buffer.len() {
            let len = total
                .checked_add(chunk)
                .ok_or_else(|| io::Error::new(ErrorKind::OutOfMemory, "stdin buffer size overflow"))?;
            buffer
                .try_reserve_exact(chunk)
                .map_err(|e| io::Error::new(ErrorKind::OutOfMemory, e))?;
            buffer.resize(len, 0);
        }
        match reader.read(&mut buffer[total..]) {
            Ok(0) => break,
            Ok(n) => total += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    buffer.truncate(total);
    Ok(buffer)
}

/// Writes one message part and flushes it right away.
pub fn write_part<W: Write + ?Sized>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    writer.write_all(data)?;
    writer.flush()
}
