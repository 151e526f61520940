use std::io::{Read, Result, Write};

/// Types that can be serialized to a byte stream.
pub trait WriterTo {
    /// Writes the complete serialized representation to `writer`.
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>;
}

/// Types that can be deserialized in place from a byte stream.
///
/// The receiver must already have the shape (dimensions) of the value being read;
/// a shape mismatch is reported as [std::io::ErrorKind::InvalidData].
pub trait ReaderFrom {
    /// Reads and overwrites `self` from `reader`.
    fn read_from<R: Read>(&mut self, reader: &mut R) -> Result<()>;
}
