use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Byte order of particle files (same as `java.io.DataOutput`).
pub type ParticleOrder = BigEndian;

pub fn write_i32<W: Write>(w: &mut W, v: i32) -> io::Result<()> { w.write_i32::<ParticleOrder>(v) }
pub fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> { r.read_i32::<ParticleOrder>() }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn big_endian_layout() {
        let mut buf = Vec::new();
        write_i32(&mut buf, 1).unwrap();
        write_i32(&mut buf, -2).unwrap();
        assert_eq!(buf, [0, 0, 0, 1, 0xff, 0xff, 0xff, 0xfe]);

        let mut cur = Cursor::new(buf);
        assert_eq!(read_i32(&mut cur).unwrap(), 1);
        assert_eq!(read_i32(&mut cur).unwrap(), -2);
        assert!(read_i32(&mut cur).is_err());
    }
}
