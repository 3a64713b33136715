use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use bytes::Bytes;
use std::io::{self};
use tokio::io::AsyncWrite;

/// Packet trait. Contains the packet ID and the functions to write and read the packet body.
/// The one-byte opcode is handled by the caller on both sides.
pub trait Packet {
    /// Packet ID
    fn packet_id() -> u8
    where
        Self: Sized;

    /// Reads the packet body from the buffer. Default implementation is used for packets this
    /// client only ever sends.
    fn read_from_buffer(_buffer: &mut PacketBuffer) -> io::Result<Self>
    where
        Self: Sized,
    {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "Packet is never received",
        ))
    }

    /// Writes the packet body to the buffer. Default implementation is used for packets this
    /// client only ever receives.
    fn write_to_buffer(&self, _buffer: &mut PacketBuffer) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "Packet is never sent"))
    }
}

/// Encodes a packet as opcode followed by body
pub fn encode_packet<T: Packet>(packet: &T) -> io::Result<Vec<u8>> {
    let mut buffer = PacketBuffer::new();
    buffer.write_u8(T::packet_id());
    packet.write_to_buffer(&mut buffer)?;
    Ok(buffer.buffer)
}

/// Sends a packet to the server
pub async fn send_packet<T: Packet, W: AsyncWrite + Unpin>(
    packet: &T,
    writer: &mut W,
) -> io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let frame = encode_packet(packet)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Legacy packet buffer. Contains the buffer and the cursor.
/// All multi-byte fields are fixed width and big-endian.
#[derive(Debug, Default)]
pub struct PacketBuffer {
    pub buffer: Vec<u8>,
    cursor: usize,
}

impl PacketBuffer {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            buffer: bytes,
            cursor: 0,
        }
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.buffer.get(self.cursor).copied()
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    /// Unread part of the buffer
    fn rest(&self) -> &[u8] {
        &self.buffer[self.cursor..]
    }

    /// Runs a byteorder read against the unread bytes and advances past what it consumed
    fn read_with<T>(&mut self, read: impl FnOnce(&mut &[u8]) -> io::Result<T>) -> io::Result<T> {
        let mut rest = self.rest();
        let before = rest.len();
        let value = read(&mut rest)?;
        let consumed = before - rest.len();
        self.cursor += consumed;
        Ok(value)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        self.read_with(|rest| rest.read_u8())
    }

    pub fn read_i8(&mut self) -> io::Result<i8> {
        self.read_with(|rest| rest.read_i8())
    }

    pub fn read_bool(&mut self) -> io::Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_i16(&mut self) -> io::Result<i16> {
        self.read_with(|rest| rest.read_i16::<BigEndian>())
    }

    pub fn read_u16(&mut self) -> io::Result<u16> {
        self.read_with(|rest| rest.read_u16::<BigEndian>())
    }

    pub fn read_i32(&mut self) -> io::Result<i32> {
        self.read_with(|rest| rest.read_i32::<BigEndian>())
    }

    pub fn read_u32(&mut self) -> io::Result<u32> {
        self.read_with(|rest| rest.read_u32::<BigEndian>())
    }

    pub fn read_f32(&mut self) -> io::Result<f32> {
        self.read_with(|rest| rest.read_f32::<BigEndian>())
    }

    pub fn read_f64(&mut self) -> io::Result<f64> {
        self.read_with(|rest| rest.read_f64::<BigEndian>())
    }

    /// Reads a length that must not be negative
    pub fn read_length_i32(&mut self) -> io::Result<usize> {
        let length = self.read_i32()?;
        usize::try_from(length).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Negative length: {}", length),
            )
        })
    }

    pub fn read_bytes(&mut self, length: usize) -> io::Result<Bytes> {
        if length > self.remaining() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Need {} bytes, only {} remaining",
                    length,
                    self.remaining()
                ),
            ));
        }
        let bytes = Bytes::copy_from_slice(&self.rest()[..length]);
        self.cursor += length;
        Ok(bytes)
    }

    /// Reads a string as an i16 count of UTF-16 code units followed by the units, big-endian
    pub fn read_string(&mut self) -> io::Result<String> {
        let length = self.read_i16()?;
        if length < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Negative string length: {}", length),
            ));
        }
        let mut units = Vec::with_capacity(length as usize);
        for _ in 0..length {
            units.push(self.read_u16()?);
        }
        String::from_utf16(&units).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                "Failed to convert UTF-16 units to string",
            )
        })
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buffer.push(value as u8);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buffer.push(value as u8);
    }

    pub fn write_i16(&mut self, value: i16) -> io::Result<()> {
        self.buffer.write_i16::<BigEndian>(value)
    }

    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.buffer.write_u16::<BigEndian>(value)
    }

    pub fn write_i32(&mut self, value: i32) -> io::Result<()> {
        self.buffer.write_i32::<BigEndian>(value)
    }

    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.buffer.write_u32::<BigEndian>(value)
    }

    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.buffer.write_f32::<BigEndian>(value)
    }

    pub fn write_f64(&mut self, value: f64) -> io::Result<()> {
        self.buffer.write_f64::<BigEndian>(value)
    }

    pub fn write_bytes_raw(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    pub fn write_string(&mut self, value: &str) -> io::Result<()> {
        let units: Vec<u16> = value.encode_utf16().collect();
        let length = i16::try_from(units.len()).map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidInput, "String too long for packet")
        })?;
        self.write_i16(length)?;
        for unit in units {
            self.write_u16(unit)?;
        }
        Ok(())
    }
}
