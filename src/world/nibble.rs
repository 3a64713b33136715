/// Number of set bits in a section presence mask
pub fn popcount16(mask: u16) -> u8 {
    mask.count_ones() as u8
}

/// Extracts the low or high half of a packed byte
pub fn nibble(byte: u8, low: bool) -> u8 {
    if low {
        byte & 0x0f
    } else {
        byte >> 4
    }
}

/// Reads entry `index` of a nibble array. Odd indices live in the low half of their byte,
/// even indices in the high half.
pub fn read_nibble(array: &[u8], index: usize) -> u8 {
    nibble(array[index >> 1], index & 1 == 1)
}

/// Writes entry `index` of a nibble array, leaving its neighbour in the same byte intact.
pub fn write_nibble(array: &mut [u8], index: usize, value: u8) {
    let byte = &mut array[index >> 1];
    let value = value & 0x0f;
    *byte = if index & 1 == 1 {
        (*byte & 0xf0) | value
    } else {
        (*byte & 0x0f) | (value << 4)
    };
}
