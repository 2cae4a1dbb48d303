/*!
ram.rs - The 256-byte flat memory.

Addresses are `u8`, so every address is valid by construction; there is
no bounds checking to do and no misaligned access to reject. The top of
memory carries the conventional layout: interrupt vectors at 0xF8..0xFF,
the stack growing down from 0xF4, and the key-press cell at 0xF4.
*/

pub const RAM_SIZE: usize = 256;

#[derive(Debug, Clone)]
pub struct Ram {
    mem: [u8; RAM_SIZE],
}

impl Ram {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn read(&self, addr: u8) -> u8 {
        self.mem[addr as usize]
    }

    #[inline]
    pub fn write(&mut self, addr: u8, value: u8) {
        self.mem[addr as usize] = value;
    }

    /// Copy an image into memory starting at address 0. Anything beyond
    /// `RAM_SIZE` bytes is ignored; callers validate image size first.
    pub fn load(&mut self, image: &[u8]) {
        let len = image.len().min(RAM_SIZE);
        self.mem[..len].copy_from_slice(&image[..len]);
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self { mem: [0; RAM_SIZE] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let ram = Ram::new();
        assert_eq!(ram.read(0), 0);
        assert_eq!(ram.read(0xFF), 0);
    }

    #[test]
    fn write_then_read_back() {
        let mut ram = Ram::new();
        ram.write(0x42, 0xAB);
        assert_eq!(ram.read(0x42), 0xAB);
        assert_eq!(ram.read(0x41), 0);
    }

    #[test]
    fn load_copies_from_address_zero() {
        let mut ram = Ram::new();
        ram.load(&[1, 2, 3]);
        assert_eq!(ram.read(0), 1);
        assert_eq!(ram.read(2), 3);
        assert_eq!(ram.read(3), 0);
    }
}
