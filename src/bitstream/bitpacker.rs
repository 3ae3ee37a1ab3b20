use log::error;

/// Packs bits into bytes, most significant bit first.
pub struct BitPacker {
    pub output: Vec<u8>,
    /// Bits written so far, padding excluded.
    pub bit_len: usize,
    queue: u64,
    q_bits: u8,
}

impl BitPacker {
    /// Create a new BitPacker with room for `size` bytes. Call flush() to push the last
    /// partial byte to the buffer.
    pub fn new(size: usize) -> Self {
        Self {
            output: Vec::with_capacity(size),
            bit_len: 0,
            queue: 0,
            q_bits: 0,
        }
    }

    /// Internal write function common to all out functions.
    fn write_stream(&mut self) {
        while self.q_bits > 7 {
            let byte = (self.queue >> (self.q_bits - 8)) as u8;
            self.output.push(byte); //push the packed byte out
            self.q_bits -= 8; //adjust the count of bits left in the queue
        }
    }

    /// Puts a single bit on the stream.
    pub fn out_bit(&mut self, bit: bool) {
        self.queue <<= 1;
        self.queue |= bit as u64;
        self.q_bits += 1;
        self.bit_len += 1;
        self.write_stream();
    }

    /// Puts a run of bits on the stream, first bit first.
    pub fn out_bits(&mut self, bits: &[bool]) {
        bits.iter().for_each(|&bit| self.out_bit(bit));
    }

    /// Flushes the remaining bits (1-7) from the queue, padding with 0s in the least
    /// significant bits.
    pub fn flush(&mut self) {
        if self.q_bits > 0 {
            self.queue <<= 8 - self.q_bits; //pad the queue with zeros
            self.q_bits += 8 - self.q_bits;
            self.write_stream(); // write out all that is left
            if self.q_bits > 0 {
                error!("Stuff left in the BitPacker queue.");
            }
        }
    }

    /// Debugging function to return the number of bytes.bits output so far
    pub fn loc(&self) -> String {
        format! {"[{}.{}]",((self.output.len() * 8) + self.q_bits as usize)/8, ((self.output.len() * 8) + self.q_bits as usize)%8}
    }
}

/// Pack a bit sequence into bytes, zero-padding the last byte. The caller keeps `bits.len()`
/// to undo the padding later.
pub fn pack(bits: &[bool]) -> Vec<u8> {
    let mut bp = BitPacker::new((bits.len() + 7) / 8);
    bp.out_bits(bits);
    bp.flush();
    bp.output
}

#[cfg(test)]
mod test {
    use super::*;

    fn bits(text: &str) -> Vec<bool> {
        text.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn out_bits_test() {
        let mut bp = BitPacker::new(100);
        bp.out_bits(&bits("0010000100100000"));
        bp.flush();
        assert_eq!(bp.output, "! ".as_bytes());
        assert_eq!(bp.bit_len, 16);
    }

    #[test]
    fn flush_pads_and_loc_test() {
        let mut bp = BitPacker::new(100);
        bp.out_bits(&bits("111001001"));
        assert_eq!("[1.1]", &bp.loc());
        bp.flush();
        assert_eq!(bp.output, [0b1110_0100, 0b1000_0000]);
        assert_eq!(bp.bit_len, 9);
        assert_eq!("[2.0]", &bp.loc());
    }

    #[test]
    fn pack_test() {
        assert_eq!(pack(&[]), Vec::<u8>::new());
        assert_eq!(pack(&[true]), [0x80]);
        assert_eq!(pack(&bits("10101010")), [0xaa]);
        assert_eq!(pack(&bits("101010101")), [0xaa, 0x80]);
    }

    #[test]
    fn long_run_test() {
        // More than 64 bits must never overflow the queue
        let input = vec![true; 200];
        assert_eq!(pack(&input), vec![0xff; 25]);
    }
}
