#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    /// Hash the exact bit pattern; `-0.0` and `0.0` differ on purpose.
    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Two independent FNV-1a lanes; enough to make accidental collisions in tests implausible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Fingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

pub(crate) struct FingerprintHasher {
    hi: Fnv1a64,
    lo: Fnv1a64,
}

impl FingerprintHasher {
    const HI_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

    pub(crate) fn new() -> Self {
        Self {
            hi: Fnv1a64::new(Self::HI_SEED),
            lo: Fnv1a64::new_default(),
        }
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.hi.write_u8(v);
        self.lo.write_u8(v);
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.hi.write_u32(v);
        self.lo.write_u32(v);
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.hi.write_f64(v);
        self.lo.write_f64(v);
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.hi.write_bytes(bytes);
        self.lo.write_bytes(bytes);
    }

    pub(crate) fn finish(self) -> Fingerprint {
        Fingerprint {
            hi: self.hi.finish(),
            lo: self.lo.finish(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
