// xorshift64, seeded once. Cheaper than crossing into JS for Math.random per draw
// and reproducible when a seed is given.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    pub fn new(seed: u64) -> Self {
        // zero is a fixed point of xorshift
        Self { state: if seed == 0 { 1 } else { seed } }
    }

    pub fn from_js_entropy() -> Self {
        let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
        Self::new(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    // [0, 1)
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    pub fn pick(&mut self, len: usize) -> usize {
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }
}
