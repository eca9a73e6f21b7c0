use yuvbrot_core::PALETTE_COUNT;

/// Entries per palette; iteration counts index it modulo this size.
pub const LUT_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// YUV color
// ---------------------------------------------------------------------------

/// One luma / blue-difference / red-difference triplet (full-range BT.601).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Yuv {
    pub y: u8,
    pub u: u8,
    pub v: u8,
}

impl Yuv {
    /// Color for points that reached the iteration limit.
    pub const BLACK: Self = Self {
        y: 0,
        u: 128,
        v: 128,
    };

    pub const fn new(y: u8, u: u8, v: u8) -> Self {
        Self { y, u, v }
    }

    /// Fixed-point RGB → YCbCr conversion.
    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let [r, g, b] = rgb.map(i32::from);
        let y = (299 * r + 587 * g + 114 * b) / 1000;
        let u = (-16874 * r - 33126 * g + 50000 * b + 12_800_000) / 100_000;
        let v = (50000 * r - 41869 * g - 8131 * b + 12_800_000) / 100_000;
        Self {
            y: y.clamp(0, 255) as u8,
            u: u.clamp(0, 255) as u8,
            v: v.clamp(0, 255) as u8,
        }
    }

    /// Inverse conversion, used to show or export a frame on RGB displays.
    pub fn to_rgb(self) -> [u8; 3] {
        let y = self.y as f64;
        let u = self.u as f64 - 128.0;
        let v = self.v as f64 - 128.0;
        let r = y + 1.402 * v;
        let g = y - 0.344_136 * u - 0.714_136 * v;
        let b = y + 1.772 * u;
        [r, g, b].map(|c| c.round().clamp(0.0, 255.0) as u8)
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A 256-entry YUV lookup table.
#[derive(Clone)]
pub struct Palette {
    pub name: &'static str,
    entries: [Yuv; LUT_SIZE],
}

impl Palette {
    pub fn new(name: &'static str, entries: [Yuv; LUT_SIZE]) -> Self {
        Self { name, entries }
    }

    /// Entry for an iteration count. Counts above 255 wrap, so limits past
    /// 256 show repeating color bands.
    #[inline]
    pub fn lookup(&self, count: u32) -> Yuv {
        self.entries[(count & 0xFF) as usize]
    }

    pub fn entries(&self) -> &[Yuv; LUT_SIZE] {
        &self.entries
    }
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette").field("name", &self.name).finish_non_exhaustive()
    }
}

/// The selectable palettes, in index order.
#[derive(Debug, Clone)]
pub struct PaletteTable {
    palettes: Vec<Palette>,
}

impl PaletteTable {
    /// Build every builtin palette.
    pub fn builtin() -> Self {
        let palettes = vec![
            classic(),
            fire(),
            ocean(),
            neon(),
            rainbow(),
            forest(),
            violet(),
            sunset(),
            ice(),
            grayscale(),
        ];
        debug_assert_eq!(palettes.len(), PALETTE_COUNT as usize);
        Self { palettes }
    }

    /// Palette at `index`; out-of-range indices wrap.
    #[inline]
    pub fn get(&self, index: u8) -> &Palette {
        &self.palettes[index as usize % self.palettes.len()]
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }
}

impl Default for PaletteTable {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

/// Build a YUV LUT by interpolating between RGB color stops.
fn gradient_lut(stops: &[(f64, [u8; 3])]) -> [Yuv; LUT_SIZE] {
    std::array::from_fn(|i| {
        let t = i as f64 / LUT_SIZE as f64;
        let mut lo = 0;
        for (j, &(pos, _)) in stops.iter().enumerate() {
            if pos <= t {
                lo = j;
            }
        }
        let hi = (lo + 1).min(stops.len() - 1);
        let (lo_t, lo_c) = stops[lo];
        let (hi_t, hi_c) = stops[hi];
        let frac = if (hi_t - lo_t).abs() < 1e-10 {
            0.0
        } else {
            ((t - lo_t) / (hi_t - lo_t)).clamp(0.0, 1.0)
        };
        let inv = 1.0 - frac;
        Yuv::from_rgb([
            (lo_c[0] as f64 * inv + hi_c[0] as f64 * frac) as u8,
            (lo_c[1] as f64 * inv + hi_c[1] as f64 * frac) as u8,
            (lo_c[2] as f64 * inv + hi_c[2] as f64 * frac) as u8,
        ])
    })
}

fn classic() -> Palette {
    let stops = &[
        (0.0, [0, 7, 100]),
        (0.16, [32, 107, 203]),
        (0.42, [237, 255, 255]),
        (0.6425, [255, 170, 0]),
        (0.8575, [0, 2, 0]),
        (1.0, [0, 7, 100]),
    ];
    Palette::new("Classic", gradient_lut(stops))
}

fn fire() -> Palette {
    let stops = &[
        (0.0, [0, 0, 0]),
        (0.25, [128, 0, 0]),
        (0.5, [255, 128, 0]),
        (0.75, [255, 255, 0]),
        (1.0, [255, 255, 255]),
    ];
    Palette::new("Fire", gradient_lut(stops))
}

fn ocean() -> Palette {
    let stops = &[
        (0.0, [0, 0, 30]),
        (0.3, [0, 50, 120]),
        (0.6, [0, 150, 200]),
        (0.8, [100, 220, 255]),
        (1.0, [240, 255, 255]),
    ];
    Palette::new("Ocean", gradient_lut(stops))
}

fn neon() -> Palette {
    let stops = &[
        (0.0, [10, 0, 20]),
        (0.2, [80, 0, 150]),
        (0.4, [200, 0, 200]),
        (0.6, [0, 200, 255]),
        (0.8, [0, 255, 100]),
        (1.0, [10, 0, 20]),
    ];
    Palette::new("Neon", gradient_lut(stops))
}

fn rainbow() -> Palette {
    let stops = &[
        (0.0, [255, 0, 0]),
        (0.166, [255, 165, 0]),
        (0.333, [255, 255, 0]),
        (0.5, [0, 255, 0]),
        (0.666, [0, 0, 255]),
        (0.833, [148, 0, 211]),
        (1.0, [255, 0, 0]),
    ];
    Palette::new("Rainbow", gradient_lut(stops))
}

fn forest() -> Palette {
    let stops = &[
        (0.0, [0, 0, 0]),
        (0.33, [0, 180, 0]),
        (0.66, [200, 255, 0]),
        (1.0, [255, 255, 255]),
    ];
    Palette::new("Forest", gradient_lut(stops))
}

fn violet() -> Palette {
    let stops = &[
        (0.0, [0, 0, 0]),
        (0.33, [128, 0, 200]),
        (0.66, [255, 100, 255]),
        (1.0, [255, 255, 255]),
    ];
    Palette::new("Violet", gradient_lut(stops))
}

fn sunset() -> Palette {
    let stops = &[
        (0.0, [20, 0, 40]),
        (0.3, [180, 30, 80]),
        (0.6, [255, 120, 40]),
        (0.85, [255, 220, 120]),
        (1.0, [20, 0, 40]),
    ];
    Palette::new("Sunset", gradient_lut(stops))
}

fn ice() -> Palette {
    let stops = &[
        (0.0, [0, 0, 40]),
        (0.4, [80, 160, 255]),
        (0.7, [200, 240, 255]),
        (1.0, [255, 255, 255]),
    ];
    Palette::new("Ice", gradient_lut(stops))
}

fn grayscale() -> Palette {
    let stops = &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])];
    Palette::new("Grayscale", gradient_lut(stops))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
