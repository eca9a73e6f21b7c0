use serde::{Deserialize, Serialize};

/// A point on the complex plane as two `f64` components.
///
/// The iteration loop works on bare `f64` pairs; this type is used where a
/// coordinate is passed around as a value (view center, cursor readout).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_named_fields() {
        let json = serde_json::to_string(&Complex::new(-0.75, 0.1)).unwrap();
        assert_eq!(json, r#"{"re":-0.75,"im":0.1}"#);
    }
}
