use crate::error::{RadwalkError, RadwalkResult};

/// Monotonic reparameterization of progress controlling pacing of the
/// chord buildup. `Power` biases early progress toward few chords and late
/// progress toward a rapid fill.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    InCubic,
    Power { exponent: f64 },
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::InCubic => t * t * t,
            Self::Power { exponent } => t.powf(exponent),
        }
    }

    pub fn validate(self) -> RadwalkResult<()> {
        if let Self::Power { exponent } = self
            && (!exponent.is_finite() || exponent <= 0.0)
        {
            return Err(RadwalkError::validation(format!(
                "Power ease exponent must be finite and > 0, got {exponent}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 4] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::InCubic,
        Ease::Power { exponent: 1.8 },
    ];

    #[test]
    fn endpoints_are_exact() {
        for ease in ALL {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn monotonic_spot_check() {
        for ease in ALL {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b);
            assert!(b < c);
        }
    }

    #[test]
    fn input_is_clamped() {
        for ease in ALL {
            assert_eq!(ease.apply(-3.0), 0.0);
            assert_eq!(ease.apply(42.0), 1.0);
            assert_eq!(ease.apply(f64::NAN), 0.0);
        }
    }

    #[test]
    fn power_exponent_is_validated() {
        assert!(Ease::Power { exponent: 2.0 }.validate().is_ok());
        assert!(Ease::Power { exponent: 0.0 }.validate().is_err());
        assert!(Ease::Power { exponent: -1.0 }.validate().is_err());
        assert!(
            Ease::Power {
                exponent: f64::INFINITY
            }
            .validate()
            .is_err()
        );
        assert!(Ease::Linear.validate().is_ok());
    }
}
