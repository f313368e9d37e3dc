//! Single-qubit initial states for the logical qubit.

use num_complex::Complex64;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Tolerance on the squared norm of an initial state.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// A normalized single-qubit state `α|0⟩ + β|1⟩`.
///
/// Construction through [`QubitState::new`] rejects vectors that are not
/// unit-normalized, so a malformed state never reaches a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Amplitudes")]
pub struct QubitState {
    alpha: Complex64,
    beta: Complex64,
}

/// Unchecked wire form of [`QubitState`].
#[derive(Deserialize)]
struct Amplitudes {
    alpha: Complex64,
    beta: Complex64,
}

impl TryFrom<Amplitudes> for QubitState {
    type Error = IrError;

    fn try_from(raw: Amplitudes) -> IrResult<Self> {
        QubitState::new(raw.alpha, raw.beta)
    }
}

impl QubitState {
    /// |0⟩
    pub const ZERO: QubitState = QubitState {
        alpha: Complex64::new(1.0, 0.0),
        beta: Complex64::new(0.0, 0.0),
    };

    /// |1⟩
    pub const ONE: QubitState = QubitState {
        alpha: Complex64::new(0.0, 0.0),
        beta: Complex64::new(1.0, 0.0),
    };

    /// |+⟩ = (|0⟩ + |1⟩)/√2
    pub const PLUS: QubitState = QubitState {
        alpha: Complex64::new(FRAC_1_SQRT_2, 0.0),
        beta: Complex64::new(FRAC_1_SQRT_2, 0.0),
    };

    /// |−⟩ = (|0⟩ − |1⟩)/√2
    pub const MINUS: QubitState = QubitState {
        alpha: Complex64::new(FRAC_1_SQRT_2, 0.0),
        beta: Complex64::new(-FRAC_1_SQRT_2, 0.0),
    };

    /// Create a state from its two amplitudes.
    ///
    /// Fails with [`IrError::MalformedStateVector`] unless `|α|² + |β|² = 1`.
    pub fn new(alpha: Complex64, beta: Complex64) -> IrResult<Self> {
        let norm = alpha.norm_sqr() + beta.norm_sqr();
        if !norm.is_finite() || (norm - 1.0).abs() > NORM_TOLERANCE {
            return Err(IrError::MalformedStateVector { norm });
        }
        Ok(Self { alpha, beta })
    }

    /// Create a state from real amplitudes.
    pub fn from_real(alpha: f64, beta: f64) -> IrResult<Self> {
        Self::new(Complex64::new(alpha, 0.0), Complex64::new(beta, 0.0))
    }

    /// Draw a state uniformly over the Bloch sphere angles.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let theta: f64 = rng.gen_range(0.0..PI);
        let phi: f64 = rng.gen_range(0.0..2.0 * PI);
        Self {
            alpha: Complex64::new((theta / 2.0).cos(), 0.0),
            beta: Complex64::from_polar((theta / 2.0).sin(), phi),
        }
    }

    /// Amplitude of |0⟩.
    pub fn alpha(&self) -> Complex64 {
        self.alpha
    }

    /// Amplitude of |1⟩.
    pub fn beta(&self) -> Complex64 {
        self.beta
    }

    /// Measurement probabilities `(P(0), P(1))` in the computational basis.
    pub fn probabilities(&self) -> (f64, f64) {
        (self.alpha.norm_sqr(), self.beta.norm_sqr())
    }
}

impl fmt::Display for QubitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}{:+.6}i)|0⟩ + ({:.6}{:+.6}i)|1⟩",
            self.alpha.re, self.alpha.im, self.beta.re, self.beta.im
        )
    }
}
