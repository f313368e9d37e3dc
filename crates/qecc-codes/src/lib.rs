//! Textbook quantum error-correcting codes as circuit programs.
//!
//! Each code owns four sub-programs built on [`qecc_ir::Circuit`]: an
//! encoder, a syndrome extractor, a classically-conditioned corrector and a
//! decoder. They are exposed uniformly through [`QuantumCode`] and stitched
//! together by [`Experiment`].
//!
//! | Code | Layout | Corrects |
//! |------|--------|----------|
//! | [`ThreeQubitBitFlipCode`] | 3+2 | one X |
//! | [`ThreeQubitPhaseFlipCode`] | 3+2 | one Z |
//! | [`NineQubitShorCode`] | 9+6, 9+2, 9+8 | one X and/or one Z |
//! | [`SevenQubitSteaneCode`] | 7+6 | one X and one Z |
//!
//! # Example
//!
//! ```
//! use qecc_codes::{QuantumCode, ThreeQubitBitFlipCode, Correction};
//!
//! let code = ThreeQubitBitFlipCode::new().unwrap();
//! assert_eq!(code.layout().total(), 5);
//! assert_eq!(code.decode_syndrome("10").unwrap(), vec![Correction::x(1)]);
//! ```

pub mod bit_flip;
pub mod code;
pub mod error;
pub mod experiment;
pub mod pauli;
pub mod phase_flip;
pub mod shor;
pub mod steane;
pub mod syndrome;

pub use bit_flip::ThreeQubitBitFlipCode;
pub use code::{CodeLayout, QuantumCode};
pub use error::{CodeError, CodeResult};
pub use experiment::{Experiment, LOGICAL_REGISTER, Readout};
pub use pauli::{Correction, Pauli, PauliError};
pub use phase_flip::ThreeQubitPhaseFlipCode;
pub use shor::{NineQubitShorCode, ShorProtection};
pub use steane::SevenQubitSteaneCode;
pub use syndrome::{BIT_FLIP_REGISTER, PHASE_FLIP_REGISTER, SyndromeTable};
