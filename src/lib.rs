//! # matrt
//!
//! Runtime for a dynamically typed, MATLAB-style numeric language: scalar
//! and N-dimensional array values of real, complex and logical numbers,
//! with growth on write, real/complex promotion and broadcasting operators.
//! Compiled scripts call into this crate for every operator and indexed
//! access. no-std compatible (requires `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use matrt::math::{plus, times};
//! use matrt::{Array, ColonGenerator, Value};
//!
//! // x = 1:4; x(6) = 10
//! let mut x = Value::from(ColonGenerator::unit(1.0, 4.0).to_array());
//! x.set(&[6], 10.0).unwrap();
//! assert_eq!(x.dims(), &[1, 6]);
//!
//! // y = 2 .* x + 1
//! let y = plus(&times(&Value::Real(2.0), &x).unwrap(), &Value::Real(1.0)).unwrap();
//! assert_eq!(y.get(&[5]).unwrap(), Value::Real(1.0));
//! assert_eq!(y.get(&[6]).unwrap(), Value::Real(21.0));
//! ```
//!
//! ## Modules
//!
//! - [`value`]: the [`Value`] sum type (real, logical and complex scalars,
//!   arrays). Scalars act as `1x1` arrays.
//!
//! - [`array`]: [`Array`], column-major N-d storage with separate real and
//!   optional imaginary buffers and a capacity that may exceed the element
//!   count. Indexing, growth on write (amortized doubling), promotion to
//!   complex and explicit demotion. [`ElementKind`] tags `Double`, `Single`
//!   and `Logical` storage.
//!
//! - [`ops`]: strategy traits ([`ops::Operator`], [`ops::Comparator`],
//!   [`ops::LogicalOperator`]) and the generic broadcasting drivers.
//!
//! - [`math`]: the public operator API (`plus`, `mtimes`, `mldivide`, ...).
//!
//! - [`colon`]: the `start:step:stop` range generator.
//!
//! - [`concat`]: `[a, b]` / `[a; b]` and N-way concatenation.
//!
//! - [`complex`]: robust complex multiply, divide and power.
//!
//! - [`linalg`]: the [`LinalgBackend`](linalg::LinalgBackend) interface and
//!   the pure-Rust `DenseBackend` (LU, pivoted QR, gemm, transpose).
//!
//! - [`traits`]: [`LinalgScalar`], the element bound of the dense kernels.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events: `trace` on storage reallocation,
//! `debug` on promotion, demotion and backend dispatch, `warn` for solver
//! warnings raised through the plain `math::mldivide` / `math::mrdivide`.
//! No subscriber is installed.
//!
//! ## Cargo features
//!
//! | Feature  | Default  | Description |
//! |----------|----------|-------------|
//! | `std`    | yes      | Hardware FPU via system libm |
//! | `linalg` | yes      | `DenseBackend` and the plain matrix functions in [`math`] |
//! | `libm`   | baseline | Pure-Rust software float fallback |
//! | `all`    | no       | All features: `std` + `linalg` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod array;
pub mod colon;
pub mod complex;
pub mod concat;
pub mod error;
pub mod linalg;
pub mod math;
pub mod ops;
pub mod traits;
pub mod value;

pub use array::{Array, ElementKind};
pub use colon::ColonGenerator;
pub use error::{Error, Result};
pub use traits::LinalgScalar;
pub use value::Value;

pub use num_complex::Complex64;
