// src/lib.rs
// DTA Reader Library - Public API

//! # DTA Reader
//!
//! A Rust library for reading repeating chrono-amperometry experiments
//! exported by Gamry potentiostats in EXPLAIN format (`.DTA` files).
//!
//! ## Features
//!
//! - Typed getters for the CHRONOA header fields (step potentials and
//!   durations, current range, cycle count, instrument identity)
//! - Canonical time/potential/current column selection per recorded curve
//! - Loader-agnostic: bring your own EXPLAIN parser via the [`Experiment`]
//!   trait
//! - Proper error handling
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use dta_reader::{
//!     Curve, Experiment, Header, RepeatingChronoAmperometry, Result,
//!     COL_CURRENT, COL_POTENTIAL, COL_TIME,
//! };
//!
//! // An EXPLAIN parser lives outside this crate; any type that fills in a
//! // header and curve tables will do.
//! #[derive(Default)]
//! struct CannedLoader {
//!     loaded: bool,
//!     header: Header,
//!     curves: Vec<Curve>,
//! }
//!
//! impl Experiment for CannedLoader {
//!     fn load(&mut self, _path: &Path) -> Result<()> {
//!         self.header.insert("TAG", "CHRONOA");
//!         self.header.insert("IERANGE", "3");
//!         self.header.insert("VSTEP1", 0.5);
//!         let mut curve = Curve::new();
//!         curve.push_column(COL_TIME, vec![0.0, 0.1, 0.2])?;
//!         curve.push_column(COL_POTENTIAL, vec![0.5, 0.5, 0.5])?;
//!         curve.push_column(COL_CURRENT, vec![3e-6, 2e-6, 1e-6])?;
//!         self.curves.push(curve);
//!         self.loaded = true;
//!         Ok(())
//!     }
//!
//!     fn loaded(&self) -> bool {
//!         self.loaded
//!     }
//!
//!     fn header(&self) -> &Header {
//!         &self.header
//!     }
//!
//!     fn curves(&self) -> &[Curve] {
//!         &self.curves
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let mut ca = RepeatingChronoAmperometry::new(CannedLoader::default());
//!     ca.load("experiment.DTA")?;
//!
//!     println!("current range: {}", ca.current_range()?);
//!     println!("samples: {}", ca.sample_count(0)?);
//!
//!     let curve = ca.curve(0)?;
//!     println!("first sample: {} A at {} s", curve.current[0], curve.time[0]);
//!     Ok(())
//! }
//! ```

mod chronoa;
mod explain;

pub use chronoa::{CurveView, RepeatingChronoAmperometry};
pub use explain::{
    Curve, DtaError, Experiment, Header, HeaderValue, Result, COL_CURRENT, COL_POTENTIAL, COL_TIME,
};
