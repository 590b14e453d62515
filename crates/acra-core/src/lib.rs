//! Batch driver for the ACRANEB2 single-column shortwave radiation solver.
//!
//! Each solar-zenith case is rendered into a namelist, solved by the external
//! executable and folded into aligned optical-thickness and optical-depth
//! series.

pub mod common;
pub mod domain;
pub mod modules;
pub mod numerics;
